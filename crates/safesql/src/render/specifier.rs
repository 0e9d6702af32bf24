use crate::error::{SqlError, SqlResult};

/// Value kind demanded by a scalar code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarKind {
    Int,
    Str,
    Double,
    /// Any scalar or string. Only used for `%V` cells and pair-list values,
    /// never parsed from a template.
    Any,
}

impl ScalarKind {
    fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'd' => Some(ScalarKind::Int),
            b's' => Some(ScalarKind::Str),
            b'f' => Some(ScalarKind::Double),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            ScalarKind::Int => 'd',
            ScalarKind::Str => 's',
            ScalarKind::Double => 'f',
            ScalarKind::Any => 'v',
        }
    }

    pub(crate) fn expected(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Str => "string",
            ScalarKind::Double => "double",
            ScalarKind::Any => "scalar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListElement {
    Scalar(ScalarKind),
    Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conjunction {
    Or,
    And,
}

impl Conjunction {
    pub(crate) fn separator(self) -> &'static str {
        match self {
            Conjunction::Or => " OR ",
            Conjunction::And => " AND ",
        }
    }
}

/// A parsed `%` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Specifier {
    /// `%%`
    Percent,
    /// `%d`, `%s`, `%f`
    Scalar(ScalarKind),
    /// `%T`, `%C`
    Identifier(char),
    /// `%K`
    Comment,
    /// `%=d`, `%=s`, `%=f`
    Compare(ScalarKind),
    /// `%V`
    Values,
    /// `%LO`, `%LA`
    Clause(Conjunction),
    /// `%Ld`, `%Ls`, `%Lf`, `%LC`
    List(ListElement),
    /// `%U`
    Set,
    /// `%W`
    Where,
    /// `%Q`
    Raw,
}

impl Specifier {
    /// Parse the code whose first letter is at `template[at]` (just after `%`).
    ///
    /// Returns the specifier and the index of its last byte.
    pub(crate) fn parse(template: &str, at: usize) -> SqlResult<(Specifier, usize)> {
        let bytes = template.as_bytes();
        let Some(&letter) = bytes.get(at) else {
            return Err(SqlError::UnterminatedSpecifier { offset: at });
        };

        if let Some(kind) = ScalarKind::from_letter(letter) {
            return Ok((Specifier::Scalar(kind), at));
        }
        let spec = match letter {
            b'%' => Specifier::Percent,
            b'T' | b'C' => Specifier::Identifier(letter as char),
            b'K' => Specifier::Comment,
            b'V' => Specifier::Values,
            b'U' => Specifier::Set,
            b'W' => Specifier::Where,
            b'Q' => Specifier::Raw,
            b'=' => {
                let second = second_letter(template, at)?;
                let kind = ScalarKind::from_letter(second)
                    .ok_or_else(|| unknown(template, at + 1, "%="))?;
                return Ok((Specifier::Compare(kind), at + 1));
            }
            b'L' => {
                let second = second_letter(template, at)?;
                let spec = match second {
                    b'O' => Specifier::Clause(Conjunction::Or),
                    b'A' => Specifier::Clause(Conjunction::And),
                    b'C' => Specifier::List(ListElement::Identifier),
                    other => match ScalarKind::from_letter(other) {
                        Some(kind) => Specifier::List(ListElement::Scalar(kind)),
                        None => return Err(unknown(template, at + 1, "%L")),
                    },
                };
                return Ok((spec, at + 1));
            }
            _ => return Err(unknown(template, at, "%")),
        };
        Ok((spec, at))
    }

    /// Template spelling, for error messages.
    pub(crate) fn code(self) -> String {
        match self {
            Specifier::Percent => "%%".to_string(),
            Specifier::Scalar(kind) => format!("%{}", kind.letter()),
            Specifier::Identifier(letter) => format!("%{letter}"),
            Specifier::Comment => "%K".to_string(),
            Specifier::Compare(kind) => format!("%={}", kind.letter()),
            Specifier::Values => "%V".to_string(),
            Specifier::Clause(Conjunction::Or) => "%LO".to_string(),
            Specifier::Clause(Conjunction::And) => "%LA".to_string(),
            Specifier::List(ListElement::Identifier) => "%LC".to_string(),
            Specifier::List(ListElement::Scalar(kind)) => format!("%L{}", kind.letter()),
            Specifier::Set => "%U".to_string(),
            Specifier::Where => "%W".to_string(),
            Specifier::Raw => "%Q".to_string(),
        }
    }

    /// Whether the code consumes an argument.
    pub(crate) fn takes_argument(self) -> bool {
        self != Specifier::Percent
    }
}

fn second_letter(template: &str, at: usize) -> SqlResult<u8> {
    template
        .as_bytes()
        .get(at + 1)
        .copied()
        .ok_or(SqlError::UnterminatedSpecifier { offset: at + 1 })
}

fn unknown(template: &str, at: usize, prefix: &str) -> SqlError {
    // `at` may point into a multi-byte character; report the whole character.
    let start = (0..=at)
        .rev()
        .find(|i| template.is_char_boundary(*i))
        .unwrap_or(0);
    let ch = template[start..].chars().next().unwrap_or('?');
    SqlError::UnknownSpecifier {
        offset: at,
        specifier: format!("{prefix}{ch}"),
    }
}
