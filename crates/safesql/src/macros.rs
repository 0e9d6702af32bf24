/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// Each expression goes through `Value::from`.
///
/// ```
/// use safesql::{Value, args};
///
/// let args = args![42, "alice", None::<i64>, 2.5];
/// assert_eq!(args[0], Value::Int(42));
/// assert_eq!(args[2], Value::Null);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ( $( $arg:expr ),+ $(,)? ) => {
        ::std::vec![ $( $crate::Value::from($arg) ),+ ]
    };
}

/// Build a pair-list `Value` from `key => value` entries, keeping their order.
///
/// ```
/// use safesql::{Statement, Value, args, pairs};
///
/// let set = pairs! { "name" => "bob", "deleted_at" => Value::Null };
/// let stmt = Statement::with_args("UPDATE users SET %U", args![set]);
/// assert_eq!(
///     stmt.render_insecure().unwrap(),
///     "UPDATE users SET `name` = \"bob\", `deleted_at` = NULL"
/// );
/// ```
#[macro_export]
macro_rules! pairs {
    () => {
        $crate::Value::PairList(::std::vec::Vec::new())
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {
        $crate::Value::PairList(::std::vec![
            $( (::std::string::String::from($key), $crate::Value::from($value)) ),+
        ])
    };
}
