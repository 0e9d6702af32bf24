use safesql::prelude::*;
use safesql::{BackslashEscaper, QuoteDoublingEscaper, QuoteStyle, render_statements};

#[test]
fn injection_payloads_stay_inside_their_literal() {
    let payload = "x\"; DROP TABLE users; --";
    let stmt = Statement::with_args("SELECT * FROM users WHERE name = %s", args![payload]);

    let sql = Renderer::new(&BackslashEscaper).render(&stmt).unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM users WHERE name = "x\"; DROP TABLE users; --""#
    );

    // Without an escaper the payload is still wrapped, just not escaped.
    let raw = stmt.render_insecure().unwrap();
    assert_eq!(raw, format!("SELECT * FROM users WHERE name = \"{payload}\""));
}

#[test]
fn identifiers_cannot_break_out() {
    let stmt = Statement::with_args("SELECT * FROM %T", args!["users` WHERE 1=1 --"]);
    assert_eq!(
        stmt.render_insecure().unwrap(),
        "SELECT * FROM `users`` WHERE 1=1 --`"
    );
}

#[test]
fn incremental_where_clause() {
    let mut filter = Value::PairList(Vec::new());
    filter.push_pair("status", "active").unwrap();
    filter
        .extend_pairs([("deleted_at", Value::Null), ("org_id", Value::from(3))])
        .unwrap();

    let stmt = Statement::with_args("SELECT id FROM %T WHERE %W", args!["accounts", filter]);
    assert_eq!(
        stmt.render_insecure().unwrap(),
        concat!(
            "SELECT id FROM `accounts` WHERE `status` = \"active\" ",
            "AND `deleted_at` IS NULL AND `org_id` = 3",
        )
    );
}

#[test]
fn composed_statement_with_sub_query() {
    let inner = Statement::with_args(
        "SELECT user_id FROM %T WHERE %C%=d",
        args!["bans", "active", 1],
    );
    let outer = Statement::with_args("DELETE FROM %T WHERE id IN (%Q)", args!["sessions", inner]);
    let tail = Statement::with_args(" LIMIT %d", args![100]);

    let sql = (outer + tail).render(Some(&BackslashEscaper)).unwrap();
    assert_eq!(
        sql,
        concat!(
            "DELETE FROM `sessions` WHERE id IN ",
            "(SELECT user_id FROM `bans` WHERE `active` = 1) LIMIT 100",
        )
    );
}

#[test]
fn bulk_insert() {
    let rows: Value = [(1, "ann"), (2, "o'neil")]
        .into_iter()
        .map(|(id, name)| Value::List(vec![Value::from(id), Value::from(name)]))
        .collect();
    let stmt = Statement::with_args(
        "INSERT INTO %T (%LC) VALUES %V",
        args!["people", Value::from_iter(["id", "name"]), rows],
    );
    let renderer = Renderer::new(&QuoteDoublingEscaper)
        .config(RenderConfig::new().with_quote(QuoteStyle::Single));
    assert_eq!(
        renderer.render(&stmt).unwrap(),
        "INSERT INTO `people` (`id`, `name`) VALUES (1, 'ann'), (2, 'o''neil')"
    );
}

#[test]
fn batch_equals_joined_renders() {
    let s1 = Statement::with_args("UPDATE t SET %U", args![pairs! { "a" => 1 }]);
    let s2 = Statement::with_args("SELECT %s", args!["done"]);
    let escaper = BackslashEscaper;

    let expected = format!(
        "{};{}",
        s1.render(Some(&escaper)).unwrap(),
        s2.render(Some(&escaper)).unwrap()
    );
    let statements = vec![s1, s2];
    assert_eq!(render_statements(&statements, Some(&escaper)).unwrap(), expected);

    let mut batch = StatementBatch::new(statements);
    assert_eq!(batch.render_all(Some(&escaper)).unwrap(), expected);
}

#[test]
fn errors_carry_offsets_and_messages() {
    let err = Statement::new("SELECT %d").render_insecure().unwrap_err();
    assert_eq!(err.offset(), Some(8));
    assert!(err.is_render_error());
    assert_eq!(
        err.to_string(),
        "Parse error at offset 8: too few parameters for query"
    );

    let err = Value::from(1).as_str().unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.offset(), None);
}

#[test]
fn renderer_config_from_json() {
    let config: RenderConfig =
        serde_json::from_str(r#"{ "quote": "single", "require_escaper": true }"#).unwrap();
    let insecure = Renderer::insecure().config(config.clone());
    assert_eq!(
        insecure.render_template("%s", &args!["a"]).unwrap_err(),
        SqlError::EscaperRequired { offset: 1 }
    );

    let secure = Renderer::new(&BackslashEscaper).config(config);
    assert_eq!(secure.render_template("%s", &args!["a"]).unwrap(), "'a'");
}
