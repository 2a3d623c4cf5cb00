use logs_query::{
    Clause, LogsQuery, build_logs_query_for_server, parse_logs_query, quote_query_value,
    validate_logs_query,
};

fn complex_clauses() -> Vec<Clause> {
    parse_logs_query(r#"name:"Eric Thomas" workspace:'Chilly McWilly' project_id:9 freetext query"#)
}

#[test]
fn test_server_query_normalizes_quotes() {
    let clauses = vec![
        Clause::body(r#""test: "ing""#, 0),
        Clause::keyed("user", r#"'Chilly "McWilly"'"#, 10),
    ];
    assert_eq!(
        build_logs_query_for_server(&clauses),
        r#""test: \"ing" user:"Chilly \"McWilly\"""#
    );
}

#[test]
fn test_server_query_for_complex_query() {
    assert_eq!(
        build_logs_query_for_server(&complex_clauses()),
        r#"name:"Eric Thomas" workspace:"Chilly McWilly" project_id:"9" "freetext query""#
    );
}

#[test]
fn test_server_query_is_stable_when_reparsed() {
    let first = build_logs_query_for_server(&complex_clauses());
    let second = build_logs_query_for_server(&parse_logs_query(&first));
    assert_eq!(first, second);
}

#[test]
fn test_server_query_with_embedded_quotes_survives_reparse() {
    let first = build_logs_query_for_server(&parse_logs_query(r#"msg:'say "hi there"'"#));
    assert_eq!(first, r#"msg:"say \"hi there\"""#);

    let reparsed = parse_logs_query(&first);
    assert_eq!(reparsed, vec![Clause::keyed("msg", r#""say \"hi there\"""#, 0)]);
    assert_eq!(build_logs_query_for_server(&reparsed), first);
}

#[test]
fn test_server_query_with_backslashes_survives_reparse() {
    let clauses = vec![
        Clause::keyed("path", r"'C:\logs\'", 0),
        Clause::body(r#"ends with \"#, 16),
    ];
    let first = build_logs_query_for_server(&clauses);
    assert_eq!(first, r#"path:"C:\\logs\\" "ends with \\""#);
    assert_eq!(build_logs_query_for_server(&parse_logs_query(&first)), first);
}

#[test]
fn test_server_query_keeps_separate_phrases() {
    let clauses = parse_logs_query(r#""a" b "c""#);
    assert_eq!(clauses, vec![Clause::body(r#""a" b "c""#, 0)]);

    let first = build_logs_query_for_server(&clauses);
    assert_eq!(first, r#""\"a\" b \"c\"""#);
    assert_eq!(build_logs_query_for_server(&parse_logs_query(&first)), first);
}

#[test]
fn test_validate_complex_query() {
    assert!(validate_logs_query(&complex_clauses()));
}

#[test]
fn test_validate_rejects_empty_value() {
    let mut clauses = complex_clauses();
    clauses[0].value = String::new();
    assert!(!validate_logs_query(&clauses));
}

#[test]
fn test_quote_query_value_cases() {
    assert_eq!(quote_query_value("a test query"), r#""a test query""#);
    assert_eq!(quote_query_value(r#""a test query""#), r#""a test query""#);
    assert_eq!(quote_query_value("'a test query'"), "'a test query'");
    assert_eq!(quote_query_value(1234), "1234");
    assert_eq!(quote_query_value("'x'"), "'x'");
}

#[test]
fn test_quote_query_value_is_idempotent() {
    let values = [
        "",
        "word",
        "two words",
        r#"say "hi""#,
        r#""already""#,
        "'single'",
        "'mismatched\"",
        "\\",
    ];
    for value in values {
        let once = quote_query_value(value);
        assert_eq!(quote_query_value(once.clone()), once, "value: {value:?}");
    }
}

#[test]
fn test_logs_query_round_trips_json() {
    let query = LogsQuery::parse(r#"level:error "disk full" host:'db 1'"#);
    let json = serde_json::to_string(&query.clauses).expect("clauses serialize");
    let clauses: Vec<Clause> = serde_json::from_str(&json).expect("clauses deserialize");
    assert_eq!(LogsQuery::from(clauses), query);
}
