use exemplar_core::Value;
use exemplar_file::{
    ExemplarFileError, GeneratorDecl, LiteralValue, exemplar_json_schema_pretty, parse_exemplar,
    read_exemplar,
};

const USER_EXEMPLAR: &str = r#"
[[generator]]
attribute = "login"
block = "succ"
start = "frobnitz"

[[generator]]
attribute = "email"
class = "faker.email"

[[generator]]
attribute = "code"
method = "next_code"

[[generator]]
attribute = "tags"
value = ["admin", "staff"]
"#;

#[test]
fn declarations_parse_in_order() {
    let file = parse_exemplar(USER_EXEMPLAR).expect("parse exemplar");
    let attributes: Vec<&str> = file
        .generators
        .iter()
        .map(|decl| decl.attribute.as_str())
        .collect();
    assert_eq!(attributes, vec!["login", "email", "code", "tags"]);

    assert_eq!(
        file.generators[0],
        GeneratorDecl {
            attribute: "login".to_string(),
            block: Some("succ".to_string()),
            class: None,
            method: None,
            value: None,
            start: Some(LiteralValue::Text("frobnitz".to_string())),
        }
    );
}

#[test]
fn literal_values_convert_to_core_values() {
    let file = parse_exemplar(USER_EXEMPLAR).expect("parse exemplar");
    let tags = file.generators[3].value.clone().expect("literal value");
    assert_eq!(
        Value::from(tags),
        Value::List(vec![Value::from("admin"), Value::from("staff")])
    );
}

#[test]
fn empty_file_has_no_generators() {
    let file = parse_exemplar("").expect("parse empty exemplar");
    assert!(file.generators.is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    let result = parse_exemplar(
        r#"
[[generator]]
attribute = "name"
sequence = "user{n}"
"#,
    );
    assert!(matches!(result, Err(ExemplarFileError::Toml(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("exemplar_file_missing_exemplar.toml");
    let result = read_exemplar(&path);
    assert!(matches!(result, Err(ExemplarFileError::Io(_))));
}

#[test]
fn json_schema_describes_generator_tables() {
    let schema = exemplar_json_schema_pretty().expect("emit schema");
    assert!(schema.contains("\"generator\""));
    assert!(schema.contains("GeneratorDecl"));
}
