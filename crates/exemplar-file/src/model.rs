use exemplar_core::Value;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contents of one exemplar file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExemplarFile {
    /// Generator declarations, evaluated in order.
    #[serde(default, rename = "generator")]
    pub generators: Vec<GeneratorDecl>,
}

/// One generator declaration.
///
/// Exactly one of `block`, `class`, `method` or `value` is expected; the
/// registration call decides whether the combination is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratorDecl {
    /// Attribute the generator produces values for.
    pub attribute: String,
    /// Name of a block in the block catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// Name of a producer in the producer catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Name of a class method on the target type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Static value returned on every call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LiteralValue>,
    /// First value returned by a block generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<LiteralValue>,
}

/// Literal accepted in exemplar files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<LiteralValue>),
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Bool(value) => Value::Bool(value),
            LiteralValue::Int(value) => Value::Int(value),
            LiteralValue::Float(value) => Value::Float(value),
            LiteralValue::Text(value) => Value::Text(value),
            LiteralValue::List(values) => {
                Value::List(values.into_iter().map(Value::from).collect())
            }
        }
    }
}
