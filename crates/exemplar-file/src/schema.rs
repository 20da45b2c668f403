use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::errors::Result;
use crate::model::ExemplarFile;

/// Emit the JSON Schema for exemplar files.
pub fn exemplar_json_schema() -> RootSchema {
    schema_for!(ExemplarFile)
}

/// Pretty-printed JSON Schema, as written next to exemplar directories.
pub fn exemplar_json_schema_pretty() -> Result<String> {
    Ok(serde_json::to_string_pretty(&exemplar_json_schema())?)
}
