//! Small builders for the OpenAPI fragments modules hand to the router.

use serde_json::{json, Value};

/// A required string path parameter.
pub fn path_parameter(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

/// A JSON response whose body is the named component schema.
pub fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

/// A JSON response carrying the shared `ErrorResponse` body.
pub fn error_response(description: &str) -> Value {
    json_response(description, "ErrorResponse")
}
