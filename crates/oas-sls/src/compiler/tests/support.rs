use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::{
  compiler::{Compilation, SpecCompiler},
  document::{ApiDescription, from_value},
  error::Result,
  naming::AwsNaming,
  service::FunctionDefinition,
};

pub(super) fn description(paths: Value) -> ApiDescription {
  from_value(json!({ "swagger": "2.0", "paths": paths })).expect("valid test description")
}

pub(super) fn compile(paths: Value, functions: &mut IndexMap<String, FunctionDefinition>) -> Result<Compilation> {
  SpecCompiler::new(&AwsNaming).compile(&description(paths), functions)
}

pub(super) fn function(handler: &str) -> Value {
  json!({ "handler": handler })
}

pub(super) fn json_body(schema: Value) -> Value {
  json!([{ "in": "body", "name": "body", "schema": schema }])
}

/// A JSON-consuming POST endpoint targeting `function_name`, optionally
/// carrying a fresh function definition.
pub(super) fn json_endpoint(function_name: &str, definition: Option<Value>) -> Value {
  let mut serverless = json!({ "functionName": function_name });
  if let Some(definition) = definition {
    serverless["function"] = definition;
  }
  json!({
    "consumes": ["application/json"],
    "parameters": json_body(json!({ "type": "object" })),
    "x-serverless": serverless
  })
}

pub(super) fn existing_functions(names: &[&str]) -> IndexMap<String, FunctionDefinition> {
  names
    .iter()
    .map(|name| {
      let definition: FunctionDefinition = serde_json::from_value(function(&format!("handler.{name}"))).unwrap();
      ((*name).to_string(), definition)
    })
    .collect()
}
