use indexmap::IndexMap;
use serde_json::json;

use super::support::{compile, existing_functions, function, json_body, json_endpoint};
use crate::error::Error;

#[test]
fn test_write_methods_require_consumes() {
  for method in ["post", "put", "patch", "delete"] {
    let paths = json!({
      "/widgets": {
        method: { "x-serverless": { "functionName": "widgets", "function": function("h.widgets") } }
      }
    });
    let err = compile(paths, &mut IndexMap::new()).unwrap_err();
    let upper = method.to_uppercase();
    assert!(
      matches!(&err, Error::MissingConsumes { method: m, path } if *m == upper && path == "/widgets"),
      "unexpected error for {method}: {err}"
    );
    assert!(err.to_string().contains("/widgets"));
    assert!(err.to_string().contains(&upper));
  }
}

#[test]
fn test_empty_consumes_counts_as_missing() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": [],
        "x-serverless": { "functionName": "widgets", "function": function("h.widgets") }
      }
    }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::MissingConsumes { .. }));
}

#[test]
fn test_read_methods_do_not_require_consumes() {
  let paths = json!({
    "/widgets": {
      "get": { "x-serverless": { "functionName": "list", "function": function("h.list") } },
      "head": { "x-serverless": { "functionName": "list" } },
      "options": { "x-serverless": { "functionName": "list" } }
    }
  });
  let mut functions = IndexMap::new();
  let compilation = compile(paths, &mut functions).unwrap();
  assert!(compilation.models.is_empty());
  assert_eq!(functions["list"].event_count(), 3);
}

#[test]
fn test_json_endpoint_requires_body() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": ["application/json"],
        "parameters": [{ "in": "query", "name": "dryRun" }],
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::MissingBody { .. }));
  assert_eq!(err.to_string(), "Resource /widgets must define body for method POST");
}

#[test]
fn test_json_body_requires_schema() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": ["application/json"],
        "parameters": [{ "in": "body", "name": "body" }],
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::MissingSchema { .. }));
  assert_eq!(
    err.to_string(),
    "Must specify schema for JSON request body. Endpoint: POST /widgets"
  );
}

#[test]
fn test_non_json_endpoint_skips_body_checks() {
  let paths = json!({
    "/upload": {
      "post": {
        "consumes": ["multipart/form-data"],
        "parameters": [{ "in": "formData", "name": "file" }],
        "x-serverless": { "functionName": "upload", "function": function("h.upload") }
      }
    }
  });
  let compilation = compile(paths, &mut IndexMap::new()).unwrap();
  assert!(compilation.models.is_empty());
  assert_eq!(compilation.stats.events_attached, 1);
}

#[test]
fn test_duplicate_model_name_conflicts_even_with_identical_schema() {
  let paths = json!({
    "/widgets": { "post": json_endpoint("create", Some(function("h.create"))) },
    "widgets": { "post": json_endpoint("create", None) }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  match err {
    Error::ConflictingModel { model, method, path } => {
      assert_eq!(model, "RequestBodyPOSTWidgets");
      assert_eq!(method, "POST");
      assert_eq!(path, "widgets");
    }
    other => panic!("expected model conflict, got {other}"),
  }
}

#[test]
fn test_normalization_collisions_conflict() {
  // Case is folded per segment, so these two paths share a model name.
  let paths = json!({
    "/Widgets": { "put": json_endpoint("update", Some(function("h.update"))) },
    "/WIDGETS": { "put": json_endpoint("update", None) }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::ConflictingModel { .. }));
}

#[test]
fn test_every_endpoint_requires_serverless_extension() {
  let paths = json!({
    "/widgets": { "get": {} }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::MissingServerlessConfig { .. }));
  assert_eq!(err.to_string(), "No 'x-serverless' property defined for GET /widgets");
}

#[test]
fn test_function_name_is_required() {
  for serverless in [json!({}), json!({ "functionName": "" }), json!({ "function": function("h") })] {
    let paths = json!({ "/widgets": { "get": { "x-serverless": serverless } } });
    let err = compile(paths, &mut IndexMap::new()).unwrap_err();
    assert!(matches!(err, Error::MissingFunctionName { .. }), "got {err}");
  }
}

#[test]
fn test_new_function_requires_definition() {
  let paths = json!({
    "/widgets": { "post": json_endpoint("create", None) }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  match err {
    Error::MissingFunctionDefinition { function, method, path } => {
      assert_eq!(function, "create");
      assert_eq!(method, "POST");
      assert_eq!(path, "/widgets");
    }
    other => panic!("expected missing function definition, got {other}"),
  }
}

#[test]
fn test_existing_function_rejects_redefinition() {
  let paths = json!({
    "/widgets": { "post": json_endpoint("create", Some(function("h.create"))) }
  });
  let mut functions = existing_functions(&["create"]);
  let err = compile(paths, &mut functions).unwrap_err();
  assert!(matches!(err, Error::FunctionAlreadyDefined { ref function, .. } if function == "create"));
  assert_eq!(functions["create"].event_count(), 0);
}

#[test]
fn test_redefinition_within_one_document() {
  let paths = json!({
    "/widgets": {
      "post": json_endpoint("widgets", Some(function("h.widgets"))),
      "put": json_endpoint("widgets", Some(function("h.widgets")))
    }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  assert!(matches!(err, Error::FunctionAlreadyDefined { ref method, .. } if method == "PUT"));
}

#[test]
fn test_first_error_stops_compilation() {
  let paths = json!({
    "/first": { "post": json_endpoint("first", Some(function("h.first"))) },
    "/broken": { "post": { "x-serverless": { "functionName": "broken" } } },
    "/last": { "post": json_endpoint("last", Some(function("h.last"))) }
  });
  let mut functions = IndexMap::new();
  let err = compile(paths, &mut functions).unwrap_err();
  assert!(matches!(err, Error::MissingConsumes { ref path, .. } if path == "/broken"));
  assert!(functions.contains_key("first"));
  assert!(!functions.contains_key("last"));
}

#[test]
fn test_errors_are_validation_errors() {
  let err = compile(json!({ "/x": { "get": {} } }), &mut IndexMap::new()).unwrap_err();
  assert!(err.is_validation());
}

#[test]
fn test_body_parameter_without_json_consumes_is_ignored() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": ["application/xml"],
        "parameters": json_body(json!({ "type": "object" })),
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let compilation = compile(paths, &mut IndexMap::new()).unwrap();
  assert!(compilation.models.is_empty());
}

#[test]
fn test_recursive_body_schema_cannot_become_a_model() {
  let paths = json!({
    "/tree": {
      "post": {
        "consumes": ["application/json"],
        "parameters": json_body(json!({
          "type": "object",
          "properties": { "children": { "type": "array", "items": { "$ref": "#/definitions/Node" } } }
        })),
        "x-serverless": { "functionName": "tree", "function": function("h.tree") }
      }
    }
  });
  let err = compile(paths, &mut IndexMap::new()).unwrap_err();
  match &err {
    Error::RecursiveSchema { reference, method, path } => {
      assert_eq!(reference, "#/definitions/Node");
      assert_eq!(method, "POST");
      assert_eq!(path, "/tree");
    }
    other => panic!("expected recursive schema, got {other}"),
  }
  assert!(err.to_string().ends_with("Endpoint: POST /tree"));
}
