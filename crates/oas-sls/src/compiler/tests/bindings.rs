use indexmap::IndexMap;
use serde_json::json;

use super::support::{compile, description, existing_functions, function, json_body, json_endpoint};
use crate::{
  compiler::{CompileWarning, SpecCompiler},
  naming::AwsNaming,
};

#[test]
fn test_compile_single_widget_endpoint() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": ["application/json"],
        "parameters": json_body(json!({ "type": "object" })),
        "x-serverless": {
          "functionName": "createWidget",
          "function": { "handler": "widgets.create" }
        }
      }
    }
  });
  let mut functions = IndexMap::new();
  let compilation = compile(paths, &mut functions).unwrap();

  assert_eq!(compilation.models.schemas["RequestBodyPOSTWidgets"], json!({ "type": "object" }));
  assert_eq!(
    compilation.models.model_for("widgets", "post"),
    Some("RequestBodyPOSTWidgets")
  );

  let created = &functions["createWidget"];
  assert_eq!(created.properties["handler"], "widgets.create");
  assert_eq!(
    created.events,
    Some(vec![json!({
      "http": { "path": "widgets", "method": "post", "integration": "lambda" }
    })])
  );

  let stats = &compilation.stats;
  assert_eq!(stats.endpoints_compiled, 1);
  assert_eq!(stats.models_registered, 1);
  assert_eq!(stats.functions_created, 1);
  assert_eq!(stats.events_attached, 1);
  assert!(stats.warnings.is_empty());
}

#[test]
fn test_lambda_proxy_integration() {
  let cases = [
    (json!(true), "lambda-proxy"),
    (json!("yes"), "lambda-proxy"),
    (json!(1), "lambda-proxy"),
    (json!(false), "lambda"),
    (json!(0), "lambda"),
    (json!(""), "lambda"),
    (json!(null), "lambda"),
  ];
  for (flag, expected) in cases {
    let paths = json!({
      "/ping": {
        "get": { "x-serverless": { "functionName": "ping", "function": function("h.ping"), "lambdaProxy": flag } }
      }
    });
    let mut functions = IndexMap::new();
    compile(paths, &mut functions).unwrap();
    let events = functions["ping"].events.as_ref().unwrap();
    assert_eq!(events[0]["http"]["integration"], expected, "lambdaProxy = {flag}");
  }
}

#[test]
fn test_existing_function_gets_event_appended() {
  let mut functions = existing_functions(&["create"]);
  functions["create"].events = Some(vec![json!({ "schedule": "rate(5 minutes)" })]);

  let paths = json!({ "/widgets": { "post": json_endpoint("create", None) } });
  let compilation = compile(paths, &mut functions).unwrap();

  let events = functions["create"].events.as_ref().unwrap();
  assert_eq!(events.len(), 2);
  assert_eq!(events[0], json!({ "schedule": "rate(5 minutes)" }));
  assert_eq!(events[1]["http"]["path"], "widgets");
  assert_eq!(compilation.stats.functions_created, 0);
  assert_eq!(compilation.stats.events_attached, 1);
}

#[test]
fn test_existing_function_without_events() {
  let mut functions = existing_functions(&["create"]);
  let paths = json!({ "/widgets": { "post": json_endpoint("create", None) } });
  compile(paths, &mut functions).unwrap();
  assert_eq!(functions["create"].event_count(), 1);
}

#[test]
fn test_fresh_definition_overrides_declared_events() {
  let paths = json!({
    "/widgets": {
      "post": json_endpoint("create", Some(json!({ "handler": "h.create", "events": [{ "sns": "topic" }] })))
    }
  });
  let mut functions = IndexMap::new();
  compile(paths, &mut functions).unwrap();
  let events = functions["create"].events.as_ref().unwrap();
  assert_eq!(events.len(), 1);
  assert!(events[0].get("http").is_some());
}

#[test]
fn test_one_function_serving_many_endpoints() {
  let paths = json!({
    "/widgets": {
      "post": json_endpoint("widgets", Some(function("h.widgets"))),
      "put": json_endpoint("widgets", None)
    },
    "/widgets/{id}": {
      "delete": {
        "consumes": ["application/json"],
        "parameters": [
          { "in": "path", "name": "id", "type": "string" },
          { "in": "body", "name": "body", "schema": { "type": "object", "required": ["reason"] } }
        ],
        "x-serverless": { "functionName": "widgets" }
      }
    }
  });
  let mut functions = IndexMap::new();
  let compilation = compile(paths, &mut functions).unwrap();

  let bindings: Vec<_> = compilation.models.iter_bindings().collect();
  assert_eq!(
    bindings,
    vec![
      ("widgets", "post", "RequestBodyPOSTWidgets"),
      ("widgets", "put", "RequestBodyPUTWidgets"),
      ("widgets/{id}", "delete", "RequestBodyDELETEWidgetsIdVar"),
    ]
  );
  assert_eq!(
    compilation.models.schemas["RequestBodyDELETEWidgetsIdVar"]["required"],
    json!(["reason"])
  );
  assert_eq!(functions.len(), 1);
  assert_eq!(functions["widgets"].event_count(), 3);
}

#[test]
fn test_path_level_parameters_are_inherited() {
  let paths = json!({
    "/widgets": {
      "parameters": [{ "in": "body", "name": "body", "schema": { "type": "array" } }],
      "x-amazon-apigateway-any-method": { "ignored": true },
      "post": {
        "consumes": ["application/json"],
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let compilation = compile(paths, &mut IndexMap::new()).unwrap();
  assert_eq!(compilation.models.schemas["RequestBodyPOSTWidgets"], json!({ "type": "array" }));
  assert_eq!(compilation.stats.endpoints_compiled, 1);
}

#[test]
fn test_operation_parameter_overrides_path_parameter() {
  let paths = json!({
    "/widgets": {
      "parameters": [{ "in": "body", "name": "body", "schema": { "type": "array" } }],
      "post": {
        "consumes": ["application/json"],
        "parameters": [{ "in": "body", "name": "body", "schema": { "type": "object" } }],
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let compilation = compile(paths, &mut IndexMap::new()).unwrap();
  assert_eq!(compilation.models.schemas["RequestBodyPOSTWidgets"], json!({ "type": "object" }));
  assert!(compilation.stats.warnings.is_empty());
}

#[test]
fn test_first_body_parameter_wins() {
  let paths = json!({
    "/widgets": {
      "post": {
        "consumes": ["application/json"],
        "parameters": [
          { "in": "body", "name": "first", "schema": { "title": "first" } },
          { "in": "body", "name": "second", "schema": { "title": "second" } }
        ],
        "x-serverless": { "functionName": "create", "function": function("h.create") }
      }
    }
  });
  let compilation = compile(paths, &mut IndexMap::new()).unwrap();
  assert_eq!(compilation.models.schemas["RequestBodyPOSTWidgets"]["title"], "first");
  assert_eq!(
    compilation.stats.warnings,
    vec![CompileWarning::ExtraBodyParameter {
      method: "POST".to_string(),
      path: "/widgets".to_string(),
      name: "second".to_string(),
    }]
  );
}

#[test]
fn test_recompiling_yields_identical_models() {
  let paths = json!({
    "/widgets": { "post": json_endpoint("create", Some(function("h.create"))) },
    "/users/{id}": { "patch": json_endpoint("update", Some(function("h.update"))) }
  });
  let described = description(paths);
  let compiler = SpecCompiler::new(&AwsNaming);

  let first = compiler.compile(&described, &mut IndexMap::new()).unwrap();
  let second = compiler.compile(&described, &mut IndexMap::new()).unwrap();
  assert_eq!(first.models, second.models);
  assert_eq!(first.models.len(), 2);
}

#[test]
fn test_root_path_binding() {
  let paths = json!({ "/": { "post": json_endpoint("root", Some(function("h.root"))) } });
  let mut functions = IndexMap::new();
  let compilation = compile(paths, &mut functions).unwrap();
  assert_eq!(compilation.models.model_for("", "post"), Some("RequestBodyPOST"));
  assert_eq!(functions["root"].events.as_ref().unwrap()[0]["http"]["path"], "");
}
