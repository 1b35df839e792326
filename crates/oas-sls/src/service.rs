//! The slice of a Serverless service definition the compiler touches.
//!
//! Only `functions` and each function's `events` are typed; everything else
//! round-trips untouched and in its original order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::entries;

const FUNCTIONS_KEY: &str = "functions";
const EVENTS_KEY: &str = "events";

/// A service definition; `functions` is typed and written back where it was
/// found among the other top-level keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDefinition {
  pub functions: IndexMap<String, FunctionDefinition>,
  pub extra: Map<String, Value>,
  functions_position: Option<usize>,
}

impl<'de> Deserialize<'de> for ServiceDefinition {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    let split = entries::split::<_, D::Error>(raw, FUNCTIONS_KEY)?;
    Ok(Self {
      functions: split.typed.unwrap_or_default(),
      extra: split.rest,
      functions_position: split.position,
    })
  }
}

impl Serialize for ServiceDefinition {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let functions = (self.functions_position.is_some() || !self.functions.is_empty()).then_some(&self.functions);
    entries::serialize(serializer, &self.extra, FUNCTIONS_KEY, functions, self.functions_position)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionDefinition {
  pub events: Option<Vec<Value>>,
  pub properties: Map<String, Value>,
  events_position: Option<usize>,
}

impl<'de> Deserialize<'de> for FunctionDefinition {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    let split = entries::split::<_, D::Error>(raw, EVENTS_KEY)?;
    Ok(Self {
      events: split.typed,
      properties: split.rest,
      events_position: split.position,
    })
  }
}

impl Serialize for FunctionDefinition {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    entries::serialize(serializer, &self.properties, EVENTS_KEY, self.events.as_ref(), self.events_position)
  }
}

impl FunctionDefinition {
  pub fn push_event(&mut self, event: impl Into<Value>) {
    self.events.get_or_insert_with(Vec::new).push(event.into());
  }

  #[must_use]
  pub fn event_count(&self) -> usize {
    self.events.as_ref().map_or(0, Vec::len)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum Integration {
  #[default]
  #[strum(serialize = "lambda")]
  Lambda,
  #[strum(serialize = "lambda-proxy")]
  LambdaProxy,
}

/// An `http` event binding a function to one path and method.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct HttpEvent {
  #[builder(into)]
  pub path: String,
  #[builder(into)]
  pub method: String,
  #[builder(default)]
  pub integration: Integration,
}

impl From<HttpEvent> for Value {
  fn from(event: HttpEvent) -> Self {
    json!({
      "http": {
        "path": event.path,
        "method": event.method,
        "integration": event.integration.to_string(),
      }
    })
  }
}
