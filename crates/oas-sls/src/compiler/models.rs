use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request models collected at compile time and spliced into the template at
/// deploy time.
///
/// `schemas` is keyed by model name; `bindings` maps a relative path and a
/// method to the model validating its body. Every model in `bindings` has a
/// schema, and every model name appears in `bindings` exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledModels {
  pub schemas: IndexMap<String, Value>,
  pub bindings: IndexMap<String, IndexMap<String, String>>,
}

impl CompiledModels {
  #[must_use]
  pub fn contains_model(&self, model: &str) -> bool {
    self.schemas.contains_key(model)
  }

  /// Records `model` for `method` on `relative_path`. Callers check
  /// [`Self::contains_model`] first; names are never overwritten silently.
  pub(crate) fn register(&mut self, model: String, schema: Value, relative_path: &str, method: &str) {
    self
      .bindings
      .entry(relative_path.to_string())
      .or_default()
      .insert(method.to_string(), model.clone());
    self.schemas.insert(model, schema);
  }

  #[must_use]
  pub fn model_for(&self, relative_path: &str, method: &str) -> Option<&str> {
    self.bindings.get(relative_path)?.get(method).map(String::as_str)
  }

  /// (relative path, method, model name) in registration order.
  pub fn iter_bindings(&self) -> impl Iterator<Item = (&str, &str, &str)> {
    self.bindings.iter().flat_map(|(path, methods)| {
      methods
        .iter()
        .map(move |(method, model)| (path.as_str(), method.as_str(), model.as_str()))
    })
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }
}
