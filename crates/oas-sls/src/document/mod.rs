//! Typed view over a dereferenced Swagger document.
//!
//! Only the parts the compiler reads are modelled: paths, their method
//! entries, `consumes`, `parameters` and the `x-serverless` extension. Every
//! other key is ignored during deserialization.

mod dereference;
mod loader;
mod yaml;


pub use dereference::dereference;
pub(crate) use dereference::remaining_reference;
use http::Method;
use indexmap::IndexMap;
pub use loader::{DocumentFormat, DocumentLoader, load};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  error::{Error, Result},
  service::FunctionDefinition,
};

pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";

const PATH_PARAMETERS_KEY: &str = "parameters";
const EXTENSION_PREFIX: &str = "x-";
const OPERATION_KEYS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Converts an already dereferenced value into `T`, reporting the JSON path
/// of the first mismatch.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
  serde_path_to_error::deserialize(value).map_err(|err| Error::InvalidDocument {
    location: err.path().to_string(),
    message: err.inner().to_string(),
  })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiDescription {
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
}

impl ApiDescription {
  /// Every (path, method, endpoint) triple in document order.
  pub fn endpoints(&self) -> impl Iterator<Item = EndpointRef<'_>> {
    self.paths.iter().flat_map(|(path, item)| {
      item.operations.iter().map(move |(method, endpoint)| EndpointRef {
        path,
        method,
        endpoint,
        inherited: &item.parameters,
      })
    })
  }
}

/// One entry of `paths`. Method keys become operations; path-level
/// `parameters` are kept for inheritance and `x-*` keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
  pub parameters: Vec<Parameter>,
  pub operations: IndexMap<String, Endpoint>,
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
  type Error = serde_json::Error;

  fn try_from(entries: IndexMap<String, Value>) -> Result<Self, Self::Error> {
    let mut item = Self::default();

    for (key, value) in entries {
      if key == PATH_PARAMETERS_KEY {
        item.parameters = serde_json::from_value(value)?;
      } else if key.starts_with(EXTENSION_PREFIX) {
        continue;
      } else if OPERATION_KEYS.iter().any(|op| op.eq_ignore_ascii_case(&key)) {
        let endpoint = serde_json::from_value(value)?;
        item.operations.insert(key, endpoint);
      }
    }

    Ok(item)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Endpoint {
  #[serde(default)]
  pub consumes: Option<Vec<String>>,
  #[serde(default)]
  pub parameters: Vec<Parameter>,
  #[serde(rename = "x-serverless", default)]
  pub serverless: Option<ServerlessExtension>,
}

impl Endpoint {
  #[must_use]
  pub fn declares_consumes(&self) -> bool {
    self.consumes.as_ref().is_some_and(|media| !media.is_empty())
  }

  #[must_use]
  pub fn consumes_json(&self) -> bool {
    self
      .consumes
      .as_ref()
      .is_some_and(|media| media.iter().any(|m| m == JSON_MEDIA_TYPE))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
  #[serde(default)]
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(default)]
  pub schema: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParameterLocation {
  Body,
  #[default]
  Query,
  Path,
  Header,
  FormData,
  #[serde(other)]
  Unknown,
}

/// Deployment intent carried in `x-serverless`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessExtension {
  #[serde(default)]
  pub function_name: Option<String>,
  #[serde(default)]
  pub function: Option<FunctionDefinition>,
  #[serde(default, deserialize_with = "truthy")]
  pub lambda_proxy: bool,
}

impl ServerlessExtension {
  /// The target function name, treating an empty string as absent.
  #[must_use]
  pub fn function_name(&self) -> Option<&str> {
    self.function_name.as_deref().filter(|name| !name.is_empty())
  }
}

/// Reads any scalar as a flag: `null`, `false`, `0` and `""` are off,
/// everything else is on.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
  let value = Value::deserialize(deserializer)?;
  Ok(match value {
    Value::Null => false,
    Value::Bool(flag) => flag,
    Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  })
}

/// A borrowed endpoint together with where it lives in the document.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRef<'a> {
  pub path: &'a str,
  pub method: &'a str,
  pub endpoint: &'a Endpoint,
  inherited: &'a [Parameter],
}

impl<'a> EndpointRef<'a> {
  /// Path without its leading `/`, as Serverless `http` events expect it.
  #[must_use]
  pub fn relative_path(&self) -> &'a str {
    self.path.strip_prefix('/').unwrap_or(self.path)
  }

  #[must_use]
  pub fn method_upper(&self) -> String {
    self.method.to_ascii_uppercase()
  }

  /// GET, HEAD and OPTIONS never carry a body; everything else must say
  /// what it consumes.
  #[must_use]
  pub fn is_write(&self) -> bool {
    let method = Method::from_bytes(self.method_upper().as_bytes()).unwrap_or(Method::POST);
    ![Method::GET, Method::HEAD, Method::OPTIONS].contains(&method)
  }

  /// Operation parameters in declaration order followed by path-level
  /// parameters the operation does not override by name and location.
  pub fn parameters(&self) -> impl Iterator<Item = &'a Parameter> + use<'a> {
    let endpoint: &'a Endpoint = self.endpoint;
    let inherited: &'a [Parameter] = self.inherited;
    let own = &endpoint.parameters;
    own.iter().chain(
      inherited
        .iter()
        .filter(move |p| !own.iter().any(|o| o.name == p.name && o.location == p.location)),
    )
  }

  pub fn body_parameters(&self) -> impl Iterator<Item = &'a Parameter> + use<'a> {
    self.parameters().filter(|p| p.location == ParameterLocation::Body)
  }
}
