//! Compiled CloudFormation template as produced by the Serverless packager.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{document::JSON_MEDIA_TYPE, entries};

pub(crate) const MODEL_RESOURCE_TYPE: &str = "AWS::ApiGateway::Model";
pub(crate) const REQUEST_MODELS_PROPERTY: &str = "RequestModels";
pub(crate) const REST_API_ID_PROPERTY: &str = "RestApiId";
const RESOURCES_KEY: &str = "Resources";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
  pub resources: IndexMap<String, Resource>,
  pub extra: Map<String, Value>,
  resources_position: Option<usize>,
}

impl<'de> Deserialize<'de> for Template {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    let split = entries::split::<_, D::Error>(raw, RESOURCES_KEY)?;
    Ok(Self {
      resources: split.typed.unwrap_or_default(),
      extra: split.rest,
      resources_position: split.position,
    })
  }
}

impl Serialize for Template {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let resources = (self.resources_position.is_some() || !self.resources.is_empty()).then_some(&self.resources);
    entries::serialize(serializer, &self.extra, RESOURCES_KEY, resources, self.resources_position)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
  #[serde(rename = "Type")]
  pub kind: String,
  #[serde(rename = "Properties", default, skip_serializing_if = "Option::is_none")]
  pub properties: Option<Map<String, Value>>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Resource {
  /// An `AWS::ApiGateway::Model` validating `application/json` bodies.
  #[must_use]
  pub fn model(name: &str, schema: Value, rest_api_id: Value) -> Self {
    let mut properties = Map::new();
    properties.insert("Schema".to_string(), schema);
    properties.insert(REST_API_ID_PROPERTY.to_string(), rest_api_id);
    properties.insert("Name".to_string(), Value::from(name));
    properties.insert("ContentType".to_string(), Value::from(JSON_MEDIA_TYPE));

    Self {
      kind: MODEL_RESOURCE_TYPE.to_string(),
      properties: Some(properties),
      extra: Map::new(),
    }
  }

  #[must_use]
  pub fn property(&self, key: &str) -> Option<&Value> {
    self.properties.as_ref()?.get(key)
  }
}
