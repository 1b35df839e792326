//! Splices compiled request models into a packaged template.
//!
//! Method resources are expected to exist already; this only attaches
//! `RequestModels` to them and adds one `AWS::ApiGateway::Model` per model.

use serde_json::{Map, Value};

use crate::{
  compiler::CompiledModels,
  document::JSON_MEDIA_TYPE,
  error::{Error, Result},
  naming::{NamingConvention, model_resource_name},
  template::{REQUEST_MODELS_PROPERTY, REST_API_ID_PROPERTY, Resource, Template},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
  pub methods_wired: usize,
  pub models_inserted: usize,
}

pub struct TemplatePatcher<'a, N: NamingConvention> {
  naming: &'a N,
}

impl<'a, N: NamingConvention> TemplatePatcher<'a, N> {
  pub const fn new(naming: &'a N) -> Self {
    Self { naming }
  }

  /// Consumes `models`; a failure part way leaves earlier edits in place.
  pub fn patch(&self, models: CompiledModels, template: &mut Template) -> Result<PatchStats> {
    let CompiledModels { mut schemas, bindings } = models;
    let mut stats = PatchStats::default();

    for (relative_path, methods) in bindings {
      for (method, model_name) in methods {
        let resource_name = self.naming.normalize_path(&relative_path);
        let logical_id = self.naming.method_logical_id(&resource_name, &method);

        let rest_api_id = wire_method(template, &logical_id, &relative_path, &method, &model_name)?;
        stats.methods_wired += 1;

        let schema = schemas
          .swap_remove(&model_name)
          .ok_or_else(|| Error::MissingModelSchema {
            model: model_name.clone(),
          })?;
        template.resources.insert(
          model_resource_name(&model_name),
          Resource::model(&model_name, schema, rest_api_id),
        );
        stats.models_inserted += 1;
      }
    }

    Ok(stats)
  }
}

/// Points the method resource at `model_name` and returns its `RestApiId`.
fn wire_method(
  template: &mut Template,
  logical_id: &str,
  relative_path: &str,
  method: &str,
  model_name: &str,
) -> Result<Value> {
  let resource = template
    .resources
    .get_mut(logical_id)
    .ok_or_else(|| Error::MissingMethodResource {
      logical_id: logical_id.to_string(),
      method: method.to_ascii_uppercase(),
      path: relative_path.to_string(),
    })?;
  let properties = resource.properties.as_mut().ok_or_else(|| Error::MissingProperties {
    logical_id: logical_id.to_string(),
  })?;

  let mut request_models = Map::new();
  request_models.insert(JSON_MEDIA_TYPE.to_string(), Value::from(model_name));
  properties.insert(REQUEST_MODELS_PROPERTY.to_string(), Value::Object(request_models));

  match properties.get(REST_API_ID_PROPERTY) {
    Some(Value::Null) | None => Err(Error::MissingRestApiId {
      logical_id: logical_id.to_string(),
    }),
    Some(id) => Ok(id.clone()),
  }
}
