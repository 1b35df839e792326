//! Walks a dereferenced description and produces request models plus
//! function `http` events.
//!
//! Every endpoint is validated in document order and the first violation aborts
//! the whole compilation. Functions registered before the failing endpoint stay
//! registered; callers are expected to discard the service definition on error.

mod models;

#[cfg(test)]
mod tests;

use std::fmt;

use indexmap::IndexMap;
pub use models::CompiledModels;

use crate::{
  document::{self, ApiDescription, EndpointRef, ServerlessExtension},
  error::{Error, Result},
  naming::{NamingConvention, model_name},
  service::{FunctionDefinition, HttpEvent, Integration},
};

/// Output of a successful compile: the artifact handed to the patcher and
/// bookkeeping for the caller.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
  pub models: CompiledModels,
  pub stats: CompileStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
  pub endpoints_compiled: usize,
  pub models_registered: usize,
  pub functions_created: usize,
  pub events_attached: usize,
  pub warnings: Vec<CompileWarning>,
}

/// Non-fatal findings worth surfacing in verbose output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
  /// A body parameter after the first one; it is ignored.
  ExtraBodyParameter { method: String, path: String, name: String },
}

impl fmt::Display for CompileWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ExtraBodyParameter { method, path, name } => {
        write!(f, "ignoring extra body parameter '{name}' on {method} {path}")
      }
    }
  }
}

pub struct SpecCompiler<'a, N: NamingConvention> {
  naming: &'a N,
}

impl<'a, N: NamingConvention> SpecCompiler<'a, N> {
  pub const fn new(naming: &'a N) -> Self {
    Self { naming }
  }

  /// Compiles every endpoint of `description`, attaching events to
  /// `functions` as it goes.
  pub fn compile(
    &self,
    description: &ApiDescription,
    functions: &mut IndexMap<String, FunctionDefinition>,
  ) -> Result<Compilation> {
    let mut compilation = Compilation::default();

    for endpoint in description.endpoints() {
      self.compile_endpoint(endpoint, functions, &mut compilation)?;
      compilation.stats.endpoints_compiled += 1;
    }

    Ok(compilation)
  }

  fn compile_endpoint(
    &self,
    entry: EndpointRef<'_>,
    functions: &mut IndexMap<String, FunctionDefinition>,
    compilation: &mut Compilation,
  ) -> Result<()> {
    let method = entry.method_upper();
    let path = entry.path;

    if entry.is_write() && !entry.endpoint.declares_consumes() {
      return Err(Error::MissingConsumes {
        method,
        path: path.to_string(),
      });
    }

    let mut bodies = entry.body_parameters();
    let body = bodies.next();
    for extra in bodies {
      compilation.stats.warnings.push(CompileWarning::ExtraBodyParameter {
        method: method.clone(),
        path: path.to_string(),
        name: extra.name.clone(),
      });
    }

    if entry.endpoint.consumes_json() {
      let body = body.ok_or_else(|| Error::MissingBody {
        method: method.clone(),
        path: path.to_string(),
      })?;
      let schema = body.schema.as_ref().ok_or_else(|| Error::MissingSchema {
        method: method.clone(),
        path: path.to_string(),
      })?;

      if let Some(reference) = document::remaining_reference(schema) {
        return Err(Error::RecursiveSchema {
          reference: reference.to_string(),
          method,
          path: path.to_string(),
        });
      }

      let model = model_name(self.naming, entry.method, path);
      if compilation.models.contains_model(&model) {
        return Err(Error::ConflictingModel {
          model,
          method,
          path: path.to_string(),
        });
      }
      compilation
        .models
        .register(model, schema.clone(), entry.relative_path(), entry.method);
      compilation.stats.models_registered += 1;
    }

    let config = entry
      .endpoint
      .serverless
      .as_ref()
      .ok_or_else(|| Error::MissingServerlessConfig {
        method: method.clone(),
        path: path.to_string(),
      })?;
    let function_name = config.function_name().ok_or_else(|| Error::MissingFunctionName {
      method: method.clone(),
      path: path.to_string(),
    })?;

    let event = HttpEvent::builder()
      .path(entry.relative_path())
      .method(entry.method)
      .integration(integration_for(config))
      .build();

    match functions.get_mut(function_name) {
      None => {
        let mut function = config.function.clone().ok_or_else(|| Error::MissingFunctionDefinition {
          function: function_name.to_string(),
          method,
          path: path.to_string(),
        })?;
        function.events = Some(vec![event.into()]);
        functions.insert(function_name.to_string(), function);
        compilation.stats.functions_created += 1;
      }
      Some(existing) => {
        if config.function.is_some() {
          return Err(Error::FunctionAlreadyDefined {
            function: function_name.to_string(),
            method,
            path: path.to_string(),
          });
        }
        existing.push_event(event);
      }
    }
    compilation.stats.events_attached += 1;

    Ok(())
  }
}

const fn integration_for(config: &ServerlessExtension) -> Integration {
  if config.lambda_proxy {
    Integration::LambdaProxy
  } else {
    Integration::Lambda
  }
}
