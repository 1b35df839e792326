//! Two-stage pipeline matching the points a deployment host calls into:
//! [`Pipeline::initialize`] once the service definition is loaded, and
//! [`Pipeline::deploy`] right before the packaged template is submitted.
//!
//! ```no_run
//! use oas_sls::{Pipeline, PipelineConfig, ServiceDefinition, Template};
//!
//! # async fn example(mut service: ServiceDefinition, mut template: Template) -> oas_sls::Result<()> {
//! let pipeline = Pipeline::new(PipelineConfig::builder().document("api/swagger.yaml").build());
//! let compilation = pipeline.initialize(&mut service).await?;
//! // ... the host packages `service` into `template` ...
//! pipeline.deploy(compilation.models, &mut template)?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::{
  compiler::{Compilation, CompiledModels, SpecCompiler},
  document::{self, ApiDescription},
  error::Result,
  naming::{AwsNaming, NamingConvention},
  patcher::{PatchStats, TemplatePatcher},
  service::ServiceDefinition,
  template::Template,
};

pub const DEFAULT_DOCUMENT: &str = "swagger.yaml";

#[derive(Debug, Clone, bon::Builder)]
pub struct PipelineConfig {
  /// The Swagger document to compile, JSON or YAML.
  #[builder(into, default = PathBuf::from(DEFAULT_DOCUMENT))]
  pub document: PathBuf,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

pub struct Pipeline<N: NamingConvention = AwsNaming> {
  config: PipelineConfig,
  naming: N,
}

impl Pipeline<AwsNaming> {
  #[must_use]
  pub const fn new(config: PipelineConfig) -> Self {
    Self::with_naming(config, AwsNaming)
  }
}

impl<N: NamingConvention> Pipeline<N> {
  pub const fn with_naming(config: PipelineConfig, naming: N) -> Self {
    Self { config, naming }
  }

  #[must_use]
  pub const fn config(&self) -> &PipelineConfig {
    &self.config
  }

  #[must_use]
  pub const fn naming(&self) -> &N {
    &self.naming
  }

  /// Loads and fully dereferences the configured document.
  pub async fn load_description(&self) -> Result<ApiDescription> {
    let value = document::dereference(&self.config.document).await?;
    document::from_value(value)
  }

  /// Compiles the document, registering functions and events on `service`.
  pub async fn initialize(&self, service: &mut ServiceDefinition) -> Result<Compilation> {
    let description = self.load_description().await?;
    self.compile(&description, service)
  }

  /// The synchronous half of [`Self::initialize`] for callers that already
  /// hold a description.
  pub fn compile(&self, description: &ApiDescription, service: &mut ServiceDefinition) -> Result<Compilation> {
    SpecCompiler::new(&self.naming).compile(description, &mut service.functions)
  }

  /// Adds the compiled models to `template`.
  pub fn deploy(&self, models: CompiledModels, template: &mut Template) -> Result<PatchStats> {
    TemplatePatcher::new(&self.naming).patch(models, template)
  }
}
