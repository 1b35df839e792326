use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure the compiler, patcher or document loader can raise.
///
/// Endpoint-scoped variants carry the upper-cased method and the path exactly as
/// written in the document so a message alone locates the offending operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Resource {path} must define 'consumes' property for method {method}")]
  MissingConsumes { method: String, path: String },

  #[error("Resource {path} must define body for method {method}")]
  MissingBody { method: String, path: String },

  #[error("Must specify schema for JSON request body. Endpoint: {method} {path}")]
  MissingSchema { method: String, path: String },

  #[error("Request body schema loops back through '{reference}' and cannot be a model. Endpoint: {method} {path}")]
  RecursiveSchema {
    reference: String,
    method: String,
    path: String,
  },

  #[error("Conflicting models for name '{model}'. Endpoint: {method} {path}")]
  ConflictingModel { model: String, method: String, path: String },

  #[error("No 'x-serverless' property defined for {method} {path}")]
  MissingServerlessConfig { method: String, path: String },

  #[error("Property 'functionName' is required under 'x-serverless'. Endpoint: {method} {path}")]
  MissingFunctionName { method: String, path: String },

  #[error("Property 'function' is required under 'x-serverless' for new function '{function}'. Endpoint: {method} {path}")]
  MissingFunctionDefinition {
    function: String,
    method: String,
    path: String,
  },

  #[error("Config for function '{function}' already exists. Endpoint: {method} {path}")]
  FunctionAlreadyDefined {
    function: String,
    method: String,
    path: String,
  },

  #[error("No method resource '{logical_id}' in template for {method} /{path}")]
  MissingMethodResource {
    logical_id: String,
    method: String,
    path: String,
  },

  #[error("Method resource '{logical_id}' has no 'Properties'")]
  MissingProperties { logical_id: String },

  #[error("Method resource '{logical_id}' has no 'RestApiId' property")]
  MissingRestApiId { logical_id: String },

  #[error("No schema recorded for model '{model}'")]
  MissingModelSchema { model: String },

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: fmmap::error::Error,
  },

  #[error("Document {} is not valid UTF-8", path.display())]
  Encoding { path: PathBuf },

  #[error("Invalid JSON in {}: {source}", path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid YAML in {}: {source}", path.display())]
  Yaml {
    path: PathBuf,
    #[source]
    source: serde_yaml_ng::Error,
  },

  #[error("Cannot resolve reference '{reference}' in {}", document.display())]
  UnresolvedReference { reference: String, document: PathBuf },


  #[error("Malformed reference at '{pointer}' in {}: '$ref' must be a string", document.display())]
  InvalidReference { pointer: String, document: PathBuf },

  #[error("Document does not match the expected shape at '{location}': {message}")]
  InvalidDocument { location: String, message: String },
}

impl Error {
  /// True for failures raised by the validation rules themselves rather than
  /// by reading or resolving the document.
  #[must_use]
  pub const fn is_validation(&self) -> bool {
    !matches!(
      self,
      Self::Read { .. }
        | Self::Encoding { .. }
        | Self::Json { .. }
        | Self::Yaml { .. }
        | Self::UnresolvedReference { .. }
        | Self::InvalidReference { .. }
        | Self::InvalidDocument { .. }
    )
  }
}
