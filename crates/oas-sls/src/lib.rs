#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Compiles the request body schemas and `x-serverless` bindings of a Swagger
//! document into Serverless function events, then splices the resulting
//! API Gateway models into the packaged CloudFormation template.

pub mod compiler;
pub mod document;
mod entries;
pub mod error;
pub mod naming;
pub mod patcher;
pub mod pipeline;
pub mod service;
pub mod template;

pub use compiler::{Compilation, CompileStats, CompileWarning, CompiledModels, SpecCompiler};
pub use document::{ApiDescription, DocumentFormat};
pub use error::{Error, Result};
pub use naming::{AwsNaming, NamingConvention};
pub use patcher::{PatchStats, TemplatePatcher};
pub use pipeline::{Pipeline, PipelineConfig};
pub use service::{FunctionDefinition, ServiceDefinition};
pub use template::{Resource, Template};
