pub mod aws;


pub use aws::AwsNaming;

pub(crate) const REQUEST_BODY_PREFIX: &str = "RequestBody";
pub(crate) const MODEL_RESOURCE_PREFIX: &str = "ApiGatewayModel";

/// Identifier rules shared with whatever generated the template being patched.
///
/// Both functions must be pure: the compiler and the patcher call them
/// independently and rely on getting the same answer.
pub trait NamingConvention {
  /// Turns a URL path (with or without a leading `/`) into an identifier-safe
  /// resource name.
  fn normalize_path(&self, path: &str) -> String;

  /// Logical id of the method resource for `method` on an already normalized
  /// resource name.
  fn method_logical_id(&self, normalized_path: &str, method: &str) -> String;
}

/// `RequestBody` + upper-cased method + normalized path.
pub fn model_name(naming: &impl NamingConvention, method: &str, path: &str) -> String {
  format!(
    "{REQUEST_BODY_PREFIX}{}{}",
    method.to_ascii_uppercase(),
    naming.normalize_path(path)
  )
}

#[must_use]
pub fn model_resource_name(model_name: &str) -> String {
  format!("{MODEL_RESOURCE_PREFIX}{model_name}")
}
