use std::sync::LazyLock;

use regex::Regex;

use super::NamingConvention;

const METHOD_LOGICAL_ID_PREFIX: &str = "ApiGatewayMethod";

// Compile static regexes only once.
static NON_ALPHANUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Za-z]").unwrap());
static PATH_VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*)\}").unwrap());

/// The naming rules of the Serverless AWS provider.
///
/// Mirrors how Serverless names API Gateway resources so lookups into its
/// compiled template land on the resources it created:
///
/// | path | normalized |
/// |------|------------|
/// | `/widgets` | `Widgets` |
/// | `/users/{id}` | `UsersIdVar` |
/// | `/avatar-url` | `AvatarDashurl` |
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsNaming;

impl NamingConvention for AwsNaming {
  fn normalize_path(&self, path: &str) -> String {
    let joined: String = path.split('/').map(normalize_path_part).collect();
    upper_first(&NON_ALPHANUMERIC_RE.replace_all(&joined, ""))
  }

  fn method_logical_id(&self, normalized_path: &str, method: &str) -> String {
    format!(
      "{METHOD_LOGICAL_ID_PREFIX}{normalized_path}{}",
      upper_first(&method.to_lowercase())
    )
  }
}

/// Each segment is capitalized before substitution, so `userId` becomes
/// `Userid` and `{userId}` becomes `UseridVar`.
fn normalize_path_part(part: &str) -> String {
  let capitalized = capitalize(part).replace('-', "Dash");
  let variables = PATH_VARIABLE_RE.replace_all(&capitalized, "${1}Var");
  upper_first(&NON_ALPHANUMERIC_RE.replace_all(&variables, ""))
}

/// First character upper case, the rest lower case.
fn capitalize(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
  }
}

fn upper_first(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}
