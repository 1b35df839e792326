use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde::Serialize;
use serde_json::Value;

use super::yaml;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
  #[default]
  Json,
  Yaml,
}

impl DocumentFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }

  /// Serializes `value` in this format. JSON output is pretty printed and
  /// newline terminated.
  pub fn render<T: Serialize>(self, value: &T, path: &Path) -> Result<String> {
    match self {
      Self::Json => serde_json::to_string_pretty(value)
        .map(|mut out| {
          out.push('\n');
          out
        })
        .map_err(|source| Error::Json {
          path: path.to_path_buf(),
          source,
        }),
      Self::Yaml => serde_yaml_ng::to_string(value).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
      }),
    }
  }
}

/// A memory-mapped JSON or YAML file.
pub struct DocumentLoader {
  path: PathBuf,
  file: AsyncMmapFile,
  format: DocumentFormat,
}

impl DocumentLoader {
  pub async fn open(path: &Path) -> Result<Self> {
    let file = AsyncMmapFile::open(path).await.map_err(|source| Error::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self {
      path: path.to_path_buf(),
      file,
      format: DocumentFormat::from_path(path),
    })
  }

  #[must_use]
  pub const fn format(&self) -> DocumentFormat {
    self.format
  }

  /// Parses the file into an untyped tree. YAML documents are converted to
  /// their JSON equivalent so `$ref` resolution sees a single representation;
  /// CloudFormation short-form tags are expanded on the way.
  pub fn parse(&self) -> Result<Value> {
    match self.format {
      DocumentFormat::Json => serde_json::from_slice(self.file.as_slice()).map_err(|source| Error::Json {
        path: self.path.clone(),
        source,
      }),
      DocumentFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice()).map_err(|_| Error::Encoding {
          path: self.path.clone(),
        })?;
        let value = serde_yaml_ng::from_str(content).map_err(|source| Error::Yaml {
          path: self.path.clone(),
          source,
        })?;
        yaml::to_json(value, "")
      }
    }
  }
}

/// Loads a document of any supported format straight into `T` without
/// resolving references.
pub async fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
  let value = DocumentLoader::open(path).await?.parse()?;
  super::from_value(value)
}
