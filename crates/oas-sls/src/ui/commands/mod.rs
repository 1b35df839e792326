pub mod compile;
pub mod list;
pub mod patch;

use std::path::{Path, PathBuf};

pub use compile::{CompileConfig, compile_service};
pub use list::list_models;
use oas_sls::DocumentFormat;
pub use patch::{PatchConfig, patch_template};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

/// Where a command sends its rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
  Stdout,
  File(PathBuf),
}

impl OutputTarget {
  /// Renders `value` in the format implied by `format_hint` and writes it out.
  async fn write<T: Serialize>(&self, value: &T, format_hint: &Path) -> anyhow::Result<()> {
    match self {
      Self::Stdout => {
        let rendered = DocumentFormat::from_path(format_hint).render(value, format_hint)?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(rendered.as_bytes()).await?;
        stdout.flush().await?;
      }
      Self::File(path) => {
        let rendered = DocumentFormat::from_path(path).render(value, path)?;
        if let Some(parent) = path.parent()
          && !parent.as_os_str().is_empty()
        {
          tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, rendered).await?;
      }
    }
    Ok(())
  }

  fn describe(&self) -> String {
    match self {
      Self::Stdout => "stdout".to_string(),
      Self::File(path) => path.display().to_string(),
    }
  }
}
