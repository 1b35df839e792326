use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas_sls::{CompileStats, CompiledModels, PatchStats};

use super::{Colors, cli::LogArgs};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// Progress output shared by the pipeline commands.
///
/// Everything goes to stderr so `compile` can stream the service definition
/// on stdout.
pub struct CommandLogger<'a> {
  log: &'a LogArgs,
  colors: &'a Colors,
}

impl<'a> CommandLogger<'a> {
  pub const fn new(log: &'a LogArgs, colors: &'a Colors) -> Self {
    Self { log, colors }
  }

  pub fn info(&self, message: &str) {
    if !self.log.quiet {
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.log.quiet {
      eprintln!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  pub fn print_compile_stats(&self, stats: &CompileStats) {
    self.stat("Endpoints compiled:", stats.endpoints_compiled.to_string());
    self.stat("Models registered:", stats.models_registered.to_string());
    self.stat("Functions created:", stats.functions_created.to_string());
    self.stat("Events attached:", stats.events_attached.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    if self.log.verbose && !self.log.quiet {
      for warning in &stats.warnings {
        eprintln!(
          "{} {}",
          "Warning:".with(self.colors.accent()),
          warning.to_string().with(self.colors.primary())
        );
      }
    }
  }

  pub fn print_models(&self, models: &CompiledModels) {
    if !self.log.verbose || self.log.quiet {
      return;
    }
    for (path, method, model) in models.iter_bindings() {
      eprintln!(
        "              {} /{} {} {}",
        method.to_ascii_uppercase().with(self.colors.accent()),
        path.with(self.colors.primary()),
        "->".with(self.colors.label()),
        model.with(self.colors.value())
      );
    }
  }

  pub fn print_patch_stats(&self, stats: &PatchStats) {
    self.stat("Methods wired:", stats.methods_wired.to_string());
    self.stat("Models inserted:", stats.models_inserted.to_string());
  }

  pub fn success(&self, message: &str) {
    if !self.log.quiet {
      eprintln!();
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}
