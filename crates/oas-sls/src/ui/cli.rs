use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas-sls")]
#[command(author, version, about = "Swagger to Serverless request model compiler")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a Swagger document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Attach x-serverless http events to a service definition
  Compile(CompileCommand),
  /// Compile, then insert request models into a packaged template
  Patch(PatchCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
  /// Print warnings and per-model detail
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
  /// Swagger document, JSON or YAML
  #[arg(short, long, value_name = "FILE", default_value = oas_sls::pipeline::DEFAULT_DOCUMENT)]
  pub input: PathBuf,

  /// Serverless service definition to extend
  #[arg(short, long, value_name = "FILE")]
  pub service: PathBuf,

  /// Where to write the updated service definition (stdout when omitted)
  #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
  pub output: Option<PathBuf>,

  /// Overwrite the service definition file
  #[arg(long, default_value_t = false)]
  pub in_place: bool,

  #[command(flatten)]
  pub log: LogArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PatchCommand {
  /// Swagger document, JSON or YAML
  #[arg(short, long, value_name = "FILE", default_value = oas_sls::pipeline::DEFAULT_DOCUMENT)]
  pub input: PathBuf,

  /// Serverless service definition the template was packaged from
  #[arg(short, long, value_name = "FILE")]
  pub service: Option<PathBuf>,

  /// Packaged CloudFormation template
  #[arg(short, long, value_name = "FILE")]
  pub template: PathBuf,

  /// Where to write the patched template
  #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
  pub output: Option<PathBuf>,

  /// Overwrite the template file
  #[arg(long, default_value_t = false)]
  pub in_place: bool,

  #[command(flatten)]
  pub log: LogArgs,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the request model every JSON endpoint compiles to
  Models {
    /// Swagger document, JSON or YAML
    #[arg(short, long, value_name = "FILE", default_value = oas_sls::pipeline::DEFAULT_DOCUMENT)]
    input: PathBuf,
  },
}
