#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Models { input } => ui::commands::list_models(&input, &colors).await?,
    },
    Commands::Compile(command) => {
      let config = ui::commands::CompileConfig::from_command(command)?;
      ui::commands::compile_service(config, &colors).await?;
    }
    Commands::Patch(command) => {
      let config = ui::commands::PatchConfig::from_command(command)?;
      ui::commands::patch_template(config, &colors).await?;
    }
  }

  Ok(())
}
