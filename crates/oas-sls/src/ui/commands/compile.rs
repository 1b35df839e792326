use std::path::PathBuf;

use oas_sls::{Pipeline, PipelineConfig, ServiceDefinition, document};

use super::OutputTarget;
use crate::ui::{
  Colors, CommandLogger,
  cli::{CompileCommand, LogArgs},
};

#[derive(Debug, Clone)]
pub struct CompileConfig {
  pub input: PathBuf,
  pub service: PathBuf,
  pub output: OutputTarget,
  pub log: LogArgs,
}

impl CompileConfig {
  pub fn from_command(command: CompileCommand) -> anyhow::Result<Self> {
    let CompileCommand {
      input,
      service,
      output,
      in_place,
      log,
    } = command;

    let output = match (output, in_place) {
      (Some(_), true) => anyhow::bail!("--output and --in-place cannot be combined"),
      (Some(path), false) => OutputTarget::File(path),
      (None, true) => OutputTarget::File(service.clone()),
      (None, false) => OutputTarget::Stdout,
    };

    Ok(Self {
      input,
      service,
      output,
      log,
    })
  }
}

pub async fn compile_service(config: CompileConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = CommandLogger::new(&config.log, colors);

  logger.info(&format!("Loading service definition from: {}", config.service.display()));
  let mut service: ServiceDefinition = document::load(&config.service).await?;

  logger.info(&format!("Compiling Swagger document: {}", config.input.display()));
  let pipeline = Pipeline::new(PipelineConfig::builder().document(config.input.clone()).build());
  let compilation = pipeline.initialize(&mut service).await?;
  logger.print_compile_stats(&compilation.stats);
  logger.print_models(&compilation.models);

  logger.info(&format!("Writing to: {}", config.output.describe()));
  config.output.write(&service, &config.service).await?;

  logger.success("Successfully compiled service definition");
  Ok(())
}
