use std::path::PathBuf;

use oas_sls::{Pipeline, PipelineConfig, ServiceDefinition, Template, document};

use super::OutputTarget;
use crate::ui::{
  Colors, CommandLogger,
  cli::{LogArgs, PatchCommand},
};

#[derive(Debug, Clone)]
pub struct PatchConfig {
  pub input: PathBuf,
  pub service: Option<PathBuf>,
  pub template: PathBuf,
  pub output: PathBuf,
  pub log: LogArgs,
}

impl PatchConfig {
  pub fn from_command(command: PatchCommand) -> anyhow::Result<Self> {
    let PatchCommand {
      input,
      service,
      template,
      output,
      in_place,
      log,
    } = command;

    let output = match (output, in_place) {
      (Some(_), true) => anyhow::bail!("--output and --in-place cannot be combined"),
      (Some(path), false) => path,
      (None, true) => template.clone(),
      (None, false) => anyhow::bail!("Output path (-o) or --in-place is required for patch"),
    };

    Ok(Self {
      input,
      service,
      template,
      output,
      log,
    })
  }

  async fn load_service(&self) -> anyhow::Result<ServiceDefinition> {
    match &self.service {
      Some(path) => Ok(document::load(path).await?),
      None => Ok(ServiceDefinition::default()),
    }
  }
}

pub async fn patch_template(config: PatchConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = CommandLogger::new(&config.log, colors);

  let mut service = config.load_service().await?;
  logger.info(&format!("Compiling Swagger document: {}", config.input.display()));
  let pipeline = Pipeline::new(PipelineConfig::builder().document(config.input.clone()).build());
  let compilation = pipeline.initialize(&mut service).await?;
  logger.print_compile_stats(&compilation.stats);
  logger.print_models(&compilation.models);

  logger.info(&format!("Loading template from: {}", config.template.display()));
  let mut template: Template = document::load(&config.template).await?;
  let stats = pipeline.deploy(compilation.models, &mut template)?;
  logger.print_patch_stats(&stats);

  logger.info(&format!("Writing to: {}", config.output.display()));
  OutputTarget::File(config.output.clone())
    .write(&template, &config.output)
    .await?;

  logger.success("Successfully patched template");
  Ok(())
}
