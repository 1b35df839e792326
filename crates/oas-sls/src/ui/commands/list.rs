use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use oas_sls::{
  ApiDescription, NamingConvention, Pipeline, PipelineConfig,
  naming::model_name,
};

use crate::ui::{Colors, colors::IntoComfyColor, term_width};

/// One table row: the endpoint and the identifiers it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModelRow {
  method: String,
  path: String,
  model: String,
  logical_id: String,
}

fn model_rows(description: &ApiDescription, naming: &impl NamingConvention) -> Vec<ModelRow> {
  description
    .endpoints()
    .filter(|entry| entry.endpoint.consumes_json() && entry.body_parameters().next().is_some())
    .map(|entry| {
      let resource = naming.normalize_path(entry.relative_path());
      ModelRow {
        method: entry.method_upper(),
        path: entry.path.to_string(),
        model: model_name(naming, entry.method, entry.relative_path()),
        logical_id: naming.method_logical_id(&resource, entry.method),
      }
    })
    .sorted_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)))
    .collect()
}

pub async fn list_models(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let pipeline = Pipeline::new(PipelineConfig::builder().document(input).build());
  let description = pipeline.load_description().await?;
  let rows = model_rows(&description, pipeline.naming());

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["METHOD", "PATH", "MODEL", "METHOD RESOURCE"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for row in rows {
    let mut cells = Row::new();
    cells.add_cell(
      Cell::new(row.method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    cells.add_cell(Cell::new(row.path).fg(IntoComfyColor::into(colors.primary())));
    cells.add_cell(
      Cell::new(row.model)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    cells.add_cell(Cell::new(row.logical_id).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(cells);
  }

  println!("{table}");

  Ok(())
}
