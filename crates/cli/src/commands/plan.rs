use crate::commands::SourceArgs;
use crate::formats::{render, CharSet, PlanFormat};
use buildplan_core::{Error, Result};
use buildplan_utils::tracing::stage_span;
use std::path::Path;

pub fn execute(
    sources: &SourceArgs,
    format: &str,
    charset: &str,
    output: Option<&Path>,
) -> Result<()> {
    let graph = sources.load()?;
    let plan = buildplan_graph::plan(&graph)?;

    let _span = stage_span("render", plan.order.len()).entered();
    let rendered = render(
        &plan,
        &graph,
        PlanFormat::from_option(Some(format)),
        CharSet::from_name(charset),
    )?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| Error::file_system(path, "write", e))?;
            tracing::info!(path = %path.display(), "plan written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
