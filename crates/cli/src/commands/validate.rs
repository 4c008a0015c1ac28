use crate::commands::SourceArgs;
use buildplan_core::Result;
use buildplan_utils::tracing::stage_span;

pub fn execute(sources: &SourceArgs) -> Result<()> {
    let graph = sources.load()?;
    let _span = stage_span("validate", graph.len()).entered();

    buildplan_graph::validate(&graph)?;
    println!("{} module(s) valid", graph.len());
    Ok(())
}
