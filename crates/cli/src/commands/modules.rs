use crate::commands::SourceArgs;
use buildplan_core::{Module, Result};

pub fn execute(sources: &SourceArgs) -> Result<()> {
    let graph = sources.load()?;

    let width = graph.modules().map(|m| m.name.as_str().len()).max().unwrap_or(0);
    for module in graph.modules() {
        println!("{}", describe(module, width));
    }
    Ok(())
}

fn describe(module: &Module, width: usize) -> String {
    let mut line = format!(
        "{:<width$}  {} plugin(s), {} dependenc{}",
        module.name.as_str(),
        module.plugins.len(),
        module.dependencies.len(),
        if module.dependencies.len() == 1 { "y" } else { "ies" },
    );
    if let Some(floor) = &module.toolchain_floor {
        line.push_str(&format!(", toolchain {floor}"));
    }
    line
}
