use crate::formats::PlanFormatter;
use buildplan_core::{BuildPlan, ModuleGraph, Result};

/// The plan as pretty-printed JSON with camelCase keys
pub struct JsonFormatter {}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl PlanFormatter for JsonFormatter {
    fn format_plan(&self, plan: &BuildPlan, _graph: &ModuleGraph) -> Result<String> {
        let mut output = serde_json::to_string_pretty(plan)?;
        output.push('\n');
        Ok(output)
    }
}
