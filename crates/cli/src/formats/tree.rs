use crate::formats::{CharSet, PlanFormatter};
use buildplan_core::{BuildPlan, ModuleGraph, Result};

pub struct TreeFormatter {
    charset: CharSet,
}

impl TreeFormatter {
    pub fn new(charset: CharSet) -> Self {
        Self { charset }
    }

    fn symbols(&self) -> TreeSymbols {
        match self.charset {
            CharSet::Unicode => TreeSymbols {
                branch: "├─",
                last_branch: "└─",
                vertical: "│",
                space: "  ",
            },
            CharSet::Ascii => TreeSymbols {
                branch: "+--",
                last_branch: "`--",
                vertical: "|",
                space: "   ",
            },
        }
    }
}

struct TreeSymbols {
    branch: &'static str,
    last_branch: &'static str,
    vertical: &'static str,
    space: &'static str,
}

impl PlanFormatter for TreeFormatter {
    fn format_plan(&self, plan: &BuildPlan, graph: &ModuleGraph) -> Result<String> {
        let symbols = self.symbols();
        let mut output = String::from("build plan\n");

        if plan.levels.is_empty() {
            output.push_str(&format!("{} No modules\n", symbols.last_branch));
            return Ok(output);
        }

        for (level_num, level) in plan.levels.iter().enumerate() {
            let is_last_level = level_num == plan.levels.len() - 1;
            let (level_symbol, child_prefix) = if is_last_level {
                (symbols.last_branch, symbols.space.to_string())
            } else {
                let pad = " ".repeat(symbols.space.len().saturating_sub(1));
                (symbols.branch, format!("{}{pad}", symbols.vertical))
            };
            output.push_str(&format!("{level_symbol} level {level_num}\n"));

            for (i, name) in level.iter().enumerate() {
                let is_last = i == level.len() - 1;
                let symbol = if is_last {
                    symbols.last_branch
                } else {
                    symbols.branch
                };
                output.push_str(&format!("{child_prefix} {symbol} {name}"));

                let deps = graph
                    .get(name.as_str())
                    .map(|m| m.internal_dependencies())
                    .unwrap_or_default();
                if !deps.is_empty() {
                    let deps: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
                    output.push_str(&format!("   (depends on: {})", deps.join(", ")));
                }
                output.push('\n');
            }
        }

        if let Some(floor) = &plan.toolchain_floor {
            output.push_str(&format!("toolchain floor: {floor}\n"));
        }
        if !plan.test_suites.is_empty() {
            let suites: Vec<String> = plan
                .test_suites
                .iter()
                .map(|s| format!("{}:{}", s.module, s.name))
                .collect();
            output.push_str(&format!("test suites: {}\n", suites.join(", ")));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fixtures;

    #[test]
    fn test_unicode_tree() {
        let (plan, graph) = fixtures::sample();
        let output = TreeFormatter::new(CharSet::Unicode)
            .format_plan(&plan, &graph)
            .unwrap();

        let expected = "build plan\n\
            ├─ level 0\n\
            │  └─ core\n\
            └─ level 1\n   \
            ├─ app   (depends on: core)\n   \
            └─ code-coverage   (depends on: core)\n\
            toolchain floor: 21\n\
            test suites: core:test\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_ascii_tree() {
        let (plan, graph) = fixtures::sample();
        let output = TreeFormatter::new(CharSet::Ascii)
            .format_plan(&plan, &graph)
            .unwrap();

        assert!(output.is_ascii());
        assert!(output.contains("+-- level 0"));
        assert!(output.contains("`-- level 1"));
    }

    #[test]
    fn test_empty_plan() {
        let output = TreeFormatter::new(CharSet::Unicode)
            .format_plan(&BuildPlan::default(), &ModuleGraph::default())
            .unwrap();
        assert_eq!(output, "build plan\n└─ No modules\n");
    }
}
