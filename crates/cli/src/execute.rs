use crate::commands::Commands;
use buildplan_core::Error;
use std::process::ExitCode;

impl Commands {
    pub fn execute(self) -> eyre::Result<ExitCode> {
        let outcome = match self {
            Commands::Validate { sources } => crate::commands::validate::execute(&sources),
            Commands::Plan {
                sources,
                format,
                charset,
                output,
            } => crate::commands::plan::execute(&sources, &format, &charset, output.as_deref()),
            Commands::Modules { sources } => crate::commands::modules::execute(&sources),
        };

        match outcome {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(err) => report_violations(err),
        }
    }
}

/// Print descriptor violations one per line and fail; other errors propagate
fn report_violations(err: Error) -> eyre::Result<ExitCode> {
    let violations = err.violations();
    if violations.is_empty() {
        return Err(err.into());
    }

    for violation in violations {
        eprintln!("{}: {violation}", violation.kind());
    }
    eprintln!("{} violation(s) found", violations.len());
    Ok(ExitCode::FAILURE)
}
