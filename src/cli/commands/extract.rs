use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::extract::{TaskExtractor, TaskFilter};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Extract {
        input,
        output,
        pending,
        completed,
    } = cmd
    {
        let filter = TaskFilter::from_flags(*pending, *completed);

        let input = match input {
            Some(p) => expand_tilde(p),
            None => cfg.ledger_path(),
        };
        let output = match output {
            Some(p) => expand_tilde(p),
            None => cfg.output_path(filter.default_output(cfg)),
        };

        let report = TaskExtractor::extract_with(&input, &output, filter)?;

        if report.is_partial() {
            warning(format!(
                "{} malformed row(s) skipped in '{}':",
                report.skipped.len(),
                input.display()
            ));
            for row in &report.skipped {
                warning(format!("  line {}: {}", row.line, row.reason));
            }
        }

        if report.extracted == 0 {
            warning(format!(
                "No {}tasks found in '{}' (header written to '{}')",
                filter.label(),
                input.display(),
                output.display()
            ));
        } else {
            success(format!(
                "Extracted {} {}tasks to '{}'",
                report.extracted,
                filter.label(),
                output.display()
            ));
        }
    }
    Ok(())
}
