use crate::cli::{ChartSource, Cli, VALIDATION_NAMESPACE};
use crate::domain::models::ValidationReport;
use crate::services::exec::CommandRunner;
use crate::services::{fetcher, output, stager, validator};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PreconditionError {
    #[error("chart path does not exist or is not a directory: {}", .0.display())]
    ChartPathMissing(PathBuf),
}

impl PreconditionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChartPathMissing(_) => "MISSING_CHART_PATH",
        }
    }
}

/// The single run: resolve the chart root (local path or remote fetch),
/// stage the mounted values layers, invoke the validator, report. Every
/// step is fatal on error; there are no retries and no backward steps.
pub fn handle_validate(cli: &Cli, runner: &dyn CommandRunner) -> anyhow::Result<()> {
    validator::ensure_helm_available(runner)?;

    let chart_root = match cli.source() {
        ChartSource::Local(path) => {
            if !path.is_dir() {
                return Err(PreconditionError::ChartPathMissing(path).into());
            }
            path
        }
        ChartSource::Remote {
            repo_name,
            repo_url,
            chart_name,
        } => {
            if !cli.json {
                println!("fetching {} from {} ({})", chart_name, repo_name, repo_url);
            }
            fetcher::fetch_chart(runner, &repo_name, &repo_url, &chart_name, &cli.pull_dir)?
        }
    };

    if !cli.json {
        println!("validating chart at {}", chart_root.display());
    }

    let staged = stager::stage_layers(&cli.values, &cli.staging_dir)?;
    if cli.json {
        for s in &staged {
            log::info!(
                "merge layer {}: {} -> {}",
                s.layer,
                s.source.display(),
                s.staged.display()
            );
        }
    } else {
        println!("merge order (lowest priority first):");
        for s in &staged {
            println!(
                "  {:>3}  {} -> {}",
                s.layer,
                s.source.display(),
                s.staged.display()
            );
        }
    }

    let validator_output =
        validator::validate_chart(runner, VALIDATION_NAMESPACE, &staged, &chart_root)?;

    let report = ValidationReport {
        chart_root,
        namespace: VALIDATION_NAMESPACE.to_string(),
        values: staged,
        validator_output,
    };
    output::print_one(cli.json, report, |r| {
        format!(
            "validation output:\n{}\nvalidation completed successfully",
            r.validator_output.trim_end()
        )
    })
}
