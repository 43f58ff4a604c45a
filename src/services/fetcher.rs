use crate::services::exec::CommandRunner;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("{tool} failed:\n{stderr}")]
    ToolFailed { tool: String, stderr: String },
    #[error("unexpected chart layout under {}: found [{}]", .dir.display(), .entries.join(", "))]
    UnexpectedLayout { dir: PathBuf, entries: Vec<String> },
}

impl FetchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ToolFailed { .. } => "TOOL_FAILED",
            Self::UnexpectedLayout { .. } => "UNEXPECTED_LAYOUT",
        }
    }
}

/// Register the repository, refresh indices, then pull and extract the
/// chart into a freshly recreated pull directory. Each step is fatal on
/// a non-zero exit; the tool's stderr is relayed verbatim.
pub fn fetch_chart(
    runner: &dyn CommandRunner,
    repo_name: &str,
    repo_url: &str,
    chart_name: &str,
    pull_dir: &Path,
) -> anyhow::Result<PathBuf> {
    log::info!("registering repository {} at {}", repo_name, repo_url);
    run_helm(runner, &["repo", "add", repo_name, repo_url])?;

    log::info!("refreshing repository indices");
    run_helm(runner, &["repo", "update"])?;

    if pull_dir.exists() {
        fs::remove_dir_all(pull_dir)
            .with_context(|| format!("clear pull dir {}", pull_dir.display()))?;
    }
    fs::create_dir_all(pull_dir)
        .with_context(|| format!("create pull dir {}", pull_dir.display()))?;

    let chart_ref = format!("{}/{}", repo_name, chart_name);
    let untardir = pull_dir.to_string_lossy();
    log::info!("pulling {} into {}", chart_ref, pull_dir.display());
    run_helm(
        runner,
        &["pull", &chart_ref, "--untar", "--untardir", untardir.as_ref()],
    )?;

    resolve_chart_root(pull_dir, chart_name)
}

fn run_helm(runner: &dyn CommandRunner, args: &[&str]) -> anyhow::Result<()> {
    let out = runner.run("helm", args)?;
    if !out.success {
        return Err(FetchError::ToolFailed {
            tool: format!("helm {}", args.join(" ")),
            stderr: out.stderr,
        }
        .into());
    }
    Ok(())
}

/// The untar step is expected to create `<pull_dir>/<chart_name>`.
/// Charts that unpack under a different top-level name are accepted only
/// when the pull directory holds exactly one entry; anything else is an
/// ambiguous layout and the diagnostic lists what was actually found.
pub fn resolve_chart_root(pull_dir: &Path, chart_name: &str) -> anyhow::Result<PathBuf> {
    let expected = pull_dir.join(chart_name);
    if expected.is_dir() {
        return Ok(expected);
    }

    let mut entries: Vec<String> = fs::read_dir(pull_dir)
        .with_context(|| format!("list pull dir {}", pull_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();

    if entries.len() == 1 {
        let sole = pull_dir.join(&entries[0]);
        if sole.is_dir() {
            log::warn!(
                "extraction did not create {}; using sole entry {}",
                expected.display(),
                sole.display()
            );
            return Ok(sole);
        }
    }

    Err(FetchError::UnexpectedLayout {
        dir: pull_dir.to_path_buf(),
        entries,
    }
    .into())
}
