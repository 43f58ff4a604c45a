use crate::domain::models::StagedValues;
use crate::services::exec::CommandRunner;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ValidateError {
    #[error("helm is not runnable: {0}")]
    HelmUnavailable(String),
    #[error("chart validation failed:\n{stderr}")]
    PluginFailed { stderr: String },
}

impl ValidateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::HelmUnavailable(_) => "HELM_UNAVAILABLE",
            Self::PluginFailed { .. } => "VALIDATION_FAILED",
        }
    }
}

/// Probe the binary up front so a missing collaborator surfaces as a
/// named diagnostic rather than a spawn error mid-run.
pub fn ensure_helm_available(runner: &dyn CommandRunner) -> anyhow::Result<()> {
    match runner.run("helm", &["version", "--short"]) {
        Ok(out) if out.success => Ok(()),
        Ok(out) => Err(ValidateError::HelmUnavailable(out.stderr.trim().to_string()).into()),
        Err(err) => Err(ValidateError::HelmUnavailable(err.to_string()).into()),
    }
}

/// Argument list for the kubeconform plugin: namespace, one `-f` per
/// staged file in ascending layer order (the plugin merges left to
/// right, later wins), verbosity and summary flags, chart path last.
pub fn kubeconform_args(
    namespace: &str,
    values: &[StagedValues],
    chart_root: &Path,
) -> Vec<String> {
    let mut args = vec![
        "kubeconform".to_string(),
        "--namespace".to_string(),
        namespace.to_string(),
    ];
    for v in values {
        args.push("-f".to_string());
        args.push(v.staged.to_string_lossy().into_owned());
    }
    args.push("--verbose".to_string());
    args.push("--summary".to_string());
    args.push(chart_root.to_string_lossy().into_owned());
    args
}

/// Run the plugin once, synchronously, capturing both streams. A
/// non-zero exit is a meaningful outcome, not a transient error: the
/// captured stderr is the diagnostic and there is no retry.
pub fn validate_chart(
    runner: &dyn CommandRunner,
    namespace: &str,
    values: &[StagedValues],
    chart_root: &Path,
) -> anyhow::Result<String> {
    let args = kubeconform_args(namespace, values, chart_root);
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    log::info!("running helm {}", args.join(" "));

    let out = runner.run("helm", &argv)?;
    if !out.success {
        return Err(ValidateError::PluginFailed { stderr: out.stderr }.into());
    }
    Ok(out.stdout)
}
