use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Historical fixed mount prefix for layered values files.
pub const DEFAULT_VALUES_PREFIX: &str = "/values";
/// Historical fixed scratch directory for staged values copies.
pub const DEFAULT_STAGING_DIR: &str = "/tmp/chartproof/values";
/// Historical fixed scratch directory for pulled remote charts.
pub const DEFAULT_PULL_DIR: &str = "/tmp/chartproof/charts";

/// Namespace handed to the validator. Deliberately not a CLI flag.
pub const VALIDATION_NAMESPACE: &str = "default";

#[derive(Parser, Debug)]
#[command(
    name = "chartproof",
    version,
    about = "Validate a Helm chart's rendered manifests with kubeconform",
    override_usage = "chartproof --local <CHART_PATH>\n       chartproof --remote <REPO_NAME> <REPO_URL> <CHART_NAME>",
    after_help = "Examples:\n  chartproof --local ./charts/myapp\n  chartproof --remote bitnami https://charts.bitnami.com/bitnami redis"
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["local", "remote"]),
))]
pub struct Cli {
    /// Validate a chart already present on disk
    #[arg(long, value_name = "CHART_PATH")]
    pub local: Option<PathBuf>,

    /// Register a chart repository, pull the named chart, then validate it
    #[arg(
        long,
        num_args = 3,
        value_names = ["REPO_NAME", "REPO_URL", "CHART_NAME"]
    )]
    pub remote: Option<Vec<String>>,

    /// Mount prefix for layered values files (<PREFIX>-0, <PREFIX>-1, ...)
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_VALUES_PREFIX)]
    pub values: PathBuf,

    /// Scratch directory for staged values copies, recreated each run
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: PathBuf,

    /// Scratch directory for pulled remote charts, recreated each run
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PULL_DIR)]
    pub pull_dir: PathBuf,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone)]
pub enum ChartSource {
    Local(PathBuf),
    Remote {
        repo_name: String,
        repo_url: String,
        chart_name: String,
    },
}

impl Cli {
    pub fn source(&self) -> ChartSource {
        if let Some(path) = &self.local {
            return ChartSource::Local(path.clone());
        }
        if let Some(parts) = &self.remote {
            if let [repo_name, repo_url, chart_name] = parts.as_slice() {
                return ChartSource::Remote {
                    repo_name: repo_name.clone(),
                    repo_url: repo_url.clone(),
                    chart_name: chart_name.clone(),
                };
            }
        }
        unreachable!("clap enforces exactly one chart source")
    }
}
