#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated run environment: a fixture chart, a values mount, private
/// scratch directories, and a scripted `helm` stand-in on PATH that
/// records every argv line it receives.
pub struct TestEnv {
    _tmp: TempDir,
    pub chart: PathBuf,
    pub values_prefix: PathBuf,
    pub staging_dir: PathBuf,
    pub pull_dir: PathBuf,
    pub helm_log: PathBuf,
    ctrl: PathBuf,
    bin_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path();

        let chart = root.join("chart");
        fs::create_dir_all(chart.join("templates")).expect("create chart dir");
        fs::write(
            chart.join("Chart.yaml"),
            "apiVersion: v2\nname: fixture\nversion: 0.1.0\n",
        )
        .expect("write Chart.yaml");

        let mounts = root.join("mounts");
        fs::create_dir_all(&mounts).expect("create mounts dir");

        let ctrl = root.join("ctrl");
        fs::create_dir_all(&ctrl).expect("create ctrl dir");

        let bin_dir = root.join("bin");
        fs::create_dir_all(&bin_dir).expect("create bin dir");
        let helm_log = root.join("helm-argv.log");
        write_stub_helm(&bin_dir, &helm_log, &ctrl);

        Self {
            chart,
            values_prefix: mounts.join("values"),
            staging_dir: root.join("scratch/values"),
            pull_dir: root.join("scratch/charts"),
            helm_log,
            ctrl,
            bin_dir,
            _tmp: tmp,
        }
    }

    /// Write one mounted values layer, e.g. `values-3`.
    pub fn write_layer(&self, index: u64, body: &str) {
        fs::write(format!("{}-{}", self.values_prefix.display(), index), body)
            .expect("write values layer");
    }

    /// Flip a behavior knob in the stub helm (e.g. `fail-pull`).
    pub fn script_helm(&self, knob: &str) {
        fs::write(self.ctrl.join(knob), "").expect("write control knob");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("chartproof");
        let path = match std::env::var("PATH") {
            Ok(p) => format!("{}:{}", self.bin_dir.display(), p),
            Err(_) => self.bin_dir.display().to_string(),
        };
        cmd.env("PATH", path)
            .arg("--values")
            .arg(&self.values_prefix)
            .arg("--staging-dir")
            .arg(&self.staging_dir)
            .arg("--pull-dir")
            .arg(&self.pull_dir);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    /// Every argv line the stub helm has seen, oldest first.
    pub fn helm_calls(&self) -> Vec<String> {
        if !self.helm_log.exists() {
            return vec![];
        }
        fs::read_to_string(&self.helm_log)
            .expect("read helm log")
            .lines()
            .map(|l| l.to_string())
            .collect()
    }
}

fn write_stub_helm(bin_dir: &Path, log: &Path, ctrl: &Path) {
    let script = format!(
        r#"#!/bin/sh
# scripted helm stand-in used by the integration suites
printf '%s\n' "$*" >> "{log}"
case "$1" in
version)
    echo "v3.15.2+gtest"
    exit 0
    ;;
repo)
    exit 0
    ;;
pull)
    if [ -f "{ctrl}/fail-pull" ]; then
        echo "Error: failed to fetch chart from repository" >&2
        exit 1
    fi
    chart_ref="$2"
    untardir=""
    prev=""
    for a in "$@"; do
        if [ "$prev" = "--untardir" ]; then
            untardir="$a"
        fi
        prev="$a"
    done
    name="${{chart_ref#*/}}"
    if [ -f "{ctrl}/untar-renamed" ]; then
        name="$name-0.1.0"
    fi
    mkdir -p "$untardir/$name"
    printf 'apiVersion: v2\nname: %s\nversion: 0.1.0\n' "$name" > "$untardir/$name/Chart.yaml"
    if [ -f "{ctrl}/untar-extra-entry" ]; then
        mkdir -p "$untardir/another-entry"
    fi
    exit 0
    ;;
kubeconform)
    if [ -f "{ctrl}/fail-kubeconform" ]; then
        echo "invalid resource: Deployment replicas must be an integer" >&2
        exit 1
    fi
    echo "Summary: 12 resources found, 12 valid, 0 invalid, 0 errors"
    exit 0
    ;;
esac
exit 0
"#,
        log = log.display(),
        ctrl = ctrl.display(),
    );

    let helm = bin_dir.join("helm");
    fs::write(&helm, script).expect("write stub helm");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&helm, fs::Permissions::from_mode(0o755))
            .expect("mark stub helm executable");
    }
}
