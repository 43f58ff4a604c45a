use std::process::Command;

/// Captured outcome of one external command. The exit status is exposed
/// as a success flag; callers treat the streams as opaque text.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Narrow capability over subprocess execution: run a program with an
/// argument list, yielding captured stdout, captured stderr, and the
/// exit status. Orchestration code talks to this trait so tests can
/// script outcomes without real binaries on PATH.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput, ExecError>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput, ExecError> {
        log::debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ExecError::Spawn {
                program: program.to_string(),
                source: e,
            })?;
        Ok(ExecOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
