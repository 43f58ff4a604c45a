use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use services::exec::SystemRunner;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = commands::handle_validate(&cli, &SystemRunner) {
        services::output::print_failure(cli.json, error_code(&err), &format!("{:#}", err));
        std::process::exit(1);
    }
}

/// Stable error code for the JSON envelope. The process exit status is
/// uniformly non-zero; only the envelope differentiates failures.
fn error_code(err: &anyhow::Error) -> &'static str {
    use commands::validate::PreconditionError;
    use services::exec::ExecError;
    use services::fetcher::FetchError;
    use services::stager::StageError;
    use services::validator::ValidateError;

    if let Some(e) = err.downcast_ref::<StageError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<FetchError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<ValidateError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<PreconditionError>() {
        return e.code();
    }
    if err.downcast_ref::<ExecError>().is_some() {
        return "TOOL_FAILED";
    }
    "INTERNAL"
}
