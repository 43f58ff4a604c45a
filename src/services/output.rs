use crate::domain::models::{ErrorBody, JsonError, JsonOut};
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Failure surface: a JSON envelope on stdout in `--json` mode, plain
/// text on stderr otherwise. Must not itself be able to fail.
pub fn print_failure(json: bool, code: &str, message: &str) {
    if json {
        let body = JsonError {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(rendered) => println!("{}", rendered),
            Err(_) => eprintln!("error: {}", message),
        }
    } else {
        eprintln!("error: {}", message);
    }
}
