use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One values layer after staging: the mounted source file, its numeric
/// layer key, and the zero-padded copy handed to the validator.
#[derive(Debug, Serialize, Clone)]
pub struct StagedValues {
    pub layer: u64,
    pub source: PathBuf,
    pub staged: PathBuf,
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub chart_root: PathBuf,
    pub namespace: String,
    pub values: Vec<StagedValues>,
    pub validator_output: String,
}
