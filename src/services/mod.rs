//! Service layer containing side-effect helpers.
//!
//! ## Service map
//! - `exec.rs` — external command capability (run, capture both streams).
//! - `fetcher.rs` — repository add/update and chart pull/extract.
//! - `stager.rs` — values discovery, numeric ordering, scratch staging.
//! - `validator.rs` — kubeconform invocation and outcome relay.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod exec;
pub mod fetcher;
pub mod output;
pub mod stager;
pub mod validator;
