use crate::domain::models::StagedValues;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("no values files found: expected {prefix}-0, {prefix}-1, ... (or a single file at {prefix})")]
    NoValuesFiles { prefix: String },
}

impl StageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoValuesFiles { .. } => "NO_VALUES_FILES",
        }
    }
}

/// Extract the layer index from a mounted file name. `values-10` and
/// `values-10.yaml` both map to layer 10; anything without a trailing
/// integer after the prefix stem is not part of the convention.
pub fn layer_index(file_name: &str, stem: &str) -> Option<u64> {
    let base = file_name
        .strip_suffix(".yaml")
        .or_else(|| file_name.strip_suffix(".yml"))
        .unwrap_or(file_name);
    let digits = base.strip_prefix(stem)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Discover mounted values files and sort them ascending by numeric
/// layer key. Numeric, not lexical: layer 10 sorts after layer 9. When
/// no indexed file exists, a plain file at the prefix (or `<prefix>.yaml`)
/// degrades to a one-element list at layer 0.
pub fn discover_layers(prefix: &Path) -> anyhow::Result<Vec<(u64, PathBuf)>> {
    let stem = prefix
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid values prefix: {}", prefix.display()))?;
    let dir = match prefix.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut layers = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(layer) = layer_index(name, stem) {
                layers.push((layer, entry.path()));
            }
        }
    }

    if layers.is_empty() {
        for candidate in [prefix.to_path_buf(), prefix.with_extension("yaml")] {
            if candidate.is_file() {
                layers.push((0, candidate));
                break;
            }
        }
    }

    if layers.is_empty() {
        return Err(StageError::NoValuesFiles {
            prefix: prefix.display().to_string(),
        }
        .into());
    }

    layers.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(layers)
}

/// Copy discovered layers into a freshly recreated staging directory
/// under zero-padded positional names, so a lexical listing of the
/// directory also reflects merge order. The recreation guarantees no
/// stale file from a prior run leaks into the sequence.
pub fn stage_layers(prefix: &Path, staging_dir: &Path) -> anyhow::Result<Vec<StagedValues>> {
    let layers = discover_layers(prefix)?;
    log::debug!("discovered {} values layer(s)", layers.len());

    if staging_dir.exists() {
        fs::remove_dir_all(staging_dir)
            .with_context(|| format!("clear staging dir {}", staging_dir.display()))?;
    }
    fs::create_dir_all(staging_dir)
        .with_context(|| format!("create staging dir {}", staging_dir.display()))?;

    let mut staged = Vec::with_capacity(layers.len());
    for (position, (layer, source)) in layers.into_iter().enumerate() {
        let dst = staging_dir.join(format!("{:02}-values.yaml", position));
        fs::copy(&source, &dst)
            .with_context(|| format!("stage {} as {}", source.display(), dst.display()))?;
        staged.push(StagedValues {
            layer,
            source,
            staged: dst,
        });
    }
    Ok(staged)
}
