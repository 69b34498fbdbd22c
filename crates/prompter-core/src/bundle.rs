//! Loading a script together with its reference list.
//!
//! `.json` and `.toml` files carry a full bundle; any other file is taken as
//! the bare script text.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reference {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScriptBundle {
    #[serde(default)]
    pub title: String,
    pub script: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl ScriptBundle {
    pub fn from_text(title: impl Into<String>, script: impl Into<String>) -> Self {
        ScriptBundle {
            title: title.into(),
            script: script.into(),
            references: Vec::new(),
        }
    }
}

pub fn load_bundle(path: &Path) -> Result<ScriptBundle> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("script")
        .to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let mut bundle = match extension.as_deref() {
        Some("json") => serde_json::from_str::<ScriptBundle>(&contents)
            .with_context(|| format!("invalid script bundle JSON in {}", path.display()))?,
        Some("toml") => toml::from_str::<ScriptBundle>(&contents)
            .with_context(|| format!("invalid script bundle TOML in {}", path.display()))?,
        _ => ScriptBundle::from_text(stem.clone(), contents),
    };
    if bundle.title.trim().is_empty() {
        bundle.title = stem;
    }

    info!(
        path = %path.display(),
        title = %bundle.title,
        references = bundle.references.len(),
        "Loaded script"
    );
    Ok(bundle)
}
