//! App - Loaded tables and constants shared by every command

use anyhow::{Context, Result};
use combat_core::config::load_constants;
use combat_core::{DamageCalculator, EngineConstants, ReferenceTables};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub struct App {
    tables: Cow<'static, ReferenceTables>,
    constants: EngineConstants,
    pretty: bool,
}

impl App {
    /// Built-in tables and default constants unless overridden
    pub fn load(tables_dir: Option<&Path>, constants_file: Option<&Path>, pretty: bool) -> Result<Self> {
        let tables = match tables_dir {
            Some(dir) => {
                let tables = ReferenceTables::load_dir(dir)
                    .with_context(|| format!("loading reference tables from {}", dir.display()))?;
                tables
                    .validate()
                    .with_context(|| format!("validating reference tables in {}", dir.display()))?;
                info!(dir = %dir.display(), characters = tables.characters().len(), "tables loaded");
                Cow::Owned(tables)
            }
            None => Cow::Borrowed(ReferenceTables::builtin()),
        };

        let constants = match constants_file {
            Some(path) => load_constants(path)
                .with_context(|| format!("loading constants from {}", path.display()))?,
            None => EngineConstants::default(),
        };

        Ok(App {
            tables,
            constants,
            pretty,
        })
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    pub fn calculator(&self) -> DamageCalculator<'_> {
        DamageCalculator::new(&self.tables, self.constants.clone())
    }

    /// Print a value as JSON on stdout
    pub fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .context("serializing output")?;
        println!("{}", json);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unsupported input format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// Read a JSON or TOML input file, picked by extension
pub fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json")
        .to_ascii_lowercase();
    match extension.as_str() {
        "json" => serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display())),
        "toml" => toml::from_str(&content).with_context(|| format!("parsing {}", path.display())),
        other => Err(InputError::UnsupportedFormat(other.to_string()).into()),
    }
}
