//! tersecss.toml handling

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tersecss::{AbbreviationTable, Compiler};

pub const DEFAULT_CONFIG_FILE: &str = "tersecss.toml";

/// Top-level configuration (tersecss.toml)
#[derive(Debug, Default, Deserialize)]
pub struct TerseConfig {
    #[serde(default)]
    pub build: BuildConfig,
    /// Extra abbreviations, taking precedence over the built-in table
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    /// Define groups: `[defines.<group>] <key> = ["line", ...]`
    #[serde(default)]
    pub defines: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// Build configuration
#[derive(Debug, Default, Deserialize)]
pub struct BuildConfig {
    /// Source units, compiled in order
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Stylesheet destination; stdout when absent
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl TerseConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `path` if given, else `tersecss.toml` in `dir` if it exists, else
    /// the defaults.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default = dir.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// A compiler with this configuration's abbreviations and define groups.
    pub fn compiler(&self) -> Result<Compiler> {
        let table: AbbreviationTable = self.abbreviations.iter().collect();
        let mut compiler = Compiler::with_abbreviations(table);
        for (group, keys) in &self.defines {
            for (key, lines) in keys {
                compiler
                    .define(group, key, &lines.join("\n"))
                    .with_context(|| format!("Invalid define group `{group}[{key}]`"))?;
            }
        }
        Ok(compiler)
    }
}
