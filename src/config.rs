use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{env_optional, split_command_line};

pub(crate) const DEFAULT_ENGINE_PROGRAM: &str = "shortcuts";
pub(crate) const DEFAULT_SHORTCUT: &str = "switch";

pub(crate) const CONFIG_PATH_ENV: &str = "SHORTCUT_RUNNER_CONFIG";
pub(crate) const PROGRAM_ENV: &str = "SHORTCUT_RUNNER_PROGRAM";
pub(crate) const SHORTCUT_ENV: &str = "SHORTCUT_RUNNER_SHORTCUT";
pub(crate) const WRAPPER_ENV: &str = "SHORTCUT_RUNNER_COMMAND_WRAPPER";

/// How the automation engine is reached: `[wrapper...] program args...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EngineConfig {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) wrapper: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_shortcut(DEFAULT_ENGINE_PROGRAM, DEFAULT_SHORTCUT)
    }
}

impl EngineConfig {
    /// `program run <shortcut>`
    pub(crate) fn for_shortcut(program: &str, shortcut: &str) -> Self {
        Self {
            program: program.to_string(),
            args: vec!["run".to_string(), shortcut.to_string()],
            wrapper: Vec::new(),
        }
    }

    pub(crate) fn command_line(&self) -> String {
        self.wrapper
            .iter()
            .chain(std::iter::once(&self.program))
            .chain(self.args.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub(crate) engine: EngineSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub(crate) struct EngineSection {
    #[serde(default)]
    pub(crate) program: Option<String>,
    #[serde(default)]
    pub(crate) shortcut: Option<String>,
    #[serde(default)]
    pub(crate) wrapper: Option<Vec<String>>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub(crate) struct EngineOverrides {
    pub(crate) program: Option<String>,
    pub(crate) shortcut: Option<String>,
}

pub(crate) fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_optional(CONFIG_PATH_ENV).map(PathBuf::from))
}

/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig, Box<dyn std::error::Error>> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(serde_json::from_str(&data)
            .map_err(|e| format!("invalid config {}: {e}", path.display()))?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(format!("read config {}: {e}", path.display()).into()),
    }
}

/// Layer defaults < config file < environment < command line.
pub(crate) fn resolve_engine_config(
    file: &FileConfig,
    env: impl Fn(&str) -> Option<String>,
    overrides: &EngineOverrides,
) -> Result<EngineConfig, String> {
    let program = overrides
        .program
        .clone()
        .or_else(|| env(PROGRAM_ENV))
        .or_else(|| file.engine.program.clone())
        .unwrap_or_else(|| DEFAULT_ENGINE_PROGRAM.to_string());
    let shortcut = overrides
        .shortcut
        .clone()
        .or_else(|| env(SHORTCUT_ENV))
        .or_else(|| file.engine.shortcut.clone())
        .unwrap_or_else(|| DEFAULT_SHORTCUT.to_string());

    let wrapper = match env(WRAPPER_ENV) {
        Some(raw) => split_command_line(&raw).map_err(|e| format!("{WRAPPER_ENV}: {e}"))?,
        None => file.engine.wrapper.clone().unwrap_or_default(),
    };

    if program.trim().is_empty() {
        return Err("engine program cannot be empty".to_string());
    }
    if shortcut.trim().is_empty() {
        return Err("shortcut name cannot be empty".to_string());
    }

    let mut config = EngineConfig::for_shortcut(&program, &shortcut);
    config.wrapper = wrapper;
    Ok(config)
}

pub(crate) fn load_engine_config(
    explicit_path: Option<&Path>,
    overrides: &EngineOverrides,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let file = match config_file_path(explicit_path) {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };
    Ok(resolve_engine_config(&file, env_optional, overrides)?)
}
