use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "CMakeSettings.json";
pub const IDEA_DIR: &str = ".idea";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    input: Option<PathBuf>,
    misc: Option<bool>,
    cpus: Option<usize>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".config").join("vs2idea").join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    log::debug!("Loaded presets from {}", config_path.display());
    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = load_presets_file()?;
    Ok(merge(cli, &presets))
}

/// CLI flag > preset > default. The preset is picked by `--preset`, falling
/// back to the project folder name.
fn merge(cli: Cli, presets: &HashMap<String, PresetConfig>) -> RuntimeConfig {
    let project_name = project_name(&cli.project_dir);

    let preset_key = cli.preset.as_deref().or(project_name.as_deref());
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    let input = cli
        .input
        .or(preset.input)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    RuntimeConfig {
        input_path: cli.project_dir.join(input),
        idea_dir: cli.project_dir.join(IDEA_DIR),
        project_dir: cli.project_dir,
        force: cli.force,
        write_misc: cli.misc || preset.misc.unwrap_or(false),
        cpus: cli.cpus.or(preset.cpus),
    }
}

/// Folder name of the project. Paths such as `.` or `..` have none of their
/// own, so they are canonicalized first.
fn project_name(project_dir: &Path) -> Option<String> {
    let name = match project_dir.file_name() {
        Some(name) => name.to_os_string(),
        None => fs::canonicalize(project_dir).ok()?.file_name()?.to_os_string(),
    };
    name.to_str().map(str::to_string)
}
