use std::path::PathBuf;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub project_dir: PathBuf,
    pub input_path: PathBuf,
    pub idea_dir: PathBuf,
    pub force: bool,
    pub write_misc: bool,
    pub cpus: Option<usize>,
}

/// One entry of the `configurations` array in CMakeSettings.json.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfiguration {
    pub name: String,
    pub generator: String,
    pub configuration_type: String,
    pub build_root: String,
    pub cmake_command_args: String,
}

/// One `<configuration>` element of the emitted cmake.xml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfiguration {
    pub profile_name: String,
    pub enabled: bool,
    pub generation_dir: String,
    pub config_name: String,
    pub toolchain_name: String,
    pub generation_options: String,
    pub build_options: Option<String>, // None when only one CPU is available
}
