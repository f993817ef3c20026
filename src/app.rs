// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod loader;
pub mod models;
pub mod resolver;
pub mod translator;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::error::ConvertError;
use self::formatter::OutputGenerator;
use self::lexer::strip_comments;
use self::loader::load_configurations;
use self::translator::{available_cpus, Translator};

/// Reads a CMakeSettings.json and renders the matching cmake.xml document.
///
/// Nothing is written here; a failure leaves the filesystem untouched.
pub fn render_cmake(input_path: &Path, cpus: usize) -> Result<(String, usize), ConvertError> {
    let raw = fs::read_to_string(input_path).map_err(|e| ConvertError::io(input_path, e))?;
    let sources = load_configurations(&strip_comments(&raw))?;

    if sources.is_empty() {
        log::warn!("No Visual Studio configurations in {}", input_path.display());
    }

    let targets = Translator::new(cpus).translate_all(&sources);
    let document = OutputGenerator::render(&OutputGenerator::cmake_document(&targets));
    Ok((document, targets.len()))
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Check Preconditions
    if !args.project_dir.is_dir() {
        bail!("Folder does not exist: {}", args.project_dir.display());
    }

    let config = resolve_config(args)?;

    if config.idea_dir.exists() && !config.force {
        bail!(
            "Project already contains .idea folder: {}",
            config.idea_dir.display()
        );
    }

    if !config.input_path.is_file() {
        let file_name = config
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.input_path.display().to_string());
        bail!(
            "No {} found in project dir {}",
            file_name,
            config.project_dir.display()
        );
    }

    log::info!("Reading {}", config.input_path.display());

    // 3. Translate before touching the project
    let cpus = config.cpus.unwrap_or_else(available_cpus);
    let (document, count) = render_cmake(&config.input_path, cpus)
        .with_context(|| format!("Failed to translate {}", config.input_path.display()))?;

    // 4. Write Output
    let mut files = vec![(config.idea_dir.join("cmake.xml"), document)];
    if config.write_misc {
        let misc = OutputGenerator::render(&OutputGenerator::misc_document());
        files.push((config.idea_dir.join("misc.xml"), misc));
    }

    write_project_files(&config.idea_dir, &files)?;
    log::info!(
        "Wrote {} configuration(s) to {}",
        count,
        config.idea_dir.join("cmake.xml").display()
    );

    Ok(())
}

/// Writes `files` into `idea_dir`. When this call created `idea_dir` and the
/// write fails, the directory is removed again so a rerun is not blocked.
fn write_project_files(idea_dir: &Path, files: &[(PathBuf, String)]) -> Result<()> {
    let created = !idea_dir.exists();
    fs::create_dir_all(idea_dir)
        .with_context(|| format!("Failed to create {}", idea_dir.display()))?;

    let result = OutputGenerator::write_all_atomic(files);
    if result.is_err() && created {
        if let Err(err) = fs::remove_dir_all(idea_dir) {
            log::warn!("Could not remove {}: {}", idea_dir.display(), err);
        }
    }

    result.with_context(|| format!("Failed to write project files to {}", idea_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SETTINGS: &str = r#"{
  // Visual Studio settings
  "configurations": [
    {
      "name": "Win-Debug",
      "generator": "Visual Studio 16 2019 Win64",
      "configurationType": "Debug",
      "buildRoot": "${thisFileDir}\\out\\debug",
      "cmakeCommandArgs": "-DFOO=1"
    },
    /* a WSL entry,
       not translated */
    {
      "name": "WSL-Debug",
      "generator": "Unix Makefiles",
      "configurationType": "Debug",
      "buildRoot": "${thisFileDir}\\out\\wsl",
      "cmakeCommandArgs": ""
    },
    {
      "name": "Win-Release",
      "generator": "Visual Studio 16 2019 Win64",
      "configurationType": "Release",
      "buildRoot": "${thisFileDir}\\out\\debug",
      "cmakeCommandArgs": "-DFOO=1"
    }
  ]
}"#;

    #[test]
    fn end_to_end_resolves_collision_in_input_order() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("CMakeSettings.json");
        let output = dir.path().join("cmake.xml");
        fs::write(&input, SETTINGS).unwrap();

        let (document, count) = render_cmake(&input, 4).unwrap();
        assert_eq!(count, 2);
        OutputGenerator::write_all_atomic(&[(output.clone(), document)]).unwrap();

        let xml = fs::read_to_string(&output).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let configs: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("configuration"))
            .collect();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].attribute("PROFILE_NAME"), Some("Win-Debug"));
        assert_eq!(configs[0].attribute("GENERATION_DIR"), Some("out/debug-clion"));
        assert_eq!(configs[1].attribute("PROFILE_NAME"), Some("Win-Release"));
        assert_eq!(
            configs[1].attribute("GENERATION_DIR"),
            Some("out/debug-clion_Win-Release")
        );
        assert_eq!(configs[1].attribute("CONFIG_NAME"), Some("Release"));
        assert_eq!(configs[0].attribute("BUILD_OPTIONS"), Some("-j 3"));
    }

    #[test]
    fn separate_runs_do_not_share_directories() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("CMakeSettings.json");
        fs::write(&input, SETTINGS).unwrap();

        let (first, _) = render_cmake(&input, 1).unwrap();
        let (second, _) = render_cmake(&input, 1).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains("BUILD_OPTIONS"));
    }

    #[test]
    fn missing_field_aborts_translation() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("CMakeSettings.json");
        fs::write(&input, r#"{ "configurations": [ { "name": "x" } ] }"#).unwrap();

        let err = render_cmake(&input, 2).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field: "generator", .. }));
    }

    #[test]
    fn unreadable_input_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = render_cmake(&dir.path().join("missing.json"), 2).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }

    #[test]
    fn writes_all_project_files_into_new_idea_dir() {
        let dir = TempDir::new().unwrap();
        let idea = dir.path().join(".idea");
        let files = [
            (idea.join("cmake.xml"), "a".to_string()),
            (idea.join("misc.xml"), "b".to_string()),
        ];

        write_project_files(&idea, &files).unwrap();

        assert_eq!(fs::read_to_string(idea.join("cmake.xml")).unwrap(), "a");
        assert_eq!(fs::read_to_string(idea.join("misc.xml")).unwrap(), "b");
    }

    #[test]
    fn failed_write_removes_idea_dir_it_created() {
        let dir = TempDir::new().unwrap();
        let idea = dir.path().join(".idea");
        let files = [
            (idea.join("cmake.xml"), "a".to_string()),
            (idea.join("missing").join("misc.xml"), "b".to_string()),
        ];

        assert!(write_project_files(&idea, &files).is_err());
        assert!(!idea.exists());
    }

    #[test]
    fn failed_write_keeps_existing_idea_dir() {
        let dir = TempDir::new().unwrap();
        let idea = dir.path().join(".idea");
        fs::create_dir_all(&idea).unwrap();
        fs::write(idea.join("workspace.xml"), "keep").unwrap();
        let files = [(idea.join("missing").join("cmake.xml"), "a".to_string())];

        assert!(write_project_files(&idea, &files).is_err());
        assert_eq!(fs::read_to_string(idea.join("workspace.xml")).unwrap(), "keep");
        assert!(!idea.join("cmake.xml").exists());
    }
}
