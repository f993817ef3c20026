//! Shared testing utilities for vs2idea CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated `$HOME` plus a project directory to translate.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    project_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project_dir = root.path().join("project");
        fs::create_dir_all(&project_dir).expect("Failed to create project directory");
        Self { root, project_dir }
    }

    pub fn home(&self) -> &Path {
        self.root.path()
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn idea_dir(&self) -> PathBuf {
        self.project_dir.join(".idea")
    }

    pub fn write_settings(&self, content: &str) {
        fs::write(self.project_dir.join("CMakeSettings.json"), content)
            .expect("Failed to write CMakeSettings.json");
    }

    pub fn write_presets(&self, content: &str) {
        let dir = self.home().join(".config").join("vs2idea");
        fs::create_dir_all(&dir).expect("Failed to create presets directory");
        fs::write(dir.join("presets.toml"), content).expect("Failed to write presets.toml");
    }

    /// `vs2idea <project>` with `$HOME` pointed at the sandbox.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vs2idea").expect("Failed to locate vs2idea binary");
        cmd.env("HOME", self.home()).arg(&self.project_dir);
        cmd
    }

    /// `vs2idea .` run from inside the project directory.
    pub fn cli_from_project(&self) -> Command {
        let mut cmd = Command::cargo_bin("vs2idea").expect("Failed to locate vs2idea binary");
        cmd.env("HOME", self.home()).current_dir(&self.project_dir).arg(".");
        cmd
    }

    pub fn read_cmake_xml(&self) -> String {
        fs::read_to_string(self.idea_dir().join("cmake.xml")).expect("cmake.xml should exist")
    }
}

/// A Visual Studio configuration entry as it appears in CMakeSettings.json.
#[allow(dead_code)]
pub fn vs_entry(name: &str, build_root: &str, args: &str) -> String {
    format!(
        r#"{{
      "name": "{name}",
      "generator": "Visual Studio 16 2019 Win64",
      "configurationType": "Debug",
      "inheritEnvironments": [ "msvc_x64_x64" ],
      "buildRoot": "{build_root}",
      "installRoot": "${{projectDir}}\\out\\install\\${{name}}",
      "cmakeCommandArgs": "{args}",
      "buildCommandArgs": "-v",
      "ctestCommandArgs": ""
    }}"#
    )
}

#[allow(dead_code)]
pub fn settings(entries: &[String]) -> String {
    format!("{{\n  \"configurations\": [\n    {}\n  ]\n}}\n", entries.join(",\n    "))
}
