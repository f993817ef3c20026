use std::collections::HashSet;

/// Keeps the CLion build tree apart from the Visual Studio one.
pub const BUILD_DIR_SUFFIX: &str = "-clion";

/// Visual Studio's stand-in for the directory holding CMakeSettings.json.
pub const THIS_FILE_DIR: &str = "${thisFileDir}\\";

/// Generation directories handed out during one translation run.
///
/// Directories are only ever added, and the order of `resolve` calls decides
/// which configuration keeps an unsuffixed path.
#[derive(Debug, Default)]
pub struct DirectoryRegistry {
    assigned: HashSet<String>,
}

impl DirectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.assigned.contains(dir)
    }

    /// Computes the generation dir for `build_root` and claims it for `name`.
    pub fn resolve(&mut self, build_root: &str, name: &str) -> String {
        let base = normalize(build_root);

        let dir = if !self.contains(&base) {
            base
        } else {
            let suffixed = format!("{}_{}", base, name);
            self.first_free(suffixed)
        };

        self.assigned.insert(dir.clone());
        dir
    }

    // Only reachable when two configurations share both root and name.
    fn first_free(&self, candidate: String) -> String {
        let mut dir = candidate.clone();
        let mut counter = 1;
        while self.contains(&dir) {
            counter += 1;
            dir = format!("{}_{}", candidate, counter);
        }
        dir
    }
}

/// Suffixes the root, drops a leading `${thisFileDir}\` and switches to `/`.
/// Roots without the placeholder are kept as they are.
pub fn normalize(build_root: &str) -> String {
    let suffixed = format!("{}{}", build_root, BUILD_DIR_SUFFIX);
    let relative = suffixed.strip_prefix(THIS_FILE_DIR).unwrap_or(&suffixed);
    relative.replace('\\', "/")
}
