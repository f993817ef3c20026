use crate::app::models::{SourceConfiguration, TargetConfiguration};
use crate::app::resolver::DirectoryRegistry;
use std::num::NonZeroUsize;
use std::thread;

pub const TOOLCHAIN_PRODUCT: &str = "Visual Studio";

/// Maps Visual Studio configurations onto CLion ones.
///
/// A translator owns the directory registry of exactly one run, so build a
/// fresh one for every settings file.
pub struct Translator {
    registry: DirectoryRegistry,
    build_options: Option<String>,
}

impl Translator {
    pub fn new(cpus: usize) -> Self {
        Self {
            registry: DirectoryRegistry::new(),
            build_options: build_options(cpus),
        }
    }

    pub fn translate(&mut self, source: &SourceConfiguration) -> TargetConfiguration {
        let generation_dir = self.registry.resolve(&source.build_root, &source.name);
        log::debug!("'{}' -> {}", source.name, generation_dir);

        TargetConfiguration {
            profile_name: source.name.clone(),
            enabled: true,
            generation_dir,
            config_name: source.configuration_type.clone(),
            toolchain_name: toolchain_name(&source.name),
            generation_options: source.cmake_command_args.clone(),
            build_options: self.build_options.clone(),
        }
    }

    /// Translates in input order, which decides who gets suffixed dirs.
    pub fn translate_all(mut self, sources: &[SourceConfiguration]) -> Vec<TargetConfiguration> {
        sources.iter().map(|source| self.translate(source)).collect()
    }
}

/// Logical processors available to this process, at least 1.
pub fn available_cpus() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Leaves one processor free; nothing when there is only one.
pub fn build_options(cpus: usize) -> Option<String> {
    (cpus > 1).then(|| format!("-j {}", cpus - 1))
}

/// Only 2017 is told apart, everything else is assumed to be 2019.
pub fn toolchain_name(profile_name: &str) -> String {
    let year = if profile_name.contains("2017") {
        "2017"
    } else {
        "2019"
    };
    format!("{} {}", TOOLCHAIN_PRODUCT, year)
}
