use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Create a CLion .idea/cmake.xml from a Visual Studio CMakeSettings.json"
)]
pub struct Cli {
    /// Project directory containing CMakeSettings.json
    pub project_dir: PathBuf,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Settings file to read, relative to the project directory
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write into an existing .idea folder
    #[arg(long)]
    pub force: bool,

    /// Also write .idea/misc.xml
    #[arg(long)]
    pub misc: bool,

    /// Logical processor count used for the parallel build hint
    #[arg(long)]
    pub cpus: Option<usize>,
}
