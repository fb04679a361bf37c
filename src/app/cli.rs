use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resolve which files belong to a glint project"
)]
#[command(group(
    clap::ArgGroup::new("output_mode")
        .required(false)
        .args(["tree", "json"]),
))]
pub struct Cli {
    /// Files to test for membership; without any, the project root is scanned
    pub paths: Vec<PathBuf>,

    /// Directory to start configuration discovery from (defaults to the current directory)
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Do not search above the home directory
    #[arg(long)]
    pub stop_at_home: bool,

    /// Print the resolved root directory and patterns
    #[arg(long)]
    pub show_config: bool,

    /// Exit with status 1 if any given path is out of scope
    #[arg(long)]
    pub check: bool,

    /// Include files ignored by git when scanning
    #[arg(long)]
    pub no_ignore: bool,

    /// Display scanned files as a tree
    #[arg(long)]
    pub tree: bool,

    /// Display results as JSON
    #[arg(long)]
    pub json: bool,
}
