//! Command line parsing exposed via the library.
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use super::options::{BundleOptions, Overrides};
use super::{build, order, transform, tree};

/// Options shared by the commands that read a project.
#[derive(StructOpt)]
struct ProjectArgs {
    /// Path to a config file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Project root directory
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    root: PathBuf,
}

impl ProjectArgs {
    fn options(&self) -> Result<BundleOptions> {
        BundleOptions::discover(&self.root, self.config.as_deref())
    }
}

#[derive(StructOpt)]
#[structopt(about = "Single file bundler for sketches and their shaders")]
enum SketchpackCommands {
    /// Bundle the project into a single script
    Build {
        #[structopt(flatten)]
        project: ProjectArgs,

        /// Entry module inside the output directory
        #[structopt(short, long)]
        entry: Option<String>,

        /// Write bundle to output instead of the entry module
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,

        /// Do not delete the inlined module directories
        #[structopt(long)]
        keep_dirs: bool,
    },

    /// Print the module dependency tree
    Tree {
        #[structopt(flatten)]
        project: ProjectArgs,

        /// Print the file name for each module
        #[structopt(short = "f", long)]
        include_file: bool,
    },

    /// Print the order modules are bundled in
    Order {
        #[structopt(flatten)]
        project: ProjectArgs,
    },

    /// Print a module with the module syntax removed
    Transform {
        /// Module file
        #[structopt(parse(from_os_str))]
        module: PathBuf,
    },
}

/// Parse the given arguments list or `std::env::os_args` and run the program.
pub fn run<T>(argv: Option<Vec<T>>) -> Result<()>
where
    T: Into<OsString> + Clone,
{
    if std::env::var("RUST_LOG").ok().is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let app = SketchpackCommands::clap();
    let matches = if let Some(argv) = argv {
        app.get_matches_from(argv)
    } else {
        app.get_matches()
    };
    let args = SketchpackCommands::from_clap(&matches);
    match args {
        SketchpackCommands::Build {
            project,
            entry,
            output,
            keep_dirs,
        } => {
            let mut options = project.options()?;
            options.apply(&Overrides {
                entry,
                output,
                keep_dirs,
            });
            build(options)?;
        }
        SketchpackCommands::Tree {
            project,
            include_file,
        } => tree(project.options()?, include_file)?,
        SketchpackCommands::Order { project } => order(project.options()?)?,
        SketchpackCommands::Transform { module } => transform(module)?,
    }
    Ok(())
}
