// Command handlers module
pub mod check;
pub mod config;
pub mod run;
pub mod version;

use std::path::PathBuf;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use run::execute as run;
pub use version::execute as version;

/// Value of the `--config` flag, if given
pub(crate) fn config_path_arg(matches: &clap::ArgMatches) -> Option<PathBuf> {
    matches
        .try_get_one::<String>("config")
        .ok()
        .flatten()
        .map(PathBuf::from)
}
