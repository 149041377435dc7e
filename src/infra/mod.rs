mod logging;
mod projects;
mod tty;

pub use logging::*;
pub use projects::*;
pub use tty::*;

use std::path::PathBuf;

/// Home directory used to shorten displayed paths; `None` leaves them as is.
pub fn resolve_home_dir() -> Option<PathBuf> {
    dirs::home_dir().filter(|home| !home.as_os_str().is_empty())
}
