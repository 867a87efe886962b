use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Progress goes to stderr, so it is shown whenever stderr is a terminal,
/// unless output is machine-readable JSON or `--quiet` is set.
pub fn init(flags: &GlobalFlags) {
    let progress = std::io::stderr().is_terminal()
        && !flags.quiet
        && flags.format == OutputFormat::Text;

    let _ = UI_PREFS.set(UiPrefs { progress });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs { progress: false })
}
