use std::cell::Cell;

use tracing::warn;

pub const DEBUG_TIP: &str = "Tip: Set DEBUG=true to run in debug mode...";

/// Per-run sink for non-fatal extraction messages.
///
/// In verbose mode every message goes to `tracing`. In quiet mode the
/// messages are dropped and a single tip is printed the first time one
/// would have been shown.
#[derive(Debug, Default)]
pub struct Diagnostics {
    verbose: bool,
    tip_shown: Cell<bool>,
    suppressed: Cell<usize>,
    emitted: Cell<usize>,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Diagnostics {
            verbose,
            ..Default::default()
        }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// A field could not be found and was replaced by its default.
    pub fn degraded(&self, message: impl AsRef<str>) {
        if self.verbose {
            self.emitted.set(self.emitted.get() + 1);
            warn!("{}", message.as_ref());
            return;
        }
        if !self.tip_shown.replace(true) {
            println!("{}", DEBUG_TIP);
        }
        self.suppressed.set(self.suppressed.get() + 1);
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed.get()
    }

    pub fn total(&self) -> usize {
        self.suppressed.get() + self.emitted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_counts_and_suppresses() {
        let diag = Diagnostics::new(false);
        diag.degraded("role.description could not be found");
        diag.degraded("role.abstract could not be found");
        assert!(diag.tip_shown.get());
        assert_eq!(diag.suppressed(), 2);
        assert_eq!(diag.total(), 2);
    }

    #[test]
    fn verbose_mode_never_shows_tip() {
        let diag = Diagnostics::new(true);
        diag.degraded("attr.values could not be found");
        assert!(!diag.tip_shown.get());
        assert_eq!(diag.suppressed(), 0);
        assert_eq!(diag.total(), 1);
    }
}
