use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use super::{PlatformWindow, Window};

/// Quit signal shared between an event loop and the windows it drives.
///
/// Cheap to clone; all clones observe the same signal. The first recorded
/// code wins until the loop exits.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    exit_code: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the loop to return `code` at its next iteration.
    pub fn quit(&self, code: i32) {
        if self.exit_code.get().is_none() {
            log::debug!("quit requested with code {code}");
            self.exit_code.set(Some(code));
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code.get()
    }

    pub fn quit_requested(&self) -> bool {
        self.exit_code.get().is_some()
    }
}

/// Blocking event loop dispatching platform events into a window controller.
pub trait EventLoop {
    type Window: PlatformWindow;

    /// Handle to pass to windows driven by this loop.
    fn handle(&self) -> LoopHandle;

    /// Dispatches events until quit is signalled; returns the quit code.
    fn run(self, window: &mut Window<Self::Window>) -> Result<i32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_shared_between_clones() {
        let handle = LoopHandle::new();
        let clone = handle.clone();
        assert!(!handle.quit_requested());

        clone.quit(3);
        assert_eq!(handle.exit_code(), Some(3));
    }

    #[test]
    fn first_quit_code_wins() {
        let handle = LoopHandle::new();
        handle.quit(1);
        handle.quit(0);
        assert_eq!(handle.exit_code(), Some(1));
    }
}
