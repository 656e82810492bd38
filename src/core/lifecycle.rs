//! Mount state shared by the frame loop, the reveal tracker and the CLI

/// Lifecycle of a mounted effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, nothing scheduled yet
    #[default]
    Idle,
    Running,
    /// Torn down; terminal
    Disposed,
}

impl Lifecycle {
    pub fn is_running(&self) -> bool {
        matches!(self, Lifecycle::Running)
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, Lifecycle::Disposed)
    }

    /// Idle -> Running. Returns false if already running or disposed.
    pub fn start(&mut self) -> bool {
        if *self == Lifecycle::Idle {
            *self = Lifecycle::Running;
            true
        } else {
            false
        }
    }

    /// Move to Disposed. Returns true only on the first call.
    pub fn dispose(&mut self) -> bool {
        if self.is_disposed() {
            false
        } else {
            *self = Lifecycle::Disposed;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispose_is_terminal_and_idempotent() {
        let mut state = Lifecycle::default();
        assert!(state.start());
        assert!(!state.start());
        assert!(state.dispose());
        assert!(!state.dispose());
        assert!(!state.start());
        assert!(state.is_disposed());
    }
}
