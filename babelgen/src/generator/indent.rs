//! Indentation-scope tracking.
//!
//! Each render owns one [`IndentTracker`]. Scopes are opened with
//! [`push`](IndentTracker::push) and closed with [`pop`](IndentTracker::pop)
//! in strictly nested pairs; the tracker must be back at depth zero when the
//! file is finished.

use crate::error::{RenderError, RenderResult};

/// Current indentation prefix of a render.
#[derive(Debug, Clone)]
pub struct IndentTracker {
    unit: &'static str,
    depth: usize,
    prefix: String,
}

impl IndentTracker {
    /// Create a tracker that indents by `unit` per scope.
    pub fn new(unit: &'static str) -> Self {
        Self {
            unit,
            depth: 0,
            prefix: String::new(),
        }
    }

    /// Open a scope.
    pub fn push(&mut self) {
        self.depth += 1;
        self.prefix.push_str(self.unit);
    }

    /// Close the innermost scope.
    pub fn pop(&mut self) -> RenderResult<()> {
        if self.depth == 0 {
            return Err(RenderError::imbalance("scope closed without a matching open"));
        }
        self.depth -= 1;
        self.prefix.truncate(self.prefix.len() - self.unit.len());
        Ok(())
    }

    /// The indentation prefix for the current depth.
    pub fn current(&self) -> &str {
        &self.prefix
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check that every opened scope was closed.
    pub fn finish(&self) -> RenderResult<()> {
        match self.depth {
            0 => Ok(()),
            open => Err(RenderError::imbalance(format!(
                "{} scope(s) still open at end of file",
                open
            ))),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn balanced_sequences_return_to_empty(depths in prop::collection::vec(1usize..6, 0..10)) {
            let mut tracker = IndentTracker::new("\t");
            for depth in depths {
                for _ in 0..depth {
                    tracker.push();
                }
                prop_assert_eq!(tracker.current().len(), tracker.depth());
                for _ in 0..depth {
                    tracker.pop().unwrap();
                }
                prop_assert_eq!(tracker.current(), "");
            }
            prop_assert!(tracker.finish().is_ok());
        }
    }
}
