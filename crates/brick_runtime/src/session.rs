//! Per-level section outcome.

/// Whether the current section was passed.
///
/// `None` until a pass or fail detector fires. Create one per level build;
/// a fresh session never inherits a previous run's outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionSession {
    passed: Option<bool>,
}

impl SectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> Option<bool> {
        self.passed
    }

    pub fn mark(&mut self, passed: bool) {
        self.passed = Some(passed);
    }

    /// Section to spawn next: `pass` only when the section was explicitly passed.
    pub fn branch(&self, pass: usize, fail: usize) -> usize {
        if self.passed == Some(true) {
            pass
        } else {
            fail
        }
    }

    pub fn reset(&mut self) {
        self.passed = None;
    }
}
