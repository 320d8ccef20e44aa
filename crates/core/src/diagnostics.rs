//! Narrow sink for diagnostic lines emitted by the core.

use std::cell::RefCell;

/// Receives one human-readable diagnostic line at a time.
pub trait Diagnostics {
    fn emit(&self, line: &str);
}

impl<T: Diagnostics + ?Sized> Diagnostics for &T {
    fn emit(&self, line: &str) {
        (**self).emit(line);
    }
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {
    fn emit(&self, _line: &str) {}
}

/// Keeps every line in memory, mostly useful in tests.
#[derive(Debug, Default)]
pub struct Recorded {
    lines: RefCell<Vec<String>>,
}

impl Recorded {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Diagnostics for Recorded {
    fn emit(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
