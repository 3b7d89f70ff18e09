//! Modal stack for managing dialogs
//!
//! Replaces the per-dialog boolean flags (connection modal open, about modal
//! open) with a single stack. Opening is idempotent and closing removes the
//! modal wherever it sits, so dispatching the same action twice is harmless.

/// A dialog that can be shown on top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Manual connection entry
    Connection,
    /// About / version information
    About,
}

/// The dialogs currently open, in the order they were opened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create a new empty modal stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal unless it is already open
    pub fn open(&mut self, modal: Modal) {
        if !self.is_open(modal) {
            self.stack.push(modal);
        }
    }

    /// Remove a modal from anywhere in the stack
    pub fn close(&mut self, modal: Modal) {
        self.stack.retain(|m| *m != modal);
    }

    /// Set the open state of a modal
    pub fn set_open(&mut self, modal: Modal, open: bool) {
        if open {
            self.open(modal);
        } else {
            self.close(modal);
        }
    }

    /// Close every modal
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.stack.contains(&modal)
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
