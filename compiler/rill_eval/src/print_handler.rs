//! Print output destinations.
//!
//! `Print` goes through a handler so tests (and any embedding) can capture
//! output instead of writing to stdout. Enum dispatch keeps the frequent
//! path static.

use std::cell::RefCell;
use std::rc::Rc;

/// Where `Print` lines go.
#[derive(Clone)]
pub enum PrintHandler {
    /// Write to stdout (the default).
    Stdout,
    /// Append to a shared buffer, for tests and capture.
    Buffer(Rc<RefCell<String>>),
}

impl PrintHandler {
    /// A handler that captures into a buffer, plus the buffer to read back.
    pub fn buffer() -> (PrintHandler, Rc<RefCell<String>>) {
        let buffer = Rc::new(RefCell::new(String::new()));
        (PrintHandler::Buffer(buffer.clone()), buffer)
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                let mut buf = buffer.borrow_mut();
                buf.push_str(msg);
                buf.push('\n');
            }
        }
    }
}

impl Default for PrintHandler {
    fn default() -> Self {
        PrintHandler::Stdout
    }
}
