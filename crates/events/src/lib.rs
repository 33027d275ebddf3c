//! Domain events emitted from business operations.
//!
//! The workflow engine hands events back to its caller synchronously; how
//! they are persisted or published is the enclosing application's concern.

pub mod event;

pub use event::Event;
