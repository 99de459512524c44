//! Runtime for executing the session
//!
//! Single-writer event loop around the pure state machine. The UI talks to
//! it through a `SessionHandle`; backend exchanges run as spawned tasks
//! whose completions re-enter the same event channel.

mod executor;


pub use executor::{SessionHandle, SessionRuntime};
