//! Client-side session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! session controller owns the adopted document identifier and selects the
//! active workflow (upload, then conversation); every UI interaction and
//! backend completion is an `Event`, and transitions produce `Effect`s that
//! the runtime applies or executes.

mod effect;
pub mod event;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{
    ChatPhase, DocumentId, Message, Sender, Session, SessionPhase, SessionSnapshot, Transcript,
    UploadPhase,
};
pub use transition::{transition, TransitionError, TransitionResult};
