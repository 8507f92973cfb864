//! Conversation state machine
//!
//! A pure transition table picks the next state and its entry action; the
//! [`Machine`] runs the action against the chat's lists and keeps following
//! automatic edges until the dialogue waits for the user again.

mod action;
mod machine;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use machine::Machine;
pub use state::State;
