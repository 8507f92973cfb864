//! Message processing loop
//!
//! One user message moves the machine along one edge; afterwards the
//! machine keeps following `Advance` edges until it reaches a state that
//! waits for real input. Replies from every entered state are collected in
//! order.

use super::action::{self, Outcome};
use super::state::{Input, State};
use super::transition::{transition, Step};
use crate::book::ListBook;
use crate::store::ListStore;

/// Upper bound on states entered for one message.
///
/// The longest legal path is message edge + two `Advance` edges; hitting
/// this bound means the edge table has an `Advance` cycle.
const MAX_STEPS: usize = State::ALL.len();

#[derive(Debug, Default)]
pub struct Machine {
    state: State,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Feed one user message and return the newline-joined replies
    pub fn process<S: ListStore>(&mut self, book: &mut ListBook<S>, text: &str) -> String {
        let mut replies: Vec<String> = Vec::new();
        let mut input = Input::Message(text);

        for _ in 0..MAX_STEPS {
            let Some(step) = transition(self.state, &input) else {
                return replies.join("\n");
            };
            self.enter(step, book, &mut replies);
            if self.state == State::Idle {
                return replies.join("\n");
            }
            input = Input::Advance;
        }

        tracing::error!(state = %self.state, "Automatic transitions did not settle, resetting");
        self.state = State::Idle;
        book.unbind();
        replies.join("\n")
    }

    fn enter<S: ListStore>(&mut self, step: Step, book: &mut ListBook<S>, replies: &mut Vec<String>) {
        let Step { action, next } = step;
        tracing::debug!(from = %self.state, to = %next, "Changing state");
        self.state = next;

        let Outcome { reply, abort } = action::perform(action, book);
        if !reply.is_empty() {
            replies.push(reply);
        }
        if abort {
            tracing::debug!(from = %self.state, "Workflow aborted");
            self.state = State::Idle;
        }
        if self.state == State::Idle {
            book.unbind();
        }
    }
}
