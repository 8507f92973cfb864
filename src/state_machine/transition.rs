//! Transition table
//!
//! `transition` is pure: it maps the current state and one input to the
//! destination state plus the entry action to run there. Running the
//! action is the machine's job.

use super::state::{Input, State};
use crate::grammar::{self, Confirmation, EditCommand, GlobalCommand, END_INPUT};

/// Entry action of a destination state, with the arguments captured from
/// the input that selected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do besides changing state
    Settle,
    ShowHelp,
    ListAll,
    ViewList { name: String },
    CreateList { name: String },
    AddNewItem { text: String },
    FinishNewList,
    ConfirmDelete { name: String },
    PromptYesNo,
    DeleteList,
    BeginEdit { name: String },
    RenderCurrent,
    ShowEditHelp,
    FinishEdit,
    Append { text: String },
    Remove { index: usize },
    Insert { index: usize, text: String },
    Move { from: usize, to: usize },
    Replace { index: usize, text: String },
    RejectInput,
}

/// A selected edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub next: State,
}

impl Step {
    pub fn new(action: Action, next: State) -> Self {
        Self { action, next }
    }
}

/// Pick the outgoing edge of `state` for `input`, if any.
///
/// `None` means the input does not move the machine: a settled state
/// receiving `Advance`, or idle receiving text that is not a command.
pub fn transition(state: State, input: &Input<'_>) -> Option<Step> {
    match (state, *input) {
        (State::Idle, Input::Message(text)) => grammar::parse_global(text).map(global_step),

        (
            State::Help
            | State::ListAll
            | State::ViewList
            | State::NewListDone
            | State::DeleteDone
            | State::EditDone,
            Input::Advance,
        ) => Some(Step::new(Action::Settle, State::Idle)),

        (State::NewList, Input::Advance) => Some(Step::new(Action::Settle, State::NewListInput)),

        (State::NewListInput, Input::Message(text)) if text == END_INPUT => {
            Some(Step::new(Action::FinishNewList, State::NewListDone))
        }
        (State::NewListInput, Input::Message(text)) => Some(Step::new(
            Action::AddNewItem {
                text: text.to_string(),
            },
            State::NewListInput,
        )),

        (State::DeleteConfirmPrompt, Input::Advance) => {
            Some(Step::new(Action::PromptYesNo, State::DeleteConfirmInput))
        }
        (State::DeleteConfirmInput, Input::Message(text)) => {
            Some(match grammar::parse_confirmation(text) {
                Confirmation::Yes => Step::new(Action::DeleteList, State::DeleteDone),
                Confirmation::No => Step::new(Action::Settle, State::Idle),
                // Ask again; the list picked by `/list del` stays the target
                Confirmation::Other => Step::new(Action::PromptYesNo, State::DeleteConfirmInput),
            })
        }

        (State::EditEnter, Input::Advance) => {
            Some(Step::new(Action::RenderCurrent, State::EditInput))
        }
        (State::EditInput, Input::Message(text)) => Some(edit_step(grammar::parse_edit(text))),
        (
            State::EditAppend
            | State::EditRemove
            | State::EditAdd
            | State::EditMove
            | State::EditEdit
            | State::EditInvalid
            | State::EditHelp,
            Input::Advance,
        ) => Some(Step::new(Action::RenderCurrent, State::EditInput)),

        _ => None,
    }
}

fn global_step(command: GlobalCommand) -> Step {
    match command {
        GlobalCommand::Help | GlobalCommand::Unrecognized => Step::new(Action::ShowHelp, State::Help),
        GlobalCommand::All => Step::new(Action::ListAll, State::ListAll),
        GlobalCommand::View { name } => Step::new(Action::ViewList { name }, State::ViewList),
        GlobalCommand::New { name } => Step::new(Action::CreateList { name }, State::NewList),
        GlobalCommand::Delete { name } => {
            Step::new(Action::ConfirmDelete { name }, State::DeleteConfirmPrompt)
        }
        GlobalCommand::Edit { name } => Step::new(Action::BeginEdit { name }, State::EditEnter),
    }
}

fn edit_step(command: EditCommand) -> Step {
    match command {
        EditCommand::Help => Step::new(Action::ShowEditHelp, State::EditHelp),
        EditCommand::End => Step::new(Action::FinishEdit, State::EditDone),
        EditCommand::Append { text } => Step::new(Action::Append { text }, State::EditAppend),
        EditCommand::Remove { index } => Step::new(Action::Remove { index }, State::EditRemove),
        EditCommand::Add { index, text } => {
            Step::new(Action::Insert { index, text }, State::EditAdd)
        }
        EditCommand::Move { from, to } => Step::new(Action::Move { from, to }, State::EditMove),
        EditCommand::Replace { index, text } => {
            Step::new(Action::Replace { index, text }, State::EditEdit)
        }
        EditCommand::Invalid => Step::new(Action::RejectInput, State::EditInvalid),
    }
}
