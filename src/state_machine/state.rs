//! Dialogue states and machine input

use std::fmt;

/// Dialogue state of a chat.
///
/// `Idle` is both the initial state and the state every workflow ends in.
/// States that are not "settled" have an `Advance` edge and are passed
/// through within a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    Idle,
    Help,
    ListAll,
    ViewList,
    NewList,
    NewListInput,
    NewListDone,
    DeleteConfirmPrompt,
    DeleteConfirmInput,
    DeleteDone,
    EditEnter,
    EditInput,
    EditAppend,
    EditRemove,
    EditAdd,
    EditMove,
    EditEdit,
    EditInvalid,
    EditDone,
    EditHelp,
}

impl State {
    pub const ALL: [State; 20] = [
        State::Idle,
        State::Help,
        State::ListAll,
        State::ViewList,
        State::NewList,
        State::NewListInput,
        State::NewListDone,
        State::DeleteConfirmPrompt,
        State::DeleteConfirmInput,
        State::DeleteDone,
        State::EditEnter,
        State::EditInput,
        State::EditAppend,
        State::EditRemove,
        State::EditAdd,
        State::EditMove,
        State::EditEdit,
        State::EditInvalid,
        State::EditDone,
        State::EditHelp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Help => "help",
            State::ListAll => "list_all",
            State::ViewList => "view_list",
            State::NewList => "new_list",
            State::NewListInput => "new_list_input",
            State::NewListDone => "new_list_done",
            State::DeleteConfirmPrompt => "delete_confirm_prompt",
            State::DeleteConfirmInput => "delete_confirm_input",
            State::DeleteDone => "delete_done",
            State::EditEnter => "edit_enter",
            State::EditInput => "edit_input",
            State::EditAppend => "edit_append",
            State::EditRemove => "edit_remove",
            State::EditAdd => "edit_add",
            State::EditMove => "edit_move",
            State::EditEdit => "edit_edit",
            State::EditInvalid => "edit_invalid",
            State::EditDone => "edit_done",
            State::EditHelp => "edit_help",
        }
    }

    /// Whether an edit session is running
    pub fn is_editing(self) -> bool {
        matches!(
            self,
            State::EditEnter
                | State::EditInput
                | State::EditAppend
                | State::EditRemove
                | State::EditAdd
                | State::EditMove
                | State::EditEdit
                | State::EditInvalid
                | State::EditHelp
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input fed to the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// A line of text sent by the user
    Message(&'a str),
    /// No user input; follow an automatic edge if the state has one
    Advance,
}
