//! Entry actions
//!
//! Each action runs when the machine enters its state. Actions may touch
//! the session's lists (and through them, storage) and the current-list
//! binding; everything else they report through [`Outcome`].

use super::transition::Action;
use crate::book::ListBook;
use crate::grammar::{EDIT_HELP_TEXT, HELP_TEXT};
use crate::store::{self, ItemList, ListError, ListResult, ListStore};
use std::fmt::Write;

/// What running an entry action produced
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Text for the user; empty means nothing to say
    pub reply: String,
    /// Abandon the workflow and return to idle, overriding the declared edge
    pub abort: bool,
}

impl Outcome {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            abort: false,
        }
    }

    pub fn abort(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            abort: true,
        }
    }
}

/// Run `action` against the session's lists
pub fn perform<S: ListStore>(action: Action, book: &mut ListBook<S>) -> Outcome {
    match action {
        Action::Settle => Outcome::silent(),
        Action::ShowHelp => Outcome::reply(HELP_TEXT),
        Action::ListAll => Outcome::reply(list_names(book)),
        Action::ViewList { name } => match book.get(&name) {
            Ok(list) => Outcome::reply(render(list)),
            Err(e) => Outcome::reply(e.to_string()),
        },

        Action::CreateList { name } => match book.create(&name) {
            Ok(_) => Outcome::reply(format!(
                "I'm listening. Add new items to list '{name}'.\nWrite `/end` to complete"
            )),
            Err(e) => abandon(&name, &e, "save"),
        },
        Action::AddNewItem { text } => save_current(book, |items| {
            items.extend(store::split_lines(&text));
            Ok(())
        }),
        Action::Append { text } => save_current(book, |items| {
            items.push(text);
            Ok(())
        }),
        Action::FinishNewList => with_current(book, |list| {
            let count = list.items.len();
            let noun = if count == 1 { "item" } else { "items" };
            format!("New list '{}' created with {count} {noun}", list.name)
        }),

        Action::ConfirmDelete { name } => match book.bind(&name) {
            Ok(list) => Outcome::reply(format!(
                "Are you sure you want to delete list '{}'?",
                list.name
            )),
            Err(e) => abandon(&name, &e, "delete"),
        },
        Action::PromptYesNo => Outcome::reply("Please reply 'yes' or 'no'"),
        Action::DeleteList => {
            let name = book.current_name().unwrap_or_default().to_string();
            match book.delete_current() {
                Ok(list) => Outcome::reply(format!("List '{}' successfully deleted", list.name)),
                Err(e) => abandon(&name, &e, "delete"),
            }
        }

        Action::BeginEdit { name } => match book.bind(&name) {
            Ok(list) => Outcome::reply(format!(
                "Editing list '{}'.\nWrite `/help` to see the available commands",
                list.name
            )),
            Err(e) => abandon(&name, &e, "edit"),
        },
        Action::RenderCurrent => with_current(book, render),
        Action::ShowEditHelp => Outcome::reply(EDIT_HELP_TEXT),
        Action::FinishEdit => with_current(book, |list| {
            format!("Edit of list '{}' complete", list.name)
        }),
        Action::RejectInput => Outcome::reply("Invalid input. Type `/help` if needed"),

        Action::Remove { index } => save_current(book, |items| store::remove(items, index).map(drop)),
        Action::Insert { index, text } => {
            save_current(book, |items| store::insert(items, index, text))
        }
        Action::Move { from, to } => save_current(book, |items| store::move_item(items, from, to)),
        Action::Replace { index, text } => {
            save_current(book, |items| store::replace_at(items, index, text).map(drop))
        }
    }
}

fn list_names<S: ListStore>(book: &ListBook<S>) -> String {
    let mut out = String::from("Your lists:");
    for name in book.names() {
        let _ = write!(out, "\n- {name}");
    }
    out
}

fn render(list: &ItemList) -> String {
    let mut out = format!("--- {} ---", list.name);
    for (idx, item) in list.items.iter().enumerate() {
        let _ = write!(out, "\n[{idx}] {item}");
    }
    out
}

/// Reply built from the current list, or abort if the binding is stale
fn with_current<S: ListStore>(book: &ListBook<S>, reply: impl FnOnce(&ItemList) -> String) -> Outcome {
    match book.current() {
        Ok(list) => Outcome::reply(reply(list)),
        Err(e) => abandon(book.current_name().unwrap_or_default(), &e, "edit"),
    }
}

/// Mutate and persist the current list.
///
/// A bad index is reported and the workflow goes on; anything else ends it.
fn save_current<S: ListStore>(
    book: &mut ListBook<S>,
    op: impl FnOnce(&mut Vec<String>) -> ListResult<()>,
) -> Outcome {
    match book.update_current(op) {
        Ok(()) => Outcome::silent(),
        Err(e @ ListError::InvalidIndex { .. }) => Outcome::reply(e.to_string()),
        Err(e) => abandon(book.current_name().unwrap_or_default(), &e, "save"),
    }
}

fn abandon(name: &str, err: &ListError, verb: &str) -> Outcome {
    if err.is_io() {
        tracing::error!(list = %name, error = %err, "Cannot {verb} list");
        Outcome::abort(format!("Cannot {verb} list '{name}'. An error occurred"))
    } else {
        Outcome::abort(err.to_string())
    }
}
