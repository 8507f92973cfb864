//! Command grammar
//!
//! Raw chat lines are classified by walking an ordered rule table; the first
//! rule whose pattern matches wins. Bare keywords (`/list all`, `/help`, ...)
//! must be the whole line. Commands with arguments are anchored to the end of
//! the line only, so text in front of the command is ignored.

use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const HELP_TEXT: &str = "Available commands:
/list all -- Print the names of all the available lists
/list view <name> -- Print the content of the a list
/list new <name> -- Create a new list with given name
/list del <name> -- Delete a list
/list edit <name> -- Edit the content of a list
/list help -- Print this help message";

pub const EDIT_HELP_TEXT: &str = "Available commands for edit:
/append <item> -- Add a new item to the bottom of the list
/rm <position> -- Remove an item
/add <position> <item> -- Add an item in given position
/mv <from> <to> -- Move an item from one position to another
/edit <position> <item> -- Replace the item at a given position
/end -- Stop editing the list
/help -- Print this help message";

/// Terminates item entry while creating a list
pub const END_INPUT: &str = "/end";

/// Commands accepted while no workflow is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalCommand {
    Help,
    All,
    View { name: String },
    New { name: String },
    Delete { name: String },
    Edit { name: String },
    /// Starts with `/list` but matches no other rule
    Unrecognized,
}

/// Commands accepted inside an edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Help,
    End,
    Append { text: String },
    Remove { index: usize },
    Add { index: usize, text: String },
    Move { from: usize, to: usize },
    Replace { index: usize, text: String },
    Invalid,
}

/// Answer to the delete confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Other,
}

struct Rule<C> {
    pattern: Regex,
    build: fn(&Captures<'_>) -> C,
}

impl<C> Rule<C> {
    fn new(pattern: &str, build: fn(&Captures<'_>) -> C) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("grammar patterns are valid literals"),
            build,
        }
    }
}

static GLOBAL_RULES: LazyLock<Vec<Rule<GlobalCommand>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"^/list help$", |_| GlobalCommand::Help),
        Rule::new(r"^/list all$", |_| GlobalCommand::All),
        Rule::new(r"/list view ([^ ]+)$", |c| GlobalCommand::View { name: text(c, 1) }),
        Rule::new(r"/list new ([^ ]+)$", |c| GlobalCommand::New { name: text(c, 1) }),
        Rule::new(r"/list del ([^ ]+)$", |c| GlobalCommand::Delete { name: text(c, 1) }),
        Rule::new(r"/list edit ([^ ]+)$", |c| GlobalCommand::Edit { name: text(c, 1) }),
        Rule::new(r"/list(.+)$", |_| GlobalCommand::Unrecognized),
    ]
});

static EDIT_RULES: LazyLock<Vec<Rule<EditCommand>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"^/help$", |_| EditCommand::Help),
        Rule::new(r"^/end$", |_| EditCommand::End),
        Rule::new(r"/append ([^\r\n]+)$", |c| EditCommand::Append { text: text(c, 1) }),
        Rule::new(r"/rm (\d+)$", |c| EditCommand::Remove { index: index(c, 1) }),
        Rule::new(r"/add (\d+) ([^\r\n]+)$", |c| EditCommand::Add {
            index: index(c, 1),
            text: text(c, 2),
        }),
        Rule::new(r"/mv (\d+) (\d+)$", |c| EditCommand::Move {
            from: index(c, 1),
            to: index(c, 2),
        }),
        Rule::new(r"/edit (\d+) ([^\r\n]+)$", |c| EditCommand::Replace {
            index: index(c, 1),
            text: text(c, 2),
        }),
    ]
});

fn text(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group).map_or_else(String::new, |m| m.as_str().to_string())
}

/// Digits that overflow `usize` saturate, which no list can address
fn index(caps: &Captures<'_>, group: usize) -> usize {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(usize::MAX)
}

fn first_match<C>(rules: &[Rule<C>], line: &str) -> Option<C> {
    rules
        .iter()
        .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule.build)(&caps)))
}

/// Classify a line received while idle; `None` means "not for us"
pub fn parse_global(line: &str) -> Option<GlobalCommand> {
    first_match(&GLOBAL_RULES, line)
}

/// Classify a line received inside an edit session
pub fn parse_edit(line: &str) -> EditCommand {
    first_match(&EDIT_RULES, line).unwrap_or(EditCommand::Invalid)
}

pub fn parse_confirmation(line: &str) -> Confirmation {
    match line {
        "yes" => Confirmation::Yes,
        "no" => Confirmation::No,
        _ => Confirmation::Other,
    }
}
