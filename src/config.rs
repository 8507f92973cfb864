//! Process configuration from environment variables

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_WORKSPACE: &str = "./workspace";
const DEFAULT_PORT: u16 = 8000;

/// Allow-list value that admits every sender
const EVERYONE: &str = "*";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid user id '{entry}' in LISTBOT_ALLOWED_USERS")]
    InvalidUserId { entry: String },
}

/// Who may talk to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    Everyone,
    /// Only these users; an empty set admits nobody
    Only(HashSet<i64>),
}

impl AllowList {
    pub fn contains(&self, user_id: i64) -> bool {
        match self {
            AllowList::Everyone => true,
            AllowList::Only(users) => users.contains(&user_id),
        }
    }

    /// Parse the comma separated form: `*`, or a list of numeric ids
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries: Vec<&str> = raw.split(',').map(str::trim).filter(|e| !e.is_empty()).collect();
        if entries == [EVERYONE] {
            return Ok(AllowList::Everyone);
        }

        entries
            .into_iter()
            .map(|entry| {
                entry.parse().map_err(|_| ConfigError::InvalidUserId {
                    entry: entry.to_string(),
                })
            })
            .collect::<Result<HashSet<i64>, _>>()
            .map(AllowList::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Root of all chat directories
    pub workspace: PathBuf,
    pub port: u16,
    pub allowed_users: AllowList,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            port: DEFAULT_PORT,
            allowed_users: AllowList::Only(HashSet::new()),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let workspace = var("LISTBOT_WORKSPACE")
            .filter(|w| !w.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_WORKSPACE), PathBuf::from);

        let port = match var("LISTBOT_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "Invalid LISTBOT_PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let allowed_users = match var("LISTBOT_ALLOWED_USERS") {
            Some(raw) => AllowList::parse(&raw)?,
            None => AllowList::Only(HashSet::new()),
        };

        Ok(Self {
            workspace,
            port,
            allowed_users,
        })
    }

    /// Whether `user_id` may use the bot
    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed_users.contains(user_id)
    }
}
