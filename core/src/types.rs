//! Shared primitive types and the enumerated preference values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a saved custom raffle. `0` means "not saved yet".
pub type RaffleId = i64;

/// Identifier of a quick decision (stable across seed reloads).
pub type DecisionId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppTheme {
    #[default]
    Classic,
    Dark,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppLanguage {
    #[default]
    English,
    Portuguese,
    Spanish,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RaffleMode {
    #[default]
    None,
    Roulette,
    RandomWinners,
    Grouping,
}

impl AppTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Dark    => "dark",
        }
    }

    /// Unknown values fall back to the default theme.
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            _      => Self::Classic,
        }
    }
}

impl AppLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English    => "en",
            Self::Portuguese => "pt",
            Self::Spanish    => "es",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "pt" => Self::Portuguese,
            "es" => Self::Spanish,
            _    => Self::English,
        }
    }
}

impl RaffleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None          => "none",
            Self::Roulette      => "roulette",
            Self::RandomWinners => "random_winners",
            Self::Grouping      => "grouping",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "roulette"       => Self::Roulette,
            "random_winners" => Self::RandomWinners,
            "grouping"       => Self::Grouping,
            _                => Self::None,
        }
    }
}

impl fmt::Display for RaffleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of the one-time hints shown by the screens.
///
/// The hints map itself is open: any string key may be stored. These are
/// the keys the built-in screens use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    QuickDecision,
    AddNewQuickDecision,
    Lottery,
    RaffleDetails,
}

impl Hint {
    pub fn key(&self) -> &'static str {
        match self {
            Self::QuickDecision       => "HINT_KEY_QUICK_DECISION",
            Self::AddNewQuickDecision => "HINT_KEY_ADD_NEW_QUICK_DECISION",
            Self::Lottery             => "HINT_KEY_LOTTERY",
            Self::RaffleDetails       => "HINT_KEY_RAFFLE_DETAILS",
        }
    }
}

impl AsRef<str> for Hint {
    fn as_ref(&self) -> &str {
        self.key()
    }
}
