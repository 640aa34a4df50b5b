use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A bot command. The wire name is the snake_case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Preview,
    Info,
    AvgMass,
    AvgCoords,
    ClassStats,
    AdditionalStats,
    HeavyMeteorites,
    YearAnalysis,
    SaveResults,
    AllStats,
}

impl Command {
    /// Every command in menu order.
    pub const ALL: [Command; 11] = [
        Command::Start,
        Command::Preview,
        Command::Info,
        Command::AvgMass,
        Command::AvgCoords,
        Command::ClassStats,
        Command::AdditionalStats,
        Command::HeavyMeteorites,
        Command::YearAnalysis,
        Command::SaveResults,
        Command::AllStats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Preview => "preview",
            Command::Info => "info",
            Command::AvgMass => "avg_mass",
            Command::AvgCoords => "avg_coords",
            Command::ClassStats => "class_stats",
            Command::AdditionalStats => "additional_stats",
            Command::HeavyMeteorites => "heavy_meteorites",
            Command::YearAnalysis => "year_analysis",
            Command::SaveResults => "save_results",
            Command::AllStats => "all_stats",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Show this menu",
            Command::Preview => "First rows of the dataset",
            Command::Info => "Dataset columns and types",
            Command::AvgMass => "Average meteorite mass",
            Command::AvgCoords => "Average landing point",
            Command::ClassStats => "Meteorite class statistics",
            Command::AdditionalStats => "Record counts, mass spread and coordinate range",
            Command::HeavyMeteorites => "Heaviest meteorites",
            Command::YearAnalysis => "Fall types and years",
            Command::SaveResults => "Save results to CSV files",
            Command::AllStats => "Every report in sequence",
        }
    }

    /// `(name, description)` pairs for every command, in menu order.
    pub fn menu() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|c| (c.name(), c.description())).collect()
    }

    /// Parse the command at the start of a message.
    ///
    /// Accepts `/name`, `name` and `/name@botname`, ignoring case and
    /// anything after the first whitespace-delimited token.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_stats::bot::Command;
    ///
    /// assert_eq!(Command::parse_message("/avg_mass"), Some(Command::AvgMass));
    /// assert_eq!(Command::parse_message("/INFO@meteor_bot please"), Some(Command::Info));
    /// assert_eq!(Command::parse_message("hello"), None);
    /// ```
    pub fn parse_message(text: &str) -> Option<Command> {
        let token = text.split_whitespace().next()?;
        let token = token.strip_prefix('/').unwrap_or(token);
        let token = token.split('@').next().unwrap_or(token);
        token.parse().ok()
    }

    /// The menu as `/name` buttons, two per row.
    pub fn keyboard() -> Vec<Vec<String>> {
        Self::ALL
            .chunks(2)
            .map(|row| row.iter().map(|c| format!("/{}", c.name())).collect())
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for text that names no command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
