//! Placeholder styles recognised inside substituted files.

use crate::error::SubstituteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a secret name is wrapped into the literal token searched for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderFormat {
    /// `$NAME`
    Dollar,
    /// `${NAME}`
    #[default]
    DollarCurly,
    /// `{{NAME}}`
    Handlebars,
    /// `${{NAME}}`
    DollarHandlebars,
}

impl PlaceholderFormat {
    pub const ALL: [PlaceholderFormat; 4] = [
        PlaceholderFormat::Dollar,
        PlaceholderFormat::DollarCurly,
        PlaceholderFormat::Handlebars,
        PlaceholderFormat::DollarHandlebars,
    ];

    /// Build the literal token for `key` in this style.
    pub fn placeholder(&self, key: &str) -> String {
        match self {
            PlaceholderFormat::Dollar => format!("${key}"),
            PlaceholderFormat::DollarCurly => format!("${{{key}}}"),
            PlaceholderFormat::Handlebars => format!("{{{{{key}}}}}"),
            PlaceholderFormat::DollarHandlebars => format!("${{{{{key}}}}}"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderFormat::Dollar => "dollar",
            PlaceholderFormat::DollarCurly => "dollar-curly",
            PlaceholderFormat::Handlebars => "handlebars",
            PlaceholderFormat::DollarHandlebars => "dollar-handlebars",
        }
    }
}

impl fmt::Display for PlaceholderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceholderFormat {
    type Err = SubstituteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| SubstituteError::UnknownFormat(s.to_string()))
    }
}
