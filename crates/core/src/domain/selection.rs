use serde::{Deserialize, Serialize};

use crate::errors::InsightError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "G")]
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    #[serde(rename = "R")]
    R,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::G, Rating::Pg, Rating::Pg13, Rating::R];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
        }
    }

    /// Parses a form value; an empty selection means "no rating".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, InsightError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl std::str::FromStr for Rating {
    type Err = InsightError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "G" => Ok(Self::G),
            "PG" => Ok(Self::Pg),
            "PG-13" => Ok(Self::Pg13),
            "R" => Ok(Self::R),
            other => Err(InsightError::InvalidInput(format!(
                "unsupported rating `{other}` (expected G|PG|PG-13|R)"
            ))),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesType {
    Domestic,
    International,
    World,
}

impl SalesType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::International => "International",
            Self::World => "World",
        }
    }
}

impl std::str::FromStr for SalesType {
    type Err = InsightError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Self::Domestic),
            "international" => Ok(Self::International),
            "world" => Ok(Self::World),
            other => Err(InsightError::InvalidInput(format!(
                "unsupported sales type `{other}` (expected Domestic|International|World)"
            ))),
        }
    }
}

/// Maps the series form value to an optional series; the form sends the literal `None`.
pub fn parse_series(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "None" {
        None
    } else {
        Some(value.to_string())
    }
}
