//! Piste entity and the slope difficulty colour scale.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard European slope difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Green,
    Blue,
    Red,
    Black,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown piste colour: {0}")]
pub struct ParseColorError(pub String);

impl Color {
    /// Stable token used in the database and over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Red => "RED",
            Self::Black => "BLACK",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GREEN" => Ok(Self::Green),
            "BLUE" => Ok(Self::Blue),
            "RED" => Ok(Self::Red),
            "BLACK" => Ok(Self::Black),
            other => Err(ParseColorError(other.to_owned())),
        }
    }
}

/// A marked ski run.
#[derive(Debug, Clone, PartialEq)]
pub struct Piste {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    pub name: String,
    pub color: Color,
    /// Run length in metres.
    pub length: i32,
    /// Average gradient in percent.
    pub slope: i32,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Color::Green)]
    #[case(Color::Blue)]
    #[case(Color::Red)]
    #[case(Color::Black)]
    fn colour_tokens_round_trip(#[case] color: Color) {
        let parsed: Color = color.as_str().parse().expect("known token");
        assert_eq!(parsed, color);
    }

    #[test]
    fn unknown_colour_is_rejected() {
        let err = "YELLOW".parse::<Color>().expect_err("unknown token");
        assert_eq!(err.0, "YELLOW");
    }
}
