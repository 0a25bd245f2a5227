use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Label of the synthetic "no year restriction" option.
pub const SELECT_ALL: &str = "Select All";

/// An entry of the year selector: either the `"Select All"` sentinel or a concrete year.
///
/// Serializes as the string `"Select All"` or as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearChoice {
    All,
    Year(i32),
}

impl YearChoice {
    pub fn is_all(&self) -> bool {
        matches!(self, YearChoice::All)
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            YearChoice::All => None,
            YearChoice::Year(y) => Some(*y),
        }
    }
}

impl From<i32> for YearChoice {
    fn from(year: i32) -> Self {
        YearChoice::Year(year)
    }
}

impl std::fmt::Display for YearChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearChoice::All => f.write_str(SELECT_ALL),
            YearChoice::Year(y) => write!(f, "{}", y),
        }
    }
}

impl std::str::FromStr for YearChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == SELECT_ALL {
            return Ok(YearChoice::All);
        }
        trimmed
            .parse::<i32>()
            .map(YearChoice::Year)
            .map_err(|_| format!("Invalid year option: {}", s))
    }
}

impl Serialize for YearChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearChoice::All => serializer.serialize_str(SELECT_ALL),
            YearChoice::Year(y) => serializer.serialize_i32(*y),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYearChoice {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for YearChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawYearChoice::deserialize(deserializer)? {
            RawYearChoice::Number(n) => i32::try_from(n)
                .map(YearChoice::Year)
                .map_err(|_| de::Error::custom(format!("Year out of range: {}", n))),
            RawYearChoice::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
