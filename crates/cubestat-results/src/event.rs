//! Recognised event codes and result categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A competition event, identified by its WCA/ACA event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventId {
    #[serde(rename = "222")]
    Cube2,
    #[serde(rename = "333")]
    Cube3,
    #[serde(rename = "333bf")]
    Cube3Blindfolded,
    #[serde(rename = "333fm")]
    FewestMoves,
    #[serde(rename = "333ft")]
    Cube3WithFeet,
    #[serde(rename = "333mbf")]
    MultiBlind,
    #[serde(rename = "333mbo")]
    MultiBlindOld,
    #[serde(rename = "333oh")]
    Cube3OneHanded,
    #[serde(rename = "444")]
    Cube4,
    #[serde(rename = "444bf")]
    Cube4Blindfolded,
    #[serde(rename = "555")]
    Cube5,
    #[serde(rename = "555bf")]
    Cube5Blindfolded,
    #[serde(rename = "666")]
    Cube6,
    #[serde(rename = "777")]
    Cube7,
    #[serde(rename = "clock")]
    Clock,
    #[serde(rename = "magic")]
    Magic,
    #[serde(rename = "minx")]
    Megaminx,
    #[serde(rename = "mmagic")]
    MasterMagic,
    #[serde(rename = "pyram")]
    Pyraminx,
    #[serde(rename = "skewb")]
    Skewb,
    #[serde(rename = "sq1")]
    Square1,
}

impl EventId {
    pub const ALL: [Self; 21] = [
        Self::Cube2,
        Self::Cube3,
        Self::Cube3Blindfolded,
        Self::FewestMoves,
        Self::Cube3WithFeet,
        Self::MultiBlind,
        Self::MultiBlindOld,
        Self::Cube3OneHanded,
        Self::Cube4,
        Self::Cube4Blindfolded,
        Self::Cube5,
        Self::Cube5Blindfolded,
        Self::Cube6,
        Self::Cube7,
        Self::Clock,
        Self::Magic,
        Self::Megaminx,
        Self::MasterMagic,
        Self::Pyraminx,
        Self::Skewb,
        Self::Square1,
    ];

    /// The event code as it appears in the `eventId` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cube2 => "222",
            Self::Cube3 => "333",
            Self::Cube3Blindfolded => "333bf",
            Self::FewestMoves => "333fm",
            Self::Cube3WithFeet => "333ft",
            Self::MultiBlind => "333mbf",
            Self::MultiBlindOld => "333mbo",
            Self::Cube3OneHanded => "333oh",
            Self::Cube4 => "444",
            Self::Cube4Blindfolded => "444bf",
            Self::Cube5 => "555",
            Self::Cube5Blindfolded => "555bf",
            Self::Cube6 => "666",
            Self::Cube7 => "777",
            Self::Clock => "clock",
            Self::Magic => "magic",
            Self::Megaminx => "minx",
            Self::MasterMagic => "mmagic",
            Self::Pyraminx => "pyram",
            Self::Skewb => "skewb",
            Self::Square1 => "sq1",
        }
    }

    /// Human readable event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cube2 => "2x2x2 Cube",
            Self::Cube3 => "3x3x3 Cube",
            Self::Cube3Blindfolded => "3x3x3 Blindfolded",
            Self::FewestMoves => "3x3x3 Fewest Moves",
            Self::Cube3WithFeet => "3x3x3 With Feet",
            Self::MultiBlind => "3x3x3 Multi-Blind",
            Self::MultiBlindOld => "3x3x3 Multi-Blind Old Style",
            Self::Cube3OneHanded => "3x3x3 One-Handed",
            Self::Cube4 => "4x4x4 Cube",
            Self::Cube4Blindfolded => "4x4x4 Blindfolded",
            Self::Cube5 => "5x5x5 Cube",
            Self::Cube5Blindfolded => "5x5x5 Blindfolded",
            Self::Cube6 => "6x6x6 Cube",
            Self::Cube7 => "7x7x7 Cube",
            Self::Clock => "Clock",
            Self::Magic => "Magic",
            Self::Megaminx => "Megaminx",
            Self::MasterMagic => "Master Magic",
            Self::Pyraminx => "Pyraminx",
            Self::Skewb => "Skewb",
            Self::Square1 => "Square-1",
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognised event '{key}'")]
pub struct UnknownEventError {
    #[error(not(source))]
    pub key: String,
}

impl FromStr for EventId {
    type Err = UnknownEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.code() == s)
            .ok_or_else(|| UnknownEventError { key: s.to_owned() })
    }
}

/// Which result column(s) a pool is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Every individual attempt, `value1` to `value5`.
    Single,
    /// The round average, `average`.
    Average,
    /// The best attempt of the round, `best`.
    Best,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Single, Self::Average, Self::Best];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Average => "average",
            Self::Best => "best",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognised category '{key}', expected one of single, average, best")]
pub struct UnknownCategoryError {
    #[error(not(source))]
    pub key: String,
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| UnknownCategoryError { key: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes_round_trip() {
        for event in EventId::ALL {
            assert_eq!(event.code().parse::<EventId>(), Ok(event));
            assert_eq!(event.to_string(), event.code());
        }
    }

    #[test]
    fn test_event_codes_are_unique() {
        let mut codes = EventId::ALL.map(EventId::code).to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), EventId::ALL.len());
    }

    #[test]
    fn test_unknown_event() {
        let err = "333mts".parse::<EventId>().unwrap_err();
        assert_eq!(err.key, "333mts");
        assert_eq!(err.to_string(), "unrecognised event '333mts'");
        assert!("".parse::<EventId>().is_err());
        assert!("333BF".parse::<EventId>().is_err());
    }

    #[test]
    fn test_category_keys() {
        assert_eq!("single".parse(), Ok(Category::Single));
        assert_eq!("average".parse(), Ok(Category::Average));
        assert_eq!("best".parse(), Ok(Category::Best));
        assert!("mean".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&(EventId::Cube3Blindfolded, Category::Average)).unwrap();
        assert_eq!(json, r#"["333bf","average"]"#);
    }
}
