//! User-facing phrases for synthesised instructions.
//!
//! Korean is the default and matches the route finder UI. Every piece of
//! text the synthesiser emits goes through [`Locale`], so another language
//! only needs another arm in each match.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::routing::geodesy::CompassSector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    pub fn compass_name(self, sector: CompassSector) -> &'static str {
        use CompassSector::*;
        match self {
            Locale::Ko => match sector {
                North => "북쪽",
                NorthEast => "북동쪽",
                East => "동쪽",
                SouthEast => "남동쪽",
                South => "남쪽",
                SouthWest => "남서쪽",
                West => "서쪽",
                NorthWest => "북서쪽",
            },
            Locale::En => match sector {
                North => "north",
                NorthEast => "northeast",
                East => "east",
                SouthEast => "southeast",
                South => "south",
                SouthWest => "southwest",
                West => "west",
                NorthWest => "northwest",
            },
        }
    }

    /// Instruction for the first step of a route.
    pub fn depart(self, sector: CompassSector) -> String {
        let dir = self.compass_name(sector);
        match self {
            // Every Korean compass name ends in 쪽, which takes 으로.
            Locale::Ko => format!("{dir}으로 출발"),
            Locale::En => format!("Depart heading {dir}"),
        }
    }

    /// Instruction for every step after the first.
    pub fn continue_heading(self, sector: CompassSector) -> String {
        let dir = self.compass_name(sector);
        match self {
            Locale::Ko => format!("{dir}으로 계속 이동"),
            Locale::En => format!("Continue heading {dir}"),
        }
    }

    /// Instruction for the single step emitted when the path has no segments.
    pub fn whole_trip(self) -> &'static str {
        match self {
            Locale::Ko => "출발지에서 목적지까지 이동",
            Locale::En => "Move from origin to destination",
        }
    }

    pub fn minutes(self, minutes: u32) -> String {
        match self {
            Locale::Ko => format!("{minutes}분"),
            Locale::En => format!("{minutes} min"),
        }
    }

    /// Display label for an obstacle category reported by the backend.
    /// Unknown categories are shown as-is.
    pub fn hazard_label<'a>(self, hazard: &'a str) -> &'a str {
        match (self, hazard) {
            (Locale::Ko, "curb") => "연석",
            (Locale::Ko, "bollard") => "볼라드",
            (Locale::Ko, "crosswalk") => "횡단보도",
            (Locale::Ko, "slope") => "경사로",
            (Locale::Ko, "stairs") => "계단",
            (_, other) => other,
        }
    }

    /// Warning text covering all `hazards`, or `None` when the list is empty.
    /// Repeated identifiers are listed once, in first-seen order. A list of
    /// only blank identifiers still warns, with the bare caution text.
    pub fn hazard_warning(self, hazards: &[String]) -> Option<String> {
        if hazards.is_empty() {
            return None;
        }
        let mut labels: Vec<&str> = Vec::with_capacity(hazards.len());
        for hazard in hazards.iter().map(|h| h.trim()).filter(|h| !h.is_empty()) {
            let label = self.hazard_label(hazard);
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        if labels.is_empty() {
            return Some(self.caution().to_string());
        }
        let joined = labels.join(", ");
        Some(match self {
            Locale::Ko => format!("{joined} 주의"),
            Locale::En => format!("Caution: {joined}"),
        })
    }

    /// Generic caution text for a hazard with no usable name.
    pub fn caution(self) -> &'static str {
        match self {
            Locale::Ko => "주의",
            Locale::En => "Caution",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Locale::Ko),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}
