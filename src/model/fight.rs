use crate::model::{Fighter, Round};

/// Gender classification of a fight, inferred from the bout label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn to_db_string(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// Outcome of a fight relative to the A/B display positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    FighterA,
    FighterB,
    Draw,
    NoContest,
}

impl FightOutcome {
    pub fn to_db_string(self) -> &'static str {
        match self {
            Self::FighterA => "A",
            Self::FighterB => "B",
            Self::Draw => "Draw",
            Self::NoContest => "NC",
        }
    }

    /// Maps the result marker shown next to fighter A: W means A won,
    /// L means A lost (B won). Unrecognized markers map to no outcome.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "W" => Some(Self::FighterA),
            "L" => Some(Self::FighterB),
            "D" => Some(Self::Draw),
            "NC" => Some(Self::NoContest),
            _ => None,
        }
    }
}

/// A single bout between two fighters.
///
/// The A/B order is significant and encodes display position on the
/// source page, not skill. `rounds` has length `round_of_victory`, or is
/// empty when parsing failed before round extraction.
#[derive(Debug, Clone)]
pub struct Fight {
    /// Detail-page URL; the fight's identity.
    pub link: String,
    pub fighter_a: Fighter,
    pub fighter_b: Fighter,
    pub winner: Option<FightOutcome>,
    /// Weight-class limit in pounds; 0 signals a catchweight bout.
    pub weight_class: Option<u16>,
    pub gender: Gender,
    pub title_fight: bool,
    pub method_of_victory: Option<String>,
    /// Round in which the fight ended, 1-5.
    pub round_of_victory: Option<u8>,
    /// Time of the finish within that round, in seconds.
    pub time_of_victory_sec: Option<u32>,
    /// Scheduled round count, 3 or 5.
    pub time_format: Option<u8>,
    pub referee: Option<String>,
    pub rounds: Vec<Round>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_marker_table() {
        assert_eq!(FightOutcome::from_marker("W"), Some(FightOutcome::FighterA));
        assert_eq!(FightOutcome::from_marker("L"), Some(FightOutcome::FighterB));
        assert_eq!(FightOutcome::from_marker("D"), Some(FightOutcome::Draw));
        assert_eq!(FightOutcome::from_marker("NC"), Some(FightOutcome::NoContest));
        assert_eq!(FightOutcome::from_marker("X"), None);
        assert_eq!(FightOutcome::from_marker(""), None);
    }

    #[test]
    fn test_db_strings() {
        assert_eq!(FightOutcome::Draw.to_db_string(), "Draw");
        assert_eq!(FightOutcome::NoContest.to_db_string(), "NC");
        assert_eq!(Gender::Female.to_db_string(), "F");
    }
}
