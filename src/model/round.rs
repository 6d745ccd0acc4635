/// One side's numeric performance counters for a single round.
///
/// Every counter defaults to unknown (`None`), not zero: an absent or
/// malformed source cell must stay distinguishable from "zero events".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundStats {
    /// Fighter-identity token embedded in the source row; used to match
    /// the row back to the fight's fighters, never by column position.
    pub fighter_link: Option<String>,

    pub knockdowns: Option<u32>,
    pub non_sig_strikes_landed: Option<u32>,
    pub non_sig_strikes_attempted: Option<u32>,
    pub takedowns_landed: Option<u32>,
    pub takedowns_attempted: Option<u32>,
    pub submission_attempts: Option<u32>,
    pub reversals: Option<u32>,
    pub control_time_seconds: Option<u32>,

    pub head_strikes_landed: Option<u32>,
    pub head_strikes_attempted: Option<u32>,
    pub body_strikes_landed: Option<u32>,
    pub body_strikes_attempted: Option<u32>,
    pub leg_strikes_landed: Option<u32>,
    pub leg_strikes_attempted: Option<u32>,
    pub distance_strikes_landed: Option<u32>,
    pub distance_strikes_attempted: Option<u32>,
    pub clinch_strikes_landed: Option<u32>,
    pub clinch_strikes_attempted: Option<u32>,
    pub ground_strikes_landed: Option<u32>,
    pub ground_strikes_attempted: Option<u32>,
}

impl RoundStats {
    /// Counter column names, in storage/export order.
    pub const COUNTER_NAMES: [&'static str; 20] = [
        "knockdowns",
        "non_sig_strikes_landed",
        "non_sig_strikes_attempted",
        "takedowns_landed",
        "takedowns_attempted",
        "submission_attempts",
        "reversals",
        "control_time_seconds",
        "head_strikes_landed",
        "head_strikes_attempted",
        "body_strikes_landed",
        "body_strikes_attempted",
        "leg_strikes_landed",
        "leg_strikes_attempted",
        "distance_strikes_landed",
        "distance_strikes_attempted",
        "clinch_strikes_landed",
        "clinch_strikes_attempted",
        "ground_strikes_landed",
        "ground_strikes_attempted",
    ];

    /// Counter values in the same order as [`Self::COUNTER_NAMES`].
    pub fn counters(&self) -> [Option<u32>; 20] {
        [
            self.knockdowns,
            self.non_sig_strikes_landed,
            self.non_sig_strikes_attempted,
            self.takedowns_landed,
            self.takedowns_attempted,
            self.submission_attempts,
            self.reversals,
            self.control_time_seconds,
            self.head_strikes_landed,
            self.head_strikes_attempted,
            self.body_strikes_landed,
            self.body_strikes_attempted,
            self.leg_strikes_landed,
            self.leg_strikes_attempted,
            self.distance_strikes_landed,
            self.distance_strikes_attempted,
            self.clinch_strikes_landed,
            self.clinch_strikes_attempted,
            self.ground_strikes_landed,
            self.ground_strikes_attempted,
        ]
    }
}

/// One round's statistics pair within a fight, with each side assigned by
/// fighter identity rather than table position.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// Round number, 1-5.
    pub round_number: u8,
    pub fighter_a_stats: RoundStats,
    pub fighter_b_stats: RoundStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_default_to_unknown_not_zero() {
        let stats = RoundStats::default();
        assert!(stats.counters().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_counter_order_matches_names() {
        let stats = RoundStats {
            knockdowns: Some(1),
            control_time_seconds: Some(90),
            ..Default::default()
        };
        let counters = stats.counters();
        assert_eq!(counters[0], Some(1));
        let control_idx = RoundStats::COUNTER_NAMES
            .iter()
            .position(|n| *n == "control_time_seconds")
            .unwrap();
        assert_eq!(counters[control_idx], Some(90));
    }
}
