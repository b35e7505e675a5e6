//! Match result from two completed innings.
use serde::{Deserialize, Serialize};

use crate::constants::MAX_WICKETS;
use crate::innings::InningsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    FirstInnings,
    SecondInnings,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginUnit {
    Runs,
    Wickets,
}

impl MarginUnit {
    const fn noun(self, margin: u32) -> &'static str {
        match (self, margin) {
            (Self::Runs, 1) => "run",
            (Self::Runs, _) => "runs",
            (Self::Wickets, 1) => "wicket",
            (Self::Wickets, _) => "wickets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Winner,
    pub margin: u32,
    pub unit: MarginUnit,
}

impl MatchOutcome {
    /// Result line such as `Falcons won by 12 runs`.
    #[must_use]
    pub fn describe(&self, first_name: &str, second_name: &str) -> String {
        let side = match self.winner {
            Winner::FirstInnings => first_name,
            Winner::SecondInnings => second_name,
            Winner::Tie => return "Match tied".to_string(),
        };
        format!("{side} won by {} {}", self.margin, self.unit.noun(self.margin))
    }
}

/// Compare two innings. The chasing side wins by the wickets it has left,
/// never less than one.
#[must_use]
pub fn decide(first: &InningsResult, second: &InningsResult) -> MatchOutcome {
    decide_totals(first.total_runs, second.total_runs, second.total_wickets)
}

/// [`decide`] on raw totals.
#[must_use]
pub fn decide_totals(first_runs: u32, second_runs: u32, second_wickets: u8) -> MatchOutcome {
    use std::cmp::Ordering;

    match first_runs.cmp(&second_runs) {
        Ordering::Greater => MatchOutcome {
            winner: Winner::FirstInnings,
            margin: first_runs - second_runs,
            unit: MarginUnit::Runs,
        },
        Ordering::Less => MatchOutcome {
            winner: Winner::SecondInnings,
            margin: u32::from(MAX_WICKETS.saturating_sub(second_wickets).max(1)),
            unit: MarginUnit::Wickets,
        },
        Ordering::Equal => MatchOutcome {
            winner: Winner::Tie,
            margin: 0,
            unit: MarginUnit::Runs,
        },
    }
}
