pub mod catalog;

use crate::logic::MatchPlan;

/// Named plan run by the logic tester.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: MatchPlan,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, plan: MatchPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

/// Keys expanded by `--scenarios all`, in run order.
pub const ALL_SCENARIOS: &[&str] = &[
    "smoke",
    "innings-invariants",
    "chase",
    "scorecard",
    "outcome",
    "determinism",
    "replay",
    "short-format",
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let scenario = match name.to_lowercase().as_str() {
        "smoke" => TestScenario::new("Smoke Test", catalog::smoke_plan()),
        "innings-invariants" | "invariants" => {
            TestScenario::new("Innings Invariants", catalog::innings_invariants_plan())
        }
        "chase" | "chase-termination" => {
            TestScenario::new("Chase Termination", catalog::chase_plan())
        }
        "scorecard" | "scorecard-consistency" => {
            TestScenario::new("Scorecard Consistency", catalog::scorecard_plan())
        }
        "outcome" | "outcome-consistency" => {
            TestScenario::new("Outcome Consistency", catalog::outcome_plan())
        }
        "determinism" | "deterministic" => {
            TestScenario::new("Seeded Determinism", catalog::determinism_plan())
        }
        "replay" | "replay-determinism" => {
            TestScenario::new("Replay Determinism", catalog::replay_plan())
        }
        "short-format" | "short" => {
            TestScenario::new("Short Format (5 overs)", catalog::short_format_plan())
        }
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("innings-invariants", "Innings Invariants"),
        ("chase", "Chase Termination"),
        ("scorecard", "Scorecard Consistency"),
        ("outcome", "Outcome Consistency"),
        ("determinism", "Seeded Determinism"),
        ("replay", "Replay Determinism"),
        ("short-format", "Short Format (5 overs)"),
    ]
}
