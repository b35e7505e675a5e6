//! Per-match records and aggregate scoring statistics across a seed sweep.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use t20_engine::{MarginUnit, Winner};

use crate::logic::match_tester::{MatchPlan, MatchSummary, MatchTester};

const MAX_PREALLOCATED_RECORDS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub first_team: String,
    pub first_runs: u32,
    pub first_wickets: u8,
    pub first_overs: String,
    pub second_team: String,
    pub second_runs: u32,
    pub second_wickets: u8,
    pub second_overs: String,
    pub extras: u32,
    pub winner: Winner,
    pub margin: u32,
    pub margin_unit: MarginUnit,
    pub result: String,
    pub player_of_match: Option<String>,
    pub draws: u64,
}

impl MatchRecord {
    #[must_use]
    pub fn from_summary(summary: &MatchSummary) -> Self {
        let report = &summary.report;
        let first = &report.first_innings;
        let second = &report.second_innings;
        Self {
            seed: summary.seed,
            first_team: first.batting_team.clone(),
            first_runs: first.result.total_runs,
            first_wickets: first.result.total_wickets,
            first_overs: first.result.overs_notation(),
            second_team: second.batting_team.clone(),
            second_runs: second.result.total_runs,
            second_wickets: second.result.total_wickets,
            second_overs: second.result.overs_notation(),
            extras: first.result.extras + second.result.extras,
            winner: report.outcome.winner,
            margin: report.outcome.margin,
            margin_unit: report.outcome.unit,
            result: report.result.clone(),
            player_of_match: report.player_of_match.clone(),
            draws: summary.draws,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAggregate {
    pub matches: usize,
    pub mean_first_runs: f64,
    pub std_first_runs: f64,
    pub mean_second_runs: f64,
    pub mean_wickets: f64,
    pub mean_extras: f64,
    pub chase_win_pct: f64,
    pub tie_pct: f64,
    pub highest_total: u32,
    pub lowest_total: u32,
}

/// Play `iterations` consecutive seeds from each base seed.
///
/// # Errors
///
/// Fails when the engine rejects a match setup.
pub fn collect_match_records(
    tester: &MatchTester,
    seeds: &[u64],
    iterations: usize,
) -> Result<Vec<MatchRecord>> {
    let plan = MatchPlan::new();
    let mut records = Vec::with_capacity(record_capacity(seeds.len(), iterations));
    for &seed in seeds {
        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let summary = tester.run_plan(&plan, iteration_seed)?;
            records.push(MatchRecord::from_summary(&summary));
        }
    }
    Ok(records)
}

/// Upfront allocation for a run; large runs grow the vector as they go.
fn record_capacity(seeds: usize, iterations: usize) -> usize {
    seeds.saturating_mul(iterations).min(MAX_PREALLOCATED_RECORDS)
}

#[must_use]
pub fn aggregate_matches(records: &[MatchRecord]) -> Option<MatchAggregate> {
    if records.is_empty() {
        return None;
    }
    let n = count_as_f64(records.len());
    let first: Vec<f64> = records.iter().map(|r| f64::from(r.first_runs)).collect();
    let mean_first_runs = first.iter().sum::<f64>() / n;
    let variance = first
        .iter()
        .map(|runs| (runs - mean_first_runs).powi(2))
        .sum::<f64>()
        / n;
    let mean_second_runs = records.iter().map(|r| f64::from(r.second_runs)).sum::<f64>() / n;
    let mean_wickets = records
        .iter()
        .map(|r| f64::from(r.first_wickets) + f64::from(r.second_wickets))
        .sum::<f64>()
        / (2.0 * n);
    let mean_extras = records.iter().map(|r| f64::from(r.extras)).sum::<f64>() / (2.0 * n);
    let chase_wins = records
        .iter()
        .filter(|r| r.winner == Winner::SecondInnings)
        .count();
    let ties = records.iter().filter(|r| r.winner == Winner::Tie).count();
    let totals = records.iter().flat_map(|r| [r.first_runs, r.second_runs]);

    Some(MatchAggregate {
        matches: records.len(),
        mean_first_runs,
        std_first_runs: variance.sqrt(),
        mean_second_runs,
        mean_wickets,
        mean_extras,
        chase_win_pct: count_as_f64(chase_wins) / n,
        tie_pct: count_as_f64(ties) / n,
        highest_total: totals.clone().max().unwrap_or(0),
        lowest_total: totals.min().unwrap_or(0),
    })
}

fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}
