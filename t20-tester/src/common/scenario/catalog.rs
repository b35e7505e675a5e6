use anyhow::{Context, Result, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use t20_engine::{
    InningsEnd, InningsResult, InningsSetup, ReplayDraws, Winner, ball_rows, batting_order,
    batting_runs, bowling_attack, bowling_wickets, decide, extras_total, generate_squad,
    select_playing_xi,
};

use crate::logic::{MatchPlan, MatchSummary, report_digest};

const REPLAY_LENGTH: usize = 512;
const REPLAY_OVERS: u16 = 6;

pub fn smoke_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(smoke_expectation)
}

pub fn innings_invariants_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(innings_invariants_expectation)
}

pub fn chase_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(chase_expectation)
}

pub fn scorecard_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(scorecard_expectation)
}

pub fn outcome_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(outcome_expectation)
}

pub fn determinism_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(determinism_expectation)
}

pub fn replay_plan() -> MatchPlan {
    MatchPlan::new().with_expectation(replay_expectation)
}

pub fn short_format_plan() -> MatchPlan {
    MatchPlan::new()
        .with_max_overs(5)
        .with_expectation(innings_invariants_expectation)
        .with_expectation(chase_expectation)
}

fn smoke_expectation(summary: &MatchSummary) -> Result<()> {
    let report = &summary.report;
    ensure!(!report.result.is_empty(), "Result line should not be empty");
    ensure!(summary.draws > 0, "A match should consume draws");
    ensure!(
        report.target == report.first_innings.result.total_runs + 1,
        "Target {} should be first-innings total plus one",
        report.target
    );
    ensure!(
        report.first_innings.batting_team != report.second_innings.batting_team,
        "Both innings batted by {}",
        report.first_innings.batting_team
    );
    Ok(())
}

fn innings_invariants_expectation(summary: &MatchSummary) -> Result<()> {
    for innings in summary.report.innings() {
        check_innings(&innings.result, summary.max_overs)
            .with_context(|| format!("{} innings", innings.batting_team))?;
    }
    Ok(())
}

fn check_innings(result: &InningsResult, max_overs: u16) -> Result<()> {
    ensure!(
        result.total_overs <= f64::from(max_overs),
        "Overs {} exceed limit {max_overs}",
        result.total_overs
    );
    ensure!(result.total_wickets <= 10, "Wickets {} exceed 10", result.total_wickets);

    let legal = result.deliveries.iter().filter(|d| d.is_legal()).count();
    ensure!(
        u32::try_from(legal).ok() == Some(result.legal_balls),
        "Legal balls {} disagree with log count {legal}",
        result.legal_balls
    );
    let logged_runs: u32 = result.deliveries.iter().map(|d| d.runs).sum();
    ensure!(
        logged_runs == result.total_runs,
        "Total {} disagrees with logged runs {logged_runs}",
        result.total_runs
    );

    for row in ball_rows(1, &result.deliveries) {
        ensure!(
            (1..=6).contains(&row.ball_number) && (1..=max_overs).contains(&row.over_number),
            "Ball numbered {}.{} is out of range",
            row.over_number,
            row.ball_number
        );
    }

    if let Some(last_wicket) = result.fall_of_wickets.iter().find(|f| f.wicket == 10) {
        ensure!(
            last_wicket.legal_balls == result.legal_balls,
            "Deliveries recorded after the tenth wicket"
        );
    }

    match result.end {
        InningsEnd::AllOut => ensure!(result.total_wickets == 10, "All out with fewer than 10 down"),
        InningsEnd::OversComplete => ensure!(
            result.legal_balls == u32::from(max_overs) * 6,
            "Overs complete after only {} balls",
            result.legal_balls
        ),
        InningsEnd::TargetReached => {}
    }
    Ok(())
}

fn chase_expectation(summary: &MatchSummary) -> Result<()> {
    let report = &summary.report;
    ensure!(
        report.first_innings.result.end != InningsEnd::TargetReached,
        "First innings cannot end on a target"
    );

    let chase = &report.second_innings.result;
    if chase.total_runs >= report.target {
        ensure!(
            chase.end == InningsEnd::TargetReached,
            "Chase passed {} but ended {:?}",
            report.target,
            chase.end
        );
        let last = chase.deliveries.last().map_or(0, |d| d.runs);
        ensure!(
            chase.total_runs - last < report.target,
            "Chase continued after reaching {}",
            report.target
        );
    } else {
        ensure!(
            chase.end != InningsEnd::TargetReached,
            "Chase flagged as reached on {} of {}",
            chase.total_runs,
            report.target
        );
    }
    Ok(())
}

fn scorecard_expectation(summary: &MatchSummary) -> Result<()> {
    for innings in summary.report.innings() {
        let result = &innings.result;
        ensure!(
            extras_total(&result.deliveries) == result.extras,
            "{}: extras disagree with the log",
            innings.batting_team
        );
        let off_bat: u32 = batting_runs(&result.deliveries).iter().map(|(_, r)| r).sum();
        ensure!(
            off_bat + result.extras == result.total_runs,
            "{}: batting {off_bat} + extras {} != total {}",
            innings.batting_team,
            result.extras,
            result.total_runs
        );
        let credited: u32 = bowling_wickets(&result.deliveries).iter().map(|(_, w)| w).sum();
        ensure!(
            credited <= u32::from(result.total_wickets),
            "{}: bowlers credited with {credited} of {} wickets",
            innings.batting_team,
            result.total_wickets
        );
        ensure!(
            result.fall_of_wickets.len() == usize::from(result.total_wickets),
            "{}: fall-of-wicket entries disagree with wickets",
            innings.batting_team
        );
    }
    Ok(())
}

fn outcome_expectation(summary: &MatchSummary) -> Result<()> {
    let report = &summary.report;
    let first = &report.first_innings;
    let second = &report.second_innings;
    let outcome = decide(&first.result, &second.result);
    ensure!(outcome == report.outcome, "Recorded outcome disagrees with totals");
    ensure!(
        outcome.describe(&first.batting_team, &second.batting_team) == report.result,
        "Result line '{}' does not describe the outcome",
        report.result
    );
    let expected_winner = match outcome.winner {
        Winner::FirstInnings => Some(first.batting_team.as_str()),
        Winner::SecondInnings => Some(second.batting_team.as_str()),
        Winner::Tie => None,
    };
    ensure!(
        report.winner.as_deref() == expected_winner,
        "Winner {:?} disagrees with outcome {:?}",
        report.winner,
        outcome.winner
    );
    Ok(())
}

fn determinism_expectation(summary: &MatchSummary) -> Result<()> {
    let replayed = summary
        .engine
        .preview(summary.seed, summary.max_overs)
        .context("replaying preview")?;
    let digest = report_digest(&replayed)?;
    ensure!(
        digest == summary.digest,
        "Seed {} produced digests {:016x} and {digest:016x}",
        summary.seed,
        summary.digest
    );
    Ok(())
}

fn replay_expectation(summary: &MatchSummary) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(summary.seed);
    let batting_xi = select_playing_xi(&generate_squad(&mut rng, 15))?;
    let bowling_xi = select_playing_xi(&generate_squad(&mut rng, 15))?;
    let draws: Vec<f64> = (0..REPLAY_LENGTH).map(|_| rng.r#gen::<f64>()).collect();

    let batting = batting_order(&batting_xi);
    let bowling = bowling_attack(&bowling_xi);
    let setup = InningsSetup::new(&batting, &bowling)
        .with_fielding(&bowling_xi)
        .with_max_overs(REPLAY_OVERS);

    let mut first_source = ReplayDraws::new(draws.clone());
    let mut second_source = ReplayDraws::new(draws);
    let first = summary.engine.simulate_innings(&setup, &mut first_source)?;
    let second = summary.engine.simulate_innings(&setup, &mut second_source)?;
    ensure!(first == second, "Replayed innings diverged");
    ensure!(
        first_source.consumed() == second_source.consumed(),
        "Replayed innings consumed {} and {} draws",
        first_source.consumed(),
        second_source.consumed()
    );
    check_innings(&first, REPLAY_OVERS)
}
