//! Flat ball rows and per-player aggregates derived from an innings log.
use serde::{Deserialize, Serialize};

use crate::delivery::{DeliveryOutcome, DismissalKind, ExtraKind};

/// One ball ready for a persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallRow {
    pub innings_number: u8,
    pub over_number: u16,
    pub ball_number: u8,
    pub batter_name: String,
    pub bowler_name: String,
    pub runs: u32,
    pub is_wicket: bool,
    pub is_extra: bool,
    pub extra_type: Option<ExtraKind>,
    pub wicket_type: Option<DismissalKind>,
    pub dismissed_player: Option<String>,
}

/// Rows in log order, numbered from the legal-ball count rather than the
/// log index so extras never push the ball number past six.
#[must_use]
pub fn ball_rows(innings_number: u8, log: &[DeliveryOutcome]) -> Vec<BallRow> {
    log.iter()
        .map(|ball| BallRow {
            innings_number,
            over_number: ball.over,
            ball_number: ball.ball,
            batter_name: ball.striker.clone(),
            bowler_name: ball.bowler.clone(),
            runs: ball.runs,
            is_wicket: ball.is_wicket(),
            is_extra: ball.is_extra(),
            extra_type: ball.extra,
            wicket_type: ball.dismissal,
            dismissed_player: ball.dismissal.map(|_| ball.striker.clone()),
        })
        .collect()
}

#[must_use]
pub fn extras_total(log: &[DeliveryOutcome]) -> u32 {
    log.iter().filter(|ball| ball.is_extra()).map(|ball| ball.runs).sum()
}

/// Tally keyed by player name, kept in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTally {
    entries: Vec<(String, u32)>,
}

impl PlayerTally {
    fn add(&mut self, name: &str, amount: u32) {
        if let Some((_, total)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *total += amount;
        } else {
            self.entries.push((name.to_string(), amount));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs off the bat per batter; extras are not credited.
#[must_use]
pub fn batting_runs(log: &[DeliveryOutcome]) -> PlayerTally {
    let mut tally = PlayerTally::default();
    for ball in log.iter().filter(|ball| !ball.is_extra()) {
        tally.add(&ball.striker, ball.runs);
    }
    tally
}

/// Wickets per bowler; run-outs are not credited.
#[must_use]
pub fn bowling_wickets(log: &[DeliveryOutcome]) -> PlayerTally {
    let mut tally = PlayerTally::default();
    for ball in log {
        if let Some(kind) = ball.dismissal
            && kind.credited_to_bowler()
        {
            tally.add(&ball.bowler, 1);
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(over: u16, ball: u8, striker: &str, runs: u32) -> DeliveryOutcome {
        DeliveryOutcome {
            over,
            ball,
            striker: striker.to_string(),
            bowler: "Bowler".to_string(),
            runs,
            extra: None,
            dismissal: None,
        }
    }

    #[test]
    fn rows_keep_derived_numbering() {
        let mut wide = ball(1, 6, "A", 1);
        wide.extra = Some(ExtraKind::Wide);
        let mut out = ball(1, 6, "A", 0);
        out.dismissal = Some(DismissalKind::Bowled);
        let log = vec![ball(1, 5, "A", 4), wide, out];
        let rows = ball_rows(2, &log);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.ball_number <= 6 && row.innings_number == 2));
        assert_eq!(rows[1].extra_type, Some(ExtraKind::Wide));
        assert_eq!(rows[2].dismissed_player.as_deref(), Some("A"));
        assert_eq!(extras_total(&log), 1);
    }

    #[test]
    fn aggregates_skip_extras_and_run_outs() {
        let mut bye = ball(1, 1, "A", 1);
        bye.extra = Some(ExtraKind::Bye);
        let mut run_out = ball(1, 2, "B", 0);
        run_out.dismissal = Some(DismissalKind::RunOut);
        let mut caught = ball(1, 3, "C", 0);
        caught.dismissal = Some(DismissalKind::Caught);
        let log = vec![ball(1, 1, "A", 2), bye, ball(1, 2, "B", 6), run_out, caught];

        let runs = batting_runs(&log);
        assert_eq!(runs.get("A"), 2);
        assert_eq!(runs.get("B"), 6);
        let order: Vec<&str> = runs.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["A", "B", "C"]);

        let wickets = bowling_wickets(&log);
        assert_eq!(wickets.get("Bowler"), 1);
        assert!(!wickets.is_empty());
        assert!(bowling_wickets(&[]).is_empty());
    }
}
