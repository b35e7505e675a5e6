//! Full-match orchestration: XI selection, toss, both innings, and the report.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{LOG_TARGET_MATCH, PLAYER_OF_MATCH_WICKET_VALUE};
use crate::draws::{DrawSource, MatchStreams};
use crate::generator::{DEFAULT_SQUAD_SIZE, disambiguate_names, generate_squad};
use crate::innings::{EngineError, InningsResult, InningsSetup, MatchEngine};
use crate::outcome::{MatchOutcome, Winner, decide};
use crate::player::PlayerCompetency;
use crate::scorecard::{PlayerTally, batting_runs, bowling_wickets};
use crate::squad::{Squad, SquadError, batting_order, bowling_attack};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Squad(#[from] SquadError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toss {
    pub winner: String,
    pub decision: TossDecision,
}

/// One innings with the sides that played it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInnings {
    pub batting_team: String,
    pub bowling_team: String,
    pub result: InningsResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub home: String,
    pub away: String,
    pub toss: Toss,
    pub first_innings: TeamInnings,
    pub second_innings: TeamInnings,
    pub target: u32,
    pub outcome: MatchOutcome,
    /// Short result line, e.g. `Hawks won by 4 wickets`.
    pub result: String,
    pub winner: Option<String>,
    pub player_of_match: Option<String>,
}

impl MatchReport {
    /// Both innings in order.
    #[must_use]
    pub fn innings(&self) -> [&TeamInnings; 2] {
        [&self.first_innings, &self.second_innings]
    }
}

impl MatchEngine {
    /// Play a full match between two squads.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Squad`] when either squad cannot field an XI and
    /// [`MatchError::Engine`] when the over limit is zero.
    pub fn play_match(
        &self,
        home: &Squad,
        away: &Squad,
        max_overs: u16,
        streams: &mut MatchStreams,
    ) -> Result<MatchReport, MatchError> {
        let home_xi = home.playing_xi()?;
        let away_xi = away.playing_xi()?;

        let toss_home = streams.toss.next_unit() < 0.5;
        let decision = if streams.toss.next_unit() < 0.5 {
            TossDecision::Bat
        } else {
            TossDecision::Bowl
        };
        let home_bats_first = toss_home == (decision == TossDecision::Bat);
        let toss_winner = if toss_home { &home.name } else { &away.name };
        let toss = Toss {
            winner: toss_winner.clone(),
            decision,
        };
        log::debug!(
            target: LOG_TARGET_MATCH,
            "{} won the toss and chose to {decision:?}",
            toss.winner
        );

        let ((first_name, first_xi), (second_name, second_xi)) = if home_bats_first {
            ((&home.name, &home_xi), (&away.name, &away_xi))
        } else {
            ((&away.name, &away_xi), (&home.name, &home_xi))
        };

        let first = self.play_innings(first_xi, second_xi, max_overs, None, &mut streams.first_innings)?;
        let target = first.total_runs + 1;
        let second = self.play_innings(
            second_xi,
            first_xi,
            max_overs,
            Some(target),
            &mut streams.second_innings,
        )?;

        let outcome = decide(&first, &second);
        let result = outcome.describe(first_name, second_name);
        let winner = match outcome.winner {
            Winner::FirstInnings => Some(first_name.clone()),
            Winner::SecondInnings => Some(second_name.clone()),
            Winner::Tie => None,
        };
        let player_of_match = award(
            outcome.winner,
            (first_xi.as_slice(), &first),
            (second_xi.as_slice(), &second),
        );

        log::debug!(target: LOG_TARGET_MATCH, "{result} (draws: {})", streams.total_draws());

        Ok(MatchReport {
            home: home.name.clone(),
            away: away.name.clone(),
            toss,
            first_innings: TeamInnings {
                batting_team: first_name.clone(),
                bowling_team: second_name.clone(),
                result: first,
            },
            second_innings: TeamInnings {
                batting_team: second_name.clone(),
                bowling_team: first_name.clone(),
                result: second,
            },
            target,
            outcome,
            result,
            winner,
            player_of_match,
        })
    }

    /// Play a match between two freshly generated squads.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Engine`] when `max_overs` is zero.
    pub fn preview(&self, seed: u64, max_overs: u16) -> Result<MatchReport, MatchError> {
        self.preview_with_streams(&mut MatchStreams::from_user_seed(seed), max_overs)
    }

    /// Same as [`MatchEngine::preview`] but draws from caller-owned streams,
    /// so the caller can inspect draw counts afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Engine`] when `max_overs` is zero.
    pub fn preview_with_streams(
        &self,
        streams: &mut MatchStreams,
        max_overs: u16,
    ) -> Result<MatchReport, MatchError> {
        let home_players = generate_squad(&mut streams.squads, DEFAULT_SQUAD_SIZE);
        let mut away_players = generate_squad(&mut streams.squads, DEFAULT_SQUAD_SIZE);
        disambiguate_names(&mut away_players, home_players.iter().map(|p| p.name.clone()));
        let home = Squad::new("Preview XI A", home_players);
        let away = Squad::new("Preview XI B", away_players);
        self.play_match(&home, &away, max_overs, streams)
    }

    fn play_innings<D: DrawSource + ?Sized>(
        &self,
        batting_xi: &[PlayerCompetency],
        bowling_xi: &[PlayerCompetency],
        max_overs: u16,
        target: Option<u32>,
        draws: &mut D,
    ) -> Result<InningsResult, EngineError> {
        let batting = batting_order(batting_xi);
        let bowling = bowling_attack(bowling_xi);
        let mut setup = InningsSetup::new(&batting, &bowling)
            .with_fielding(bowling_xi)
            .with_max_overs(max_overs);
        setup.target = target;
        self.simulate_innings(&setup, draws)
    }
}

/// Player of the match from the winning side, scored only on its own innings:
/// runs from the innings it batted and wickets from the innings it bowled.
fn award(
    winner: Winner,
    first: (&[PlayerCompetency], &InningsResult),
    second: (&[PlayerCompetency], &InningsResult),
) -> Option<String> {
    let (xi, batted, bowled) = match winner {
        Winner::FirstInnings => (first.0, first.1, second.1),
        Winner::SecondInnings => (second.0, second.1, first.1),
        Winner::Tie => return None,
    };
    player_of_match(
        xi,
        &batting_runs(&batted.deliveries),
        &bowling_wickets(&bowled.deliveries),
    )
}

/// Best of runs plus a fixed value per wicket; the earlier player keeps ties.
fn player_of_match(xi: &[PlayerCompetency], runs: &PlayerTally, wickets: &PlayerTally) -> Option<String> {
    let mut best: Option<(&str, u32)> = None;
    for player in xi {
        let score = runs.get(&player.name) + wickets.get(&player.name) * PLAYER_OF_MATCH_WICKET_VALUE;
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((&player.name, score));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{DeliveryOutcome, DismissalKind};
    use crate::innings::InningsEnd;
    use crate::player::PlayerRole;

    #[test]
    fn preview_is_deterministic_per_seed() {
        let engine = MatchEngine::default();
        let a = engine.preview(2024, 20).unwrap();
        let b = engine.preview(2024, 20).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.target, a.first_innings.result.total_runs + 1);
        assert_ne!(a.first_innings.batting_team, a.second_innings.batting_team);
        assert_eq!(a.outcome, decide(&a.first_innings.result, &a.second_innings.result));
    }

    #[test]
    fn caller_streams_match_seeded_preview() {
        let engine = MatchEngine::default();
        let mut streams = MatchStreams::from_user_seed(2024);
        let report = engine.preview_with_streams(&mut streams, 20).unwrap();
        assert_eq!(report, engine.preview(2024, 20).unwrap());
        assert!(streams.squads.draws() > 0);
        assert_eq!(streams.toss.draws(), 2);
    }

    #[test]
    fn winner_and_player_of_match_agree() {
        let engine = MatchEngine::default();
        for seed in 0..10 {
            let report = engine.preview(seed, 20).unwrap();
            match report.outcome.winner {
                Winner::Tie => {
                    assert!(report.winner.is_none());
                    assert!(report.player_of_match.is_none());
                    assert_eq!(report.result, "Match tied");
                }
                Winner::FirstInnings | Winner::SecondInnings => {
                    let winner = report.winner.clone().unwrap();
                    assert!(report.result.starts_with(&winner));
                    let award = report.player_of_match.clone().unwrap();
                    let losing = report
                        .innings()
                        .into_iter()
                        .find(|innings| innings.batting_team != winner)
                        .unwrap();
                    assert!(losing.result.deliveries.iter().all(|ball| ball.striker != award));
                }
            }
        }
    }

    #[test]
    fn short_squads_are_rejected() {
        let engine = MatchEngine::default();
        let players: Vec<_> = (0..8)
            .map(|i| PlayerCompetency::new(format!("P{i}"), PlayerRole::Batter))
            .collect();
        let short = Squad::new("Short", players);
        let mut streams = MatchStreams::from_user_seed(1);
        let err = engine.play_match(&short, &short, 20, &mut streams).unwrap_err();
        assert!(matches!(err, MatchError::Squad(SquadError::NotEnoughPlayers { found: 8, .. })));
    }

    #[test]
    fn zero_overs_surface_engine_error() {
        let engine = MatchEngine::default();
        assert_eq!(
            engine.preview(1, 0).unwrap_err(),
            MatchError::Engine(EngineError::ZeroOvers)
        );
    }

    fn ball(striker: &str, bowler: &str, runs: u32, dismissal: Option<DismissalKind>) -> DeliveryOutcome {
        DeliveryOutcome {
            over: 1,
            ball: 1,
            striker: striker.to_string(),
            bowler: bowler.to_string(),
            runs,
            extra: None,
            dismissal,
        }
    }

    fn innings_of(deliveries: Vec<DeliveryOutcome>) -> InningsResult {
        InningsResult {
            total_runs: deliveries.iter().map(|b| b.runs).sum(),
            total_wickets: 0,
            legal_balls: 0,
            total_overs: 0.0,
            extras: 0,
            end: InningsEnd::OversComplete,
            fall_of_wickets: Vec::new(),
            deliveries,
        }
    }

    #[test]
    fn award_ignores_opponent_sharing_a_name() {
        let home = vec![
            PlayerCompetency::new("Anchor", PlayerRole::Batter),
            PlayerCompetency::new("Shared", PlayerRole::AllRounder),
        ];
        let away = vec![
            PlayerCompetency::new("Shared", PlayerRole::AllRounder),
            PlayerCompetency::new("Opener", PlayerRole::Batter),
        ];
        // Home bats first; the away "Shared" takes two wickets and then scores 20.
        let first = innings_of(vec![
            ball("Anchor", "Shared", 30, None),
            ball("Shared", "Shared", 10, None),
            ball("Tail", "Shared", 0, Some(DismissalKind::Bowled)),
            ball("Tail", "Shared", 0, Some(DismissalKind::Caught)),
        ]);
        let second = innings_of(vec![
            ball("Shared", "Anchor", 20, None),
            ball("Opener", "Anchor", 0, Some(DismissalKind::Lbw)),
        ]);

        assert_eq!(
            award(Winner::FirstInnings, (&home[..], &first), (&away[..], &second)).as_deref(),
            Some("Anchor")
        );
        // Away winning: its "Shared" scores 20 plus two wickets, home runs never count.
        assert_eq!(
            award(Winner::SecondInnings, (&home[..], &first), (&away[..], &second)).as_deref(),
            Some("Shared")
        );
        assert_eq!(award(Winner::Tie, (&home[..], &first), (&away[..], &second)), None);
    }

    #[test]
    fn award_scores_only_the_winning_side() {
        let home = vec![
            PlayerCompetency::new("Keeper", PlayerRole::WicketKeeper),
            PlayerCompetency::new("Shared", PlayerRole::Batter),
        ];
        let away = vec![PlayerCompetency::new("Shared", PlayerRole::Bowler)];
        let first = innings_of(vec![ball("Keeper", "Shared", 25, None), ball("Shared", "Shared", 5, None)]);
        let second = innings_of(vec![ball("Shared", "Keeper", 90, None)]);
        // Merging both innings would hand the home "Shared" 95 runs.
        assert_eq!(
            award(Winner::FirstInnings, (&home[..], &first), (&away[..], &second)).as_deref(),
            Some("Keeper")
        );
    }

    #[test]
    fn preview_squads_never_share_names() {
        let engine = MatchEngine::default();
        for seed in 0..25 {
            let report = engine.preview(seed, 5).unwrap();
            let [first, second] = report.innings();
            let batted_first: std::collections::HashSet<&str> =
                first.result.deliveries.iter().map(|b| b.striker.as_str()).collect();
            assert!(
                second.result.deliveries.iter().all(|b| !batted_first.contains(b.striker.as_str())),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn player_of_match_values_wickets() {
        let xi = vec![
            PlayerCompetency::new("Basher", PlayerRole::Batter),
            PlayerCompetency::new("Seamer", PlayerRole::Bowler),
        ];
        let mut log = vec![DeliveryOutcome {
            over: 1,
            ball: 1,
            striker: "Basher".to_string(),
            bowler: "Other".to_string(),
            runs: 40,
            extra: None,
            dismissal: None,
        }];
        let runs = batting_runs(&log);
        for ball in 2..=3 {
            log.push(DeliveryOutcome {
                over: 1,
                ball,
                striker: "Someone".to_string(),
                bowler: "Seamer".to_string(),
                runs: 0,
                extra: None,
                dismissal: Some(DismissalKind::Lbw),
            });
        }
        let wickets = bowling_wickets(&log);
        assert_eq!(player_of_match(&xi, &runs, &wickets).as_deref(), Some("Seamer"));
    }
}
