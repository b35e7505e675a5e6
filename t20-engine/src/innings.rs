//! Innings loop: strike rotation, bowler rotation, phases, and termination.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{
    BALLS_PER_OVER, DEATH_MAX_OVERS, DEATH_SHARE, DEFAULT_MAX_OVERS, LOG_TARGET_INNINGS,
    MAX_CONSECUTIVE_EXTRAS, MAX_WICKETS, MIN_BATTERS, MIN_BOWLERS, MOMENTUM_DECAY,
    POWERPLAY_MAX_OVERS, POWERPLAY_SHARE, PRESSURE_MAX, PRESSURE_MIN, PRESSURE_RELIEF_SHARE,
};
use crate::delivery::{DeliveryContext, DeliveryModel, DeliveryOutcome, DismissalKind, Phase};
use crate::draws::DrawSource;
use crate::numbers::{ceil_f64_to_u16, clamp_finite, decimal_overs};
use crate::player::{FieldingUnit, PlayerCompetency};
use crate::tuning::{NormalizationReport, TuningProfile};

/// Precondition failures detected before any delivery is simulated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("batting line-up needs at least two players (got {found})")]
    NotEnoughBatters { found: usize },
    #[error("bowling line-up is empty")]
    NoBowlers,
    #[error("innings must allow at least one over")]
    ZeroOvers,
    #[error("target must be at least one run")]
    ZeroTarget,
}

/// Why an innings stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsEnd {
    OversComplete,
    AllOut,
    TargetReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    /// 1-based wicket number.
    pub wicket: u8,
    /// Team score when the wicket fell.
    pub score: u32,
    /// Legal balls bowled including the dismissal ball.
    pub legal_balls: u32,
    pub batter: String,
    pub dismissal: DismissalKind,
}

/// Aggregates and the ordered ball log for a finished innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsResult {
    pub total_runs: u32,
    pub total_wickets: u8,
    pub legal_balls: u32,
    /// `legal_balls / 6` as a decimal.
    pub total_overs: f64,
    pub extras: u32,
    pub end: InningsEnd,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub deliveries: Vec<DeliveryOutcome>,
}

impl InningsResult {
    /// Cricket notation: completed overs and balls, e.g. `19.5`.
    #[must_use]
    pub fn overs_notation(&self) -> String {
        format!(
            "{}.{}",
            self.legal_balls / BALLS_PER_OVER,
            self.legal_balls % BALLS_PER_OVER
        )
    }

    /// Runs per over; zero before the first legal ball.
    #[must_use]
    pub fn run_rate(&self) -> f64 {
        if self.legal_balls == 0 {
            return 0.0;
        }
        f64::from(self.total_runs) / decimal_overs(self.legal_balls)
    }

    /// Score line such as `168/7`.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.total_runs, self.total_wickets)
    }
}

/// Inputs for one innings.
#[derive(Debug, Clone, Copy)]
pub struct InningsSetup<'a> {
    pub batting: &'a [PlayerCompetency],
    pub bowling: &'a [PlayerCompetency],
    /// Fielding XI; the bowling line-up stands in when absent.
    pub fielding: Option<&'a [PlayerCompetency]>,
    pub max_overs: u16,
    pub target: Option<u32>,
}

impl<'a> InningsSetup<'a> {
    #[must_use]
    pub const fn new(batting: &'a [PlayerCompetency], bowling: &'a [PlayerCompetency]) -> Self {
        Self {
            batting,
            bowling,
            fielding: None,
            max_overs: DEFAULT_MAX_OVERS,
            target: None,
        }
    }

    #[must_use]
    pub const fn with_fielding(mut self, fielding: &'a [PlayerCompetency]) -> Self {
        self.fielding = Some(fielding);
        self
    }

    #[must_use]
    pub const fn with_max_overs(mut self, max_overs: u16) -> Self {
        self.max_overs = max_overs;
        self
    }

    #[must_use]
    pub const fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    /// Check preconditions.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batting.len() < MIN_BATTERS {
            return Err(EngineError::NotEnoughBatters {
                found: self.batting.len(),
            });
        }
        if self.bowling.len() < MIN_BOWLERS {
            return Err(EngineError::NoBowlers);
        }
        if self.max_overs == 0 {
            return Err(EngineError::ZeroOvers);
        }
        if self.target == Some(0) {
            return Err(EngineError::ZeroTarget);
        }
        Ok(())
    }

    const fn max_balls(&self) -> u32 {
        // Widening cast; u16 always fits.
        self.max_overs as u32 * BALLS_PER_OVER
    }
}

/// Phase for a 0-based over index.
///
/// The powerplay is the first `min(6, ceil(0.3 * max_overs))` overs and the
/// death the last `min(4, ceil(0.2 * max_overs))`; the powerplay wins where
/// the two overlap.
#[must_use]
pub fn phase_for_over(over_index: u16, max_overs: u16) -> Phase {
    let max = f64::from(max_overs);
    let powerplay = ceil_f64_to_u16(max * POWERPLAY_SHARE).min(POWERPLAY_MAX_OVERS);
    let death = ceil_f64_to_u16(max * DEATH_SHARE).min(DEATH_MAX_OVERS);
    if over_index < powerplay {
        Phase::Powerplay
    } else if over_index >= max_overs.saturating_sub(death) {
        Phase::Death
    } else {
        Phase::Middle
    }
}

/// Chase pressure from the required rate against the current rate.
///
/// Before the first legal ball the two rates are treated as equal, so a
/// chase starts neutral.
#[must_use]
pub fn chase_pressure(
    tuning: &TuningProfile,
    target: u32,
    runs: u32,
    legal_balls: u32,
    max_balls: u32,
) -> f64 {
    let needed = target.saturating_sub(runs);
    if needed == 0 {
        return 0.0;
    }
    let balls_left = max_balls.saturating_sub(legal_balls);
    if balls_left == 0 {
        return PRESSURE_MAX;
    }
    let required_rate = f64::from(needed) / decimal_overs(balls_left);
    let current_rate = if legal_balls == 0 {
        required_rate
    } else {
        f64::from(runs) / decimal_overs(legal_balls)
    };
    let shortfall = required_rate - current_rate;
    let pressure = if shortfall > 0.0 {
        shortfall.mul_add(tuning.required_run_rate_pressure, tuning.chasing_pressure_base)
    } else {
        shortfall * tuning.required_run_rate_pressure * PRESSURE_RELIEF_SHARE
    };
    clamp_finite(pressure, PRESSURE_MIN, PRESSURE_MAX)
}

#[derive(Debug, Clone)]
struct EngineState {
    runs: u32,
    legal_balls: u32,
    wickets: u8,
    extras: u32,
    striker: usize,
    non_striker: usize,
    next_batter: usize,
    bowler: usize,
    partnership_balls: u32,
    consecutive_extras: u8,
    momentum: f64,
}

impl EngineState {
    const fn opening() -> Self {
        Self {
            runs: 0,
            legal_balls: 0,
            wickets: 0,
            extras: 0,
            striker: 0,
            non_striker: 1,
            next_batter: 2,
            bowler: 0,
            partnership_balls: 0,
            consecutive_extras: 0,
            momentum: 0.0,
        }
    }

    fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    fn target_reached(&self, target: Option<u32>) -> bool {
        target.is_some_and(|t| self.runs >= t)
    }

    fn apply_momentum(&mut self, delta: f64) {
        self.momentum = clamp_finite(self.momentum.mul_add(MOMENTUM_DECAY, delta), -1.0, 1.0);
    }
}

/// Ball-by-ball engine bound to one immutable tuning profile.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchEngine {
    tuning: TuningProfile,
}

impl MatchEngine {
    /// Build an engine; any out-of-range coefficient is reset to its default.
    #[must_use]
    pub fn new(mut tuning: TuningProfile) -> Self {
        tuning.sanitize();
        Self { tuning }
    }

    /// Build an engine from caller overrides merged onto the defaults.
    #[must_use]
    pub fn from_overrides(partial: &Value) -> (Self, NormalizationReport) {
        let (tuning, report) =
            TuningProfile::normalize_with_report(partial, &TuningProfile::default());
        (Self { tuning }, report)
    }

    #[must_use]
    pub const fn tuning(&self) -> &TuningProfile {
        &self.tuning
    }

    #[must_use]
    pub const fn delivery_model(&self) -> DeliveryModel<'_> {
        DeliveryModel::new(&self.tuning)
    }

    /// Simulate one innings to completion.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the setup violates a precondition; no
    /// draws are consumed in that case.
    pub fn simulate_innings<D: DrawSource + ?Sized>(
        &self,
        setup: &InningsSetup<'_>,
        draws: &mut D,
    ) -> Result<InningsResult, EngineError> {
        setup.validate()?;

        let model = self.delivery_model();
        let fielding = FieldingUnit::from_players(setup.fielding.unwrap_or(setup.bowling));
        let max_balls = setup.max_balls();
        let mut state = EngineState::opening();
        let mut deliveries = Vec::with_capacity(usize::try_from(max_balls).unwrap_or(0) + 16);
        let mut fall_of_wickets = Vec::new();

        let end = loop {
            if state.legal_balls >= max_balls {
                break InningsEnd::OversComplete;
            }

            let over_index = u16::try_from(state.legal_balls / BALLS_PER_OVER).unwrap_or(u16::MAX);
            let ctx = DeliveryContext {
                phase: phase_for_over(over_index, setup.max_overs),
                pressure: setup.target.map_or(0.0, |target| {
                    chase_pressure(&self.tuning, target, state.runs, state.legal_balls, max_balls)
                }),
                momentum: state.momentum,
                fielding,
                partnership_balls: state.partnership_balls,
                suppress_extras: state.consecutive_extras >= MAX_CONSECUTIVE_EXTRAS,
            };
            let striker = &setup.batting[state.striker];
            let bowler = &setup.bowling[state.bowler % setup.bowling.len()];
            let resolution = model.resolve(striker, bowler, &ctx, draws);

            deliveries.push(DeliveryOutcome {
                over: over_index.saturating_add(1),
                ball: u8::try_from(state.legal_balls % BALLS_PER_OVER + 1).unwrap_or(6),
                striker: striker.name.clone(),
                bowler: bowler.name.clone(),
                runs: resolution.runs,
                extra: resolution.extra,
                dismissal: resolution.dismissal,
            });
            state.apply_momentum(resolution.momentum_delta);
            state.runs = state.runs.saturating_add(resolution.runs);

            if resolution.extra.is_some() {
                state.extras = state.extras.saturating_add(resolution.runs);
                state.consecutive_extras = state.consecutive_extras.saturating_add(1);
                if state.target_reached(setup.target) {
                    break InningsEnd::TargetReached;
                }
                continue;
            }

            state.consecutive_extras = 0;
            state.legal_balls += 1;
            state.partnership_balls += 1;

            if let Some(dismissal) = resolution.dismissal {
                state.wickets += 1;
                state.partnership_balls = 0;
                fall_of_wickets.push(FallOfWicket {
                    wicket: state.wickets,
                    score: state.runs,
                    legal_balls: state.legal_balls,
                    batter: striker.name.clone(),
                    dismissal,
                });
                log::trace!(
                    target: LOG_TARGET_INNINGS,
                    "wicket {} at {}/{}: {} {dismissal:?}",
                    state.wickets,
                    state.runs,
                    state.legal_balls,
                    striker.name
                );
                if state.wickets >= MAX_WICKETS || state.next_batter >= setup.batting.len() {
                    break InningsEnd::AllOut;
                }
                state.striker = state.next_batter;
                state.next_batter += 1;
            } else if resolution.runs % 2 == 1 {
                state.swap_strike();
            }

            if state.target_reached(setup.target) {
                break InningsEnd::TargetReached;
            }

            if state.legal_balls % BALLS_PER_OVER == 0 {
                state.swap_strike();
                state.bowler = (state.bowler + 1) % setup.bowling.len();
            }
        };

        log::debug!(
            target: LOG_TARGET_INNINGS,
            "innings ended {end:?}: {}/{} in {} balls ({} deliveries)",
            state.runs,
            state.wickets,
            state.legal_balls,
            deliveries.len()
        );

        Ok(InningsResult {
            total_runs: state.runs,
            total_wickets: state.wickets,
            legal_balls: state.legal_balls,
            total_overs: decimal_overs(state.legal_balls),
            extras: state.extras,
            end,
            fall_of_wickets,
            deliveries,
        })
    }
}
