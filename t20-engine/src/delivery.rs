//! Per-delivery outcome model.
//!
//! One uniform draw is split into three exclusive bands: extras, wicket, and
//! scoring. Band widths and scoring thresholds move with skill, conditions,
//! phase, chase pressure, and momentum; every derived probability is clamped
//! before use.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    AGGRESSION_WEIGHT, BATTING_BOOST_WEIGHT, BOUNCER_CAUGHT_WEIGHT, BOUNDARY_SIZE_WEIGHT,
    BOWLED_WEIGHT, BOWLING_DRAG_WEIGHT, CAUGHT_BASE_WEIGHT, DEATH_BOOST_SCALE, DEATH_SIX_SHARE,
    DEW_SEAM_WEIGHT, DEW_SPIN_WEIGHT, DROP_CATCH_SCALE, EDGE_WEIGHT_SCALE, EXTRA_BOWLING_RELIEF,
    EXTRA_BYE_WEIGHT_SHARE, EXTRA_MAX, EXTRA_MIN, EXTRA_RUNS, FOUR_CEILING, FOUR_GAP,
    HUMIDITY_SEAM_WEIGHT, LBW_BASE_WEIGHT, LBW_EFFECTIVENESS_WEIGHT, MOMENTUM_DOT_BASE,
    MOMENTUM_DOT_PRESSURE, MOMENTUM_EXTRA, MOMENTUM_PER_RUN, MOMENTUM_WICKET, OUTFIELD_SPEED_WEIGHT,
    PARTNERSHIP_SETTLE_BALLS, PHASE_WEIGHT, PITCH_BOUNCE_WEIGHT, PITCH_TURN_WEIGHT,
    POWERPLAY_BOOST_SCALE, PRESSURE_DRAG_WEIGHT, RUN_OUT_WEIGHT, SINGLE_CEILING, SINGLE_FLOOR,
    SIX_CEILING, SIX_GAP, STUMPED_WEIGHT, THREE_RUN_BASE, THREE_RUN_GROUND_WEIGHT, TWO_CEILING,
    TWO_GAP, WICKET_MAX, WICKET_MIN, WICKET_MOMENTUM_WEIGHT,
};
use crate::draws::DrawSource;
use crate::numbers::clamp_finite;
use crate::player::{BowlingKind, FieldingUnit, PlayerCompetency};
use crate::tuning::TuningProfile;

/// Stage of the innings; each has its own scoring multiplier and aggression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    #[must_use]
    pub const fn multiplier(self, tuning: &TuningProfile) -> f64 {
        match self {
            Self::Powerplay => tuning.powerplay_multiplier,
            Self::Middle => tuning.middle_overs_multiplier,
            Self::Death => tuning.death_overs_multiplier,
        }
    }

    /// Base aggression plus any phase bonus above it.
    #[must_use]
    pub fn aggression(self, tuning: &TuningProfile) -> f64 {
        let base = tuning.aggression_base;
        match self {
            Self::Powerplay => base + (tuning.aggression_powerplay - base).max(0.0),
            Self::Middle => base,
            Self::Death => base + (tuning.aggression_death - base).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DismissalKind {
    Caught,
    Stumped,
    Bowled,
    Lbw,
    RunOut,
}

impl DismissalKind {
    /// Whether the bowler is credited with the wicket.
    #[must_use]
    pub const fn credited_to_bowler(self) -> bool {
        !matches!(self, Self::RunOut)
    }
}

/// One simulated ball as it appears in the innings log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// 1-based over number.
    pub over: u16,
    /// 1-based legal ball within the over; extras carry the number of the
    /// ball still to be bowled.
    pub ball: u8,
    pub striker: String,
    pub bowler: String,
    pub runs: u32,
    #[serde(default)]
    pub extra: Option<ExtraKind>,
    #[serde(default)]
    pub dismissal: Option<DismissalKind>,
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_extra(&self) -> bool {
        self.extra.is_some()
    }

    #[must_use]
    pub const fn is_wicket(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Legal deliveries count toward the over; extras do not.
    #[must_use]
    pub const fn is_legal(&self) -> bool {
        self.extra.is_none()
    }
}

/// Match situation for a single delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryContext {
    pub phase: Phase,
    /// Chase pressure in `[-0.2, 0.5]`; zero outside a chase.
    pub pressure: f64,
    /// Momentum in `[-1, 1]`.
    pub momentum: f64,
    pub fielding: FieldingUnit,
    /// Legal balls faced by the current partnership.
    pub partnership_balls: u32,
    /// Skip the extras band (used to bound runs of consecutive extras).
    pub suppress_extras: bool,
}

impl Default for DeliveryContext {
    fn default() -> Self {
        Self {
            phase: Phase::Middle,
            pressure: 0.0,
            momentum: 0.0,
            fielding: FieldingUnit::default(),
            partnership_balls: 0,
            suppress_extras: false,
        }
    }
}

/// Run cut points on the scoring draw, strictly ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    pub six: f64,
    pub four: f64,
    pub two: f64,
    pub single: f64,
}

impl ScoringThresholds {
    /// Shift the tuning defaults down by `boost` and restore ordering.
    #[must_use]
    pub fn shifted(tuning: &TuningProfile, boost: f64) -> Self {
        let single = clamp_finite(tuning.single_threshold - boost, SINGLE_FLOOR, SINGLE_CEILING);
        let two = clamp_finite(tuning.two_threshold - boost, single + TWO_GAP, TWO_CEILING);
        let four = clamp_finite(tuning.four_threshold - boost, two + FOUR_GAP, FOUR_CEILING);
        let six = clamp_finite(tuning.six_threshold - boost, four + SIX_GAP, SIX_CEILING);
        Self {
            six,
            four,
            two,
            single,
        }
    }

    #[must_use]
    pub fn runs_for(&self, draw: f64) -> u32 {
        if draw > self.six {
            6
        } else if draw > self.four {
            4
        } else if draw > self.two {
            2
        } else if draw > self.single {
            1
        } else {
            0
        }
    }
}

/// Band widths derived for one striker/bowler/context combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBands {
    pub extra: f64,
    pub wicket: f64,
    pub scoring_boost: f64,
    pub thresholds: ScoringThresholds,
}

/// What one delivery did, before it is stamped with names and numbering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub runs: u32,
    pub extra: Option<ExtraKind>,
    pub dismissal: Option<DismissalKind>,
    pub momentum_delta: f64,
}

type WeightedKinds<K> = SmallVec<[(K, f64); 5]>;

/// Stateless delivery model bound to a tuning profile.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryModel<'a> {
    tuning: &'a TuningProfile,
}

impl<'a> DeliveryModel<'a> {
    #[must_use]
    pub const fn new(tuning: &'a TuningProfile) -> Self {
        Self { tuning }
    }

    /// Derive the clamped band widths and thresholds for a delivery.
    #[must_use]
    pub fn bands(
        &self,
        striker: &PlayerCompetency,
        bowler: &PlayerCompetency,
        ctx: &DeliveryContext,
    ) -> ProbabilityBands {
        let kind = bowler.bowling_kind();
        let batting = striker.batting_against(kind);
        let bowling = bowler.bowling_unit();

        let extra = if ctx.suppress_extras {
            0.0
        } else {
            self.extra_probability(bowling)
        };
        let wicket = self.wicket_probability(kind, batting, bowling, ctx);
        let scoring_boost = self.scoring_boost(striker, kind, batting, bowling, ctx);
        ProbabilityBands {
            extra,
            wicket,
            scoring_boost,
            thresholds: ScoringThresholds::shifted(self.tuning, scoring_boost),
        }
    }

    /// Simulate one delivery.
    pub fn resolve<D: DrawSource + ?Sized>(
        &self,
        striker: &PlayerCompetency,
        bowler: &PlayerCompetency,
        ctx: &DeliveryContext,
        draws: &mut D,
    ) -> Resolution {
        let bands = self.bands(striker, bowler, ctx);
        let roll = draws.next_unit();

        if roll < bands.extra {
            let kind = self.pick_extra(draws.next_unit());
            return Resolution {
                runs: EXTRA_RUNS,
                extra: Some(kind),
                dismissal: None,
                momentum_delta: MOMENTUM_EXTRA,
            };
        }

        if roll < bands.extra + bands.wicket {
            let dismissal = self.pick_dismissal(bowler.bowling_kind(), ctx.fielding, draws.next_unit());
            return Resolution {
                runs: 0,
                extra: None,
                dismissal: Some(dismissal),
                momentum_delta: MOMENTUM_WICKET,
            };
        }

        let mut runs = bands.thresholds.runs_for(draws.next_unit());
        if runs == 2 && self.tuning.outfield_speed < 0.5 {
            let chance = THREE_RUN_GROUND_WEIGHT.mul_add(1.0 - self.tuning.ground_fielding, THREE_RUN_BASE);
            if draws.next_unit() < chance {
                runs = 3;
            }
        }
        if runs <= 1 {
            runs = self.boost_roll(ctx.phase, runs, draws);
        }

        Resolution {
            runs,
            extra: None,
            dismissal: None,
            momentum_delta: self.momentum_delta(runs, ctx),
        }
    }

    fn extra_probability(&self, bowling: f64) -> f64 {
        let t = self.tuning;
        let raw = t.extra_probability + t.wide_frequency + t.no_ball_frequency
            + EXTRA_BYE_WEIGHT_SHARE * t.bye_leg_bye_frequency
            - EXTRA_BOWLING_RELIEF * bowling;
        clamp_finite(raw, EXTRA_MIN, EXTRA_MAX)
    }

    fn pitch_assist(&self, kind: BowlingKind) -> f64 {
        let t = self.tuning;
        match kind {
            BowlingKind::Pace => {
                let conditions = t.swing_factor + (t.pitch_bounce - 0.5) * PITCH_BOUNCE_WEIGHT
                    + t.humidity_factor * HUMIDITY_SEAM_WEIGHT
                    - t.dew_factor * DEW_SEAM_WEIGHT;
                t.seam_effectiveness * conditions
            }
            BowlingKind::Spin => {
                let conditions = t.spin_factor + (t.pitch_turn - 0.5) * PITCH_TURN_WEIGHT
                    - t.dew_factor * DEW_SPIN_WEIGHT;
                t.spin_effectiveness * conditions
            }
        }
    }

    fn wicket_probability(
        &self,
        kind: BowlingKind,
        batting: f64,
        bowling: f64,
        ctx: &DeliveryContext,
    ) -> f64 {
        let t = self.tuning;
        let fielding = ctx.fielding.fielding.clamp(0.0, 1.0);
        let keeping = ctx.fielding.keeping.clamp(0.0, 1.0);
        let mut p = t.base_wicket_probability;
        p += bowling * t.bowling_skill_influence;
        p -= batting * t.batting_skill_influence;
        p += 0.5 * self.pitch_assist(kind);
        p += 0.5 * ctx.pressure;
        p -= WICKET_MOMENTUM_WEIGHT * ctx.momentum * t.momentum_swing;
        p += fielding * t.fielding_skill_influence;
        p += keeping * t.keeper_skill_influence;
        p -= t.drop_catch_penalty * (1.0 - fielding) * DROP_CATCH_SCALE;
        clamp_finite(p, WICKET_MIN, WICKET_MAX)
    }

    fn scoring_boost(
        &self,
        striker: &PlayerCompetency,
        kind: BowlingKind,
        batting: f64,
        bowling: f64,
        ctx: &DeliveryContext,
    ) -> f64 {
        let t = self.tuning;
        let mut matchup = t.pace_vs_spin_advantage * (batting - striker.batting_against_other(kind));
        if kind == BowlingKind::Pace && striker.is_left_handed() {
            matchup += t.left_handed_pace_bonus;
        }
        let ground = (0.5 - t.boundary_size) * BOUNDARY_SIZE_WEIGHT
            + (t.outfield_speed - 0.5) * OUTFIELD_SPEED_WEIGHT;

        ctx.phase.aggression(t) * AGGRESSION_WEIGHT + batting * BATTING_BOOST_WEIGHT
            - bowling * BOWLING_DRAG_WEIGHT
            + matchup
            + ground
            + (ctx.phase.multiplier(t) - 1.0) * PHASE_WEIGHT
            - ctx.pressure * PRESSURE_DRAG_WEIGHT
            + ctx.momentum * t.momentum_swing
    }

    /// Upgrade a dot or single into a boundary when batters are hunting runs.
    fn boost_roll<D: DrawSource + ?Sized>(&self, phase: Phase, runs: u32, draws: &mut D) -> u32 {
        let t = self.tuning;
        match phase {
            Phase::Death => {
                let chance = t.aggression_death * DEATH_BOOST_SCALE * t.death_overs_multiplier;
                let roll = draws.next_unit();
                if roll < chance {
                    let six_share =
                        (DEATH_SIX_SHARE + (0.5 - t.boundary_size) * DEATH_SIX_SHARE).clamp(0.0, 1.0);
                    if roll < chance * six_share { 6 } else { 4 }
                } else {
                    runs
                }
            }
            Phase::Powerplay => {
                let chance =
                    t.aggression_powerplay * POWERPLAY_BOOST_SCALE * t.powerplay_multiplier;
                if draws.next_unit() < chance { 4 } else { runs }
            }
            Phase::Middle => runs,
        }
    }

    fn momentum_delta(&self, runs: u32, ctx: &DeliveryContext) -> f64 {
        let pressure = ctx.pressure.max(0.0);
        if runs > 0 {
            return f64::from(runs) * MOMENTUM_PER_RUN * (1.0 - pressure);
        }
        let settled = (f64::from(ctx.partnership_balls) / PARTNERSHIP_SETTLE_BALLS).min(1.0);
        let damping = 1.0 - (self.tuning.partnership_stability * settled).clamp(0.0, 1.0);
        -MOMENTUM_DOT_PRESSURE.mul_add(pressure, MOMENTUM_DOT_BASE) * damping
    }

    fn pick_extra(&self, draw: f64) -> ExtraKind {
        let t = self.tuning;
        let bye_share = t.bye_leg_bye_frequency * EXTRA_BYE_WEIGHT_SHARE;
        let mut weights: WeightedKinds<ExtraKind> = SmallVec::new();
        weights.push((ExtraKind::Wide, t.wide_frequency));
        weights.push((ExtraKind::NoBall, t.no_ball_frequency));
        weights.push((ExtraKind::Bye, bye_share));
        weights.push((ExtraKind::LegBye, bye_share));
        pick_weighted(&weights, draw).unwrap_or(ExtraKind::Wide)
    }

    fn pick_dismissal(&self, kind: BowlingKind, fielding: FieldingUnit, draw: f64) -> DismissalKind {
        let t = self.tuning;
        let pace = kind == BowlingKind::Pace;
        let mut weights: WeightedKinds<DismissalKind> = SmallVec::new();

        let mut caught = CAUGHT_BASE_WEIGHT + t.top_edge_probability * EDGE_WEIGHT_SCALE;
        if pace {
            caught += t.edge_to_slip_probability * EDGE_WEIGHT_SCALE;
            caught += t.bouncer_success_rate * BOUNCER_CAUGHT_WEIGHT;
        }
        weights.push((DismissalKind::Caught, caught));
        if pace {
            weights.push((DismissalKind::Bowled, t.yorker_success_rate * BOWLED_WEIGHT));
        } else {
            weights.push((DismissalKind::Stumped, fielding.keeping.clamp(0.0, 1.0) * STUMPED_WEIGHT));
        }
        let effectiveness = if pace {
            t.seam_effectiveness
        } else {
            t.spin_effectiveness
        };
        weights.push((
            DismissalKind::Lbw,
            LBW_EFFECTIVENESS_WEIGHT.mul_add(effectiveness, LBW_BASE_WEIGHT),
        ));
        weights.push((DismissalKind::RunOut, t.run_out_success * RUN_OUT_WEIGHT));

        pick_weighted(&weights, draw).unwrap_or(DismissalKind::Caught)
    }
}

/// Walk cumulative weights; `None` when nothing carries weight.
fn pick_weighted<K: Copy>(weights: &[(K, f64)], draw: f64) -> Option<K> {
    let total: f64 = weights.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= f64::EPSILON || !total.is_finite() {
        return None;
    }
    let target = draw.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    for (kind, weight) in weights {
        cumulative += weight.max(0.0);
        if target < cumulative {
            return Some(*kind);
        }
    }
    weights
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::ReplayDraws;
    use crate::player::{BowlingStyle, Handedness, PlayerRole};

    fn batter() -> PlayerCompetency {
        let mut p = PlayerCompetency::new("Striker", PlayerRole::Batter);
        p.batting_vs_pace = 80;
        p.batting_vs_spin = 70;
        p
    }

    fn pacer() -> PlayerCompetency {
        let mut p = PlayerCompetency::new("Quick", PlayerRole::Bowler);
        p.bowling_style = Some(BowlingStyle::Fast);
        p.bowling_pace = 85;
        p.bowling_spin = 20;
        p
    }

    fn spinner() -> PlayerCompetency {
        let mut p = PlayerCompetency::new("Twirler", PlayerRole::Bowler);
        p.bowling_style = Some(BowlingStyle::SpinLeg);
        p.bowling_pace = 20;
        p.bowling_spin = 85;
        p
    }

    #[test]
    fn thresholds_hold_ordering_under_extreme_boost() {
        let tuning = TuningProfile::default();
        for boost in [-5.0, -0.5, 0.0, 0.3, 0.9, 5.0, f64::NAN] {
            let t = ScoringThresholds::shifted(&tuning, boost);
            assert!(t.single >= SINGLE_FLOOR && t.single <= SINGLE_CEILING);
            assert!(t.two >= t.single + TWO_GAP - 1e-12);
            assert!(t.four >= t.two + FOUR_GAP - 1e-12);
            assert!(t.six >= t.four + SIX_GAP - 1e-12);
            assert!(t.six < 1.0);
        }
    }

    #[test]
    fn runs_follow_cut_points() {
        let t = ScoringThresholds {
            six: 0.95,
            four: 0.85,
            two: 0.7,
            single: 0.5,
        };
        assert_eq!(t.runs_for(0.99), 6);
        assert_eq!(t.runs_for(0.9), 4);
        assert_eq!(t.runs_for(0.75), 2);
        assert_eq!(t.runs_for(0.6), 1);
        assert_eq!(t.runs_for(0.5), 0);
    }

    #[test]
    fn low_roll_is_an_extra_worth_one_run() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let mut draws = ReplayDraws::new(vec![0.0, 0.0]);
        let res = model.resolve(&batter(), &pacer(), &DeliveryContext::default(), &mut draws);
        assert_eq!(res.extra, Some(ExtraKind::Wide));
        assert_eq!(res.runs, 1);
        assert!(res.dismissal.is_none());
    }

    #[test]
    fn suppressed_extras_fall_through_to_wicket_band() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let ctx = DeliveryContext {
            suppress_extras: true,
            ..DeliveryContext::default()
        };
        let mut draws = ReplayDraws::new(vec![0.0, 0.0]);
        let res = model.resolve(&batter(), &pacer(), &ctx, &mut draws);
        assert!(res.extra.is_none());
        assert_eq!(res.dismissal, Some(DismissalKind::Caught));
        assert!((res.momentum_delta - MOMENTUM_WICKET).abs() < f64::EPSILON);
    }

    #[test]
    fn stumping_only_against_spin() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let fielding = FieldingUnit {
            fielding: 0.7,
            keeping: 1.0,
        };
        for step in 0..100 {
            let draw = f64::from(step) / 100.0;
            assert_ne!(
                model.pick_dismissal(BowlingKind::Pace, fielding, draw),
                DismissalKind::Stumped
            );
            assert_ne!(
                model.pick_dismissal(BowlingKind::Spin, fielding, draw),
                DismissalKind::Bowled
            );
        }
        let kinds: Vec<DismissalKind> = (0..100)
            .map(|step| model.pick_dismissal(BowlingKind::Spin, fielding, f64::from(step) / 100.0))
            .collect();
        assert!(kinds.contains(&DismissalKind::Stumped));
    }

    #[test]
    fn zero_weight_extras_default_to_wide() {
        let tuning = TuningProfile {
            wide_frequency: 0.0,
            no_ball_frequency: 0.0,
            bye_leg_bye_frequency: 0.0,
            ..TuningProfile::default()
        };
        let model = DeliveryModel::new(&tuning);
        assert_eq!(model.pick_extra(0.7), ExtraKind::Wide);
    }

    #[test]
    fn better_bowling_raises_wicket_band() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let ctx = DeliveryContext::default();
        let mut weak = pacer();
        weak.bowling_pace = 20;
        let strong = model.bands(&batter(), &pacer(), &ctx);
        let soft = model.bands(&batter(), &weak, &ctx);
        assert!(strong.wicket > soft.wicket);
        assert!(strong.extra < soft.extra);
    }

    #[test]
    fn left_hander_gets_pace_bonus_only_against_pace() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let ctx = DeliveryContext::default();
        let right = batter();
        let mut left = batter();
        left.handedness = Handedness::LeftHand;
        let vs_pace = model.bands(&left, &pacer(), &ctx).scoring_boost
            - model.bands(&right, &pacer(), &ctx).scoring_boost;
        let vs_spin = model.bands(&left, &spinner(), &ctx).scoring_boost
            - model.bands(&right, &spinner(), &ctx).scoring_boost;
        assert!((vs_pace - tuning.left_handed_pace_bonus).abs() < 1e-12);
        assert!(vs_spin.abs() < 1e-12);
    }

    #[test]
    fn pressure_and_momentum_shift_the_bands() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let calm = DeliveryContext::default();
        let tense = DeliveryContext {
            pressure: 0.5,
            momentum: -1.0,
            ..calm
        };
        let calm_bands = model.bands(&batter(), &pacer(), &calm);
        let tense_bands = model.bands(&batter(), &pacer(), &tense);
        assert!(tense_bands.wicket > calm_bands.wicket);
        assert!(tense_bands.scoring_boost < calm_bands.scoring_boost);
    }

    #[test]
    fn dot_ball_momentum_is_softened_by_settled_partnership() {
        let tuning = TuningProfile {
            partnership_stability: 0.5,
            ..TuningProfile::default()
        };
        let model = DeliveryModel::new(&tuning);
        let fresh = DeliveryContext::default();
        let settled = DeliveryContext {
            partnership_balls: 40,
            ..fresh
        };
        let fresh_delta = model.momentum_delta(0, &fresh);
        let settled_delta = model.momentum_delta(0, &settled);
        assert!(fresh_delta < 0.0);
        assert!(settled_delta > fresh_delta);
        assert!(model.momentum_delta(4, &fresh) > model.momentum_delta(1, &fresh));
    }

    #[test]
    fn death_boost_turns_dots_into_boundaries() {
        let tuning = TuningProfile::default();
        let model = DeliveryModel::new(&tuning);
        let ctx = DeliveryContext {
            phase: Phase::Death,
            suppress_extras: true,
            ..DeliveryContext::default()
        };
        // Scoring band, dot-ball draw, then a boost roll well inside the chance.
        let mut draws = ReplayDraws::new(vec![0.99, 0.0, 0.001]);
        let res = model.resolve(&batter(), &pacer(), &ctx, &mut draws);
        assert_eq!(res.runs, 6);
    }

    #[test]
    fn slow_outfield_can_stretch_two_into_three() {
        let tuning = TuningProfile {
            outfield_speed: 0.2,
            ..TuningProfile::default()
        };
        let model = DeliveryModel::new(&tuning);
        let ctx = DeliveryContext {
            suppress_extras: true,
            ..DeliveryContext::default()
        };
        let bands = model.bands(&batter(), &pacer(), &ctx);
        let two_draw = (bands.thresholds.two + bands.thresholds.four) / 2.0;
        let mut draws = ReplayDraws::new(vec![0.99, two_draw, 0.0]);
        let res = model.resolve(&batter(), &pacer(), &ctx, &mut draws);
        assert_eq!(res.runs, 3);
    }
}
