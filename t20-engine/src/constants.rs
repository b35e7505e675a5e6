//! Centralized balance constants for the match engine.
//!
//! The tuning profile covers everything an operator is expected to adjust.
//! The values here are structural: clamp bounds, momentum step sizes, and
//! phase geometry. Changing them changes what a given profile means, so they
//! live in code rather than in the preset data.

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_TUNING: &str = "t20_engine::tuning";
pub(crate) const LOG_TARGET_INNINGS: &str = "t20_engine::innings";
pub(crate) const LOG_TARGET_MATCH: &str = "t20_engine::match";

// Innings geometry ---------------------------------------------------------
pub const BALLS_PER_OVER: u32 = 6;
pub const DEFAULT_MAX_OVERS: u16 = 20;
pub const MAX_WICKETS: u8 = 10;
pub const MIN_BATTERS: usize = 2;
pub const MIN_BOWLERS: usize = 1;
pub const PLAYING_XI: usize = 11;
pub(crate) const POWERPLAY_MAX_OVERS: u16 = 6;
pub(crate) const POWERPLAY_SHARE: f64 = 0.3;
pub(crate) const DEATH_MAX_OVERS: u16 = 4;
pub(crate) const DEATH_SHARE: f64 = 0.2;
pub(crate) const MAX_CONSECUTIVE_EXTRAS: u8 = 6;

// Extras band --------------------------------------------------------------
pub(crate) const EXTRA_BYE_WEIGHT_SHARE: f64 = 0.5;
pub(crate) const EXTRA_BOWLING_RELIEF: f64 = 0.02;
pub(crate) const EXTRA_MIN: f64 = 0.01;
pub(crate) const EXTRA_MAX: f64 = 0.25;
pub(crate) const EXTRA_RUNS: u32 = 1;

// Wicket band --------------------------------------------------------------
pub(crate) const WICKET_MIN: f64 = 0.02;
pub(crate) const WICKET_MAX: f64 = 0.55;
pub(crate) const WICKET_MOMENTUM_WEIGHT: f64 = 0.4;
pub(crate) const DROP_CATCH_SCALE: f64 = 0.1;
pub(crate) const PITCH_BOUNCE_WEIGHT: f64 = 0.08;
pub(crate) const PITCH_TURN_WEIGHT: f64 = 0.08;
pub(crate) const HUMIDITY_SEAM_WEIGHT: f64 = 0.03;
pub(crate) const DEW_SEAM_WEIGHT: f64 = 0.02;
pub(crate) const DEW_SPIN_WEIGHT: f64 = 0.03;

// Dismissal weights --------------------------------------------------------
pub(crate) const CAUGHT_BASE_WEIGHT: f64 = 0.45;
pub(crate) const EDGE_WEIGHT_SCALE: f64 = 5.0;
pub(crate) const BOUNCER_CAUGHT_WEIGHT: f64 = 0.2;
pub(crate) const STUMPED_WEIGHT: f64 = 0.25;
pub(crate) const BOWLED_WEIGHT: f64 = 0.5;
pub(crate) const LBW_BASE_WEIGHT: f64 = 0.15;
pub(crate) const LBW_EFFECTIVENESS_WEIGHT: f64 = 0.1;
pub(crate) const RUN_OUT_WEIGHT: f64 = 0.2;

// Scoring band -------------------------------------------------------------
pub(crate) const AGGRESSION_WEIGHT: f64 = 0.12;
pub(crate) const BATTING_BOOST_WEIGHT: f64 = 0.15;
pub(crate) const BOWLING_DRAG_WEIGHT: f64 = 0.1;
pub(crate) const BOUNDARY_SIZE_WEIGHT: f64 = 0.1;
pub(crate) const OUTFIELD_SPEED_WEIGHT: f64 = 0.05;
pub(crate) const PHASE_WEIGHT: f64 = 0.12;
pub(crate) const PRESSURE_DRAG_WEIGHT: f64 = 0.1;
pub(crate) const SINGLE_FLOOR: f64 = 0.05;
pub(crate) const SINGLE_CEILING: f64 = 0.85;
pub(crate) const TWO_GAP: f64 = 0.05;
pub(crate) const TWO_CEILING: f64 = 0.9;
pub(crate) const FOUR_GAP: f64 = 0.04;
pub(crate) const FOUR_CEILING: f64 = 0.95;
pub(crate) const SIX_GAP: f64 = 0.02;
pub(crate) const SIX_CEILING: f64 = 0.99;
pub(crate) const THREE_RUN_BASE: f64 = 0.08;
pub(crate) const THREE_RUN_GROUND_WEIGHT: f64 = 0.06;
pub(crate) const DEATH_BOOST_SCALE: f64 = 0.08;
pub(crate) const DEATH_SIX_SHARE: f64 = 0.4;
pub(crate) const POWERPLAY_BOOST_SCALE: f64 = 0.05;

// Momentum -----------------------------------------------------------------
pub(crate) const MOMENTUM_DECAY: f64 = 0.92;
pub(crate) const MOMENTUM_PER_RUN: f64 = 0.02;
pub(crate) const MOMENTUM_DOT_BASE: f64 = 0.03;
pub(crate) const MOMENTUM_DOT_PRESSURE: f64 = 0.05;
pub(crate) const MOMENTUM_WICKET: f64 = -0.25;
pub(crate) const MOMENTUM_EXTRA: f64 = 0.01;
pub(crate) const PARTNERSHIP_SETTLE_BALLS: f64 = 24.0;

// Chase pressure -----------------------------------------------------------
pub(crate) const PRESSURE_MIN: f64 = -0.2;
pub(crate) const PRESSURE_MAX: f64 = 0.5;
pub(crate) const PRESSURE_RELIEF_SHARE: f64 = 0.25;

// Match reporting ----------------------------------------------------------
pub(crate) const PLAYER_OF_MATCH_WICKET_VALUE: u32 = 25;
