//! T20 Match Engine
//!
//! Ball-by-ball probabilistic simulation of limited-overs cricket. Given two
//! ordered line-ups, a tuning profile, and an injected draw source, the
//! engine produces complete innings and decides the match. It performs no
//! I/O and holds no global randomness, so a fixed seed reproduces the same
//! ball log.

pub mod constants;
pub mod delivery;
pub mod draws;
pub mod generator;
pub mod innings;
pub mod match_sim;
pub mod numbers;
pub mod outcome;
pub mod player;
pub mod scorecard;
pub mod squad;
pub mod tuning;

// Re-export commonly used types
pub use delivery::{
    DeliveryContext, DeliveryModel, DeliveryOutcome, DismissalKind, ExtraKind, Phase,
    ProbabilityBands, ScoringThresholds,
};
pub use draws::{CountingRng, DrawSource, MatchStreams, ReplayDraws, derive_stream_seed};
pub use generator::{disambiguate_names, generate_player, generate_squad};
pub use innings::{
    EngineError, FallOfWicket, InningsEnd, InningsResult, InningsSetup, MatchEngine,
    chase_pressure, phase_for_over,
};
pub use match_sim::{MatchError, MatchReport, TeamInnings, Toss, TossDecision};
pub use outcome::{MarginUnit, MatchOutcome, Winner, decide, decide_totals};
pub use player::{
    BowlingKind, BowlingStyle, FieldingUnit, Handedness, PlayerCompetency, PlayerRole,
};
pub use scorecard::{BallRow, PlayerTally, ball_rows, batting_runs, bowling_wickets, extras_total};
pub use squad::{
    RatingTier, Squad, SquadError, TEAM_RATING_MAX, batting_order, batting_rating, bowling_attack,
    bowling_rating, select_playing_xi, team_rating,
};
pub use tuning::{
    FallbackReason, FieldFallback, NormalizationReport, TuningField, TuningPreset, TuningProfile,
};
