pub mod match_tester;
pub mod reports;
pub mod seeds;
pub mod summary;
pub mod tester;

pub use match_tester::{DEFAULT_MAX_OVERS, MatchPlan, MatchSummary, MatchTester, report_digest};
pub use seeds::resolve_seed_inputs;
pub use summary::{MatchAggregate, MatchRecord, aggregate_matches, collect_match_records};
pub use tester::*;
