use anyhow::{Context, Result};
use std::hash::Hasher;
use std::sync::Arc;
use t20_engine::{MatchEngine, MatchReport, MatchStreams};
use twox_hash::XxHash64;

/// Over limit used when a plan does not pin one.
pub const DEFAULT_MAX_OVERS: u16 = 20;

/// What to play for one scenario iteration and how to judge it.
#[derive(Debug, Clone)]
pub struct MatchPlan {
    pub max_overs: Option<u16>,
    pub expectations: Vec<MatchExpectation>,
}

impl MatchPlan {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_overs: None,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_max_overs(mut self, max_overs: u16) -> Self {
        self.max_overs = Some(max_overs);
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<MatchExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

impl Default for MatchPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Assertion hook run after a preview match completes.
type MatchExpectationFn = Arc<dyn Fn(&MatchSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct MatchExpectation(MatchExpectationFn);

impl std::fmt::Debug for MatchExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchExpectation").finish()
    }
}

impl MatchExpectation {
    pub fn evaluate(&self, summary: &MatchSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for MatchExpectation
where
    F: Fn(&MatchSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Complete record of one preview match.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub seed: u64,
    pub max_overs: u16,
    pub report: MatchReport,
    /// Draws consumed across every stream.
    pub draws: u64,
    /// Digest of the serialized report.
    pub digest: u64,
    /// Engine that produced the report, for expectations that replay it.
    pub engine: MatchEngine,
}

/// Runs seeded preview matches against one engine configuration.
#[derive(Debug, Clone)]
pub struct MatchTester {
    engine: MatchEngine,
    max_overs: u16,
    verbose: bool,
}

impl MatchTester {
    #[must_use]
    pub const fn new(engine: MatchEngine, max_overs: u16, verbose: bool) -> Self {
        Self {
            engine,
            max_overs,
            verbose,
        }
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Over limit for a plan, falling back to the tester default.
    #[must_use]
    pub fn overs_for(&self, plan: &MatchPlan) -> u16 {
        plan.max_overs.unwrap_or(self.max_overs)
    }

    /// Play one preview match for `seed`.
    ///
    /// # Errors
    ///
    /// Fails when the engine rejects the match setup.
    pub fn run_plan(&self, plan: &MatchPlan, seed: u64) -> Result<MatchSummary> {
        let max_overs = self.overs_for(plan);
        let mut streams = MatchStreams::from_user_seed(seed);
        let report = self
            .engine
            .preview_with_streams(&mut streams, max_overs)
            .with_context(|| format!("preview failed for seed {seed}"))?;
        let digest = report_digest(&report)?;
        log::debug!(
            "seed {seed}: {} ({} draws, digest {digest:016x})",
            report.result,
            streams.total_draws()
        );
        Ok(MatchSummary {
            seed,
            max_overs,
            report,
            draws: streams.total_draws(),
            digest,
            engine: self.engine.clone(),
        })
    }
}

/// Stable digest of a report's serialized form.
///
/// # Errors
///
/// Fails only if the report cannot be serialized.
pub fn report_digest(report: &MatchReport) -> Result<u64> {
    let bytes = serde_json::to_vec(report).context("serializing match report")?;
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&bytes);
    Ok(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_overs_fall_back_to_tester_default() {
        let tester = MatchTester::new(MatchEngine::default(), 12, false);
        assert_eq!(tester.overs_for(&MatchPlan::new()), 12);
        assert_eq!(tester.overs_for(&MatchPlan::new().with_max_overs(5)), 5);
    }

    #[test]
    fn run_plan_is_reproducible() {
        let tester = MatchTester::new(MatchEngine::default(), 5, false);
        let plan = MatchPlan::new();
        let a = tester.run_plan(&plan, 99).unwrap();
        let b = tester.run_plan(&plan, 99).unwrap();
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.draws, b.draws);
        assert_eq!(a.report, b.report);
        assert!(a.report.first_innings.result.legal_balls <= 30);
    }

    #[test]
    fn zero_overs_is_an_error() {
        let tester = MatchTester::new(MatchEngine::default(), 0, false);
        let err = tester.run_plan(&MatchPlan::new(), 1).unwrap_err();
        assert!(format!("{err:#}").contains("seed 1"));
    }

    #[test]
    fn expectations_see_the_summary() {
        let plan = MatchPlan::new().with_expectation(|summary: &MatchSummary| {
            anyhow::ensure!(summary.seed == 7, "wrong seed");
            Ok(())
        });
        let tester = MatchTester::new(MatchEngine::default(), 2, false);
        let summary = tester.run_plan(&plan, 7).unwrap();
        assert!(plan.expectations.iter().all(|e| e.evaluate(&summary).is_ok()));
    }
}
