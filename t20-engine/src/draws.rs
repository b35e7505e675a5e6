//! Injectable random-draw sources.
//!
//! The engine never touches a global generator. Every uniform draw comes
//! through [`DrawSource`], which is implemented for any `rand::RngCore` and
//! for [`ReplayDraws`], a fixed sequence used to pin exact outcomes in tests.
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Source of uniform draws in `[0, 1)`.
pub trait DrawSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> DrawSource for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a hand-written sequence cannot push
/// the model outside its bands. An empty sequence yields `0.0` forever.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayDraws {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplayDraws {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws served so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl DrawSource for ReplayDraws {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor = self.cursor.saturating_add(1);
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.saturating_add(1);
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Independent, domain-separated streams for one match.
///
/// Splitting the toss from each innings keeps the second innings stable when
/// only the first innings' draw count changes (for example after a tuning
/// edit that adds an extra).
#[derive(Debug, Clone)]
pub struct MatchStreams {
    pub toss: CountingRng<ChaCha20Rng>,
    pub first_innings: CountingRng<ChaCha20Rng>,
    pub second_innings: CountingRng<ChaCha20Rng>,
    pub squads: CountingRng<ChaCha20Rng>,
}

impl MatchStreams {
    /// Construct the streams from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            toss: CountingRng::from_seed_u64(derive_stream_seed(seed, b"toss")),
            first_innings: CountingRng::from_seed_u64(derive_stream_seed(seed, b"first-innings")),
            second_innings: CountingRng::from_seed_u64(derive_stream_seed(seed, b"second-innings")),
            squads: CountingRng::from_seed_u64(derive_stream_seed(seed, b"squads")),
        }
    }

    /// Total draws across every stream.
    #[must_use]
    pub const fn total_draws(&self) -> u64 {
        self.toss
            .draws()
            .saturating_add(self.first_innings.draws())
            .saturating_add(self.second_innings.draws())
            .saturating_add(self.squads.draws())
    }
}

/// Derive a per-stream seed from a user seed and a domain tag.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        // HMAC accepts keys of any length.
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
