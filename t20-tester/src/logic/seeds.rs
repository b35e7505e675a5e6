use anyhow::{Result, bail};
use std::collections::HashSet;

/// Seed used when the CLI supplies none.
pub const DEFAULT_SEED: u64 = 1337;

/// Most seeds one invocation may resolve to, ranges included.
pub const MAX_SEEDS: u64 = 100_000;

/// Resolve a list of CLI seed arguments into distinct numeric seeds.
///
/// Accepts decimal integers (negative values use their magnitude), `0x` hex
/// literals, and `a..b` half-open ranges. Order of first appearance is kept.
/// Ranges that would push the total past [`MAX_SEEDS`] are rejected before
/// anything is expanded.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut pending: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (Some(start), Some(end)) = (parse_seed(start), parse_seed(end)) else {
                bail!("Unrecognized seed range: {token}");
            };
            if start >= end {
                bail!("Empty seed range: {token}");
            }
            let room = MAX_SEEDS.saturating_sub(u64::try_from(pending.len()).unwrap_or(u64::MAX));
            if end - start > room {
                bail!("Seed range {token} spans {} seeds; at most {MAX_SEEDS} are allowed", end - start);
            }
            pending.extend(start..end);
            continue;
        }

        if let Some(value) = parse_seed(token) {
            pending.push(value);
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut seen = HashSet::new();
    pending.retain(|seed| seen.insert(*seed));

    if pending.is_empty() {
        pending.push(DEFAULT_SEED);
    }

    Ok(pending)
}

fn parse_seed(token: &str) -> Option<u64> {
    let token = token.trim();
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok();
    }
    if let Ok(value) = token.parse::<i64>() {
        return Some(value.unsigned_abs());
    }
    token.parse::<u64>().ok()
}
