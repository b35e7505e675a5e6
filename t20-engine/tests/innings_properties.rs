use std::hash::Hasher;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use t20_engine::{
    InningsEnd, InningsResult, InningsSetup, MatchEngine, PlayerCompetency, ReplayDraws,
    TuningPreset, ball_rows, batting_order, bowling_attack, generate_squad, select_playing_xi,
};
use twox_hash::XxHash64;

const SEEDS: u64 = 64;

fn xi(seed: u64) -> Vec<PlayerCompetency> {
    let squad = generate_squad(&mut ChaCha20Rng::seed_from_u64(seed), 15);
    select_playing_xi(&squad).unwrap()
}

fn log_digest(result: &InningsResult) -> u64 {
    let bytes = serde_json::to_vec(&result.deliveries).unwrap();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&bytes);
    hasher.finish()
}

fn assert_invariants(result: &InningsResult, max_overs: u16, target: Option<u32>) {
    assert!(result.total_overs <= f64::from(max_overs));
    assert!(result.total_wickets <= 10);
    assert!(result.deliveries.len() >= result.legal_balls as usize);
    assert_eq!(
        result.legal_balls as usize,
        result.deliveries.iter().filter(|d| d.is_legal()).count()
    );
    assert_eq!(
        result.total_runs,
        result.deliveries.iter().map(|d| d.runs).sum::<u32>()
    );
    for row in ball_rows(1, &result.deliveries) {
        assert!((1..=6).contains(&row.ball_number), "ball {}", row.ball_number);
        assert!(row.over_number >= 1 && row.over_number <= max_overs);
    }
    if let Some(tenth) = result.fall_of_wickets.iter().find(|f| f.wicket == 10) {
        assert_eq!(tenth.legal_balls, result.legal_balls);
        assert!(result.deliveries.last().is_some_and(|d| d.is_wicket()));
    }
    match result.end {
        InningsEnd::TargetReached => {
            let target = target.unwrap();
            assert!(result.total_runs >= target);
            let before_last = result.total_runs - result.deliveries.last().unwrap().runs;
            assert!(before_last < target, "innings ran past the target");
        }
        InningsEnd::AllOut => assert_eq!(result.total_wickets, 10),
        InningsEnd::OversComplete => {
            assert_eq!(result.legal_balls, u32::from(max_overs) * 6);
        }
    }
}

#[test]
fn seeded_innings_hold_invariants() {
    let engine = MatchEngine::default();
    for seed in 0..SEEDS {
        let batting = batting_order(&xi(seed));
        let bowling = bowling_attack(&xi(seed + 1000));
        for max_overs in [1_u16, 5, 20] {
            let setup = InningsSetup::new(&batting, &bowling).with_max_overs(max_overs);
            let first = engine
                .simulate_innings(&setup, &mut ChaCha20Rng::seed_from_u64(seed))
                .unwrap();
            assert_invariants(&first, max_overs, None);

            let target = first.total_runs + 1;
            let chase = engine
                .simulate_innings(&setup.with_target(target), &mut ChaCha20Rng::seed_from_u64(seed + 1))
                .unwrap();
            assert_invariants(&chase, max_overs, Some(target));
        }
    }
}

#[test]
fn same_seed_gives_identical_logs() {
    let profile = TuningPreset::find("batting_paradise").unwrap().profile();
    let engine = MatchEngine::new(profile);
    let batting = batting_order(&xi(1));
    let bowling = bowling_attack(&xi(2));
    let setup = InningsSetup::new(&batting, &bowling);

    let a = engine.simulate_innings(&setup, &mut ChaCha20Rng::seed_from_u64(77)).unwrap();
    let b = engine.simulate_innings(&setup, &mut ChaCha20Rng::seed_from_u64(77)).unwrap();
    let c = engine.simulate_innings(&setup, &mut ChaCha20Rng::seed_from_u64(78)).unwrap();
    assert_eq!(log_digest(&a), log_digest(&b));
    assert_ne!(log_digest(&a), log_digest(&c));
}

#[test]
fn same_replay_sequence_gives_identical_logs() {
    let engine = MatchEngine::default();
    let batting = batting_order(&xi(3));
    let bowling = bowling_attack(&xi(4));
    let setup = InningsSetup::new(&batting, &bowling).with_max_overs(4);
    let sequence = vec![0.91, 0.42, 0.77, 0.13, 0.66, 0.98, 0.35, 0.5, 0.07];

    let a = engine.simulate_innings(&setup, &mut ReplayDraws::new(sequence.clone())).unwrap();
    let b = engine.simulate_innings(&setup, &mut ReplayDraws::new(sequence)).unwrap();
    assert_eq!(a, b);
    assert_invariants(&a, 4, None);
}

#[test]
fn two_batter_lineup_ends_on_first_wicket() {
    let engine = MatchEngine::default();
    let batting: Vec<_> = xi(9).into_iter().take(2).collect();
    let bowling = bowling_attack(&xi(10));
    for seed in 0..SEEDS {
        let result = engine
            .simulate_innings(
                &InningsSetup::new(&batting, &bowling),
                &mut ChaCha20Rng::seed_from_u64(seed),
            )
            .unwrap();
        assert!(result.total_wickets <= 1);
        if result.total_wickets == 1 {
            assert_eq!(result.end, InningsEnd::AllOut);
            assert!(result.deliveries.last().unwrap().is_wicket());
        }
    }
}
