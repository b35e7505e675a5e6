//! Seeded squad generation for previews and QA runs.
use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::player::{BowlingKind, BowlingStyle, Handedness, PlayerCompetency, PlayerRole};

const FIRST_NAMES: &[&str] = &[
    "Arjun", "Dev", "Ishan", "Rohan", "Karan", "Yash", "Sameer", "Rahul", "Vikram", "Nikhil",
    "Aarav", "Manav", "Kabir", "Harsh", "Varun", "Siddharth", "Aditya", "Pranav", "Kunal", "Shrey",
    "Vivek", "Parth", "Tanish", "Irfan", "Farhan", "Jaspreet", "Navdeep", "Abhinav", "Samar",
    "Rehan",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Patel", "Singh", "Khan", "Gupta", "Reddy", "Iyer", "Menon", "Kulkarni",
    "Chawla", "Nair", "Doshi", "Gill", "Yadav", "Pandey", "Mishra", "Bose", "Roy", "Naidu",
    "Ganguly", "Saxena", "Sethi", "Tripathi", "Deshpande", "Rawat", "Thakur", "Bisht", "Talwar",
    "Sodhi",
];

const BOWLING_STYLES: [BowlingStyle; 4] = [
    BowlingStyle::Fast,
    BowlingStyle::Medium,
    BowlingStyle::SpinOff,
    BowlingStyle::SpinLeg,
];

/// Players per role in a default squad.
pub const DEFAULT_ROLE_MIX: [(PlayerRole, usize); 4] = [
    (PlayerRole::Batter, 5),
    (PlayerRole::Bowler, 5),
    (PlayerRole::AllRounder, 3),
    (PlayerRole::WicketKeeper, 2),
];

pub const DEFAULT_SQUAD_SIZE: usize = 15;

/// Role counts for a squad of `size`; larger squads grow round-robin.
///
/// Sizes below the default keep the default mix.
#[must_use]
pub fn role_mix(size: usize) -> [(PlayerRole, usize); 4] {
    let mut mix = DEFAULT_ROLE_MIX;
    let mut current = DEFAULT_SQUAD_SIZE;
    while current < size {
        mix[current % mix.len()].1 += 1;
        current += 1;
    }
    mix
}

/// Generate a squad with the role mix for `size`. Names are unique within the squad.
pub fn generate_squad<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<PlayerCompetency> {
    let mut players: Vec<_> = role_mix(size)
        .into_iter()
        .flat_map(|(role, count)| std::iter::repeat_n(role, count))
        .map(|role| generate_player(rng, role))
        .collect();
    disambiguate_names(&mut players, std::iter::empty());
    players
}

/// Suffix repeated names (`Dev Patel 2`) so no two players share a name and
/// none collides with `taken`. The first holder of a name keeps it.
pub fn disambiguate_names<I>(players: &mut [PlayerCompetency], taken: I)
where
    I: IntoIterator<Item = String>,
{
    let mut used: HashSet<String> = taken.into_iter().collect();
    for player in players {
        if used.insert(player.name.clone()) {
            continue;
        }
        let mut suffix = 2_u32;
        let unique = loop {
            let candidate = format!("{} {suffix}", player.name);
            if !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(unique.clone());
        player.name = unique;
    }
}

/// Generate one player with role-appropriate skills.
pub fn generate_player<R: Rng + ?Sized>(rng: &mut R, role: PlayerRole) -> PlayerCompetency {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Player");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("One");
    let handedness = if rng.gen_bool(0.5) {
        Handedness::RightHand
    } else {
        Handedness::LeftHand
    };
    let bowling_style = match role {
        PlayerRole::Bowler | PlayerRole::AllRounder => BOWLING_STYLES.choose(rng).copied(),
        PlayerRole::Batter | PlayerRole::WicketKeeper => None,
    };

    let (batting_vs_pace, batting_vs_spin) = match role {
        PlayerRole::Batter | PlayerRole::WicketKeeper => {
            (rng.gen_range(64..=94), rng.gen_range(60..=92))
        }
        PlayerRole::AllRounder => (rng.gen_range(58..=88), rng.gen_range(55..=86)),
        PlayerRole::Bowler => (rng.gen_range(22..=48), rng.gen_range(20..=45)),
    };

    let mut bowling_pace = rng.gen_range(4..=18);
    let mut bowling_spin = rng.gen_range(4..=18);
    let all_rounder = role == PlayerRole::AllRounder;
    match bowling_style.map(BowlingStyle::kind) {
        Some(BowlingKind::Pace) => {
            bowling_pace = rng.gen_range(70..=96);
            bowling_spin = if all_rounder {
                rng.gen_range(38..=66)
            } else {
                rng.gen_range(10..=32)
            };
        }
        Some(BowlingKind::Spin) => {
            bowling_spin = rng.gen_range(68..=94);
            bowling_pace = if all_rounder {
                rng.gen_range(42..=70)
            } else {
                rng.gen_range(10..=32)
            };
        }
        None => {}
    }

    let fielding = match role {
        PlayerRole::Bowler => rng.gen_range(48..=82),
        PlayerRole::AllRounder => rng.gen_range(55..=88),
        PlayerRole::Batter | PlayerRole::WicketKeeper => rng.gen_range(52..=92),
    };
    let keeping = if role == PlayerRole::WicketKeeper {
        rng.gen_range(75..=96)
    } else {
        0
    };

    PlayerCompetency {
        name: format!("{first} {last}"),
        role,
        handedness,
        bowling_style,
        batting_vs_pace,
        batting_vs_spin,
        bowling_pace,
        bowling_spin,
        fielding,
        keeping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn default_squad_follows_role_mix() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let squad = generate_squad(&mut rng, DEFAULT_SQUAD_SIZE);
        assert_eq!(squad.len(), 15);
        let count = |role| squad.iter().filter(|p| p.role == role).count();
        assert_eq!(count(PlayerRole::Batter), 5);
        assert_eq!(count(PlayerRole::Bowler), 5);
        assert_eq!(count(PlayerRole::AllRounder), 3);
        assert_eq!(count(PlayerRole::WicketKeeper), 2);
    }

    #[test]
    fn larger_squads_grow_round_robin() {
        let mix = role_mix(18);
        assert_eq!(mix[0].1 + mix[1].1 + mix[2].1 + mix[3].1, 18);
        assert_eq!(mix[3].1, 3);
        assert_eq!(mix[0].1, 6);
        assert_eq!(role_mix(11), DEFAULT_ROLE_MIX);
    }

    #[test]
    fn skills_respect_role_ranges() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..50 {
            let keeper = generate_player(&mut rng, PlayerRole::WicketKeeper);
            assert!((75..=96).contains(&keeper.keeping));
            assert!(keeper.bowling_style.is_none());

            let bowler = generate_player(&mut rng, PlayerRole::Bowler);
            assert!(bowler.bowling_style.is_some());
            assert!(bowler.bowling_unit() >= 0.68);
            assert!(bowler.batting_vs_pace <= 48);
            assert_eq!(bowler.keeping, 0);
        }
    }

    #[test]
    fn squad_names_are_unique() {
        for seed in 0..200 {
            let squad = generate_squad(&mut ChaCha20Rng::seed_from_u64(seed), 30);
            let names: HashSet<&str> = squad.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names.len(), squad.len(), "seed {seed}");
        }
    }

    #[test]
    fn clashing_names_get_suffixes() {
        let mut players = vec![
            PlayerCompetency::new("Dev Patel", PlayerRole::Batter),
            PlayerCompetency::new("Dev Patel", PlayerRole::Bowler),
            PlayerCompetency::new("Dev Patel 2", PlayerRole::AllRounder),
            PlayerCompetency::new("Ravi Iyer", PlayerRole::WicketKeeper),
        ];
        disambiguate_names(&mut players, ["Ravi Iyer".to_string()]);
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Dev Patel", "Dev Patel 2", "Dev Patel 2 2", "Ravi Iyer 2"]);
    }

    #[test]
    fn same_seed_same_squad() {
        let a = generate_squad(&mut ChaCha20Rng::seed_from_u64(3), 15);
        let b = generate_squad(&mut ChaCha20Rng::seed_from_u64(3), 15);
        assert_eq!(a, b);
    }
}
