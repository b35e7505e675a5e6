//! Squad ratings, playing XI selection, and batting/bowling orders.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::PLAYING_XI;
use crate::numbers::{round_f64_to_u8, round_to_tenth, usize_to_f64};
use crate::player::{BowlingKind, PlayerCompetency};

const TEAM_RATING_TOP: usize = 5;
const STYLE_PRIMARY_WEIGHT: f64 = 0.7;
const STYLE_SECONDARY_WEIGHT: f64 = 0.3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquadError {
    #[error("squad {squad} has {found} players; a playing XI needs eleven")]
    NotEnoughPlayers { squad: String, found: usize },
}

/// Named roster of candidates for a playing XI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    pub name: String,
    pub players: Vec<PlayerCompetency>,
}

impl Squad {
    #[must_use]
    pub fn new(name: impl Into<String>, players: Vec<PlayerCompetency>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    /// Select this squad's XI.
    ///
    /// # Errors
    ///
    /// Returns [`SquadError::NotEnoughPlayers`] when fewer than eleven players
    /// are available.
    pub fn playing_xi(&self) -> Result<Vec<PlayerCompetency>, SquadError> {
        select_playing_xi(&self.players).map_err(|SquadError::NotEnoughPlayers { found, .. }| {
            SquadError::NotEnoughPlayers {
                squad: self.name.clone(),
                found,
            }
        })
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        team_rating(&self.players)
    }

    #[must_use]
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_team_rating(self.rating())
    }
}

/// Mean of the two batting splits, rounded.
#[must_use]
pub fn batting_rating(player: &PlayerCompetency) -> u8 {
    let pace = f64::from(player.batting_vs_pace);
    let spin = f64::from(player.batting_vs_spin);
    round_f64_to_u8(f64::midpoint(pace, spin))
}

/// Bowling rating weighted toward the player's own style.
#[must_use]
pub fn bowling_rating(player: &PlayerCompetency) -> u8 {
    let pace = f64::from(player.bowling_pace);
    let spin = f64::from(player.bowling_spin);
    let rating = match player.bowling_style.map(|style| style.kind()) {
        None => f64::midpoint(pace, spin),
        Some(BowlingKind::Pace) => pace.mul_add(STYLE_PRIMARY_WEIGHT, spin * STYLE_SECONDARY_WEIGHT),
        Some(BowlingKind::Spin) => spin.mul_add(STYLE_PRIMARY_WEIGHT, pace * STYLE_SECONDARY_WEIGHT),
    };
    round_f64_to_u8(rating)
}

fn selection_score(player: &PlayerCompetency) -> u16 {
    u16::from(batting_rating(player)) + u16::from(bowling_rating(player))
}

/// Best eleven by combined rating. When no wicket-keeper makes the cut the
/// best available keeper replaces the eleventh pick.
///
/// # Errors
///
/// Returns [`SquadError::NotEnoughPlayers`] for fewer than eleven players.
pub fn select_playing_xi(players: &[PlayerCompetency]) -> Result<Vec<PlayerCompetency>, SquadError> {
    if players.len() < PLAYING_XI {
        return Err(SquadError::NotEnoughPlayers {
            squad: String::new(),
            found: players.len(),
        });
    }

    let mut ranked: Vec<&PlayerCompetency> = players.iter().collect();
    ranked.sort_by(|a, b| selection_score(b).cmp(&selection_score(a)));

    let mut selected: Vec<PlayerCompetency> =
        ranked.iter().take(PLAYING_XI).map(|p| (*p).clone()).collect();
    if !selected.iter().any(PlayerCompetency::is_keeper)
        && let Some(keeper) = ranked.iter().find(|p| p.is_keeper())
        && let Some(last) = selected.last_mut()
    {
        *last = (*keeper).clone();
    }
    Ok(selected)
}

/// Batting order: best batting rating first, ties keep input order.
#[must_use]
pub fn batting_order(players: &[PlayerCompetency]) -> Vec<PlayerCompetency> {
    let mut order = players.to_vec();
    order.sort_by(|a, b| batting_rating(b).cmp(&batting_rating(a)));
    order
}

/// Bowling attack: best bowling rating first, ties keep input order.
#[must_use]
pub fn bowling_attack(players: &[PlayerCompetency]) -> Vec<PlayerCompetency> {
    let mut order = players.to_vec();
    order.sort_by(|a, b| bowling_rating(b).cmp(&bowling_rating(a)));
    order
}

fn mean_of_top(mut values: Vec<f64>, count: usize) -> f64 {
    if values.is_empty() || count == 0 {
        return 0.0;
    }
    values.sort_by(|a, b| b.total_cmp(a));
    values.truncate(count);
    values.iter().sum::<f64>() / usize_to_f64(values.len())
}

/// Ceiling of [`team_rating`]: three full-skill components over eleven players.
pub const TEAM_RATING_MAX: f64 = 300.0 / 11.0;

/// Squad strength on a 0 to [`TEAM_RATING_MAX`] scale (about 27.3).
///
/// This is not the 0-100 skill scale; use [`RatingTier::from_team_rating`]
/// to bucket it.
#[must_use]
pub fn team_rating(players: &[PlayerCompetency]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let batting: Vec<f64> = players
        .iter()
        .map(|p| f64::midpoint(f64::from(p.batting_vs_pace), f64::from(p.batting_vs_spin)))
        .collect();
    let bowling: Vec<f64> = players
        .iter()
        .map(|p| f64::from(p.bowling_pace.max(p.bowling_spin)))
        .collect();
    let keeper = players.iter().find(|p| p.is_keeper()).map_or_else(
        || f64::from(players.iter().map(|p| p.keeping).max().unwrap_or(0)),
        |p| f64::from(p.keeping),
    );

    let rating = (mean_of_top(batting, TEAM_RATING_TOP) + mean_of_top(bowling, TEAM_RATING_TOP) + keeper)
        / usize_to_f64(PLAYING_XI);
    round_to_tenth(rating)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    Elite,
    Strong,
    Average,
    Weak,
}

impl RatingTier {
    /// Tier for a value on the 0-100 skill scale, such as [`batting_rating`]
    /// or [`bowling_rating`].
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 80.0 {
            Self::Elite
        } else if rating >= 70.0 {
            Self::Strong
        } else if rating >= 60.0 {
            Self::Average
        } else {
            Self::Weak
        }
    }

    /// Tier for a [`team_rating`], rescaled onto the 0-100 skill scale first.
    #[must_use]
    pub fn from_team_rating(rating: f64) -> Self {
        Self::from_rating(rating / TEAM_RATING_MAX * 100.0)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Strong => "Strong",
            Self::Average => "Average",
            Self::Weak => "Developing",
        }
    }
}
