//! Player competency records supplied by the roster store.
use serde::{Deserialize, Serialize};

use crate::numbers::skill_unit;

/// Squad role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRole {
    #[default]
    #[serde(alias = "BATSMAN")]
    Batter,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayerRole {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Batter => "Batter",
            Self::Bowler => "Bowler",
            Self::AllRounder => "All-rounder",
            Self::WicketKeeper => "Wicket-keeper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Handedness {
    #[default]
    RightHand,
    LeftHand,
}

/// Bowling action as recorded on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BowlingStyle {
    Fast,
    Medium,
    SpinOff,
    SpinLeg,
}

impl BowlingStyle {
    #[must_use]
    pub const fn kind(self) -> BowlingKind {
        match self {
            Self::Fast | Self::Medium => BowlingKind::Pace,
            Self::SpinOff | Self::SpinLeg => BowlingKind::Spin,
        }
    }
}

/// Pace or spin family; decides which batting skill and pitch assist apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BowlingKind {
    Pace,
    Spin,
}

/// One participant's skills on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCompetency {
    pub name: String,
    #[serde(default)]
    pub role: PlayerRole,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub bowling_style: Option<BowlingStyle>,
    #[serde(default = "default_skill")]
    pub batting_vs_pace: u8,
    #[serde(default = "default_skill")]
    pub batting_vs_spin: u8,
    #[serde(default = "default_skill")]
    pub bowling_pace: u8,
    #[serde(default = "default_skill")]
    pub bowling_spin: u8,
    #[serde(default = "default_skill")]
    pub fielding: u8,
    #[serde(default)]
    pub keeping: u8,
}

const fn default_skill() -> u8 {
    50
}

impl PlayerCompetency {
    /// A right-handed batter with every skill at 50 and no keeping.
    #[must_use]
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            role,
            handedness: Handedness::RightHand,
            bowling_style: None,
            batting_vs_pace: default_skill(),
            batting_vs_spin: default_skill(),
            bowling_pace: default_skill(),
            bowling_spin: default_skill(),
            fielding: default_skill(),
            keeping: 0,
        }
    }

    /// Bowling family; without a recorded style the stronger rating decides.
    #[must_use]
    pub fn bowling_kind(&self) -> BowlingKind {
        match self.bowling_style {
            Some(style) => style.kind(),
            None if self.bowling_spin > self.bowling_pace => BowlingKind::Spin,
            None => BowlingKind::Pace,
        }
    }

    /// Batting skill in `[0, 1]` against the given bowling family.
    #[must_use]
    pub fn batting_against(&self, kind: BowlingKind) -> f64 {
        match kind {
            BowlingKind::Pace => skill_unit(self.batting_vs_pace),
            BowlingKind::Spin => skill_unit(self.batting_vs_spin),
        }
    }

    /// Batting skill in `[0, 1]` against the family this player does not face.
    #[must_use]
    pub fn batting_against_other(&self, kind: BowlingKind) -> f64 {
        match kind {
            BowlingKind::Pace => skill_unit(self.batting_vs_spin),
            BowlingKind::Spin => skill_unit(self.batting_vs_pace),
        }
    }

    /// Bowling skill in `[0, 1]` for this player's own family.
    #[must_use]
    pub fn bowling_unit(&self) -> f64 {
        match self.bowling_kind() {
            BowlingKind::Pace => skill_unit(self.bowling_pace),
            BowlingKind::Spin => skill_unit(self.bowling_spin),
        }
    }

    #[must_use]
    pub const fn is_keeper(&self) -> bool {
        matches!(self.role, PlayerRole::WicketKeeper)
    }

    #[must_use]
    pub const fn is_left_handed(&self) -> bool {
        matches!(self.handedness, Handedness::LeftHand)
    }
}

/// Fielding side strength, summarised once per innings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldingUnit {
    /// Mean fielding skill in `[0, 1]`.
    pub fielding: f64,
    /// Keeper's keeping skill in `[0, 1]`.
    pub keeping: f64,
}

impl Default for FieldingUnit {
    fn default() -> Self {
        Self {
            fielding: 0.5,
            keeping: 0.5,
        }
    }
}

impl FieldingUnit {
    /// Summarise a fielding XI. The designated keeper's skill is used when
    /// present, otherwise the best keeping skill on the field.
    #[must_use]
    pub fn from_players(players: &[PlayerCompetency]) -> Self {
        if players.is_empty() {
            return Self::default();
        }
        let total: f64 = players.iter().map(|p| skill_unit(p.fielding)).sum();
        let fielding = total / crate::numbers::usize_to_f64(players.len());
        let keeper = players
            .iter()
            .filter(|p| p.is_keeper())
            .map(|p| p.keeping)
            .max()
            .or_else(|| players.iter().map(|p| p.keeping).max())
            .unwrap_or(0);
        Self {
            fielding,
            keeping: skill_unit(keeper),
        }
    }
}
