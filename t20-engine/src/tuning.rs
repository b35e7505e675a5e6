//! Tuning profile: the named coefficients that drive the delivery model.
//!
//! Profiles are edited interactively and stored as partial records, so the
//! only way in from untrusted input is [`TuningProfile::normalize`], which is
//! total: every field resolves to either the caller's finite, in-range value
//! or the default, one field at a time.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::constants::LOG_TARGET_TUNING;

const DEFAULT_PRESET_DATA: &str = include_str!("../data/presets.json");

/// Metadata for one tuning coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningField {
    /// Canonical (camelCase) key used by stored profiles.
    pub name: &'static str,
    /// Rust field name, accepted as an alias on input.
    pub snake_name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl TuningField {
    /// Whether `value` is acceptable for this field.
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }

    fn resolve(&self, raw: Option<&Value>) -> Result<f64, FallbackReason> {
        let value = match raw {
            None | Some(Value::Null) => return Err(FallbackReason::Missing),
            Some(Value::Number(number)) => number.as_f64().ok_or(FallbackReason::NonFinite)?,
            Some(Value::String(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| FallbackReason::NotNumeric)?,
            Some(_) => return Err(FallbackReason::NotNumeric),
        };
        if !value.is_finite() {
            return Err(FallbackReason::NonFinite);
        }
        if !self.accepts(value) {
            return Err(FallbackReason::OutOfRange);
        }
        Ok(value)
    }
}

/// Why a field fell back to its default during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    Missing,
    NotNumeric,
    NonFinite,
    OutOfRange,
}

/// A single field that did not take the caller's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFallback {
    pub field: String,
    pub reason: FallbackReason,
}

/// Record of every fallback applied by [`TuningProfile::normalize_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub fallbacks: Vec<FieldFallback>,
}

impl NormalizationReport {
    /// True when every field came from the caller.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Fallbacks other than plain omissions; these usually indicate bad data.
    pub fn rejected(&self) -> impl Iterator<Item = &FieldFallback> {
        self.fallbacks
            .iter()
            .filter(|entry| entry.reason != FallbackReason::Missing)
    }

    #[must_use]
    pub fn reason_for(&self, field: &str) -> Option<FallbackReason> {
        self.fallbacks
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.reason)
    }
}

macro_rules! tuning_profile {
    ($( $(#[$meta:meta])* $field:ident / $key:literal = $default:literal, $min:literal ..= $max:literal; )+) => {
        /// Fully populated set of engine coefficients.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct TuningProfile {
            $( $(#[$meta])* pub $field: f64, )+
        }

        impl Default for TuningProfile {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        impl TuningProfile {
            /// Field table in declaration order.
            pub const FIELDS: &'static [TuningField] = &[
                $( TuningField {
                    name: $key,
                    snake_name: stringify!($field),
                    default: $default,
                    min: $min,
                    max: $max,
                }, )+
            ];

            fn slot(&self, key: &str) -> Option<f64> {
                match key {
                    $( $key => Some(self.$field), )+
                    _ => None,
                }
            }

            fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
                match key {
                    $( $key => Some(&mut self.$field), )+
                    _ => None,
                }
            }
        }
    };
}

tuning_profile! {
    /// Base chance that a legal delivery takes a wicket.
    base_wicket_probability / "baseWicketProbability" = 0.05, 0.0..=1.0;
    extra_probability / "extraProbability" = 0.08, 0.0..=1.0;

    batting_skill_influence / "battingSkillInfluence" = 0.08, 0.0..=1.0;
    bowling_skill_influence / "bowlingSkillInfluence" = 0.1, 0.0..=1.0;
    fielding_skill_influence / "fieldingSkillInfluence" = 0.04, 0.0..=1.0;
    keeper_skill_influence / "keeperSkillInfluence" = 0.06, 0.0..=1.0;

    pace_vs_spin_advantage / "paceVsSpinAdvantage" = 0.05, 0.0..=1.0;
    left_handed_pace_bonus / "leftHandedPaceBonus" = 0.02, 0.0..=1.0;
    swing_factor / "swingFactor" = 0.04, 0.0..=1.0;
    spin_factor / "spinFactor" = 0.04, 0.0..=1.0;

    /// Scoring cut points on a `[0, 1)` draw before context shifts them.
    six_threshold / "sixThreshold" = 0.95, 0.0..=1.0;
    four_threshold / "fourThreshold" = 0.85, 0.0..=1.0;
    two_threshold / "twoThreshold" = 0.7, 0.0..=1.0;
    single_threshold / "singleThreshold" = 0.5, 0.0..=1.0;

    powerplay_multiplier / "powerplayMultiplier" = 1.2, 0.0..=3.0;
    middle_overs_multiplier / "middleOversMultiplier" = 1.0, 0.0..=3.0;
    death_overs_multiplier / "deathOversMultiplier" = 1.3, 0.0..=3.0;
    chasing_pressure_base / "chasingPressureBase" = 0.03, 0.0..=1.0;
    required_run_rate_pressure / "requiredRunRatePressure" = 0.06, 0.0..=1.0;
    partnership_stability / "partnershipStability" = 0.04, 0.0..=1.0;
    momentum_swing / "momentumSwing" = 0.05, 0.0..=1.0;

    pitch_bounce / "pitchBounce" = 0.5, 0.0..=1.0;
    pitch_turn / "pitchTurn" = 0.5, 0.0..=1.0;
    boundary_size / "boundarySize" = 0.5, 0.0..=1.0;
    outfield_speed / "outfieldSpeed" = 0.5, 0.0..=1.0;
    humidity_factor / "humidityFactor" = 0.4, 0.0..=1.0;
    dew_factor / "dewFactor" = 0.3, 0.0..=1.0;

    seam_effectiveness / "seamEffectiveness" = 0.6, 0.0..=1.0;
    spin_effectiveness / "spinEffectiveness" = 0.6, 0.0..=1.0;
    yorker_success_rate / "yorkerSuccessRate" = 0.4, 0.0..=1.0;
    bouncer_success_rate / "bouncerSuccessRate" = 0.35, 0.0..=1.0;

    aggression_base / "aggressionBase" = 0.5, 0.0..=1.0;
    aggression_powerplay / "aggressionPowerplay" = 0.65, 0.0..=1.0;
    aggression_death / "aggressionDeath" = 0.75, 0.0..=1.0;

    run_out_success / "runOutSuccess" = 0.35, 0.0..=1.0;
    drop_catch_penalty / "dropCatchPenalty" = 0.2, 0.0..=1.0;
    ground_fielding / "groundFielding" = 0.5, 0.0..=1.0;

    no_ball_frequency / "noBallFrequency" = 0.02, 0.0..=1.0;
    wide_frequency / "wideFrequency" = 0.05, 0.0..=1.0;
    bye_leg_bye_frequency / "byeLegByeFrequency" = 0.01, 0.0..=1.0;

    edge_to_slip_probability / "edgeToSlipProbability" = 0.03, 0.0..=1.0;
    top_edge_probability / "topEdgeProbability" = 0.02, 0.0..=1.0;
}

impl TuningProfile {
    /// Merge `partial` onto `defaults`, field by field.
    ///
    /// Accepts any JSON value; non-objects behave like an empty object.
    #[must_use]
    pub fn normalize(partial: &Value, defaults: &Self) -> Self {
        Self::normalize_with_report(partial, defaults).0
    }

    /// Same as [`normalize`](Self::normalize) but also reports every fallback.
    #[must_use]
    pub fn normalize_with_report(partial: &Value, defaults: &Self) -> (Self, NormalizationReport) {
        let mut base = defaults.clone();
        base.sanitize();

        let object = partial.as_object();
        let mut profile = base.clone();
        let mut report = NormalizationReport::default();

        for field in Self::FIELDS {
            let raw = object.and_then(|map| map.get(field.name).or_else(|| map.get(field.snake_name)));
            match field.resolve(raw) {
                Ok(value) => {
                    if let Some(slot) = profile.slot_mut(field.name) {
                        *slot = value;
                    }
                }
                Err(reason) => {
                    if reason != FallbackReason::Missing {
                        log::debug!(
                            target: LOG_TARGET_TUNING,
                            "tuning field {} rejected ({reason:?}), using default",
                            field.name
                        );
                    }
                    report.fallbacks.push(FieldFallback {
                        field: field.name.to_string(),
                        reason,
                    });
                }
            }
        }

        (profile, report)
    }

    /// Parse stored JSON text and normalize it onto the canonical defaults.
    ///
    /// Unparseable text is treated as an empty record.
    #[must_use]
    pub fn from_json_str(text: &str) -> (Self, NormalizationReport) {
        let value = serde_json::from_str::<Value>(text).unwrap_or_else(|err| {
            log::debug!(target: LOG_TARGET_TUNING, "tuning JSON unreadable: {err}");
            Value::Null
        });
        Self::normalize_with_report(&value, &Self::default())
    }

    /// Replace any non-finite or out-of-range field with its canonical default.
    pub fn sanitize(&mut self) {
        for field in Self::FIELDS {
            if let Some(slot) = self.slot_mut(field.name)
                && !field.accepts(*slot)
            {
                *slot = field.default;
            }
        }
    }

    /// Look up a coefficient by camelCase or snake_case name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        let field = Self::field(name)?;
        self.slot(field.name)
    }

    /// Metadata for a coefficient by camelCase or snake_case name.
    #[must_use]
    pub fn field(name: &str) -> Option<&'static TuningField> {
        Self::FIELDS
            .iter()
            .find(|field| field.name == name || field.snake_name == name)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::FIELDS
            .iter()
            .map(|field| (field.name, self.slot(field.name).unwrap_or(field.default)))
    }
}

/// Named starting point for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningPreset {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub overrides: Value,
}

impl TuningPreset {
    /// All embedded presets, loaded once.
    #[must_use]
    pub fn all() -> &'static [Self] {
        static PRESETS: OnceLock<Vec<TuningPreset>> = OnceLock::new();
        PRESETS.get_or_init(Self::load_from_static)
    }

    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        let wanted = id.trim();
        Self::all()
            .iter()
            .find(|preset| preset.id.eq_ignore_ascii_case(wanted))
    }

    /// Preset overrides merged onto the defaults.
    #[must_use]
    pub fn profile(&self) -> TuningProfile {
        TuningProfile::normalize(&self.overrides, &TuningProfile::default())
    }

    fn load_from_static() -> Vec<Self> {
        serde_json::from_str(DEFAULT_PRESET_DATA).unwrap_or_default()
    }
}
