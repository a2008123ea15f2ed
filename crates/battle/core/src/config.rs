//! Battle configuration constants and tunable parameters.
//!
//! Every numeric knob the resolver reads lives here. Tables are plain data so
//! the content crate can deserialize them from TOML; [`CombatConfig::validate`]
//! must succeed before a [`crate::CombatResolver`] accepts them.

use crate::error::{CombatError, ErrorSeverity};

/// Tolerance used when checking that a branch partition sums to one.
const PARTITION_EPSILON: f64 = 1e-6;

/// Errors raised while validating a [`CombatConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{branch}: probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { branch: &'static str, value: f64 },

    #[error("{branch}: pass + fail = {sum}, expected 1")]
    PartitionMismatch { branch: &'static str, sum: f64 },

    #[error("{name} must be a positive finite multiplier (got {value})")]
    InvalidMultiplier { name: &'static str, value: f64 },

    #[error("mood thresholds are incoherent: {reason}")]
    InvalidThresholds { reason: &'static str },

    #[error("stress_max must be greater than zero")]
    ZeroStressMax,
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProbabilityOutOfRange { .. } => "config.probability_out_of_range",
            Self::PartitionMismatch { .. } => "config.partition_mismatch",
            Self::InvalidMultiplier { .. } => "config.invalid_multiplier",
            Self::InvalidThresholds { .. } => "config.invalid_thresholds",
            Self::ZeroStressMax => "config.zero_stress_max",
        }
    }
}

/// Explicit two-way split of a decision node.
///
/// `pass` is the probability of descending into the left (success) child.
/// `fail` is stored rather than implied so a table with leftover probability
/// mass is rejected at load time instead of silently skewing outcomes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchOdds {
    pub pass: f64,
    pub fail: f64,
}

impl BranchOdds {
    /// Builds a partition from the pass probability alone.
    pub fn with_pass(pass: f64) -> Self {
        Self {
            pass,
            fail: 1.0 - pass,
        }
    }

    fn validate(&self, branch: &'static str) -> Result<(), ConfigError> {
        for value in [self.pass, self.fail] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { branch, value });
            }
        }
        let sum = self.pass + self.fail;
        if (sum - 1.0).abs() > PARTITION_EPSILON {
            return Err(ConfigError::PartitionMismatch { branch, sum });
        }
        Ok(())
    }
}

/// Probabilities and multipliers of the attack decision tree.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackTable {
    /// Root node: does the attack connect?
    pub hit: BranchOdds,
    /// Success branch: is the hit critical?
    pub critical: BranchOdds,
    /// Failure branch: does the attacker stumble?
    pub stumble: BranchOdds,
    pub critical_multiplier: f64,
    /// Fixed self-inflicted damage on a stumble.
    pub stumble_damage: u32,
}

impl Default for AttackTable {
    fn default() -> Self {
        Self {
            hit: BranchOdds::with_pass(0.85),
            critical: BranchOdds::with_pass(0.20),
            stumble: BranchOdds::with_pass(0.10),
            critical_multiplier: 1.5,
            stumble_damage: 10,
        }
    }
}

/// Damage-over-time, buff and resource amounts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTable {
    pub burn_damage: u32,
    pub bleed_damage: u32,
    /// Turns of burning applied when an entity catches fire.
    pub burn_duration: u32,
    /// Turns of halved energy costs granted by a Buff ability.
    pub motivation_duration: u32,
    /// Energy restored at the start of every turn.
    pub energy_regen: u32,
    pub shield_layers_per_cast: u32,
    /// Incoming damage multiplier while Vulnerable.
    pub vulnerable_multiplier: f64,
}

impl Default for EffectTable {
    fn default() -> Self {
        Self {
            burn_damage: 15,
            bleed_damage: 10,
            burn_duration: 3,
            motivation_duration: 3,
            energy_regen: 10,
            shield_layers_per_cast: 1,
            vulnerable_multiplier: 1.25,
        }
    }
}

/// Stress gained by the boss when it is hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StressTable {
    pub base_hit: u32,
    pub critical_hit: u32,
    /// Extra stress while already Burning or Bleeding.
    pub suffering_bonus: u32,
    /// Factor applied while Vulnerable.
    pub vulnerable_factor: u32,
    /// Flat gain replacing everything else while in a rage.
    pub enraged_gain: u32,
    /// Stress removed when the boss heals itself.
    pub heal_relief: u32,
}

impl Default for StressTable {
    fn default() -> Self {
        Self {
            base_hit: 15,
            critical_hit: 25,
            suffering_bonus: 10,
            vulnerable_factor: 2,
            enraged_gain: 5,
            heal_relief: 10,
        }
    }
}

/// Vital-sign thresholds that produce mood events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoodThresholds {
    /// Stress at or above this raises `estres_alto`.
    pub stress_high: u32,
    /// Stress at or above this raises `presion`.
    pub stress_pressure: u32,
    /// Stress below this (with high health) raises `calmado`.
    pub stress_calm: u32,
    /// Health percentage below this raises `vida_baja`.
    pub low_health_percent: u32,
    /// Health percentage at or above this raises `calmado`/`recuperado`.
    pub high_health_percent: u32,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            stress_high: 80,
            stress_pressure: 40,
            stress_calm: 20,
            low_health_percent: 30,
            high_health_percent: 70,
        }
    }
}

/// Boss-only tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossTable {
    pub stress_max: u32,
    /// Turns a self-buff from a strategy move lasts.
    pub buff_duration: u32,
    pub attack_buff_multiplier: f64,
    pub defense_buff_multiplier: f64,
}

impl Default for BossTable {
    fn default() -> Self {
        Self {
            stress_max: 100,
            buff_duration: 3,
            attack_buff_multiplier: 1.25,
            defense_buff_multiplier: 1.25,
        }
    }
}

/// Complete numeric configuration consumed by the resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub attack: AttackTable,
    pub effects: EffectTable,
    pub stress: StressTable,
    pub mood: MoodThresholds,
    pub boss: BossTable,
}

impl CombatConfig {
    /// Maximum number of shield layers an entity can hold.
    pub const MAX_SHIELD_LAYERS: usize = 8;

    /// Checks every table for coherence.
    ///
    /// Called once when the tables are loaded; a failure here is a setup-time
    /// contract violation, never a mid-battle one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attack.hit.validate("hit")?;
        self.attack.critical.validate("critical")?;
        self.attack.stumble.validate("stumble")?;

        check_multiplier("critical_multiplier", self.attack.critical_multiplier)?;
        check_multiplier("vulnerable_multiplier", self.effects.vulnerable_multiplier)?;
        check_multiplier("attack_buff_multiplier", self.boss.attack_buff_multiplier)?;
        check_multiplier("defense_buff_multiplier", self.boss.defense_buff_multiplier)?;

        if self.boss.stress_max == 0 {
            return Err(ConfigError::ZeroStressMax);
        }

        let mood = &self.mood;
        if !(mood.stress_calm <= mood.stress_pressure && mood.stress_pressure <= mood.stress_high) {
            return Err(ConfigError::InvalidThresholds {
                reason: "expected stress_calm <= stress_pressure <= stress_high",
            });
        }
        if mood.stress_high > self.boss.stress_max {
            return Err(ConfigError::InvalidThresholds {
                reason: "stress_high exceeds stress_max",
            });
        }
        if mood.low_health_percent >= mood.high_health_percent || mood.high_health_percent > 100 {
            return Err(ConfigError::InvalidThresholds {
                reason: "expected low_health_percent < high_health_percent <= 100",
            });
        }

        Ok(())
    }
}

fn check_multiplier(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CombatConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_leftover_probability_mass() {
        let mut config = CombatConfig::default();
        config.attack.critical = BranchOdds {
            pass: 0.3,
            fail: 0.6,
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PartitionMismatch {
                branch: "critical",
                ..
            }
        ));
        assert!(err.severity().is_fatal());
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let mut config = CombatConfig::default();
        config.attack.hit = BranchOdds {
            pass: 1.2,
            fail: -0.2,
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { branch: "hit", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let mut config = CombatConfig::default();
        config.attack.critical_multiplier = 0.0;

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMultiplier {
                name: "critical_multiplier",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_inverted_health_thresholds() {
        let mut config = CombatConfig::default();
        config.mood.low_health_percent = 80;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn rejects_zero_stress_max() {
        let mut config = CombatConfig::default();
        config.boss.stress_max = 0;

        assert_eq!(config.validate(), Err(ConfigError::ZeroStressMax));
    }
}
