//! Static action definitions supplied at battle setup.

use crate::error::{CombatError, ErrorSeverity};
use crate::graph::StatusEvent;

/// How the resolver handles an ability.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityCategory {
    /// Resolved through the attack tree against the target.
    #[strum(to_string = "attack", serialize = "ataque")]
    #[cfg_attr(feature = "serde", serde(alias = "ataque"))]
    Attack,
    /// Grants the user motivation turns.
    Buff,
    /// Resolved through the attack tree; usually carries a control event.
    Debuff,
    /// Pushes shield layers on the user.
    #[strum(to_string = "defense", serialize = "defensa")]
    #[cfg_attr(feature = "serde", serde(alias = "defensa"))]
    Defense,
    /// Restores `|power|` health on the target.
    #[strum(to_string = "heal", serialize = "curacion")]
    #[cfg_attr(feature = "serde", serde(alias = "curacion"))]
    Heal,
    /// Runs the ability's event through the status graph on the user.
    #[strum(to_string = "cleanse", serialize = "limpieza")]
    #[cfg_attr(feature = "serde", serde(alias = "limpieza"))]
    Cleanse,
}

impl AbilityCategory {
    /// Whether the ability goes through the attack decision tree.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Attack | Self::Debuff)
    }
}

/// Errors raised by [`Ability::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("ability name is empty")]
    EmptyName,

    #[error("heal ability '{0}' has zero power")]
    HealWithoutPower(String),

    #[error("offensive ability '{name}' has negative power {power}")]
    NegativeOffensivePower { name: String, power: i32 },
}

impl CombatError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ability.empty_name",
            Self::HealWithoutPower(_) => "ability.heal_without_power",
            Self::NegativeOffensivePower { .. } => "ability.negative_offensive_power",
        }
    }
}

/// Static definition of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    /// Energy cost before any motivation discount.
    pub cost: u32,
    pub category: AbilityCategory,
    /// Base power; negative values denote healing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: i32,
    /// Status event raised on a successful hit (or on the user for cleanse).
    #[cfg_attr(feature = "serde", serde(default))]
    pub event: Option<StatusEvent>,
}

impl Ability {
    pub fn new(name: impl Into<String>, cost: u32, category: AbilityCategory, power: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            category,
            power,
            event: None,
        }
    }

    pub fn with_event(mut self, event: StatusEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Power used as the attack tree's base, floored at zero.
    pub fn base_power(&self) -> u32 {
        self.power.max(0).unsigned_abs()
    }

    /// Setup-time contract check.
    pub fn validate(&self) -> Result<(), AbilityError> {
        if self.name.trim().is_empty() {
            return Err(AbilityError::EmptyName);
        }
        match self.category {
            AbilityCategory::Heal if self.power == 0 => {
                Err(AbilityError::HealWithoutPower(self.name.clone()))
            }
            category if category.is_offensive() && self.power < 0 => {
                Err(AbilityError::NegativeOffensivePower {
                    name: self.name.clone(),
                    power: self.power,
                })
            }
            _ => Ok(()),
        }
    }
}
