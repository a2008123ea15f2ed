//! Attack outcome types.

/// Leaf category of the attack tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    Normal,
    Critical,
    Miss,
    Stumble,
}

/// Result of one attack tree resolution.
///
/// Each variant carries only the fields relevant to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Regular hit: `floor(base_power × 1.0)`.
    Normal { damage: u32 },
    /// Critical hit: `floor(base_power × critical_multiplier)`.
    Critical { damage: u32 },
    /// No damage to anyone.
    Miss,
    /// The attacker hurts itself for a fixed amount.
    Stumble { self_damage: u32 },
}

impl AttackOutcome {
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Normal { .. } => OutcomeKind::Normal,
            Self::Critical { .. } => OutcomeKind::Critical,
            Self::Miss => OutcomeKind::Miss,
            Self::Stumble { .. } => OutcomeKind::Stumble,
        }
    }

    /// Damage quantity: dealt for hits, self-inflicted for a stumble, zero
    /// for a miss.
    pub const fn damage(&self) -> u32 {
        match *self {
            Self::Normal { damage } | Self::Critical { damage } => damage,
            Self::Stumble { self_damage } => self_damage,
            Self::Miss => 0,
        }
    }

    /// Whether the attack connected with the target.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Normal { .. } | Self::Critical { .. })
    }

    /// Short human-readable tag.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "Hit",
            Self::Critical { .. } => "Critical hit!",
            Self::Miss => "Missed",
            Self::Stumble { .. } => "Stumbled!",
        }
    }
}
