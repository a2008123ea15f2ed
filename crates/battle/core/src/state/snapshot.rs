//! Field-by-field entity snapshot for save/restore collaborators.
//!
//! Only the mutable fields are captured; names, maxima and attack come from
//! the static definitions the entity was built from.

use super::{Entity, ShieldLayer};
use crate::config::CombatConfig;
use crate::error::{CombatError, ErrorSeverity};
use crate::graph::{Mood, MoveId, Status};

/// Errors raised when a snapshot cannot be applied or decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A restored value exceeds the entity's maximum.
    #[error("{field} {value} exceeds maximum {max}")]
    ExceedsMaximum {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// Boss fields were supplied for an entity without a boss extension.
    #[error("boss snapshot applied to non-boss entity '{0}'")]
    NotABoss(String),

    /// A boss entity was restored without its boss fields.
    #[error("boss entity '{0}' restored without boss fields")]
    MissingBossFields(String),

    /// Encoding or decoding failed.
    #[error("snapshot codec error: {0}")]
    Codec(String),
}

impl CombatError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Codec(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ExceedsMaximum { .. } => "snapshot.exceeds_maximum",
            Self::NotABoss(_) => "snapshot.not_a_boss",
            Self::MissingBossFields(_) => "snapshot.missing_boss_fields",
            Self::Codec(_) => "snapshot.codec",
        }
    }
}

/// Mutable boss fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossSnapshot {
    pub stress: u32,
    pub attack_buff_turns: u32,
    pub defense_buff_turns: u32,
    pub mood: Mood,
    pub current_move: MoveId,
}

/// Mutable entity fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub health: u32,
    pub energy: u32,
    pub status: Status,
    pub burn_turns: u32,
    pub motivation_turns: u32,
    pub shield_layers: u32,
    pub boss: Option<BossSnapshot>,
}

#[cfg(feature = "serde")]
impl EntitySnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Codec(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Codec(e.to_string()))
    }
}

impl Entity {
    /// Captures the mutable fields.
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            health: self.core.health.current(),
            energy: self.core.energy.current(),
            status: self.core.status,
            burn_turns: self.core.burn_turns,
            motivation_turns: self.core.motivation_turns,
            shield_layers: self.core.shields.len() as u32,
            boss: self.boss.as_ref().map(|boss| BossSnapshot {
                stress: boss.stress(),
                attack_buff_turns: boss.attack_buff_turns,
                defense_buff_turns: boss.defense_buff_turns,
                mood: boss.mood,
                current_move: boss.current_move,
            }),
        }
    }

    /// Applies a snapshot. The entity is left untouched when validation fails.
    pub fn restore(&mut self, snapshot: &EntitySnapshot) -> Result<(), SnapshotError> {
        let check = |field, value, max| {
            if value > max {
                Err(SnapshotError::ExceedsMaximum { field, value, max })
            } else {
                Ok(())
            }
        };
        check("health", snapshot.health, self.core.health.maximum())?;
        check("energy", snapshot.energy, self.core.energy.maximum())?;
        check(
            "shield_layers",
            snapshot.shield_layers,
            CombatConfig::MAX_SHIELD_LAYERS as u32,
        )?;

        match (&self.boss, &snapshot.boss) {
            (None, Some(_)) => return Err(SnapshotError::NotABoss(self.core.name.clone())),
            (Some(_), None) => {
                return Err(SnapshotError::MissingBossFields(self.core.name.clone()));
            }
            (Some(boss), Some(saved)) => check("stress", saved.stress, boss.stress_max())?,
            (None, None) => {}
        }

        self.core.health.set_current(snapshot.health);
        self.core.energy.set_current(snapshot.energy);
        self.core.status = snapshot.status;
        self.core.burn_turns = snapshot.burn_turns;
        self.core.motivation_turns = snapshot.motivation_turns;
        self.core.shields.clear();
        for _ in 0..snapshot.shield_layers {
            self.core.shields.push(ShieldLayer);
        }

        if let (Some(boss), Some(saved)) = (self.boss.as_mut(), snapshot.boss.as_ref()) {
            boss.set_stress(saved.stress);
            boss.attack_buff_turns = saved.attack_buff_turns;
            boss.defense_buff_turns = saved.defense_buff_turns;
            boss.mood = saved.mood;
            boss.current_move = saved.current_move;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BossStats;

    fn boss() -> Entity {
        Entity::new_boss("Donald T.", 300, 25, BossStats::new(100, MoveId(0)))
    }

    #[test]
    fn restore_reproduces_mutable_fields() {
        let mut original = boss();
        original.receive_damage(120);
        original.set_status(Status::Burning);
        original.core.burn_turns = 2;
        original.add_shield_layers(2);
        if let Some(stats) = original.boss.as_mut() {
            stats.raise_stress(45);
            stats.mood = Mood::Defensive;
            stats.current_move = MoveId(3);
        }

        let mut fresh = boss();
        fresh.restore(&original.snapshot()).unwrap();
        assert_eq!(fresh, original);
    }

    #[test]
    fn rejects_health_above_maximum() {
        let mut entity = Entity::new("Soldado Daño", 100, 100, 20);
        let mut snapshot = entity.snapshot();
        snapshot.health = 101;
        snapshot.status = Status::Stunned;

        assert_eq!(
            entity.restore(&snapshot),
            Err(SnapshotError::ExceedsMaximum {
                field: "health",
                value: 101,
                max: 100
            })
        );
        assert_eq!(entity.status(), Status::Normal);
    }

    #[test]
    fn rejects_boss_fields_on_soldier() {
        let mut soldier = Entity::new("Soldado Tanque", 150, 150, 15);
        let snapshot = boss().snapshot();
        let mut adjusted = snapshot.clone();
        adjusted.health = 100;
        assert!(matches!(
            soldier.restore(&adjusted),
            Err(SnapshotError::NotABoss(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bincode_round_trip() {
        let mut entity = boss();
        entity.receive_damage(33);
        let snapshot = entity.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(EntitySnapshot::from_bytes(&bytes).unwrap(), snapshot);
        assert!(matches!(
            EntitySnapshot::from_bytes(&bytes[..2]),
            Err(SnapshotError::Codec(_))
        ));
    }
}
