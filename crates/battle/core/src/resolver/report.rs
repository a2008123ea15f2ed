//! Structured reports returned by the resolver.
//!
//! Reports are consumed by rendering and logging collaborators; the core
//! never reads them back.

use crate::combat::AttackOutcome;
use crate::graph::{BuffTarget, Mood, Status};
use crate::state::{DamageTaken, Entity};

/// Which participant of an action an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The acting entity.
    Actor,
    /// The entity the action was aimed at.
    Target,
}

/// One numeric effect applied during an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEffect {
    /// The ability was not used; nothing else happened.
    InsufficientEnergy { required: u32, available: u32 },
    /// An offensive ability was used without a target; nothing happened.
    NoTarget,
    EnergySpent(u32),
    Damage { side: Side, taken: DamageTaken },
    /// The last shield layer was consumed.
    ShieldBroken { side: Side },
    Defeated { side: Side },
    Healed { side: Side, amount: u32 },
    ShieldRaised { layers: u32 },
    Motivated { turns: u32 },
    StatusChanged { side: Side, from: Status, to: Status },
    StressRaised { amount: u32, level: u32 },
    StressRelieved { amount: u32, level: u32 },
    MoodChanged { from: Mood, to: Mood },
    BuffGranted { buff: BuffTarget, turns: u32 },
    /// Health paid by a boss to use a costly move.
    HealthPaid(u32),
    EnergyRegenerated(u32),
    /// A stun consumed the turn.
    TurnLost,
}

/// Report of one resolved action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    pub actor: String,
    pub action: String,
    /// Decision tree outcome, for actions that went through it.
    pub outcome: Option<AttackOutcome>,
    pub effects: Vec<TurnEffect>,
    pub narrative: Vec<String>,
    pub actor_status: Status,
    pub target_status: Option<Status>,
}

impl TurnResult {
    /// Health removed from one side by this action.
    pub fn damage_to(&self, side: Side) -> u32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                TurnEffect::Damage {
                    side: hit,
                    taken: DamageTaken::Dealt(amount),
                } if *hit == side => *amount,
                _ => 0,
            })
            .sum()
    }

    /// Whether a shield layer absorbed a hit on `side`.
    pub fn was_blocked(&self, side: Side) -> bool {
        self.effects.iter().any(|effect| {
            matches!(
                effect,
                TurnEffect::Damage { side: hit, taken: DamageTaken::Blocked } if *hit == side
            )
        })
    }

    pub fn has_effect(&self, predicate: impl Fn(&TurnEffect) -> bool) -> bool {
        self.effects.iter().any(predicate)
    }

    /// Narrative joined into one message.
    pub fn message(&self) -> String {
        self.narrative.join("\n")
    }
}

/// Passive processing at the start of a combatant's turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    /// The combatant cannot act this turn (stunned or defeated).
    pub skip_turn: bool,
    pub effects: Vec<TurnEffect>,
    pub narrative: Vec<String>,
    pub status: Status,
}

/// Accumulates effects and narrative while an action resolves.
pub(crate) struct ReportBuilder {
    actor: String,
    action: String,
    pub(crate) outcome: Option<AttackOutcome>,
    effects: Vec<TurnEffect>,
    narrative: Vec<String>,
}

impl ReportBuilder {
    pub(crate) fn new(actor: &Entity, action: &str) -> Self {
        Self {
            actor: actor.name().to_owned(),
            action: action.to_owned(),
            outcome: None,
            effects: Vec::new(),
            narrative: Vec::new(),
        }
    }

    pub(crate) fn set_action(&mut self, action: &str) {
        self.action = action.to_owned();
    }

    pub(crate) fn effect(&mut self, effect: TurnEffect) {
        self.effects.push(effect);
    }

    pub(crate) fn say(&mut self, line: impl Into<String>) {
        self.narrative.push(line.into());
    }

    pub(crate) fn finish(self, actor: &Entity, target: Option<&Entity>) -> TurnResult {
        TurnResult {
            actor: self.actor,
            action: self.action,
            outcome: self.outcome,
            effects: self.effects,
            narrative: self.narrative,
            actor_status: actor.status(),
            target_status: target.map(Entity::status),
        }
    }

    pub(crate) fn finish_start(self, entity: &Entity, skip_turn: bool) -> TurnStart {
        TurnStart {
            skip_turn,
            effects: self.effects,
            narrative: self.narrative,
            status: entity.status(),
        }
    }
}
