use crate::config::BossTable;
use crate::graph::{BuffTarget, Mood, MoveId};

/// Boss-only extension of an [`super::Entity`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossStats {
    stress: u32,
    stress_max: u32,
    pub attack_buff_turns: u32,
    pub defense_buff_turns: u32,
    pub mood: Mood,
    /// Strategy graph vertex the boss will execute next.
    pub current_move: MoveId,
}

impl BossStats {
    pub fn new(stress_max: u32, opening_move: MoveId) -> Self {
        Self {
            stress: 0,
            stress_max,
            attack_buff_turns: 0,
            defense_buff_turns: 0,
            mood: Mood::Normal,
            current_move: opening_move,
        }
    }

    pub fn from_table(table: &BossTable, opening_move: MoveId) -> Self {
        Self::new(table.stress_max, opening_move)
    }

    pub fn stress(&self) -> u32 {
        self.stress
    }

    pub fn stress_max(&self) -> u32 {
        self.stress_max
    }

    /// Sets stress, clamped to `[0, stress_max]`.
    pub fn set_stress(&mut self, value: u32) {
        self.stress = value.min(self.stress_max);
    }

    /// Adds stress, clamped. Returns the new level.
    pub fn raise_stress(&mut self, amount: u32) -> u32 {
        self.set_stress(self.stress.saturating_add(amount));
        self.stress
    }

    /// Removes stress, floored at zero. Returns the new level.
    pub fn relieve_stress(&mut self, amount: u32) -> u32 {
        self.stress = self.stress.saturating_sub(amount);
        self.stress
    }

    pub fn grant_buff(&mut self, target: BuffTarget, turns: u32) {
        match target {
            BuffTarget::Attack => self.attack_buff_turns = turns,
            BuffTarget::Defense => self.defense_buff_turns = turns,
        }
    }

    /// Decrements both buff timers.
    pub fn tick_buffs(&mut self) {
        self.attack_buff_turns = self.attack_buff_turns.saturating_sub(1);
        self.defense_buff_turns = self.defense_buff_turns.saturating_sub(1);
    }
}
