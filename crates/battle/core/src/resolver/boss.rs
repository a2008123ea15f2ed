//! Boss turn: mood update, move execution and next-move selection.

use super::report::{ReportBuilder, Side, TurnEffect, TurnResult};
use super::CombatResolver;
use crate::combat::tree::scale;
use crate::env::RollOracle;
use crate::graph::{Mood, MoveArchetype, MoveEffect};
use crate::state::Entity;

impl CombatResolver {
    /// Re-evaluates the boss mood from its vitals.
    ///
    /// Returns `(from, to)` when the mood changed; non-bosses are ignored.
    pub fn boss_update_mood(&self, boss: &mut Entity) -> Option<(Mood, Mood)> {
        let health_percent = boss.health_percent();
        let stats = boss.boss.as_mut()?;
        let from = stats.mood;
        let to = self
            .moods
            .evaluate(from, health_percent, stats.stress(), &self.config.mood);
        if to == from {
            return None;
        }
        tracing::debug!(
            "mood: {from} -> {to} (hp={health_percent}%, stress={})",
            stats.stress()
        );
        stats.mood = to;
        Some((from, to))
    }

    /// Selects the boss's next move and advances its strategy cursor.
    ///
    /// Draws at most one roll. A non-boss gets the baseline move.
    pub fn boss_choose_move(&self, boss: &mut Entity, rng: &mut impl RollOracle) -> &MoveArchetype {
        let (hp, hp_max) = (boss.health(), boss.max_health());
        let Some(stats) = boss.boss.as_mut() else {
            return self.strategy.get_or_baseline(self.strategy.baseline());
        };
        let next = self.strategy.choose_next(stats.current_move, hp, hp_max, rng);
        stats.current_move = next;
        self.strategy.get_or_baseline(next)
    }

    /// Move the boss executes this turn: the cursor's move, or the baseline
    /// when it is no longer eligible.
    pub fn boss_pending_move(&self, boss: &Entity) -> &MoveArchetype {
        let Some(stats) = &boss.boss else {
            return self.strategy.get_or_baseline(self.strategy.baseline());
        };
        let id = stats.current_move;
        if self.strategy.is_eligible(id, boss.health(), boss.max_health()) {
            return self.strategy.get_or_baseline(id);
        }
        tracing::warn!(
            "strategy: planned move {:?} no longer eligible for {}, using baseline",
            id,
            boss.name()
        );
        self.strategy.get_or_baseline(self.strategy.baseline())
    }

    /// Full boss action against `target`.
    ///
    /// Order: mood update, move execution (hit roll and sub-roll for striking
    /// moves), then the strategy roll choosing the next move.
    pub fn boss_turn(
        &self,
        boss: &mut Entity,
        target: &mut Entity,
        rng: &mut impl RollOracle,
    ) -> TurnResult {
        let mut report = ReportBuilder::new(boss, "");
        if !boss.is_boss() {
            report.say(format!("{} has no strategy to follow.", boss.name()));
            return report.finish(boss, Some(&*target));
        }

        if let Some((from, to)) = self.boss_update_mood(boss) {
            report.effect(TurnEffect::MoodChanged { from, to });
            report.say(format!("{} turns {to}!", boss.name()));
        }

        let archetype = self.boss_pending_move(boss).clone();
        report.set_action(&archetype.name);
        report.say(format!("{} uses {}!", boss.name(), archetype.name));

        if archetype.hp_cost > 0 {
            let paid = boss.core.health.drain(archetype.hp_cost);
            report.effect(TurnEffect::HealthPaid(paid));
        }

        if let (Some(buff), Some(stats)) = (archetype.self_buff, boss.boss.as_mut()) {
            let turns = self.config.boss.buff_duration;
            stats.grant_buff(buff, turns);
            report.effect(TurnEffect::BuffGranted { buff, turns });
        }

        match archetype.effect {
            MoveEffect::Heal { power } => self.boss_heal(boss, power, &mut report),
            MoveEffect::Damage { power } => {
                let base = scale(boss.core.attack, power);
                self.offensive(boss, target, base, archetype.inflicts, rng, &mut report);
            }
            MoveEffect::Hybrid { damage, heal } => {
                let base = scale(boss.core.attack, damage);
                let outcome =
                    self.offensive(boss, target, base, archetype.inflicts, rng, &mut report);
                if outcome.is_hit() {
                    self.boss_heal(boss, heal, &mut report);
                }
            }
        }

        let next = self.boss_choose_move(boss, rng);
        tracing::debug!("boss {} plans {}", boss.name(), next.key);

        report.finish(boss, Some(&*target))
    }

    fn boss_heal(&self, boss: &mut Entity, fraction: f64, report: &mut ReportBuilder) {
        let amount = scale(boss.max_health(), fraction);
        self.heal(boss, Side::Actor, amount, report);
        if let Some(stats) = boss.boss.as_mut() {
            let relief = self.config.stress.heal_relief;
            let level = stats.relieve_stress(relief);
            report.effect(TurnEffect::StressRelieved {
                amount: relief,
                level,
            });
        }
    }
}
