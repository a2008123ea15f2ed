//! Combat resolver.
//!
//! Orchestrates one action: pays its cost, walks the attack tree, applies
//! damage, healing or shielding, drives the status graph and updates boss
//! stress. Resolution never fails; every lookup degrades to "no change" or
//! to the baseline move, and the outcome is returned as a [`TurnResult`].

mod boss;
pub mod report;
pub mod stress;

pub use report::{Side, TurnEffect, TurnResult, TurnStart};
pub use stress::stress_gain;

use crate::ability::{Ability, AbilityCategory};
use crate::combat::{AttackOutcome, AttackTree, tree::scale};
use crate::config::{CombatConfig, ConfigError};
use crate::env::RollOracle;
use crate::graph::{MoodGraph, Status, StatusEvent, StatusGraph, StrategyGraph};
use crate::state::{DamageTaken, Entity};

use report::ReportBuilder;

/// Resolves actions against validated configuration and graphs.
#[derive(Clone, Debug)]
pub struct CombatResolver {
    config: CombatConfig,
    tree: AttackTree,
    statuses: StatusGraph,
    moods: MoodGraph,
    strategy: StrategyGraph,
}

impl CombatResolver {
    /// Validates `config` and builds a resolver with the standard graphs.
    pub fn new(config: CombatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree: AttackTree::new(&config.attack),
            config,
            statuses: StatusGraph::standard().clone(),
            moods: MoodGraph::standard().clone(),
            strategy: StrategyGraph::standard().clone(),
        })
    }

    pub fn with_strategy(mut self, strategy: StrategyGraph) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_status_graph(mut self, statuses: StatusGraph) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_mood_graph(mut self, moods: MoodGraph) -> Self {
        self.moods = moods;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn statuses(&self) -> &StatusGraph {
        &self.statuses
    }

    pub fn moods(&self) -> &MoodGraph {
        &self.moods
    }

    pub fn strategy(&self) -> &StrategyGraph {
        &self.strategy
    }

    /// Runs the attack tree for a base power.
    pub fn resolve_attack(&self, base_power: u32, rng: &mut impl RollOracle) -> AttackOutcome {
        self.tree.resolve(base_power, rng)
    }

    pub fn status_transition(&self, current: Status, event: StatusEvent) -> Status {
        self.statuses.transition(current, event)
    }

    /// Resolves `ability` used by `attacker` against `target`.
    ///
    /// Heal abilities restore the target, or report [`TurnEffect::NoTarget`]
    /// without paying the cost when the target is already defeated. Buff,
    /// Defense and Cleanse act on the attacker and leave the target untouched.
    pub fn apply_ability(
        &self,
        attacker: &mut Entity,
        target: &mut Entity,
        ability: &Ability,
        rng: &mut impl RollOracle,
    ) -> TurnResult {
        self.resolve_ability(attacker, Some(target), ability, rng)
    }

    /// Resolves an ability the user aims at itself (self-heal included).
    ///
    /// Offensive abilities have nothing to strike and are rejected with
    /// [`TurnEffect::NoTarget`] before any cost is paid.
    pub fn apply_ability_to_self(
        &self,
        user: &mut Entity,
        ability: &Ability,
        rng: &mut impl RollOracle,
    ) -> TurnResult {
        self.resolve_ability(user, None, ability, rng)
    }

    fn resolve_ability(
        &self,
        actor: &mut Entity,
        mut target: Option<&mut Entity>,
        ability: &Ability,
        rng: &mut impl RollOracle,
    ) -> TurnResult {
        let mut report = ReportBuilder::new(actor, &ability.name);
        report.say(format!("{} uses {}!", actor.name(), ability.name));

        if ability.category.is_offensive() && target.is_none() {
            report.effect(TurnEffect::NoTarget);
            report.say("There is nothing to strike.");
            return report.finish(actor, None);
        }

        if ability.category == AbilityCategory::Heal
            && target.as_deref().is_some_and(|target| !target.is_alive())
        {
            report.effect(TurnEffect::NoTarget);
            report.say("There is nobody left to heal.");
            return report.finish(actor, target.as_deref());
        }

        let required = actor.effective_cost(ability.cost);
        if !actor.spend_energy(ability.cost) {
            let available = actor.energy();
            report.effect(TurnEffect::InsufficientEnergy {
                required,
                available,
            });
            report.say(format!("Not enough energy ({available}/{required})."));
            return report.finish(actor, target.as_deref());
        }
        if required > 0 {
            report.effect(TurnEffect::EnergySpent(required));
        }

        match ability.category {
            AbilityCategory::Attack | AbilityCategory::Debuff => {
                if let Some(target) = target.as_deref_mut() {
                    self.offensive(actor, target, ability.base_power(), ability.event, rng, &mut report);
                }
            }
            AbilityCategory::Heal => {
                let amount = ability.power.unsigned_abs();
                match target.as_deref_mut() {
                    Some(target) => self.heal(target, Side::Target, amount, &mut report),
                    None => self.heal(actor, Side::Actor, amount, &mut report),
                }
            }
            AbilityCategory::Cleanse => {
                let event = ability.event.unwrap_or(StatusEvent::Cure);
                if !self.change_status(actor, Side::Actor, event, &mut report) {
                    report.say("It had no effect.");
                }
            }
            AbilityCategory::Buff => {
                let turns = self.config.effects.motivation_duration;
                actor.core.motivation_turns = turns;
                report.effect(TurnEffect::Motivated { turns });
                report.say(format!("{} is motivated! (costs halved)", actor.name()));
                if let Some(event) = ability.event {
                    self.change_status(actor, Side::Actor, event, &mut report);
                }
            }
            AbilityCategory::Defense => {
                let layers = actor.add_shield_layers(self.config.effects.shield_layers_per_cast);
                report.effect(TurnEffect::ShieldRaised { layers });
                report.say(format!("{} raises a shield!", actor.name()));
                let event = ability.event.unwrap_or(StatusEvent::Guard);
                self.change_status(actor, Side::Actor, event, &mut report);
            }
        }

        report.finish(actor, target.as_deref())
    }

    /// Walks the tree and applies its outcome. Returns the outcome.
    fn offensive(
        &self,
        actor: &mut Entity,
        target: &mut Entity,
        base_power: u32,
        event: Option<StatusEvent>,
        rng: &mut impl RollOracle,
        report: &mut ReportBuilder,
    ) -> AttackOutcome {
        let outcome = self.tree.resolve(base_power, rng);
        report.outcome = Some(outcome);

        match outcome {
            AttackOutcome::Stumble { self_damage } => {
                report.say(format!("Stumble! {} is hurt ({self_damage}).", actor.name()));
                self.strike(actor, Side::Actor, self_damage, report);
            }
            AttackOutcome::Miss => report.say(outcome.description()),
            AttackOutcome::Normal { damage } | AttackOutcome::Critical { damage } => {
                let multiplier = self.outgoing_multiplier(actor) * self.incoming_multiplier(target);
                let amount = scale(damage, multiplier);
                report.say(format!("{} Damage: {amount}", outcome.description()));

                let status_before = target.status();
                if self.strike(target, Side::Target, amount, report) == DamageTaken::Blocked {
                    return outcome;
                }
                self.add_stress(target, &outcome, status_before, report);
                if let Some(event) = event {
                    self.change_status(target, Side::Target, event, report);
                }
            }
        }

        outcome
    }

    /// Boss mood and attack buff; 1.0 for everyone else.
    fn outgoing_multiplier(&self, entity: &Entity) -> f64 {
        let Some(boss) = &entity.boss else {
            return 1.0;
        };
        let buff = if boss.attack_buff_turns > 0 {
            self.config.boss.attack_buff_multiplier
        } else {
            1.0
        };
        self.moods.bonuses(boss.mood).attack * buff
    }

    /// Vulnerability on anyone; boss mood and defense buff divide.
    fn incoming_multiplier(&self, entity: &Entity) -> f64 {
        let mut multiplier = if entity.status() == Status::Vulnerable {
            self.config.effects.vulnerable_multiplier
        } else {
            1.0
        };
        if let Some(boss) = &entity.boss {
            let buff = if boss.defense_buff_turns > 0 {
                self.config.boss.defense_buff_multiplier
            } else {
                1.0
            };
            let defense = self.moods.bonuses(boss.mood).defense * buff;
            if defense > 0.0 {
                multiplier /= defense;
            }
        }
        multiplier
    }

    /// Applies a hit and handles a consumed shield stack.
    fn strike(
        &self,
        entity: &mut Entity,
        side: Side,
        amount: u32,
        report: &mut ReportBuilder,
    ) -> DamageTaken {
        let was_alive = entity.is_alive();
        let taken = entity.receive_damage(amount);
        report.effect(TurnEffect::Damage { side, taken });

        if taken == DamageTaken::Blocked {
            report.say(format!("{}'s shield absorbs the hit!", entity.name()));
            if entity.shield_layers() == 0 {
                report.effect(TurnEffect::ShieldBroken { side });
                report.say(format!("{}'s shield breaks.", entity.name()));
                self.change_status(entity, side, StatusEvent::Break, report);
            }
        }

        if was_alive && !entity.is_alive() {
            report.effect(TurnEffect::Defeated { side });
            report.say(format!("{} is defeated!", entity.name()));
        }

        taken
    }

    fn heal(&self, entity: &mut Entity, side: Side, amount: u32, report: &mut ReportBuilder) {
        let healed = entity.heal(amount);
        report.effect(TurnEffect::Healed { side, amount: healed });
        report.say(format!("{} recovers {healed} HP.", entity.name()));
    }

    fn add_stress(
        &self,
        target: &mut Entity,
        outcome: &AttackOutcome,
        status: Status,
        report: &mut ReportBuilder,
    ) {
        let Some(boss) = target.boss.as_mut() else {
            return;
        };
        let critical = matches!(outcome, AttackOutcome::Critical { .. });
        let amount = stress_gain(critical, status, boss.mood, &self.config.stress);
        let level = boss.raise_stress(amount);
        tracing::debug!("stress: +{amount} -> {level}");
        report.effect(TurnEffect::StressRaised { amount, level });
    }

    /// Feeds `event` through the status graph. Returns whether it changed.
    fn change_status(
        &self,
        entity: &mut Entity,
        side: Side,
        event: StatusEvent,
        report: &mut ReportBuilder,
    ) -> bool {
        let from = entity.status();
        let to = self.statuses.transition(from, event);
        if to == from {
            return false;
        }
        tracing::debug!("status: {} {from} --{event}--> {to}", entity.name());
        self.set_status(entity, side, to, report);
        true
    }

    /// Sets a status directly, keeping the burn timer in sync.
    fn set_status(&self, entity: &mut Entity, side: Side, to: Status, report: &mut ReportBuilder) {
        let from = entity.status();
        entity.set_status(to);
        if to == Status::Burning {
            entity.core.burn_turns = self.config.effects.burn_duration;
        } else if from == Status::Burning {
            entity.core.burn_turns = 0;
        }
        report.effect(TurnEffect::StatusChanged { side, from, to });
        report.say(format!("{} is now {to}.", entity.name()));
    }

    /// Passive effects at the start of `entity`'s turn.
    ///
    /// Burning and Bleeding deal their damage (through shields), Stunned
    /// loses the turn, Cured settles back to Normal, timers tick down and
    /// energy regenerates.
    pub fn begin_turn(&self, entity: &mut Entity) -> TurnStart {
        let mut report = ReportBuilder::new(entity, "start of turn");
        if !entity.is_alive() {
            return report.finish_start(entity, true);
        }

        let mut skip_turn = false;
        let effects = self.config.effects;
        match entity.status() {
            Status::Burning => {
                report.say(format!("{} is burning!", entity.name()));
                self.strike(entity, Side::Actor, effects.burn_damage, &mut report);
                entity.core.burn_turns = entity.core.burn_turns.saturating_sub(1);
                if entity.core.burn_turns == 0 {
                    report.say("The fire dies out.");
                    self.set_status(entity, Side::Actor, Status::Normal, &mut report);
                }
            }
            Status::Bleeding => {
                report.say(format!("{} is bleeding!", entity.name()));
                self.strike(entity, Side::Actor, effects.bleed_damage, &mut report);
            }
            Status::Stunned => {
                skip_turn = true;
                report.effect(TurnEffect::TurnLost);
                report.say(format!("{} is stunned and loses the turn!", entity.name()));
                self.set_status(entity, Side::Actor, Status::Normal, &mut report);
            }
            Status::Cured => self.set_status(entity, Side::Actor, Status::Normal, &mut report),
            _ => {}
        }

        if entity.core.motivation_turns > 0 {
            entity.core.motivation_turns -= 1;
            if entity.core.motivation_turns == 0 {
                report.say(format!("{} is no longer motivated.", entity.name()));
                if entity.status() == Status::Motivated {
                    self.set_status(entity, Side::Actor, Status::Normal, &mut report);
                }
            }
        }

        if let Some(boss) = entity.boss.as_mut() {
            boss.tick_buffs();
        }

        let regenerated = entity.regenerate_energy(effects.energy_regen);
        if regenerated > 0 {
            report.effect(TurnEffect::EnergyRegenerated(regenerated));
        }

        skip_turn |= !entity.is_alive();
        report.finish_start(entity, skip_turn)
    }
}

/// Index of the living ally with the lowest current health.
///
/// Ties go to the earlier entry. Returns `None` when nobody is alive.
pub fn lowest_health(allies: &[Entity]) -> Option<usize> {
    allies
        .iter()
        .enumerate()
        .filter(|(_, ally)| ally.is_alive())
        .min_by_key(|(index, ally)| (ally.health(), *index))
        .map(|(index, _)| index)
}
