//! Whole-battle runs driven by seeded roll streams.

use battle_core::{
    Ability, AbilityCategory, BossStats, CombatConfig, CombatResolver, Entity, PcgRng, Status,
    StatusEvent, TurnResult, lowest_health,
};

const MAX_TURNS: u64 = 80;

fn abilities() -> Vec<Vec<Ability>> {
    vec![
        vec![
            Ability::new("Cuchillada", 30, AbilityCategory::Attack, 25)
                .with_event(StatusEvent::Blade),
            Ability::new("Cóctel Molotov", 40, AbilityCategory::Attack, 20)
                .with_event(StatusEvent::Fire),
            Ability::new("Motivación", 50, AbilityCategory::Buff, 0)
                .with_event(StatusEvent::Motivate),
            Ability::new("Intimidación", 25, AbilityCategory::Debuff, 10)
                .with_event(StatusEvent::Intimidate),
        ],
        vec![
            Ability::new("Muro de Contención", 35, AbilityCategory::Defense, 0)
                .with_event(StatusEvent::Guard),
            Ability::new("Discurso", 45, AbilityCategory::Debuff, 10)
                .with_event(StatusEvent::Insult),
            Ability::new("Bono de Guerra", 60, AbilityCategory::Heal, -20),
            Ability::new("Disparo", 30, AbilityCategory::Attack, 20).with_event(StatusEvent::Blade),
        ],
    ]
}

struct Battle {
    resolver: CombatResolver,
    players: Vec<Entity>,
    boss: Entity,
    log: Vec<TurnResult>,
}

impl Battle {
    fn new() -> Self {
        let resolver = CombatResolver::new(CombatConfig::default()).unwrap();
        let stats = BossStats::from_table(&resolver.config().boss, resolver.strategy().baseline());
        Self {
            players: vec![
                Entity::new("Soldado Daño", 100, 100, 20),
                Entity::new("Soldado Tanque", 150, 150, 15),
            ],
            boss: Entity::new_boss("Donald T.", 300, 25, stats),
            resolver,
            log: Vec::new(),
        }
    }

    fn is_over(&self) -> bool {
        !self.boss.is_alive() || self.players.iter().all(|p| !p.is_alive())
    }

    fn run(mut self, seed: u64) -> Self {
        let abilities = abilities();
        for turn in 0..MAX_TURNS {
            for actor in 0..self.players.len() {
                if self.is_over() {
                    return self;
                }
                let mut rng = PcgRng::for_turn(seed, turn, actor as u32);
                if self.resolver.begin_turn(&mut self.players[actor]).skip_turn {
                    continue;
                }

                let kit = &abilities[actor];
                let pick = &kit[(rng.next_u32() as usize) % kit.len()];
                let result = if pick.category == AbilityCategory::Heal {
                    let ally = lowest_health(&self.players).unwrap_or(actor);
                    if ally == actor {
                        self.resolver
                            .apply_ability_to_self(&mut self.players[actor], pick, &mut rng)
                    } else {
                        let (user, target) = pair_mut(&mut self.players, actor, ally);
                        self.resolver.apply_ability(user, target, pick, &mut rng)
                    }
                } else if pick.category.is_offensive() {
                    self.resolver
                        .apply_ability(&mut self.players[actor], &mut self.boss, pick, &mut rng)
                } else {
                    self.resolver
                        .apply_ability_to_self(&mut self.players[actor], pick, &mut rng)
                };
                self.check_invariants();
                self.log.push(result);
            }

            if self.is_over() {
                return self;
            }
            let boss_id = self.players.len() as u32;
            let mut rng = PcgRng::for_turn(seed, turn, boss_id);
            if self.resolver.begin_turn(&mut self.boss).skip_turn {
                continue;
            }
            let Some(target) = lowest_health(&self.players) else {
                return self;
            };

            let health_before = self.boss.health();
            let planned = self.resolver.boss_pending_move(&self.boss).clone();
            assert!(planned.hp_cost < health_before || planned.hp_cost == 0);
            if planned.effect.is_heal() {
                assert!(health_before < self.boss.max_health());
            }

            let result = self
                .resolver
                .boss_turn(&mut self.boss, &mut self.players[target], &mut rng);
            assert_eq!(result.action, planned.name);
            self.check_invariants();
            self.log.push(result);
        }
        self
    }

    fn check_invariants(&self) {
        for entity in self.players.iter().chain(std::iter::once(&self.boss)) {
            assert!(entity.health() <= entity.max_health(), "{}", entity.name());
            assert!(entity.core.energy.current() <= entity.core.energy.maximum());
            if entity.status() != Status::Burning {
                assert_eq!(entity.core.burn_turns, 0, "{} burn timer leaked", entity.name());
            }
        }
        let stats = self.boss.boss.as_ref().unwrap();
        assert!(stats.stress() <= stats.stress_max());
    }
}

fn pair_mut(players: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[test]
fn same_seed_replays_identically() {
    let first = Battle::new().run(0xDEC0DE);
    let second = Battle::new().run(0xDEC0DE);

    assert_eq!(first.log, second.log);
    assert_eq!(first.boss, second.boss);
    assert_eq!(first.players, second.players);
}

#[test]
fn different_seeds_diverge() {
    let first = Battle::new().run(1);
    let second = Battle::new().run(2);
    assert_ne!(first.log, second.log);
}

#[test]
fn invariants_hold_across_many_battles() {
    for seed in 0..64 {
        let battle = Battle::new().run(seed);
        assert!(!battle.log.is_empty());
        for result in &battle.log {
            if let Some(outcome) = result.outcome {
                if !outcome.is_hit() {
                    assert_eq!(result.damage_to(battle_core::Side::Target), 0);
                }
            }
        }
    }
}
