//! Boss strategy graph (move selection).
//!
//! Vertices are move archetypes; directed edges carry a positive transition
//! cost describing how naturally one move chains into the next (lower is more
//! likely). Each boss turn the selection runs from the boss's current
//! "mental" vertex:
//!
//! 1. Prim's algorithm grows a minimum spanning tree over the eligible
//!    vertices reachable from the current one.
//! 2. Every eligible direct neighbor scores `1 / (cost + ε)`, doubled when the
//!    edge belongs to the spanning tree.
//! 3. One weighted draw over the scores picks the next vertex; with no
//!    eligible neighbor the baseline move is used.
//!
//! The spanning tree is a bias, not an optimality guarantee.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::LazyLock;

use crate::env::RollOracle;
use crate::error::{CombatError, ErrorSeverity};
use crate::graph::status::StatusEvent;

/// Keeps zero-cost scores finite.
const SCORE_EPSILON: f64 = 1e-3;

/// Upper bound accepted for a move's magnitude fraction.
const MAX_MAGNITUDE: f64 = 10.0;

/// Errors raised while assembling a [`StrategyGraph`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StrategyError {
    #[error("strategy graph has no moves")]
    NoMoves,

    #[error("strategy graph has {0} moves, at most 65536 are supported")]
    TooManyMoves(usize),

    #[error("move '{0}' is defined more than once")]
    DuplicateMove(String),

    #[error("edge {from} -> {to} references unknown move '{missing}'")]
    UnknownMove {
        from: String,
        to: String,
        missing: String,
    },

    #[error("edge {from} -> {to} must have a positive cost")]
    ZeroCost { from: String, to: String },

    #[error("baseline move '{0}' is not defined")]
    UnknownBaseline(String),

    #[error("baseline move '{0}' must be a damage move without HP cost")]
    BaselineNotFree(String),

    #[error("move '{key}' has magnitude {value}, expected (0, 10]")]
    InvalidMagnitude { key: String, value: f64 },
}

impl CombatError for StrategyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoMoves => "strategy.no_moves",
            Self::TooManyMoves(_) => "strategy.too_many_moves",
            Self::DuplicateMove(_) => "strategy.duplicate_move",
            Self::UnknownMove { .. } => "strategy.unknown_move",
            Self::ZeroCost { .. } => "strategy.zero_cost",
            Self::UnknownBaseline(_) => "strategy.unknown_baseline",
            Self::BaselineNotFree(_) => "strategy.baseline_not_free",
            Self::InvalidMagnitude { .. } => "strategy.invalid_magnitude",
        }
    }
}

/// Index of a vertex in a [`StrategyGraph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveId(pub u16);

impl MoveId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stat a strategy move temporarily boosts on its user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BuffTarget {
    Attack,
    Defense,
}

/// What a move does, as fractions of a reference stat.
///
/// Damage fractions scale the boss's base attack; heal fractions scale its
/// maximum health.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveEffect {
    Damage { power: f64 },
    Heal { power: f64 },
    /// Damages the target and heals the user on a hit.
    Hybrid { damage: f64, heal: f64 },
}

impl MoveEffect {
    pub const fn is_heal(&self) -> bool {
        matches!(self, Self::Heal { .. })
    }

    /// Fraction of the attack stat used as base power, if the move strikes.
    pub const fn damage_fraction(&self) -> Option<f64> {
        match self {
            Self::Damage { power } => Some(*power),
            Self::Hybrid { damage, .. } => Some(*damage),
            Self::Heal { .. } => None,
        }
    }

    /// Fraction of maximum health restored, if the move heals.
    pub const fn heal_fraction(&self) -> Option<f64> {
        match self {
            Self::Heal { power } => Some(*power),
            Self::Hybrid { heal, .. } => Some(*heal),
            Self::Damage { .. } => None,
        }
    }

    fn magnitudes(&self) -> impl Iterator<Item = f64> {
        self.damage_fraction().into_iter().chain(self.heal_fraction())
    }
}

/// A boss move archetype (graph vertex).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveArchetype {
    /// Stable identifier used by edges and content files.
    pub key: String,
    pub name: String,
    pub effect: MoveEffect,
    /// Health paid by the boss to use the move.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_buff: Option<BuffTarget>,
    /// Status event raised on the target when the move connects.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inflicts: Option<StatusEvent>,
}

impl MoveArchetype {
    pub fn damage(key: &str, name: &str, power: f64) -> Self {
        Self {
            key: key.to_owned(),
            name: name.to_owned(),
            effect: MoveEffect::Damage { power },
            hp_cost: 0,
            self_buff: None,
            inflicts: None,
        }
    }

    pub fn heal(key: &str, name: &str, power: f64) -> Self {
        Self {
            effect: MoveEffect::Heal { power },
            ..Self::damage(key, name, power)
        }
    }

    pub fn hybrid(key: &str, name: &str, damage: f64, heal: f64) -> Self {
        Self {
            effect: MoveEffect::Hybrid { damage, heal },
            ..Self::damage(key, name, damage)
        }
    }

    pub fn with_hp_cost(mut self, hp_cost: u32) -> Self {
        self.hp_cost = hp_cost;
        self
    }

    pub fn with_self_buff(mut self, target: BuffTarget) -> Self {
        self.self_buff = Some(target);
        self
    }

    pub fn inflicting(mut self, event: StatusEvent) -> Self {
        self.inflicts = Some(event);
        self
    }

    /// Eligibility filter: the boss must be able to pay the HP cost, and a
    /// heal is pointless at full health.
    pub fn is_eligible(&self, hp: u32, hp_max: u32) -> bool {
        hp > self.hp_cost && !(self.effect.is_heal() && hp >= hp_max)
    }
}

/// Directed, weighted edge between two moves (by key).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyEdge {
    pub from: String,
    pub to: String,
    pub cost: u32,
}

impl StrategyEdge {
    pub fn new(from: &str, to: &str, cost: u32) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            cost,
        }
    }
}

/// Weighted, eligibility-filtered graph of boss moves.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyGraph {
    moves: Vec<MoveArchetype>,
    /// Outgoing `(target, cost)` pairs per vertex, sorted by target.
    adjacency: Vec<Vec<(MoveId, u32)>>,
    baseline: MoveId,
}

impl StrategyGraph {
    /// Validates and assembles a graph.
    pub fn new(
        moves: Vec<MoveArchetype>,
        edges: Vec<StrategyEdge>,
        baseline: &str,
    ) -> Result<Self, StrategyError> {
        if moves.is_empty() {
            return Err(StrategyError::NoMoves);
        }

        let mut index = HashMap::with_capacity(moves.len());
        for (i, archetype) in moves.iter().enumerate() {
            let id = u16::try_from(i).map_err(|_| StrategyError::TooManyMoves(moves.len()))?;
            if index.insert(archetype.key.clone(), MoveId(id)).is_some() {
                return Err(StrategyError::DuplicateMove(archetype.key.clone()));
            }
            for value in archetype.effect.magnitudes() {
                if !value.is_finite() || value <= 0.0 || value > MAX_MAGNITUDE {
                    return Err(StrategyError::InvalidMagnitude {
                        key: archetype.key.clone(),
                        value,
                    });
                }
            }
        }

        let baseline_id = *index
            .get(baseline)
            .ok_or_else(|| StrategyError::UnknownBaseline(baseline.to_owned()))?;
        let base = &moves[baseline_id.index()];
        if base.hp_cost > 0 || base.effect.is_heal() {
            return Err(StrategyError::BaselineNotFree(baseline.to_owned()));
        }

        let mut adjacency = vec![Vec::new(); moves.len()];
        for edge in edges {
            let lookup = |key: &str| {
                index.get(key).copied().ok_or_else(|| StrategyError::UnknownMove {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: key.to_owned(),
                })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            if edge.cost == 0 {
                return Err(StrategyError::ZeroCost {
                    from: edge.from,
                    to: edge.to,
                });
            }
            adjacency[from.index()].push((to, edge.cost));
        }
        for out in &mut adjacency {
            out.sort_unstable();
        }

        Ok(Self {
            moves,
            adjacency,
            baseline: baseline_id,
        })
    }

    /// Shared instance of the boss move set used when no content file
    /// overrides it.
    pub fn standard() -> &'static StrategyGraph {
        &STANDARD
    }

    fn build_standard() -> Self {
        let moves = standard_moves();
        let mut adjacency = vec![Vec::new(); moves.len()];
        for (from, to, cost) in STANDARD_EDGES {
            adjacency[from.index()].push((to, cost));
        }
        for out in &mut adjacency {
            out.sort_unstable();
        }

        Self {
            moves,
            adjacency,
            baseline: BASIC_SHOT,
        }
    }

    pub fn baseline(&self) -> MoveId {
        self.baseline
    }

    pub fn get(&self, id: MoveId) -> Option<&MoveArchetype> {
        self.moves.get(id.index())
    }

    /// Returns the move, or the baseline when `id` is out of range.
    pub fn get_or_baseline(&self, id: MoveId) -> &MoveArchetype {
        self.get(id).unwrap_or(&self.moves[self.baseline.index()])
    }

    pub fn id_of(&self, key: &str) -> Option<MoveId> {
        self.moves
            .iter()
            .position(|m| m.key == key)
            .and_then(|i| u16::try_from(i).ok())
            .map(MoveId)
    }

    pub fn moves(&self) -> &[MoveArchetype] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Outgoing `(target, cost)` pairs of a vertex.
    pub fn neighbors(&self, id: MoveId) -> &[(MoveId, u32)] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a move passes the eligibility filter at the given health.
    pub fn is_eligible(&self, id: MoveId, hp: u32, hp_max: u32) -> bool {
        self.get(id).is_some_and(|m| m.is_eligible(hp, hp_max))
    }

    /// Prim's algorithm over eligible vertices reachable from `start`.
    ///
    /// Ties on cost break towards the lower source index, then the lower
    /// target index. The start vertex is included even when it is not
    /// eligible itself.
    pub fn spanning_edges(
        &self,
        start: MoveId,
        eligible: impl Fn(MoveId) -> bool,
    ) -> HashSet<(MoveId, MoveId)> {
        let mut tree = HashSet::new();
        if start.index() >= self.moves.len() {
            return tree;
        }

        let mut visited = vec![false; self.moves.len()];
        let mut frontier = BinaryHeap::new();
        visited[start.index()] = true;
        self.push_frontier(start, &eligible, &visited, &mut frontier);

        while let Some(Reverse((_, from, to))) = frontier.pop() {
            if visited[to.index()] {
                continue;
            }
            visited[to.index()] = true;
            tree.insert((from, to));
            self.push_frontier(to, &eligible, &visited, &mut frontier);
        }

        tree
    }

    fn push_frontier(
        &self,
        from: MoveId,
        eligible: &impl Fn(MoveId) -> bool,
        visited: &[bool],
        frontier: &mut BinaryHeap<Reverse<(u32, MoveId, MoveId)>>,
    ) {
        for &(to, cost) in self.neighbors(from) {
            if !visited[to.index()] && eligible(to) {
                frontier.push(Reverse((cost, from, to)));
            }
        }
    }

    /// Scores every eligible direct neighbor of `current`.
    pub fn score_neighbors(&self, current: MoveId, hp: u32, hp_max: u32) -> Vec<(MoveId, f64)> {
        let eligible = |id: MoveId| self.is_eligible(id, hp, hp_max);
        let tree = self.spanning_edges(current, eligible);

        self.neighbors(current)
            .iter()
            .filter(|(to, _)| eligible(*to))
            .map(|&(to, cost)| {
                let mut score = 1.0 / (f64::from(cost) + SCORE_EPSILON);
                if tree.contains(&(current, to)) {
                    score *= 2.0;
                }
                (to, score)
            })
            .collect()
    }

    /// Picks the vertex following `current`.
    ///
    /// Draws exactly one roll when at least one neighbor is eligible and none
    /// otherwise.
    pub fn choose_next(
        &self,
        current: MoveId,
        hp: u32,
        hp_max: u32,
        rng: &mut impl RollOracle,
    ) -> MoveId {
        let scored = self.score_neighbors(current, hp, hp_max);
        if scored.is_empty() {
            tracing::warn!(
                "strategy: no eligible move after '{}', falling back to baseline",
                self.get_or_baseline(current).key
            );
            return self.baseline;
        }

        let total: f64 = scored.iter().map(|(_, score)| score).sum();
        let target = rng.roll() * total;

        let mut acc = 0.0;
        let mut chosen = scored[scored.len() - 1].0;
        for &(id, score) in &scored {
            acc += score;
            if target < acc {
                chosen = id;
                break;
            }
        }

        tracing::debug!(
            "strategy: {} -> {} (candidates={:?})",
            self.get_or_baseline(current).key,
            self.get_or_baseline(chosen).key,
            scored
                .iter()
                .map(|(id, s)| (self.get_or_baseline(*id).key.as_str(), *s))
                .collect::<Vec<_>>()
        );

        chosen
    }
}

const BASIC_SHOT: MoveId = MoveId(0);
const BLADE: MoveId = MoveId(1);
const INCENDIARY: MoveId = MoveId(2);
const TACTICAL_HEAL: MoveId = MoveId(3);
const HYBRID: MoveId = MoveId(4);
const EMPOWERED_INCENDIARY: MoveId = MoveId(5);

static STANDARD: LazyLock<StrategyGraph> = LazyLock::new(StrategyGraph::build_standard);

/// Indexed by the `MoveId` constants above.
fn standard_moves() -> Vec<MoveArchetype> {
    vec![
        MoveArchetype::damage("basic_shot", "Disparo", 1.0),
        MoveArchetype::damage("blade", "Cuchillada", 1.2).inflicting(StatusEvent::Blade),
        MoveArchetype::damage("incendiary", "Molotov", 1.1).inflicting(StatusEvent::Fire),
        MoveArchetype::heal("tactical_heal", "Retirada Táctica", 0.15)
            .with_self_buff(BuffTarget::Defense),
        MoveArchetype::hybrid("hybrid", "Golpe Vampírico", 0.8, 0.08),
        MoveArchetype::damage("empowered_incendiary", "Molotov Potenciado", 1.6)
            .with_hp_cost(30)
            .with_self_buff(BuffTarget::Attack)
            .inflicting(StatusEvent::Fire),
    ]
}

const STANDARD_EDGES: [(MoveId, MoveId, u32); 16] = [
    (BASIC_SHOT, BLADE, 2),
    (BASIC_SHOT, INCENDIARY, 3),
    (BASIC_SHOT, TACTICAL_HEAL, 5),
    (BLADE, BASIC_SHOT, 1),
    (BLADE, INCENDIARY, 2),
    (BLADE, HYBRID, 3),
    (INCENDIARY, BASIC_SHOT, 2),
    (INCENDIARY, BLADE, 3),
    (INCENDIARY, EMPOWERED_INCENDIARY, 4),
    (TACTICAL_HEAL, BASIC_SHOT, 1),
    (TACTICAL_HEAL, HYBRID, 2),
    (HYBRID, BASIC_SHOT, 2),
    (HYBRID, EMPOWERED_INCENDIARY, 3),
    (HYBRID, TACTICAL_HEAL, 4),
    (EMPOWERED_INCENDIARY, BASIC_SHOT, 1),
    (EMPOWERED_INCENDIARY, TACTICAL_HEAL, 3),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRolls};

    fn id(graph: &StrategyGraph, key: &str) -> MoveId {
        graph.id_of(key).expect("move exists")
    }

    #[test]
    fn standard_graph_passes_validation() {
        let moves = standard_moves();
        let edges = STANDARD_EDGES
            .iter()
            .map(|(from, to, cost)| {
                StrategyEdge::new(&moves[from.index()].key, &moves[to.index()].key, *cost)
            })
            .collect();

        let validated = StrategyGraph::new(moves, edges, "basic_shot");
        assert_eq!(validated.as_ref(), Ok(StrategyGraph::standard()));
    }

    #[test]
    fn rejects_more_moves_than_ids() {
        let moves: Vec<_> = (0..=usize::from(u16::MAX) + 1)
            .map(|i| MoveArchetype::damage(&format!("m{i}"), "Move", 1.0))
            .collect();
        assert_eq!(
            StrategyGraph::new(moves, Vec::new(), "m0"),
            Err(StrategyError::TooManyMoves(65_537))
        );
    }

    #[test]
    fn never_picks_unaffordable_or_redundant_moves() {
        let graph = StrategyGraph::standard();
        let mut rng = PcgRng::new(1234);
        let hp_max = 300;

        for hp in [1, 5, 29, 30, 31, 120, 299, 300] {
            for start in 0..graph.len() {
                for _ in 0..50 {
                    let next = graph.choose_next(MoveId(start as u16), hp, hp_max, &mut rng);
                    let chosen = graph.get(next).expect("valid id");
                    if next != graph.baseline() {
                        assert!(chosen.hp_cost < hp, "{} at hp {hp}", chosen.key);
                    }
                    if hp == hp_max {
                        assert!(!chosen.effect.is_heal(), "heal chosen at full hp");
                    }
                }
            }
        }
    }

    #[test]
    fn falls_back_to_baseline_without_eligible_neighbors() {
        let moves = vec![
            MoveArchetype::damage("jab", "Jab", 1.0),
            MoveArchetype::heal("mend", "Mend", 0.2),
        ];
        let edges = vec![StrategyEdge::new("jab", "mend", 1)];
        let graph = StrategyGraph::new(moves, edges, "jab").unwrap();
        let mut rolls = ScriptedRolls::new([0.5]);

        let next = graph.choose_next(id(&graph, "jab"), 100, 100, &mut rolls);
        assert_eq!(next, graph.baseline());
        assert_eq!(rolls.remaining(), 1, "fallback draws no roll");
    }

    #[test]
    fn spanning_tree_prefers_cheap_chains() {
        let graph = StrategyGraph::standard();
        let start = id(&graph, "basic_shot");
        let tree = graph.spanning_edges(start, |_| true);

        assert_eq!(tree.len(), graph.len() - 1);
        assert!(tree.contains(&(start, id(&graph, "blade"))));
        // incendiary is reached through blade (2) rather than directly (3)
        assert!(tree.contains(&(id(&graph, "blade"), id(&graph, "incendiary"))));
        assert!(!tree.contains(&(start, id(&graph, "incendiary"))));
    }

    #[test]
    fn spanning_tree_skips_ineligible_vertices() {
        let graph = StrategyGraph::standard();
        let heal = id(&graph, "tactical_heal");
        let tree = graph.spanning_edges(graph.baseline(), |m| m != heal);
        assert!(tree.iter().all(|(_, to)| *to != heal));
    }

    #[test]
    fn spanning_edges_double_the_score() {
        let graph = StrategyGraph::standard();
        let scores = graph.score_neighbors(graph.baseline(), 200, 300);
        let score_of = |key: &str| {
            scores
                .iter()
                .find(|(m, _)| *m == id(&graph, key))
                .map(|(_, s)| *s)
                .unwrap()
        };

        // blade (cost 2) is a tree edge, incendiary (cost 3) is not
        assert!((score_of("blade") - 2.0 / (2.0 + SCORE_EPSILON)).abs() < 1e-9);
        assert!((score_of("incendiary") - 1.0 / (3.0 + SCORE_EPSILON)).abs() < 1e-9);
    }

    #[test]
    fn weighted_draw_follows_cumulative_scores() {
        let graph = StrategyGraph::standard();
        let start = graph.baseline();
        let low = graph.choose_next(start, 200, 300, &mut ScriptedRolls::new([0.0]));
        let high = graph.choose_next(start, 200, 300, &mut ScriptedRolls::new([0.999_999]));

        assert_eq!(low, id(&graph, "blade"));
        assert_eq!(high, id(&graph, "tactical_heal"));
    }

    #[test]
    fn rejects_unknown_edge_targets() {
        let moves = vec![MoveArchetype::damage("jab", "Jab", 1.0)];
        let edges = vec![StrategyEdge::new("jab", "uppercut", 1)];
        assert!(matches!(
            StrategyGraph::new(moves, edges, "jab"),
            Err(StrategyError::UnknownMove { missing, .. }) if missing == "uppercut"
        ));
    }

    #[test]
    fn rejects_costly_baseline() {
        let moves = vec![MoveArchetype::damage("nuke", "Nuke", 3.0).with_hp_cost(10)];
        assert_eq!(
            StrategyGraph::new(moves, Vec::new(), "nuke"),
            Err(StrategyError::BaselineNotFree("nuke".into()))
        );
    }

    #[test]
    fn rejects_zero_cost_and_duplicates() {
        let jab = MoveArchetype::damage("jab", "Jab", 1.0);
        assert!(matches!(
            StrategyGraph::new(vec![jab.clone()], vec![StrategyEdge::new("jab", "jab", 0)], "jab"),
            Err(StrategyError::ZeroCost { .. })
        ));
        assert_eq!(
            StrategyGraph::new(vec![jab.clone(), jab], Vec::new(), "jab"),
            Err(StrategyError::DuplicateMove("jab".into()))
        );
    }
}
