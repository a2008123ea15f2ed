//! Status effect graph.
//!
//! Vertices are status labels, edges are `(event) → destination` keyed per
//! source vertex. A transition replaces the current status (overwrite, not
//! stacking): Burning hit by a blade becomes Bleeding, and both Burning and
//! Bleeding collapse into Stunned on an insult.
//!
//! The graph only answers "what is the next label". Timers attached to a
//! label (burn duration, shield layers) are reset by the resolver.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Combat condition carried by every entity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    #[default]
    Normal,
    /// Quemado: damage at the start of each turn for a limited duration.
    #[strum(to_string = "burning", serialize = "quemado")]
    #[cfg_attr(feature = "serde", serde(alias = "quemado"))]
    Burning,
    /// Sangrado: damage at the start of each turn until cured.
    #[strum(to_string = "bleeding", serialize = "sangrado")]
    #[cfg_attr(feature = "serde", serde(alias = "sangrado"))]
    Bleeding,
    /// Escudo: at least one shield layer is up.
    #[strum(to_string = "shielded", serialize = "escudo")]
    #[cfg_attr(feature = "serde", serde(alias = "escudo"))]
    Shielded,
    /// Aturdido: loses the next turn.
    #[strum(to_string = "stunned", serialize = "aturdido")]
    #[cfg_attr(feature = "serde", serde(alias = "aturdido"))]
    Stunned,
    /// Motivado: energy costs are halved while the motivation timer runs.
    #[strum(to_string = "motivated", serialize = "motivado")]
    #[cfg_attr(feature = "serde", serde(alias = "motivado"))]
    Motivated,
    /// Takes extra damage and extra stress.
    Vulnerable,
    /// Curado: just recovered from an altered state.
    #[strum(to_string = "cured", serialize = "curado")]
    #[cfg_attr(feature = "serde", serde(alias = "curado"))]
    Cured,
    /// Enfurecido: provoked into a rage.
    #[strum(to_string = "enraged", serialize = "enfurecido")]
    #[cfg_attr(feature = "serde", serde(alias = "enfurecido"))]
    Enraged,
}

impl Status {
    /// Returns true for statuses that deal damage at the start of a turn.
    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, Self::Burning | Self::Bleeding)
    }
}

/// Event tag carried by abilities and raised by the resolver.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEvent {
    #[strum(to_string = "fire", serialize = "quemado", serialize = "fuego")]
    #[cfg_attr(feature = "serde", serde(alias = "quemado", alias = "fuego"))]
    Fire,
    #[strum(to_string = "blade", serialize = "sangrado", serialize = "corte")]
    #[cfg_attr(feature = "serde", serde(alias = "sangrado", alias = "corte"))]
    Blade,
    #[strum(to_string = "taunt", serialize = "aturdido")]
    #[cfg_attr(feature = "serde", serde(alias = "aturdido"))]
    Taunt,
    #[strum(to_string = "guard", serialize = "escudo")]
    #[cfg_attr(feature = "serde", serde(alias = "escudo"))]
    Guard,
    #[strum(to_string = "cure", serialize = "cura", serialize = "curar")]
    #[cfg_attr(feature = "serde", serde(alias = "cura", alias = "curar"))]
    Cure,
    /// Raised by the resolver when the last shield layer is consumed.
    Break,
    #[strum(to_string = "insult", serialize = "insulto")]
    #[cfg_attr(feature = "serde", serde(alias = "insulto"))]
    Insult,
    #[strum(to_string = "motivate", serialize = "motivado")]
    #[cfg_attr(feature = "serde", serde(alias = "motivado"))]
    Motivate,
    #[strum(to_string = "intimidate", serialize = "vulnerable")]
    #[cfg_attr(feature = "serde", serde(alias = "vulnerable"))]
    Intimidate,
    #[strum(to_string = "provoke", serialize = "enfurecer")]
    #[cfg_attr(feature = "serde", serde(alias = "enfurecer"))]
    Provoke,
}

/// Directed status graph: `source → (event → destination)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusGraph {
    edges: HashMap<Status, HashMap<StatusEvent, Status>>,
}

static STANDARD: LazyLock<StatusGraph> = LazyLock::new(StatusGraph::build_standard);

impl StatusGraph {
    /// Creates a graph with no edges (every transition is a no-op).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared instance of the standard edge catalogue.
    pub fn standard() -> &'static StatusGraph {
        &STANDARD
    }

    /// Adds (or replaces) the edge `from --event--> to`.
    pub fn with_edge(mut self, from: Status, event: StatusEvent, to: Status) -> Self {
        self.insert(from, event, to);
        self
    }

    /// Adds (or replaces) the edge `from --event--> to`.
    pub fn insert(&mut self, from: Status, event: StatusEvent, to: Status) {
        self.edges.entry(from).or_default().insert(event, to);
    }

    /// Returns the destination of `event` from `current`, or `current` itself
    /// when no such edge exists.
    pub fn transition(&self, current: Status, event: StatusEvent) -> Status {
        self.edges
            .get(&current)
            .and_then(|out| out.get(&event))
            .copied()
            .unwrap_or(current)
    }

    /// Outgoing edges of a status, in no particular order.
    pub fn edges_from(&self, status: Status) -> impl Iterator<Item = (StatusEvent, Status)> + '_ {
        self.edges
            .get(&status)
            .into_iter()
            .flat_map(|out| out.iter().map(|(event, to)| (*event, *to)))
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    fn build_standard() -> Self {
        use Status::*;
        use StatusEvent::*;

        let mut graph = Self::empty();

        // Normal and Cured react identically to fresh effects.
        for calm in [Normal, Cured] {
            graph.insert(calm, Fire, Burning);
            graph.insert(calm, Blade, Bleeding);
            graph.insert(calm, Taunt, Stunned);
            graph.insert(calm, Insult, Stunned);
            graph.insert(calm, Guard, Shielded);
            graph.insert(calm, Motivate, Motivated);
            graph.insert(calm, Intimidate, Vulnerable);
            graph.insert(calm, Provoke, Enraged);
        }

        // Damage-over-time states overwrite each other.
        graph.insert(Burning, Blade, Bleeding);
        graph.insert(Bleeding, Fire, Burning);
        for suffering in [Burning, Bleeding] {
            graph.insert(suffering, Insult, Stunned);
            graph.insert(suffering, Taunt, Stunned);
            graph.insert(suffering, Cure, Cured);
        }

        graph.insert(Stunned, Cure, Cured);

        graph.insert(Vulnerable, Fire, Burning);
        graph.insert(Vulnerable, Blade, Bleeding);
        graph.insert(Vulnerable, Cure, Cured);

        graph.insert(Enraged, Cure, Normal);
        graph.insert(Enraged, Insult, Stunned);

        graph.insert(Shielded, Break, Normal);
        graph.insert(Shielded, Motivate, Motivated);

        graph.insert(Motivated, Guard, Shielded);
        graph.insert(Motivated, Taunt, Stunned);
        graph.insert(Motivated, Intimidate, Vulnerable);
        graph.insert(Motivated, Fire, Burning);
        graph.insert(Motivated, Blade, Bleeding);

        graph
    }
}

/// Applies `event` to `current` using the standard edge catalogue.
pub fn status_transition(current: Status, event: StatusEvent) -> Status {
    StatusGraph::standard().transition(current, event)
}
