//! Boss mood graph (behavioral FSM).
//!
//! Each boss turn the resolver derives a symbolic [`MoodEvent`] from the
//! boss's vital signs and feeds it through the mood graph. The resulting mood
//! carries an `(attack, defense)` multiplier pair applied to outgoing and
//! incoming damage.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::MoodThresholds;

/// Behavioral state of a boss.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mood {
    #[default]
    Normal,
    /// Furia: offense up, defense down.
    #[strum(to_string = "rage", serialize = "furia")]
    #[cfg_attr(feature = "serde", serde(alias = "furia"))]
    Rage,
    /// Defensivo: offense down, defense up.
    #[strum(to_string = "defensive", serialize = "defensivo")]
    #[cfg_attr(feature = "serde", serde(alias = "defensivo"))]
    Defensive,
    /// Confusion: both down.
    #[strum(to_string = "confused", serialize = "confusion")]
    #[cfg_attr(feature = "serde", serde(alias = "confusion"))]
    Confused,
    /// Estresado: offense slightly up, defense slightly down.
    #[strum(to_string = "stressed", serialize = "estresado")]
    #[cfg_attr(feature = "serde", serde(alias = "estresado"))]
    Stressed,
}

/// Symbolic reading of the boss's vitals.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoodEvent {
    /// estres_alto
    #[strum(to_string = "stress_high", serialize = "estres_alto")]
    StressHigh,
    /// vida_baja
    #[strum(to_string = "low_health", serialize = "vida_baja")]
    LowHealth,
    /// presion
    #[strum(to_string = "pressure", serialize = "presion")]
    Pressure,
    /// calmado
    #[strum(to_string = "calm", serialize = "calmado")]
    Calm,
    /// recuperado
    #[strum(to_string = "recovered", serialize = "recuperado")]
    Recovered,
}

/// Damage multipliers attached to a mood.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoodBonuses {
    /// Multiplies the boss's outgoing damage.
    pub attack: f64,
    /// Divides the damage the boss receives.
    pub defense: f64,
}

impl MoodBonuses {
    pub const NEUTRAL: Self = Self {
        attack: 1.0,
        defense: 1.0,
    };

    pub const fn new(attack: f64, defense: f64) -> Self {
        Self { attack, defense }
    }
}

impl Default for MoodBonuses {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Derives the mood event for the current vitals.
///
/// Precedence, first match wins:
///
/// 1. stress ≥ `stress_high` → [`MoodEvent::StressHigh`]
/// 2. health% < `low_health_percent` → [`MoodEvent::LowHealth`]
/// 3. stress ≥ `stress_pressure` → [`MoodEvent::Pressure`]
/// 4. stress < `stress_calm` and health% ≥ `high_health_percent` → [`MoodEvent::Calm`]
/// 5. health% ≥ `high_health_percent` → [`MoodEvent::Recovered`]
pub fn derive_mood_event(
    health_percent: u32,
    stress: u32,
    thresholds: &MoodThresholds,
) -> Option<MoodEvent> {
    if stress >= thresholds.stress_high {
        Some(MoodEvent::StressHigh)
    } else if health_percent < thresholds.low_health_percent {
        Some(MoodEvent::LowHealth)
    } else if stress >= thresholds.stress_pressure {
        Some(MoodEvent::Pressure)
    } else if stress < thresholds.stress_calm && health_percent >= thresholds.high_health_percent {
        Some(MoodEvent::Calm)
    } else if health_percent >= thresholds.high_health_percent {
        Some(MoodEvent::Recovered)
    } else {
        None
    }
}

/// Mood transition table plus the multipliers of each mood.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoodGraph {
    edges: HashMap<Mood, HashMap<MoodEvent, Mood>>,
    bonuses: HashMap<Mood, MoodBonuses>,
}

static STANDARD: LazyLock<MoodGraph> = LazyLock::new(MoodGraph::build_standard);

impl MoodGraph {
    /// Shared instance of the standard boss temperament.
    pub fn standard() -> &'static MoodGraph {
        &STANDARD
    }

    pub fn insert(&mut self, from: Mood, event: MoodEvent, to: Mood) {
        self.edges.entry(from).or_default().insert(event, to);
    }

    pub fn set_bonuses(&mut self, mood: Mood, bonuses: MoodBonuses) {
        self.bonuses.insert(mood, bonuses);
    }

    /// Returns the next mood; unmatched pairs leave the mood unchanged.
    pub fn transition(&self, current: Mood, event: MoodEvent) -> Mood {
        self.edges
            .get(&current)
            .and_then(|out| out.get(&event))
            .copied()
            .unwrap_or(current)
    }

    /// Multiplier pair for a mood, neutral when the mood has no entry.
    pub fn bonuses(&self, mood: Mood) -> MoodBonuses {
        self.bonuses.get(&mood).copied().unwrap_or_default()
    }

    /// Derives the event for the given vitals and applies it.
    pub fn evaluate(
        &self,
        current: Mood,
        health_percent: u32,
        stress: u32,
        thresholds: &MoodThresholds,
    ) -> Mood {
        match derive_mood_event(health_percent, stress, thresholds) {
            Some(event) => self.transition(current, event),
            None => current,
        }
    }

    fn build_standard() -> Self {
        use Mood::*;
        use MoodEvent::*;

        let mut graph = Self::default();

        graph.set_bonuses(Normal, MoodBonuses::NEUTRAL);
        graph.set_bonuses(Rage, MoodBonuses::new(1.5, 0.7));
        graph.set_bonuses(Defensive, MoodBonuses::new(0.7, 1.5));
        graph.set_bonuses(Confused, MoodBonuses::new(0.8, 0.8));
        graph.set_bonuses(Stressed, MoodBonuses::new(1.2, 0.9));

        graph.insert(Normal, LowHealth, Rage);
        graph.insert(Normal, StressHigh, Stressed);
        graph.insert(Normal, Pressure, Defensive);

        graph.insert(Stressed, StressHigh, Confused);
        graph.insert(Stressed, LowHealth, Rage);
        graph.insert(Stressed, Calm, Normal);

        graph.insert(Rage, StressHigh, Confused);
        graph.insert(Rage, Calm, Normal);
        graph.insert(Rage, Recovered, Normal);

        graph.insert(Defensive, StressHigh, Stressed);
        graph.insert(Defensive, LowHealth, Rage);
        graph.insert(Defensive, Calm, Normal);
        graph.insert(Defensive, Recovered, Normal);

        graph.insert(Confused, LowHealth, Rage);
        graph.insert(Confused, Calm, Normal);
        graph.insert(Confused, Recovered, Defensive);

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> MoodThresholds {
        MoodThresholds::default()
    }

    #[test]
    fn low_health_enrages_regardless_of_moderate_stress() {
        let graph = MoodGraph::standard();
        for stress in 0..thresholds().stress_high {
            for hp in 0..thresholds().low_health_percent {
                assert_eq!(
                    graph.evaluate(Mood::Normal, hp, stress, &thresholds()),
                    Mood::Rage,
                    "hp {hp}% stress {stress}"
                );
            }
        }
    }

    #[test]
    fn high_stress_takes_precedence_over_low_health() {
        assert_eq!(
            derive_mood_event(10, 90, &thresholds()),
            Some(MoodEvent::StressHigh)
        );
    }

    #[test]
    fn event_ladder() {
        let t = thresholds();
        assert_eq!(derive_mood_event(50, 45, &t), Some(MoodEvent::Pressure));
        assert_eq!(derive_mood_event(90, 5, &t), Some(MoodEvent::Calm));
        assert_eq!(derive_mood_event(90, 30, &t), Some(MoodEvent::Recovered));
        assert_eq!(derive_mood_event(50, 30, &t), None);
    }

    #[test]
    fn standard_edges() {
        use Mood::*;
        use MoodEvent::*;

        let graph = MoodGraph::standard();
        let cases = [
            (Normal, StressHigh, Stressed),
            (Normal, Pressure, Defensive),
            (Normal, LowHealth, Rage),
            (Stressed, StressHigh, Confused),
            (Stressed, LowHealth, Rage),
            (Stressed, Calm, Normal),
            (Rage, StressHigh, Confused),
            (Rage, Recovered, Normal),
            (Defensive, StressHigh, Stressed),
            (Defensive, Recovered, Normal),
            (Confused, Recovered, Defensive),
            (Confused, LowHealth, Rage),
            (Confused, Calm, Normal),
        ];
        for (from, event, to) in cases {
            assert_eq!(graph.transition(from, event), to, "{from} + {event}");
        }
    }

    #[test]
    fn vitals_walk_the_graph() {
        let graph = MoodGraph::standard();
        let t = thresholds();

        let stressed = graph.evaluate(Mood::Normal, 100, 85, &t);
        assert_eq!(stressed, Mood::Stressed);
        assert_eq!(graph.evaluate(stressed, 100, 85, &t), Mood::Confused);
        assert_eq!(graph.evaluate(Mood::Normal, 50, 45, &t), Mood::Defensive);
        assert_eq!(graph.evaluate(Mood::Confused, 90, 30, &t), Mood::Defensive);
    }

    #[test]
    fn standard_bonuses() {
        let graph = MoodGraph::standard();
        let cases = [
            (Mood::Normal, 1.0, 1.0),
            (Mood::Rage, 1.5, 0.7),
            (Mood::Defensive, 0.7, 1.5),
            (Mood::Confused, 0.8, 0.8),
            (Mood::Stressed, 1.2, 0.9),
        ];
        for (mood, attack, defense) in cases {
            assert_eq!(graph.bonuses(mood), MoodBonuses::new(attack, defense), "{mood}");
        }
    }

    #[test]
    fn unmatched_event_keeps_mood() {
        let graph = MoodGraph::standard();
        assert_eq!(graph.transition(Mood::Normal, MoodEvent::Calm), Mood::Normal);
        assert_eq!(graph.transition(Mood::Rage, MoodEvent::LowHealth), Mood::Rage);
    }

    #[test]
    fn rage_trades_defense_for_offense() {
        let bonuses = MoodGraph::standard().bonuses(Mood::Rage);
        assert!(bonuses.attack > 1.0);
        assert!(bonuses.defense < 1.0);
    }

    #[test]
    fn missing_bonuses_are_neutral() {
        assert_eq!(MoodGraph::default().bonuses(Mood::Confused), MoodBonuses::NEUTRAL);
    }

    #[test]
    fn spanish_names_parse() {
        assert_eq!("furia".parse::<Mood>(), Ok(Mood::Rage));
        assert_eq!("vida_baja".parse::<MoodEvent>(), Ok(MoodEvent::LowHealth));
    }
}
