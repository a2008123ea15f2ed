//! Boss strategy graph loader.

use std::path::Path;

use battle_core::{MoveArchetype, MoveId, StrategyEdge, StrategyGraph};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Strategy graph structure for RON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    /// Fallback move key.
    pub baseline: String,
    /// Move the boss opens with; the baseline when omitted.
    #[serde(default)]
    pub opening: Option<String>,
    pub moves: Vec<MoveArchetype>,
    pub edges: Vec<StrategyEdge>,
}

/// Loader for strategy graphs from RON files.
pub struct StrategyLoader;

impl StrategyLoader {
    /// Load a graph and the boss's opening move.
    pub fn load(path: &Path) -> LoadResult<(StrategyGraph, MoveId)> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<(StrategyGraph, MoveId)> {
        let spec: StrategySpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse strategy RON: {}", e))?;

        let graph = StrategyGraph::new(spec.moves, spec.edges, &spec.baseline)
            .map_err(|e| anyhow::anyhow!("Invalid strategy graph: {}", e))?;

        let opening = match spec.opening {
            Some(key) => graph
                .id_of(&key)
                .ok_or_else(|| anyhow::anyhow!("Unknown opening move '{}'", key))?,
            None => graph.baseline(),
        };

        Ok((graph, opening))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_defaults_to_baseline() {
        let (graph, opening) = StrategyLoader::parse(
            r#"(
                baseline: "jab",
                moves: [(key: "jab", name: "Jab", effect: damage(power: 1.0))],
                edges: [],
            )"#,
        )
        .unwrap();
        assert_eq!(opening, graph.baseline());
    }

    #[test]
    fn rejects_unknown_edge() {
        let err = StrategyLoader::parse(
            r#"(
                baseline: "jab",
                moves: [(key: "jab", name: "Jab", effect: damage(power: 1.0))],
                edges: [(from: "jab", to: "hook", cost: 2)],
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hook"), "{err}");
    }
}
