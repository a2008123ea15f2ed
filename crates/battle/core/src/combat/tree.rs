use crate::config::AttackTable;
use crate::env::RollOracle;

use super::outcome::{AttackOutcome, OutcomeKind};

/// Node of the attack decision tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionNode {
    /// Draws a roll and descends into `pass` when `roll <= threshold`.
    Branch {
        question: &'static str,
        threshold: f64,
        pass: Box<DecisionNode>,
        fail: Box<DecisionNode>,
    },
    Leaf(OutcomeKind),
}

impl DecisionNode {
    fn branch(question: &'static str, threshold: f64, pass: Self, fail: Self) -> Self {
        Self::Branch {
            question,
            threshold,
            pass: Box::new(pass),
            fail: Box::new(fail),
        }
    }

    /// Longest root-to-leaf path, in branches.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch { pass, fail, .. } => 1 + pass.depth().max(fail.depth()),
        }
    }
}

/// Binary decision tree resolving an attack:
///
/// ```text
///              hits?
///            /       \
///      critical?    stumbles?
///       /    \       /     \
///  Critical Normal Stumble  Miss
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AttackTree {
    root: DecisionNode,
    critical_multiplier: f64,
    stumble_damage: u32,
}

impl AttackTree {
    pub fn new(table: &AttackTable) -> Self {
        use OutcomeKind::*;

        let root = DecisionNode::branch(
            "hits",
            table.hit.pass,
            DecisionNode::branch(
                "critical",
                table.critical.pass,
                DecisionNode::Leaf(Critical),
                DecisionNode::Leaf(Normal),
            ),
            DecisionNode::branch(
                "stumbles",
                table.stumble.pass,
                DecisionNode::Leaf(Stumble),
                DecisionNode::Leaf(Miss),
            ),
        );

        Self {
            root,
            critical_multiplier: table.critical_multiplier,
            stumble_damage: table.stumble_damage,
        }
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Walks the tree, drawing one roll per branch (two per attack).
    pub fn resolve(&self, base_power: u32, rng: &mut impl RollOracle) -> AttackOutcome {
        let mut node = &self.root;
        let kind = loop {
            match node {
                DecisionNode::Leaf(kind) => break *kind,
                DecisionNode::Branch {
                    question,
                    threshold,
                    pass,
                    fail,
                } => {
                    let roll = rng.roll();
                    let passed = roll <= *threshold;
                    tracing::trace!(
                        "attack tree: {question}? roll={roll:.4} threshold={threshold} -> {passed}"
                    );
                    node = if passed { &**pass } else { &**fail };
                }
            }
        };

        let outcome = match kind {
            OutcomeKind::Normal => AttackOutcome::Normal {
                damage: scale(base_power, 1.0),
            },
            OutcomeKind::Critical => AttackOutcome::Critical {
                damage: scale(base_power, self.critical_multiplier),
            },
            OutcomeKind::Miss => AttackOutcome::Miss,
            OutcomeKind::Stumble => AttackOutcome::Stumble {
                self_damage: self.stumble_damage,
            },
        };

        tracing::debug!(
            "attack tree: base={base_power} -> {} ({})",
            outcome.kind(),
            outcome.damage()
        );
        outcome
    }
}

/// Resolves one attack with a tree built from `table`.
pub fn resolve_attack(
    base_power: u32,
    table: &AttackTable,
    rng: &mut impl RollOracle,
) -> AttackOutcome {
    AttackTree::new(table).resolve(base_power, rng)
}

/// `floor(value × multiplier)`, saturating at `u32::MAX`.
pub(crate) fn scale(value: u32, multiplier: f64) -> u32 {
    let scaled = (f64::from(value) * multiplier).floor();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRolls};

    fn table() -> AttackTable {
        AttackTable::default()
    }

    #[test]
    fn forced_critical_scenario() {
        let mut rolls = ScriptedRolls::new([0.10, 0.05]);
        let outcome = resolve_attack(20, &table(), &mut rolls);
        assert_eq!(outcome, AttackOutcome::Critical { damage: 30 });
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn each_leaf_is_reachable() {
        let tree = AttackTree::new(&table());
        let cases = [
            ([0.50, 0.90], AttackOutcome::Normal { damage: 20 }),
            ([0.85, 0.20], AttackOutcome::Critical { damage: 30 }),
            ([0.90, 0.05], AttackOutcome::Stumble { self_damage: 10 }),
            ([0.90, 0.50], AttackOutcome::Miss),
        ];
        for (rolls, expected) in cases {
            assert_eq!(tree.resolve(20, &mut ScriptedRolls::new(rolls)), expected);
        }
    }

    #[test]
    fn damage_is_floored() {
        let mut rolls = ScriptedRolls::new([0.0, 0.0]);
        assert_eq!(
            resolve_attack(15, &table(), &mut rolls),
            AttackOutcome::Critical { damage: 22 }
        );
    }

    #[test]
    fn seeded_resolution_is_deterministic() {
        let tree = AttackTree::new(&table());
        let mut a = PcgRng::new(2024);
        let mut b = PcgRng::new(2024);
        for base in 0..200 {
            let left = tree.resolve(base, &mut a);
            assert_eq!(left, tree.resolve(base, &mut b));
            if left.is_hit() {
                assert!(left.damage() >= base);
            }
        }
    }

    #[test]
    fn tree_has_fixed_depth() {
        assert_eq!(AttackTree::new(&table()).root().depth(), 2);
    }

    #[test]
    fn scale_saturates() {
        assert_eq!(scale(u32::MAX, 2.0), u32::MAX);
        assert_eq!(scale(7, 0.5), 3);
    }
}
