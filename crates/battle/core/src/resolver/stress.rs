use crate::config::StressTable;
use crate::graph::{Mood, Status};

/// Stress a boss gains from a hit that connected.
///
/// A rage (Enraged status or Rage mood) replaces the whole gain with a flat
/// amount. Otherwise the base or critical amount is raised by the suffering
/// bonus while Burning or Bleeding, and multiplied while Vulnerable.
pub fn stress_gain(critical: bool, status: Status, mood: Mood, table: &StressTable) -> u32 {
    if status == Status::Enraged || mood == Mood::Rage {
        return table.enraged_gain;
    }

    let base = if critical {
        table.critical_hit
    } else {
        table.base_hit
    };

    if status.is_damage_over_time() {
        base.saturating_add(table.suffering_bonus)
    } else if status == Status::Vulnerable {
        base.saturating_mul(table.vulnerable_factor)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gain(critical: bool, status: Status, mood: Mood) -> u32 {
        stress_gain(critical, status, mood, &StressTable::default())
    }

    #[test]
    fn base_and_critical() {
        assert_eq!(gain(false, Status::Normal, Mood::Normal), 15);
        assert_eq!(gain(true, Status::Normal, Mood::Normal), 25);
    }

    #[test]
    fn suffering_adds_bonus() {
        assert_eq!(gain(false, Status::Burning, Mood::Normal), 25);
        assert_eq!(gain(true, Status::Bleeding, Mood::Normal), 35);
    }

    #[test]
    fn vulnerable_doubles() {
        assert_eq!(gain(true, Status::Vulnerable, Mood::Normal), 50);
    }

    #[test]
    fn rage_flattens_gain() {
        assert_eq!(gain(true, Status::Normal, Mood::Rage), 5);
        assert_eq!(gain(false, Status::Enraged, Mood::Normal), 5);
    }

    #[test]
    fn rage_overrides_suffering_and_vulnerability() {
        assert_eq!(gain(false, Status::Burning, Mood::Rage), 5);
        assert_eq!(gain(true, Status::Bleeding, Mood::Rage), 5);
        assert_eq!(gain(false, Status::Vulnerable, Mood::Rage), 5);
        assert_eq!(gain(true, Status::Enraged, Mood::Stressed), 5);
    }
}
