use serde::{Deserialize, Serialize};

/// Side whose action is expected next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TurnOwner {
    Player,
    Monster,
}

/// Encounter result. Every variant except `Ongoing` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Victory,
    Defeat,
    Fled,
    ForceExited,
}

impl Outcome {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Shared skill-point pool, always within `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPoints {
    current: u32,
    max: u32,
}

impl SkillPoints {
    pub fn new(initial: u32, max: u32) -> Self {
        Self {
            current: initial.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Deducts `cost`. Returns false and leaves the pool untouched when short.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        true
    }

    /// Adds up to `amount`, clamped at max. Returns the points actually gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_bounded() {
        let mut sp = SkillPoints::new(12, 10);
        assert_eq!(sp.current(), 10);
        assert_eq!(sp.gain(5), 0);
        assert!(!sp.spend(11));
        assert!(sp.spend(10));
        assert_eq!(sp.current(), 0);
        assert_eq!(sp.gain(3), 3);
    }
}
