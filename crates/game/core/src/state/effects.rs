//! Live status effects on a participant.
//!
//! Durations count the holder's turns. An effect applied with duration `n`
//! ticks `n` times at the start of the holder's turns and is removed by the
//! tick that brings it to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::EffectId;

/// Effects keyed by catalog id; at most one instance per effect.
pub type ActiveEffects = BTreeMap<EffectId, EffectInstance>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInstance {
    /// Remaining turns.
    pub duration: u32,
    /// Percentage payload (DOT/HOT/stat modifiers); zero for other kinds.
    #[serde(default)]
    pub magnitude: i32,
    /// Present only on stacking effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacks: Option<u32>,
}

impl EffectInstance {
    pub fn new(duration: u32, magnitude: i32) -> Self {
        Self {
            duration,
            magnitude,
            stacks: None,
        }
    }

    pub fn stacked(duration: u32, stacks: u32) -> Self {
        Self {
            duration,
            magnitude: 0,
            stacks: Some(stacks),
        }
    }
}
