// ============================================================================
// Reconciler
// Keyed diff between two snapshots plus roll direction
// ============================================================================

use crate::domain::{NumberFlowData, NumberFlowTrend, NumberPart, NumberPartKey};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Odometer instruction for a digit that persists with a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DigitUpdate {
    pub key: NumberPartKey,
    /// Previous digit value, `None` if the previous part was not a digit
    pub old: Option<u8>,
    pub new: u8,
    pub direction: i32,
}

/// A persisting part whose index in the row changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartMove {
    pub key: NumberPartKey,
    pub from: usize,
    pub to: usize,
}

/// Result of reconciling two snapshots
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReconcileDiff {
    /// Keys only in the previous snapshot, in previous render order
    pub removed: Vec<NumberPartKey>,
    /// Keys only in the next snapshot with their parts, in next render order
    pub added: Vec<(NumberPartKey, NumberPart)>,
    /// Persisting digits whose value changed, in next render order
    pub updated: Vec<DigitUpdate>,
    /// Target arrangement: keys of the next snapshot in render order
    pub final_order: Vec<NumberPartKey>,
    /// Arrangement before the update
    pub previous_order: Vec<NumberPartKey>,
    /// Trend-derived roll direction hint
    pub direction: i32,
}

impl ReconcileDiff {
    /// True when nothing is added, removed or rolled.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.updated.is_empty()
    }

    pub fn is_removed(&self, key: NumberPartKey) -> bool {
        self.removed.contains(&key)
    }

    pub fn is_added(&self, key: NumberPartKey) -> bool {
        self.added.iter().any(|(k, _)| *k == key)
    }

    /// Keys present in both snapshots, in next render order.
    pub fn existing(&self) -> Vec<NumberPartKey> {
        let previous: HashSet<NumberPartKey> = self.previous_order.iter().copied().collect();
        self.final_order
            .iter()
            .copied()
            .filter(|key| previous.contains(key))
            .collect()
    }

    /// Persisting keys whose row index differs between the two arrangements.
    pub fn moves(&self) -> Vec<PartMove> {
        let previous: HashMap<NumberPartKey, usize> = self
            .previous_order
            .iter()
            .enumerate()
            .map(|(index, key)| (*key, index))
            .collect();

        self.final_order
            .iter()
            .enumerate()
            .filter_map(|(to, key)| {
                let from = *previous.get(key)?;
                (from != to).then_some(PartMove { key: *key, from, to })
            })
            .collect()
    }
}

/// Compute the keyed diff from `previous` to `next`.
///
/// Never fails: snapshots with disjoint keys reconcile to "remove every old
/// part, add every new part".
pub fn reconcile(
    previous: &NumberFlowData,
    next: &NumberFlowData,
    trend: &NumberFlowTrend,
) -> ReconcileDiff {
    let direction = trend.direction(previous.numeric_value, next.numeric_value);

    let old_parts: HashMap<NumberPartKey, &NumberPart> =
        previous.all_parts().map(|part| (part.key(), part)).collect();
    let new_keys: HashSet<NumberPartKey> = next.all_parts().map(NumberPart::key).collect();

    let previous_order = previous.keys();
    let final_order = next.keys();

    let removed: Vec<NumberPartKey> = previous_order
        .iter()
        .copied()
        .filter(|key| !new_keys.contains(key))
        .collect();

    let mut added = Vec::new();
    let mut updated = Vec::new();
    for part in next.all_parts() {
        let key = part.key();
        match old_parts.get(&key) {
            None => added.push((key, part.clone())),
            Some(old) => {
                let (Some(new_digit), Some(old_digit)) = (part.as_digit(), old.as_digit()) else {
                    continue;
                };
                if new_digit.value() != old_digit.value() {
                    updated.push(DigitUpdate {
                        key,
                        old: Some(old_digit.value()),
                        new: new_digit.value(),
                        direction,
                    });
                }
            },
        }
    }

    tracing::debug!(
        from = %previous.value_as_string,
        to = %next.value_as_string,
        removed = removed.len(),
        added = added.len(),
        updated = updated.len(),
        direction,
        "reconciled number flow"
    );

    ReconcileDiff {
        removed,
        added,
        updated,
        final_order,
        previous_order,
        direction,
    }
}
