use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::destinations::{DestinationError, DestinationList, EntryId};

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One element of the generation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkTarget {
    pub original_url: String,
    #[serde(serialize_with = "serialize_weight")]
    pub weight: f64,
}

/// Sparse weight overrides keyed by entry id.
///
/// Entries without an override weigh [`DEFAULT_WEIGHT`]. While custom mode is
/// off every entry weighs the default, but overrides are kept so that turning
/// the mode back on restores them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightModel {
    custom: bool,
    overrides: BTreeMap<EntryId, f64>,
}

impl WeightModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn set_custom(&mut self, enabled: bool) {
        self.custom = enabled;
    }

    /// Stores any number as given; range checks belong to the input widget.
    pub fn set_weight(
        &mut self,
        list: &DestinationList,
        position: usize,
        value: f64,
    ) -> Result<(), DestinationError> {
        let id = entry_id(list, position)?;
        self.overrides.insert(id, value);
        Ok(())
    }

    pub fn forget(&mut self, id: EntryId) {
        self.overrides.remove(&id);
    }

    pub fn effective_weight_of(&self, list: &DestinationList, position: usize) -> f64 {
        if !self.custom {
            return DEFAULT_WEIGHT;
        }
        list.get(position)
            .and_then(|entry| self.overrides.get(&entry.id()))
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn total_weight(&self, list: &DestinationList) -> f64 {
        (0..list.len())
            .map(|position| countable(self.effective_weight_of(list, position)))
            .sum()
    }

    /// Share of traffic in whole percent. Shares are rounded independently and
    /// need not sum to exactly 100.
    pub fn percentage_of(&self, list: &DestinationList, position: usize) -> i64 {
        let total = self.total_weight(list);
        if total == 0.0 {
            return 0;
        }
        let weight = countable(self.effective_weight_of(list, position));
        (weight / total * 100.0).round() as i64
    }

    pub fn serialize(&self, list: &DestinationList) -> Vec<LinkTarget> {
        list.entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| LinkTarget {
                original_url: entry.url().to_string(),
                weight: self.effective_weight_of(list, position),
            })
            .collect()
    }
}

/// Numeric-field coercion: blank input is zero, anything unparseable is NaN.
pub fn parse_weight(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn entry_id(list: &DestinationList, position: usize) -> Result<EntryId, DestinationError> {
    list.get(position)
        .map(|entry| entry.id())
        .ok_or(DestinationError::OutOfRange {
            position,
            len: list.len(),
        })
}

// Non-finite weights count as zero.
fn countable(weight: f64) -> f64 {
    if weight.is_finite() {
        weight
    } else {
        0.0
    }
}

fn serialize_weight<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if weight.fract() == 0.0 && weight.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*weight as i64)
    } else {
        serializer.serialize_f64(*weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weight_follows_numeric_field_rules() {
        assert_eq!(parse_weight(" 3 "), 3.0);
        assert_eq!(parse_weight("0.5"), 0.5);
        assert_eq!(parse_weight(""), 0.0);
        assert!(parse_weight("abc").is_nan());
    }

    #[test]
    fn non_finite_weight_counts_as_zero() {
        let mut list = DestinationList::new();
        list.add();
        let mut weights = WeightModel::new();
        weights.set_custom(true);
        weights.set_weight(&list, 0, f64::NAN).unwrap();

        assert_eq!(weights.total_weight(&list), 1.0);
        assert_eq!(weights.percentage_of(&list, 0), 0);
        assert_eq!(weights.percentage_of(&list, 1), 100);
    }
}
