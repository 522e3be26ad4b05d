//! Bonds and the aspect bonus their combined strength grants.

use super::data::{Aspect, MAX_BOND_STRENGTH, MIN_BOND_STRENGTH};
use crate::fields::{
    resolve_list_field, resolve_number_field, resolve_text_field, FieldStore, NumberFieldOptions,
    ResolvedNumberField, ResolvedTextField, TextFieldOptions,
};

pub const BONDS_FIELD: &str = "bonds";

/// Resolved fields of one `bonds` item.
#[derive(Debug, Clone, PartialEq)]
pub struct BondFields<'a> {
    pub name: ResolvedTextField<'a>,
    pub description: ResolvedTextField<'a>,
    pub strength: ResolvedNumberField<'a>,
}

pub fn resolve_bond(item: &dyn FieldStore) -> BondFields<'_> {
    BondFields {
        name: resolve_text_field(item, &TextFieldOptions::new("name")),
        description: resolve_text_field(item, &TextFieldOptions::new("description")),
        strength: resolve_number_field(
            item,
            &NumberFieldOptions::new("strength")
                .min(MIN_BOND_STRENGTH)
                .max(MAX_BOND_STRENGTH),
        ),
    }
}

/// Map a total bond strength onto its aspect.
///
/// Bands are half-open and cover the whole line:
/// `(-inf, -3)` Darkness, `[-3, 0)` Fire, `[0, 1)` Wind, `[1, 3)` Water,
/// `[3, +inf)` Light.
pub fn aspect_for_bond_strength(sum: f64) -> Aspect {
    if sum < -3.0 {
        Aspect::Darkness
    } else if sum < 0.0 {
        Aspect::Fire
    } else if sum < 1.0 {
        Aspect::Wind
    } else if sum < 3.0 {
        Aspect::Water
    } else {
        Aspect::Light
    }
}

/// Count and clamped strength total of every bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondSummary {
    pub count: usize,
    pub strength_sum: f64,
}

impl BondSummary {
    /// The aspect granted by these bonds. An empty list sums to 0 (Wind).
    pub fn aspect_bonus(&self) -> Aspect {
        aspect_for_bond_strength(self.strength_sum)
    }
}

pub fn summarize_bonds(sheet: &dyn FieldStore) -> BondSummary {
    let bonds = resolve_list_field(sheet, BONDS_FIELD);
    let strength_sum: f64 = bonds
        .item_contexts()
        .map(|item| resolve_bond(&item).strength.value())
        .sum();
    BondSummary {
        count: bonds.len(),
        strength_sum,
    }
}

pub fn bond_aspect_bonus(sheet: &dyn FieldStore) -> Aspect {
    summarize_bonds(sheet).aspect_bonus()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldContext, PatchBuffer};
    use crate::types::{FieldMap, FieldValue};

    fn bonds(strengths: &[FieldValue]) -> FieldMap {
        let items = strengths
            .iter()
            .map(|strength| {
                FieldValue::Object(FieldMap::from([("strength".to_string(), strength.clone())]))
            })
            .collect();
        FieldMap::from([(BONDS_FIELD.to_string(), FieldValue::List(items))])
    }

    #[test]
    fn band_boundaries_are_half_open() {
        assert_eq!(aspect_for_bond_strength(-3.5), Aspect::Darkness);
        assert_eq!(aspect_for_bond_strength(-3.0), Aspect::Fire);
        assert_eq!(aspect_for_bond_strength(-0.5), Aspect::Fire);
        assert_eq!(aspect_for_bond_strength(0.0), Aspect::Wind);
        assert_eq!(aspect_for_bond_strength(1.0), Aspect::Water);
        assert_eq!(aspect_for_bond_strength(2.99), Aspect::Water);
        assert_eq!(aspect_for_bond_strength(3.0), Aspect::Light);
    }

    #[test]
    fn strong_bonds_grant_light() {
        let values = bonds(&[FieldValue::from(2), FieldValue::from(2)]);
        let buffer = PatchBuffer::new();
        let sheet = FieldContext::new(&values, &buffer);

        assert_eq!(bond_aspect_bonus(&sheet), Aspect::Light);
    }

    #[test]
    fn strengths_are_clamped_before_summing() {
        let values = bonds(&[FieldValue::from(9), FieldValue::from(-1), FieldValue::from("x")]);
        let buffer = PatchBuffer::new();
        let sheet = FieldContext::new(&values, &buffer);

        let summary = summarize_bonds(&sheet);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.strength_sum, 2.0);
        assert_eq!(summary.aspect_bonus(), Aspect::Water);
    }

    #[test]
    fn empty_bond_list_sums_to_wind() {
        let buffer = PatchBuffer::new();

        let missing = FieldMap::new();
        let empty = bonds(&[]);
        let neutral = bonds(&[FieldValue::from(0)]);
        for values in [&missing, &empty, &neutral] {
            let sheet = FieldContext::new(values, &buffer);
            let summary = summarize_bonds(&sheet);
            assert_eq!(summary.strength_sum, 0.0);
            assert_eq!(summary.aspect_bonus(), Aspect::Wind);
        }
        assert!(buffer.is_empty());
    }
}
