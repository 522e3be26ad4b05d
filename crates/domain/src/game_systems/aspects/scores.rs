//! Attribute and aspect scores, and the milestones that raise them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::data::{sum_scores, Aspect, Attribute};
use crate::character_sheet::SchemaSelectOption;
use crate::fields::{
    resolve_list_field, resolve_number_field, resolve_select_field, resolve_text_field,
    FieldStore, NumberFieldOptions, ResolvedNumberField, ResolvedSelectField, ResolvedTextField,
    SelectFieldOptions, TextFieldOptions,
};

pub const MILESTONES_FIELD: &str = "milestones";

// =============================================================================
// Base scores
// =============================================================================

/// `attribute:<Name>`, never below 1.
pub fn resolve_attribute_field(
    sheet: &dyn FieldStore,
    attribute: Attribute,
) -> ResolvedNumberField<'_> {
    resolve_number_field(sheet, &NumberFieldOptions::new(attribute.field_id()).min(1.0))
}

/// `aspect:<Name>`, never below 0.
pub fn resolve_aspect_field(sheet: &dyn FieldStore, aspect: Aspect) -> ResolvedNumberField<'_> {
    resolve_number_field(sheet, &NumberFieldOptions::new(aspect.field_id()))
}

/// The five attribute fields plus attribute-point milestones.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeScores<'a> {
    fields: [ResolvedNumberField<'a>; 5],
    milestone_bonuses: BTreeMap<Attribute, i32>,
}

pub fn resolve_attribute_scores(sheet: &dyn FieldStore) -> AttributeScores<'_> {
    AttributeScores {
        fields: Attribute::ALL.map(|attribute| resolve_attribute_field(sheet, attribute)),
        milestone_bonuses: summarize_milestones(sheet).attribute_bonuses,
    }
}

impl<'a> AttributeScores<'a> {
    pub fn field(&self, attribute: Attribute) -> &ResolvedNumberField<'a> {
        &self.fields[attribute as usize]
    }

    /// Stored score, without any bonus.
    pub fn base(&self, attribute: Attribute) -> i32 {
        self.field(attribute).as_int()
    }

    /// Stored score plus attribute-point milestones.
    pub fn score_of(&self, attribute: Attribute) -> i32 {
        let bonus = self.milestone_bonuses.get(&attribute).copied().unwrap_or(0);
        sum_scores([self.base(attribute), bonus])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &ResolvedNumberField<'a>)> {
        Attribute::ALL.into_iter().zip(self.fields.iter())
    }
}

/// The five aspect fields plus aspect milestones.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectScores<'a> {
    fields: [ResolvedNumberField<'a>; 5],
    milestone_bonuses: BTreeMap<Aspect, i32>,
}

pub fn resolve_aspect_scores(sheet: &dyn FieldStore) -> AspectScores<'_> {
    AspectScores {
        fields: Aspect::ALL.map(|aspect| resolve_aspect_field(sheet, aspect)),
        milestone_bonuses: summarize_milestones(sheet).aspect_bonuses,
    }
}

impl<'a> AspectScores<'a> {
    pub fn field(&self, aspect: Aspect) -> &ResolvedNumberField<'a> {
        &self.fields[aspect as usize]
    }

    pub fn base(&self, aspect: Aspect) -> i32 {
        self.field(aspect).as_int()
    }

    /// Stored score plus one per milestone naming this aspect.
    pub fn score_of(&self, aspect: Aspect) -> i32 {
        let bonus = self.milestone_bonuses.get(&aspect).copied().unwrap_or(0);
        sum_scores([self.base(aspect), bonus])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Aspect, &ResolvedNumberField<'a>)> {
        Aspect::ALL.into_iter().zip(self.fields.iter())
    }
}

// =============================================================================
// Milestones
// =============================================================================

/// What a milestone grants besides its aspect point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilestoneBonus {
    SkillPoints,
    AttributePoint,
}

impl MilestoneBonus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneBonus::SkillPoints => "skillPoints",
            MilestoneBonus::AttributePoint => "attributePoint",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "skillPoints" => Some(MilestoneBonus::SkillPoints),
            "attributePoint" => Some(MilestoneBonus::AttributePoint),
            _ => None,
        }
    }

    pub fn select_options() -> Vec<SchemaSelectOption> {
        vec![
            SchemaSelectOption::new("skillPoints", "+3 Skill Points"),
            SchemaSelectOption::new("attributePoint", "+1 Attribute"),
        ]
    }
}

/// Resolved fields of one milestone item.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneFields<'a> {
    pub aspect_bonus: ResolvedSelectField<'a>,
    pub bonus_type: ResolvedSelectField<'a>,
    pub attribute_bonus: ResolvedSelectField<'a>,
    pub notes: ResolvedTextField<'a>,
}

/// Resolve a milestone from its item store.
///
/// Older items stored the bonus under `skillBonus`; it is read as the
/// default for `bonusType`.
pub fn resolve_milestone(item: &dyn FieldStore) -> MilestoneFields<'_> {
    let legacy_bonus = resolve_text_field(item, &TextFieldOptions::new("skillBonus"));
    let mut bonus_type = SelectFieldOptions::new("bonusType", MilestoneBonus::select_options());
    if !legacy_bonus.value().is_empty() {
        bonus_type = bonus_type.default_value(legacy_bonus.value());
    }

    MilestoneFields {
        aspect_bonus: resolve_select_field(
            item,
            &SelectFieldOptions::new("aspectBonus", Aspect::select_options()),
        ),
        bonus_type: resolve_select_field(item, &bonus_type),
        attribute_bonus: resolve_select_field(
            item,
            &SelectFieldOptions::new("attributeBonus", Attribute::select_options()),
        ),
        notes: resolve_text_field(item, &TextFieldOptions::new("notes")),
    }
}

impl MilestoneFields<'_> {
    pub fn aspect(&self) -> Option<Aspect> {
        self.aspect_bonus.value().parse().ok()
    }

    pub fn bonus(&self) -> Option<MilestoneBonus> {
        MilestoneBonus::parse(self.bonus_type.value())
    }

    pub fn attribute(&self) -> Option<Attribute> {
        self.attribute_bonus.value().parse().ok()
    }
}

/// Milestone bonuses aggregated across the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneSummary {
    pub count: usize,
    pub aspect_bonuses: BTreeMap<Aspect, i32>,
    pub attribute_bonuses: BTreeMap<Attribute, i32>,
    pub skill_point_milestones: i32,
}

/// Count milestones by chosen aspect and bonus type.
///
/// The aspect point and the bonus type are independent: one milestone may
/// grant both. Unknown or stale choices contribute nothing.
pub fn summarize_milestones(sheet: &dyn FieldStore) -> MilestoneSummary {
    let milestones = resolve_list_field(sheet, MILESTONES_FIELD);
    let mut summary = MilestoneSummary {
        count: milestones.len(),
        ..Default::default()
    };

    for item in milestones.item_contexts() {
        let milestone = resolve_milestone(&item);
        if let Some(aspect) = milestone.aspect() {
            *summary.aspect_bonuses.entry(aspect).or_insert(0) += 1;
        }
        match milestone.bonus() {
            Some(MilestoneBonus::SkillPoints) => summary.skill_point_milestones += 1,
            Some(MilestoneBonus::AttributePoint) => {
                if let Some(attribute) = milestone.attribute() {
                    *summary.attribute_bonuses.entry(attribute).or_insert(0) += 1;
                }
            }
            None => {}
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldContext, PatchBuffer};
    use crate::types::{FieldMap, FieldValue};

    fn milestone(entries: &[(&str, &str)]) -> FieldValue {
        FieldValue::Object(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), FieldValue::from(*value)))
                .collect(),
        )
    }

    #[test]
    fn empty_sheet_scores_at_minimums() {
        let values = FieldMap::new();
        let buffer = PatchBuffer::new();
        let sheet = FieldContext::new(&values, &buffer);

        let attributes = resolve_attribute_scores(&sheet);
        let aspects = resolve_aspect_scores(&sheet);
        for attribute in Attribute::ALL {
            assert_eq!(attributes.score_of(attribute), 1);
        }
        for aspect in Aspect::ALL {
            assert_eq!(aspects.score_of(aspect), 0);
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn milestones_raise_their_chosen_stats() {
        let values = FieldMap::from([
            ("aspect:Fire".to_string(), FieldValue::from(2)),
            ("attribute:Sense".to_string(), FieldValue::from(2)),
            (
                MILESTONES_FIELD.to_string(),
                FieldValue::List(vec![
                    milestone(&[("aspectBonus", "Fire"), ("bonusType", "skillPoints")]),
                    milestone(&[
                        ("aspectBonus", "Fire"),
                        ("bonusType", "attributePoint"),
                        ("attributeBonus", "Sense"),
                    ]),
                    milestone(&[("aspectBonus", "Storm"), ("skillBonus", "skillPoints")]),
                ]),
            ),
        ]);
        let buffer = PatchBuffer::new();
        let sheet = FieldContext::new(&values, &buffer);

        let summary = summarize_milestones(&sheet);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.skill_point_milestones, 2);

        assert_eq!(resolve_aspect_scores(&sheet).score_of(Aspect::Fire), 4);
        assert_eq!(resolve_aspect_scores(&sheet).base(Aspect::Fire), 2);
        assert_eq!(resolve_attribute_scores(&sheet).score_of(Attribute::Sense), 3);
        assert_eq!(resolve_attribute_scores(&sheet).score_of(Attribute::Strength), 1);
    }

    #[test]
    fn milestone_fields_write_into_their_item() {
        let values = FieldMap::from([(
            MILESTONES_FIELD.to_string(),
            FieldValue::List(vec![milestone(&[("notes", "Crossed the river")])]),
        )]);
        let buffer = PatchBuffer::new();
        let sheet = FieldContext::new(&values, &buffer);

        let milestones = resolve_list_field(&sheet, MILESTONES_FIELD);
        let item = milestones.item_context(0);
        let fields = resolve_milestone(&item);
        assert_eq!(fields.notes.value(), "Crossed the river");
        assert!(fields.aspect().is_none());

        fields.aspect_bonus.set("Water");
        let patches = buffer.take();
        let written = patches[0].value.as_list().and_then(|items| items[0].as_object().cloned());
        assert_eq!(
            written.as_ref().and_then(|item| item.get("aspectBonus")),
            Some(&FieldValue::from("Water"))
        );
        assert_eq!(
            written.as_ref().and_then(|item| item.get("notes")),
            Some(&FieldValue::from("Crossed the river"))
        );
    }
}
