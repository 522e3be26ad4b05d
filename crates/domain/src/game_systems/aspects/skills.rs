//! Core skills, aspect skills and the skill point budget.

use serde::Serialize;

use super::data::{
    aspect_skill_options, find_aspect_skill, sum_scores, Aspect, CoreSkill, BASE_SKILL_POINTS,
    CORE_SKILLS, SKILL_POINTS_PER_MILESTONE,
};
use super::scores::summarize_milestones;
use crate::fields::{
    resolve_list_field, resolve_number_field, resolve_select_field, FieldStore,
    NumberFieldOptions, ResolvedNumberField, ResolvedSelectField, SelectFieldOptions,
};
use crate::types::FieldValue;

pub const ASPECT_SKILLS_FIELD: &str = "aspectSkills";

// =============================================================================
// Core skills
// =============================================================================

/// Points in a core skill, `coreSkills:<Name>`.
///
/// Sheets written before the rename kept points under `skill:<Name>`; that
/// value is the default when the current key is unset.
pub fn resolve_core_skill_field<'a>(
    sheet: &'a dyn FieldStore,
    skill: &CoreSkill,
) -> ResolvedNumberField<'a> {
    let mut options = NumberFieldOptions::new(skill.field_id());
    options.default_value = sheet
        .value(&skill.legacy_field_id())
        .and_then(FieldValue::as_number);
    resolve_number_field(sheet, &options)
}

/// Every core skill's points, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSkillPoints<'a> {
    fields: Vec<(&'static CoreSkill, ResolvedNumberField<'a>)>,
}

pub fn resolve_core_skills(sheet: &dyn FieldStore) -> CoreSkillPoints<'_> {
    CoreSkillPoints {
        fields: CORE_SKILLS
            .iter()
            .map(|skill| (skill, resolve_core_skill_field(sheet, skill)))
            .collect(),
    }
}

impl<'a> CoreSkillPoints<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'static CoreSkill, &ResolvedNumberField<'a>)> {
        self.fields.iter().map(|(skill, field)| (*skill, field))
    }

    pub fn field(&self, name: &str) -> Option<&ResolvedNumberField<'a>> {
        self.fields
            .iter()
            .find(|(skill, _)| skill.name == name)
            .map(|(_, field)| field)
    }

    pub fn points(&self, name: &str) -> i32 {
        self.field(name).map(ResolvedNumberField::as_int).unwrap_or(0)
    }

    pub fn used(&self) -> i32 {
        sum_scores(self.fields.iter().map(|(_, field)| field.as_int()))
    }
}

// =============================================================================
// Aspect skills
// =============================================================================

/// Resolved fields of one `aspectSkills` item.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSkillFields<'a> {
    pub name: ResolvedSelectField<'a>,
    pub aspect: ResolvedSelectField<'a>,
    pub points: ResolvedNumberField<'a>,
}

/// Resolve an aspect skill from its item store. A known skill name supplies
/// the default aspect.
pub fn resolve_aspect_skill(item: &dyn FieldStore) -> AspectSkillFields<'_> {
    let name = resolve_select_field(item, &SelectFieldOptions::new("name", aspect_skill_options()));

    let mut aspect = SelectFieldOptions::new("aspect", Aspect::select_options());
    if let Some(known) = find_aspect_skill(name.value()) {
        aspect = aspect.default_value(known.aspect.name());
    }

    AspectSkillFields {
        aspect: resolve_select_field(item, &aspect),
        points: resolve_number_field(item, &NumberFieldOptions::new("points")),
        name,
    }
}

impl AspectSkillFields<'_> {
    pub fn governing_aspect(&self) -> Option<Aspect> {
        self.aspect.value().parse().ok()
    }
}

/// Owned view of one aspect skill, detached from its store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectSkillEntry {
    pub index: usize,
    pub name: String,
    pub aspect: Option<Aspect>,
    pub points: i32,
}

pub fn resolve_aspect_skills(sheet: &dyn FieldStore) -> Vec<AspectSkillEntry> {
    resolve_list_field(sheet, ASPECT_SKILLS_FIELD)
        .item_contexts()
        .map(|item| {
            let fields = resolve_aspect_skill(&item);
            AspectSkillEntry {
                index: item.index(),
                name: fields.name.value().to_string(),
                aspect: fields.governing_aspect(),
                points: fields.points.as_int(),
            }
        })
        .collect()
}

// =============================================================================
// Budget
// =============================================================================

/// Skill points spent against skill points available.
///
/// Advisory only: nothing prevents spending past the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPointBudget {
    pub used: i32,
    pub total: i32,
}

impl SkillPointBudget {
    pub fn remaining(&self) -> i32 {
        self.total.saturating_sub(self.used)
    }

    pub fn is_over_budget(&self) -> bool {
        self.used > self.total
    }
}

pub fn used_skill_points(sheet: &dyn FieldStore) -> i32 {
    let core = resolve_core_skills(sheet).used();
    let aspect = sum_scores(resolve_aspect_skills(sheet).iter().map(|entry| entry.points));
    core.saturating_add(aspect)
}

pub fn total_skill_points(sheet: &dyn FieldStore) -> i32 {
    let milestones = summarize_milestones(sheet).skill_point_milestones;
    BASE_SKILL_POINTS + SKILL_POINTS_PER_MILESTONE * milestones
}

pub fn skill_point_budget(sheet: &dyn FieldStore) -> SkillPointBudget {
    SkillPointBudget {
        used: used_skill_points(sheet),
        total: total_skill_points(sheet),
    }
}
