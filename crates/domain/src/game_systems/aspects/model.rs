//! Character derivation model.
//!
//! [`CharacterModel`] combines every score resolver with the persona and
//! lineage modifiers and the bond bonus. It holds nothing but resolved
//! fields over one snapshot, so building it again after a write is the only
//! way to see the new totals.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bonds::{summarize_bonds, BondSummary};
use super::data::{
    find_lineage, find_persona, sum_scores, trait_options, Aspect, Attribute, CharacterTrait,
    CoreSkill, Stat, BASE_HITS, BASE_SKILL_POINTS, LINEAGES, PERSONAS,
    SKILL_POINTS_PER_MILESTONE,
};
use super::scores::{
    resolve_aspect_scores, resolve_attribute_scores, summarize_milestones, AspectScores,
    AttributeScores, MilestoneSummary,
};
use super::skills::{
    resolve_aspect_skills, resolve_core_skills, AspectSkillEntry, CoreSkillPoints,
    SkillPointBudget,
};
use super::stress::{resolve_stress, SheetLayout, StressSummary, StressTrack};
use crate::fields::{resolve_select_field, FieldStore, ResolvedSelectField, SelectFieldOptions};
use crate::types::{FieldMap, FieldValue};

pub const PERSONA_FIELD: &str = "persona";
pub const LINEAGE_FIELD: &str = "lineage";

pub fn resolve_persona_field(sheet: &dyn FieldStore) -> ResolvedSelectField<'_> {
    resolve_select_field(sheet, &SelectFieldOptions::new(PERSONA_FIELD, trait_options(PERSONAS)))
}

pub fn resolve_lineage_field(sheet: &dyn FieldStore) -> ResolvedSelectField<'_> {
    resolve_select_field(sheet, &SelectFieldOptions::new(LINEAGE_FIELD, trait_options(LINEAGES)))
}

/// Everything needed to compute a character's final numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterModel<'a> {
    layout: SheetLayout,
    attributes: AttributeScores<'a>,
    aspects: AspectScores<'a>,
    persona: ResolvedSelectField<'a>,
    lineage: ResolvedSelectField<'a>,
    core_skills: CoreSkillPoints<'a>,
    aspect_skills: Vec<AspectSkillEntry>,
    milestones: MilestoneSummary,
    bonds: BondSummary,
    stress: StressTrack<'a>,
}

impl<'a> CharacterModel<'a> {
    pub fn new(sheet: &'a dyn FieldStore, layout: SheetLayout) -> Self {
        Self {
            layout,
            attributes: resolve_attribute_scores(sheet),
            aspects: resolve_aspect_scores(sheet),
            persona: resolve_persona_field(sheet),
            lineage: resolve_lineage_field(sheet),
            core_skills: resolve_core_skills(sheet),
            aspect_skills: resolve_aspect_skills(sheet),
            milestones: summarize_milestones(sheet),
            bonds: summarize_bonds(sheet),
            stress: resolve_stress(sheet, layout),
        }
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    pub fn attributes(&self) -> &AttributeScores<'a> {
        &self.attributes
    }

    pub fn aspects(&self) -> &AspectScores<'a> {
        &self.aspects
    }

    pub fn persona_field(&self) -> &ResolvedSelectField<'a> {
        &self.persona
    }

    pub fn lineage_field(&self) -> &ResolvedSelectField<'a> {
        &self.lineage
    }

    pub fn core_skills(&self) -> &CoreSkillPoints<'a> {
        &self.core_skills
    }

    pub fn aspect_skills(&self) -> &[AspectSkillEntry] {
        &self.aspect_skills
    }

    pub fn milestones(&self) -> &MilestoneSummary {
        &self.milestones
    }

    pub fn bonds(&self) -> &BondSummary {
        &self.bonds
    }

    pub fn stress(&self) -> &StressTrack<'a> {
        &self.stress
    }

    /// Active persona; unknown or empty choices are `None`.
    pub fn persona(&self) -> Option<&'static CharacterTrait> {
        find_persona(self.persona.value())
    }

    pub fn lineage(&self) -> Option<&'static CharacterTrait> {
        find_lineage(self.lineage.value())
    }

    fn traits(&self) -> impl Iterator<Item = &'static CharacterTrait> {
        self.persona().into_iter().chain(self.lineage())
    }

    fn trait_bonus(&self, stat: Stat) -> i32 {
        self.traits().map(|entry| entry.bonus.stat_bonus(stat)).sum()
    }

    pub fn bond_aspect(&self) -> Aspect {
        self.bonds.aspect_bonus()
    }

    /// Attribute score with milestone, persona and lineage bonuses.
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        sum_scores([
            self.attributes.score_of(attribute),
            self.trait_bonus(Stat::Attribute(attribute)),
        ])
    }

    /// Aspect score with milestone, persona, lineage and bond bonuses.
    pub fn aspect(&self, aspect: Aspect) -> i32 {
        let bond = i32::from(self.bond_aspect() == aspect);
        sum_scores([
            self.aspects.score_of(aspect),
            self.trait_bonus(Stat::Aspect(aspect)),
            bond,
        ])
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Attribute(attribute) => self.attribute(attribute),
            Stat::Aspect(aspect) => self.aspect(aspect),
        }
    }

    pub fn hits_bonus(&self) -> i32 {
        self.traits().map(|entry| entry.bonus.hits_bonus()).sum()
    }

    pub fn fatigue_bonus(&self) -> i32 {
        self.traits().map(|entry| entry.bonus.fatigue_bonus()).sum()
    }

    pub fn hits_max(&self) -> i32 {
        sum_scores([
            self.attribute(Attribute::Strength),
            self.attribute(Attribute::Dexterity),
            BASE_HITS,
            self.hits_bonus(),
        ])
    }

    pub fn fatigue_max(&self) -> i32 {
        sum_scores([
            self.attribute(Attribute::Sense),
            self.attribute(Attribute::Intellect),
            self.attribute(Attribute::Presence),
            self.fatigue_bonus(),
        ])
    }

    /// Governing attribute plus points spent.
    pub fn core_skill_total(&self, skill: &CoreSkill) -> i32 {
        sum_scores([self.attribute(skill.attribute), self.core_skills.points(skill.name)])
    }

    /// Governing aspect plus points spent; an unrecognised aspect adds nothing.
    pub fn aspect_skill_total(&self, entry: &AspectSkillEntry) -> i32 {
        let stat = entry.aspect.map(|aspect| self.aspect(aspect)).unwrap_or(0);
        sum_scores([stat, entry.points])
    }

    pub fn skill_points(&self) -> SkillPointBudget {
        let aspect_points = sum_scores(self.aspect_skills.iter().map(|entry| entry.points));
        SkillPointBudget {
            used: self.core_skills.used().saturating_add(aspect_points),
            total: BASE_SKILL_POINTS
                + SKILL_POINTS_PER_MILESTONE * self.milestones.skill_point_milestones,
        }
    }

    /// Owned snapshot of every derived number.
    pub fn derive(&self) -> DerivedStats {
        DerivedStats {
            layout: self.layout,
            persona: self.persona().map(|entry| entry.name.to_string()),
            lineage: self.lineage().map(|entry| entry.name.to_string()),
            attributes: Attribute::ALL
                .into_iter()
                .map(|attribute| (attribute, self.attribute(attribute)))
                .collect(),
            aspects: Aspect::ALL
                .into_iter()
                .map(|aspect| (aspect, self.aspect(aspect)))
                .collect(),
            hits_max: self.hits_max(),
            fatigue_max: self.fatigue_max(),
            core_skills: self
                .core_skills
                .iter()
                .map(|(skill, field)| SkillTotal {
                    name: skill.name.to_string(),
                    stat: Some(Stat::Attribute(skill.attribute)),
                    points: field.as_int(),
                    total: self.core_skill_total(skill),
                })
                .collect(),
            aspect_skills: self
                .aspect_skills
                .iter()
                .map(|entry| SkillTotal {
                    name: entry.name.clone(),
                    stat: entry.aspect.map(Stat::Aspect),
                    points: entry.points,
                    total: self.aspect_skill_total(entry),
                })
                .collect(),
            skill_points: self.skill_points(),
            milestones: self.milestones.clone(),
            bond_aspect: self.bond_aspect(),
            stress: self.stress.summary(),
        }
    }
}

/// A skill with its roll total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTotal {
    pub name: String,
    pub stat: Option<Stat>,
    pub points: i32,
    pub total: i32,
}

/// Everything a sheet displays besides the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub layout: SheetLayout,
    pub persona: Option<String>,
    pub lineage: Option<String>,
    pub attributes: BTreeMap<Attribute, i32>,
    pub aspects: BTreeMap<Aspect, i32>,
    pub hits_max: i32,
    pub fatigue_max: i32,
    pub core_skills: Vec<SkillTotal>,
    pub aspect_skills: Vec<SkillTotal>,
    pub skill_points: SkillPointBudget,
    pub milestones: MilestoneSummary,
    pub bond_aspect: Aspect,
    pub stress: StressSummary,
}

impl DerivedStats {
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(&attribute).copied().unwrap_or(0)
    }

    pub fn aspect(&self, aspect: Aspect) -> i32 {
        self.aspects.get(&aspect).copied().unwrap_or(0)
    }

    pub fn core_skill(&self, name: &str) -> Option<&SkillTotal> {
        self.core_skills.iter().find(|skill| skill.name == name)
    }

    /// Flatten into sheet-style keys for the sheet provider.
    pub fn calculated_values(&self) -> FieldMap {
        let mut values = FieldMap::new();
        for (attribute, score) in &self.attributes {
            values.insert(format!("total:{}", attribute.field_id()), FieldValue::from(*score));
        }
        for (aspect, score) in &self.aspects {
            values.insert(format!("total:{}", aspect.field_id()), FieldValue::from(*score));
        }
        for skill in &self.core_skills {
            values.insert(
                format!("total:coreSkills:{}", skill.name),
                FieldValue::from(skill.total),
            );
        }
        for (index, skill) in self.aspect_skills.iter().enumerate() {
            values.insert(format!("total:aspectSkills:{}", index), FieldValue::from(skill.total));
        }
        for pool in &self.stress.pools {
            values.insert(format!("peril:{}", pool.pool.field_id()), FieldValue::from(pool.peril));
        }

        values.insert("hitsMax".to_string(), FieldValue::from(self.hits_max));
        values.insert("fatigueMax".to_string(), FieldValue::from(self.fatigue_max));
        values.insert("skillPointsUsed".to_string(), FieldValue::from(self.skill_points.used));
        values.insert("skillPointsTotal".to_string(), FieldValue::from(self.skill_points.total));
        values.insert("perilSum".to_string(), FieldValue::from(self.stress.peril_sum));
        values.insert(
            "canFallUnconscious".to_string(),
            FieldValue::from(self.stress.can_fall_unconscious),
        );
        values.insert("canRecover".to_string(), FieldValue::from(self.stress.can_recover));
        values.insert("bondAspect".to_string(), FieldValue::from(self.bond_aspect.name()));
        values
    }
}
