//! Aspects of Nature.
//!
//! Five attributes, five elemental aspects, point-bought skills, milestones,
//! bonds and stress pools. Two sheet layouts share the same rules and differ
//! only in their stress pools.

pub mod bonds;
pub mod data;
pub mod model;
pub mod scores;
pub mod skills;
pub mod stress;

use crate::fields::{DiscardWrites, FieldContext, FieldStore};
use crate::game_systems::traits::{
    CharacterSheetProvider, CharacterSheetSchema, FieldDefinition, GameSystem, SchemaFieldType,
    SchemaSection, SectionType,
};
use crate::types::FieldMap;

use self::bonds::BONDS_FIELD;
use self::data::{
    aspect_skill_options, trait_options, Aspect, Attribute, ASPECT_SKILLS, CORE_SKILLS, LINEAGES,
    MAX_BOND_STRENGTH, MIN_BOND_STRENGTH, PERSONAS,
};
use self::model::{CharacterModel, DerivedStats, LINEAGE_FIELD, PERSONA_FIELD};
use self::scores::{MilestoneBonus, MILESTONES_FIELD};
use self::skills::ASPECT_SKILLS_FIELD;
use self::stress::{SheetLayout, UNCONSCIOUS_FIELD};

pub const STANDARD_SYSTEM_ID: &str = "aspects";
pub const CLASSIC_SYSTEM_ID: &str = "aspects_classic";

const STAT_NAMES: &[&str] = &[
    "Strength", "Sense", "Dexterity", "Intellect", "Presence", "Fire", "Water", "Wind", "Light",
    "Darkness",
];

const SKILL_NAMES: &[&str] = &[
    "Athletics",
    "Endurance",
    "Perception",
    "Insight",
    "Stealth",
    "Finesse",
    "Knowledge",
    "Tinkering",
    "Sway",
    "Performance",
    "Ignition",
    "Searing",
    "Restoration",
    "Tides",
    "Gale",
    "Windstep",
    "Radiance",
    "Warding",
    "Umbra",
    "Dread",
];

/// Aspects of Nature game system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectsOfNatureSystem {
    layout: SheetLayout,
}

impl AspectsOfNatureSystem {
    /// Current sheet: damage, fatigue and anxiety pools.
    pub fn standard() -> Self {
        Self {
            layout: SheetLayout::Standard,
        }
    }

    /// Older sheet: hits and fatigue pools.
    pub fn classic() -> Self {
        Self {
            layout: SheetLayout::Classic,
        }
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    /// Build the derivation model over `sheet`.
    pub fn model<'a>(&self, sheet: &'a dyn FieldStore) -> CharacterModel<'a> {
        CharacterModel::new(sheet, self.layout)
    }

    /// Derive every stat from a stored document without issuing writes.
    pub fn derive(&self, values: &FieldMap) -> DerivedStats {
        let sheet = FieldContext::new(values, &DiscardWrites);
        let model = self.model(&sheet);
        model.derive()
    }

    fn identity_section(&self) -> SchemaSection {
        SchemaSection {
            id: "identity".to_string(),
            label: "Identity".to_string(),
            section_type: SectionType::Identity,
            fields: vec![
                FieldDefinition::new(
                    PERSONA_FIELD,
                    "Persona",
                    SchemaFieldType::select(trait_options(PERSONAS)),
                )
                .with_description("How your character carries themselves"),
                FieldDefinition::new(
                    LINEAGE_FIELD,
                    "Lineage",
                    SchemaFieldType::select(trait_options(LINEAGES)),
                )
                .with_description("Where your character comes from"),
                FieldDefinition::new("notes", "Notes", SchemaFieldType::multiline_text()),
            ],
            description: None,
        }
    }

    fn attributes_section(&self) -> SchemaSection {
        SchemaSection {
            id: "attributes".to_string(),
            label: "Attributes".to_string(),
            section_type: SectionType::Attributes,
            fields: Attribute::ALL
                .iter()
                .map(|attribute| {
                    FieldDefinition::new(
                        attribute.field_id(),
                        attribute.name(),
                        SchemaFieldType::number(Some(1.0), None),
                    )
                    .with_description(attribute.description())
                })
                .collect(),
            description: None,
        }
    }

    fn aspects_section(&self) -> SchemaSection {
        SchemaSection {
            id: "aspects".to_string(),
            label: "Aspects".to_string(),
            section_type: SectionType::Aspects,
            fields: Aspect::ALL
                .iter()
                .map(|aspect| {
                    FieldDefinition::new(
                        aspect.field_id(),
                        aspect.name(),
                        SchemaFieldType::number(Some(0.0), None),
                    )
                    .with_description(aspect.description())
                })
                .collect(),
            description: Some(
                "Milestones, persona, lineage and bonds add to these scores.".to_string(),
            ),
        }
    }

    fn skills_section(&self) -> SchemaSection {
        let mut fields: Vec<FieldDefinition> = CORE_SKILLS
            .iter()
            .map(|skill| {
                FieldDefinition::new(
                    skill.field_id(),
                    format!("{} ({})", skill.name, skill.attribute),
                    SchemaFieldType::number(Some(0.0), None),
                )
                .with_description(skill.description)
            })
            .collect();

        fields.push(FieldDefinition::new(
            ASPECT_SKILLS_FIELD,
            "Aspect Skills",
            SchemaFieldType::List {
                item_fields: vec![
                    FieldDefinition::new(
                        "name",
                        "Skill",
                        SchemaFieldType::select(aspect_skill_options()),
                    ),
                    FieldDefinition::new(
                        "aspect",
                        "Aspect",
                        SchemaFieldType::select(Aspect::select_options()),
                    ),
                    FieldDefinition::new(
                        "points",
                        "Points",
                        SchemaFieldType::number(Some(0.0), None),
                    ),
                ],
            },
        ));

        SchemaSection {
            id: "skills".to_string(),
            label: "Skills".to_string(),
            section_type: SectionType::Skills,
            fields,
            description: Some(format!(
                "Spend skill points on core skills and any of the {} aspect skills.",
                ASPECT_SKILLS.len()
            )),
        }
    }

    fn resources_section(&self) -> SchemaSection {
        let mut fields: Vec<FieldDefinition> = self
            .layout
            .stress_pools()
            .iter()
            .map(|pool| {
                FieldDefinition::new(
                    pool.field_id(),
                    pool.label(),
                    SchemaFieldType::number(Some(0.0), None),
                )
                .with_description("Every 5 points is one level of peril")
            })
            .collect();

        fields.push(
            FieldDefinition::new(
                UNCONSCIOUS_FIELD,
                "Unconscious",
                SchemaFieldType::Boolean { default: false },
            )
            .with_description("Eligible at 5 total peril; recover at 3 or less"),
        );

        SchemaSection {
            id: "resources".to_string(),
            label: "Stress".to_string(),
            section_type: SectionType::Resources,
            fields,
            description: None,
        }
    }

    fn advancement_section(&self) -> SchemaSection {
        SchemaSection {
            id: "advancement".to_string(),
            label: "Milestones".to_string(),
            section_type: SectionType::Advancement,
            fields: vec![FieldDefinition::new(
                MILESTONES_FIELD,
                "Milestones",
                SchemaFieldType::List {
                    item_fields: vec![
                        FieldDefinition::new(
                            "aspectBonus",
                            "Aspect",
                            SchemaFieldType::select(Aspect::select_options()),
                        ),
                        FieldDefinition::new(
                            "bonusType",
                            "Bonus",
                            SchemaFieldType::select(MilestoneBonus::select_options()),
                        ),
                        FieldDefinition::new(
                            "attributeBonus",
                            "Attribute",
                            SchemaFieldType::select(Attribute::select_options()),
                        ),
                        FieldDefinition::new("notes", "Notes", SchemaFieldType::multiline_text()),
                    ],
                },
            )],
            description: Some(
                "Each milestone adds +1 to an aspect and one more bonus.".to_string(),
            ),
        }
    }

    fn relationships_section(&self) -> SchemaSection {
        SchemaSection {
            id: "bonds".to_string(),
            label: "Bonds".to_string(),
            section_type: SectionType::Relationships,
            fields: vec![FieldDefinition::new(
                BONDS_FIELD,
                "Bonds",
                SchemaFieldType::List {
                    item_fields: vec![
                        FieldDefinition::new("name", "Name", SchemaFieldType::text()),
                        FieldDefinition::new(
                            "description",
                            "Description",
                            SchemaFieldType::multiline_text(),
                        ),
                        FieldDefinition::new(
                            "strength",
                            "Strength",
                            SchemaFieldType::number(
                                Some(MIN_BOND_STRENGTH),
                                Some(MAX_BOND_STRENGTH),
                            ),
                        ),
                    ],
                },
            )],
            description: Some("Total bond strength grants a bonus to one aspect.".to_string()),
        }
    }
}

impl Default for AspectsOfNatureSystem {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameSystem for AspectsOfNatureSystem {
    fn system_id(&self) -> &str {
        match self.layout {
            SheetLayout::Standard => STANDARD_SYSTEM_ID,
            SheetLayout::Classic => CLASSIC_SYSTEM_ID,
        }
    }

    fn display_name(&self) -> &str {
        match self.layout {
            SheetLayout::Standard => "Aspects of Nature",
            SheetLayout::Classic => "Aspects of Nature (Classic)",
        }
    }

    fn stat_names(&self) -> &[&str] {
        STAT_NAMES
    }

    fn skill_names(&self) -> &[&str] {
        SKILL_NAMES
    }

    fn sheet(&self) -> &dyn CharacterSheetProvider {
        self
    }
}

impl CharacterSheetProvider for AspectsOfNatureSystem {
    fn character_sheet_schema(&self) -> CharacterSheetSchema {
        CharacterSheetSchema {
            system_id: self.system_id().to_string(),
            system_name: self.display_name().to_string(),
            sections: vec![
                self.identity_section(),
                self.attributes_section(),
                self.aspects_section(),
                self.skills_section(),
                self.resources_section(),
                self.advancement_section(),
                self.relationships_section(),
            ],
        }
    }

    fn calculate_derived_values(&self, values: &FieldMap) -> FieldMap {
        self.derive(values).calculated_values()
    }
}
