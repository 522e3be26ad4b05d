//! Aspects of Nature reference data.
//!
//! Read-only tables shipped with the game: attributes, aspects, skills,
//! personas and lineages. Lookups by name return `Option` since stored
//! choices may outlive the entries they name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character_sheet::SchemaSelectOption;
use crate::error::DomainError;

/// Skill points every character starts with.
pub const BASE_SKILL_POINTS: i32 = 5;
/// Skill points granted by each skill-point milestone.
pub const SKILL_POINTS_PER_MILESTONE: i32 = 3;
/// Stress needed per level of peril.
pub const PERIL_STEP: i32 = 5;
/// Peril sum at which a character may fall unconscious.
pub const UNCONSCIOUS_PERIL: i32 = 5;
/// Peril sum at or below which an unconscious character may recover.
pub const RECOVERY_PERIL: i32 = 3;
/// Flat hits added to every character's maximum.
pub const BASE_HITS: i32 = 3;
pub const MIN_BOND_STRENGTH: f64 = -3.0;
pub const MAX_BOND_STRENGTH: f64 = 3.0;

/// Sum scores without overflowing on absurd stored values.
pub(crate) fn sum_scores(scores: impl IntoIterator<Item = i32>) -> i32 {
    scores.into_iter().fold(0, i32::saturating_add)
}

// =============================================================================
// Attributes
// =============================================================================

/// One of the five core stats. Base value is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Sense,
    Dexterity,
    Intellect,
    Presence,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Strength,
        Attribute::Sense,
        Attribute::Dexterity,
        Attribute::Intellect,
        Attribute::Presence,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Sense => "Sense",
            Self::Dexterity => "Dexterity",
            Self::Intellect => "Intellect",
            Self::Presence => "Presence",
        }
    }

    /// Stored field id, e.g. `attribute:Strength`.
    pub fn field_id(&self) -> String {
        format!("attribute:{}", self.name())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Strength => "Physical power, endurance and the ability to take a hit.",
            Self::Sense => "Awareness of surroundings and the instincts to act on it.",
            Self::Dexterity => "Speed, balance and precision of movement.",
            Self::Intellect => "Memory, reasoning and learned knowledge.",
            Self::Presence => "Force of personality and the will to lead.",
        }
    }

    pub fn select_options() -> Vec<SchemaSelectOption> {
        Self::ALL
            .iter()
            .map(|attribute| {
                SchemaSelectOption::new(attribute.name(), attribute.name())
                    .with_description(attribute.description())
            })
            .collect()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown attribute: {}", s)))
    }
}

// =============================================================================
// Aspects
// =============================================================================

/// One of the five elemental stats. Base value is at least 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Fire,
    Water,
    Wind,
    Light,
    Darkness,
}

impl Aspect {
    pub const ALL: [Aspect; 5] = [
        Aspect::Fire,
        Aspect::Water,
        Aspect::Wind,
        Aspect::Light,
        Aspect::Darkness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Wind => "Wind",
            Self::Light => "Light",
            Self::Darkness => "Darkness",
        }
    }

    /// Stored field id, e.g. `aspect:Fire`.
    pub fn field_id(&self) -> String {
        format!("aspect:{}", self.name())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Fire => "Passion, destruction and raw force.",
            Self::Water => "Flow, healing and adaptation.",
            Self::Wind => "Freedom, motion and change.",
            Self::Light => "Clarity, warmth and revelation.",
            Self::Darkness => "Concealment, fear and the unknown.",
        }
    }

    pub fn select_options() -> Vec<SchemaSelectOption> {
        Self::ALL
            .iter()
            .map(|aspect| {
                SchemaSelectOption::new(aspect.name(), aspect.name())
                    .with_description(aspect.description())
            })
            .collect()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aspect {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|aspect| aspect.name() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown aspect: {}", s)))
    }
}

/// Either kind of stat; what a skill rolls with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum Stat {
    Attribute(Attribute),
    Aspect(Aspect),
}

impl Stat {
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Attribute(attribute) => attribute.name(),
            Stat::Aspect(aspect) => aspect.name(),
        }
    }
}

// =============================================================================
// Skills
// =============================================================================

/// A core skill, rolled with its governing attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSkill {
    pub name: &'static str,
    pub attribute: Attribute,
    pub description: &'static str,
}

impl CoreSkill {
    /// Stored field id, e.g. `coreSkills:Sway`.
    pub fn field_id(&self) -> String {
        format!("coreSkills:{}", self.name)
    }

    /// Field id used by older sheets, e.g. `skill:Sway`.
    pub fn legacy_field_id(&self) -> String {
        format!("skill:{}", self.name)
    }
}

pub const CORE_SKILLS: &[CoreSkill] = &[
    CoreSkill {
        name: "Athletics",
        attribute: Attribute::Strength,
        description: "Climb, swim, jump and push through physical obstacles.",
    },
    CoreSkill {
        name: "Endurance",
        attribute: Attribute::Strength,
        description: "Hold out against exhaustion, poison and the elements.",
    },
    CoreSkill {
        name: "Perception",
        attribute: Attribute::Sense,
        description: "Spot what is hidden and notice what is wrong.",
    },
    CoreSkill {
        name: "Insight",
        attribute: Attribute::Sense,
        description: "Read intentions and feelings behind words.",
    },
    CoreSkill {
        name: "Stealth",
        attribute: Attribute::Dexterity,
        description: "Move unseen and unheard.",
    },
    CoreSkill {
        name: "Finesse",
        attribute: Attribute::Dexterity,
        description: "Pick locks, palm objects and perform delicate work.",
    },
    CoreSkill {
        name: "Knowledge",
        attribute: Attribute::Intellect,
        description: "Recall lore, history and the workings of the world.",
    },
    CoreSkill {
        name: "Tinkering",
        attribute: Attribute::Intellect,
        description: "Build, repair and improvise devices.",
    },
    CoreSkill {
        name: "Sway",
        attribute: Attribute::Presence,
        description: "Persuade, charm or intimidate others.",
    },
    CoreSkill {
        name: "Performance",
        attribute: Attribute::Presence,
        description: "Captivate an audience through art or spectacle.",
    },
];

pub fn find_core_skill(name: &str) -> Option<&'static CoreSkill> {
    CORE_SKILLS.iter().find(|skill| skill.name == name)
}

/// A learnable aspect skill, rolled with its aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectSkill {
    pub name: &'static str,
    pub aspect: Aspect,
    pub description: &'static str,
}

pub const ASPECT_SKILLS: &[AspectSkill] = &[
    AspectSkill {
        name: "Ignition",
        aspect: Aspect::Fire,
        description: "Call flame into being or feed an existing fire.",
    },
    AspectSkill {
        name: "Searing",
        aspect: Aspect::Fire,
        description: "Strike with concentrated heat.",
    },
    AspectSkill {
        name: "Restoration",
        aspect: Aspect::Water,
        description: "Mend wounds and soothe fatigue.",
    },
    AspectSkill {
        name: "Tides",
        aspect: Aspect::Water,
        description: "Shape and direct bodies of water.",
    },
    AspectSkill {
        name: "Gale",
        aspect: Aspect::Wind,
        description: "Raise winds strong enough to push and lift.",
    },
    AspectSkill {
        name: "Windstep",
        aspect: Aspect::Wind,
        description: "Ride the air to move with impossible speed.",
    },
    AspectSkill {
        name: "Radiance",
        aspect: Aspect::Light,
        description: "Shed light that reveals and dazzles.",
    },
    AspectSkill {
        name: "Warding",
        aspect: Aspect::Light,
        description: "Raise barriers of hardened light.",
    },
    AspectSkill {
        name: "Umbra",
        aspect: Aspect::Darkness,
        description: "Wrap an area in shadow.",
    },
    AspectSkill {
        name: "Dread",
        aspect: Aspect::Darkness,
        description: "Plant fear in the minds of others.",
    },
];

pub fn aspect_skill_options() -> Vec<SchemaSelectOption> {
    ASPECT_SKILLS
        .iter()
        .map(|skill| {
            SchemaSelectOption::new(skill.name, format!("{} ({})", skill.name, skill.aspect))
                .with_description(skill.description)
        })
        .collect()
}

pub fn find_aspect_skill(name: &str) -> Option<&'static AspectSkill> {
    ASPECT_SKILLS.iter().find(|skill| skill.name == name)
}

// =============================================================================
// Personas and lineages
// =============================================================================

/// The single fixed modifier a persona or lineage grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitBonus {
    /// +1 to one attribute or aspect
    Stat(Stat),
    /// Flat bonus to maximum hits
    Hits(i32),
    /// Flat bonus to maximum fatigue
    Fatigue(i32),
}

impl TraitBonus {
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        match self {
            TraitBonus::Stat(bonus_stat) if *bonus_stat == stat => 1,
            _ => 0,
        }
    }

    pub fn hits_bonus(&self) -> i32 {
        match self {
            TraitBonus::Hits(bonus) => *bonus,
            _ => 0,
        }
    }

    pub fn fatigue_bonus(&self) -> i32 {
        match self {
            TraitBonus::Fatigue(bonus) => *bonus,
            _ => 0,
        }
    }
}

/// A categorical trait (persona or lineage) with its modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterTrait {
    pub name: &'static str,
    pub description: &'static str,
    pub bonus: TraitBonus,
}

pub const PERSONAS: &[CharacterTrait] = &[
    CharacterTrait {
        name: "Commander",
        description: "Leads from the front and never seems to tire.",
        bonus: TraitBonus::Fatigue(3),
    },
    CharacterTrait {
        name: "Warden",
        description: "A steadfast protector.",
        bonus: TraitBonus::Stat(Stat::Attribute(Attribute::Strength)),
    },
    CharacterTrait {
        name: "Seeker",
        description: "Always watching, always listening.",
        bonus: TraitBonus::Stat(Stat::Attribute(Attribute::Sense)),
    },
    CharacterTrait {
        name: "Trickster",
        description: "Quick hands and quicker feet.",
        bonus: TraitBonus::Stat(Stat::Attribute(Attribute::Dexterity)),
    },
    CharacterTrait {
        name: "Scholar",
        description: "Knowledge is the sharpest tool.",
        bonus: TraitBonus::Stat(Stat::Attribute(Attribute::Intellect)),
    },
    CharacterTrait {
        name: "Envoy",
        description: "Words open more doors than blades.",
        bonus: TraitBonus::Stat(Stat::Attribute(Attribute::Presence)),
    },
];

pub const LINEAGES: &[CharacterTrait] = &[
    CharacterTrait {
        name: "Scalebearer",
        description: "Hardened hide shrugs off blows.",
        bonus: TraitBonus::Hits(3),
    },
    CharacterTrait {
        name: "Emberkin",
        description: "Born with a spark that never goes out.",
        bonus: TraitBonus::Stat(Stat::Aspect(Aspect::Fire)),
    },
    CharacterTrait {
        name: "Tidewalker",
        description: "At home wherever water runs.",
        bonus: TraitBonus::Stat(Stat::Aspect(Aspect::Water)),
    },
    CharacterTrait {
        name: "Galeborn",
        description: "Restless as the open sky.",
        bonus: TraitBonus::Stat(Stat::Aspect(Aspect::Wind)),
    },
    CharacterTrait {
        name: "Dawnchild",
        description: "Carries the first light of morning.",
        bonus: TraitBonus::Stat(Stat::Aspect(Aspect::Light)),
    },
    CharacterTrait {
        name: "Umbral",
        description: "Shaped by the long night.",
        bonus: TraitBonus::Stat(Stat::Aspect(Aspect::Darkness)),
    },
];

/// Names match exactly, the same way a select field finds its current option.
fn find_trait(table: &'static [CharacterTrait], name: &str) -> Option<&'static CharacterTrait> {
    table.iter().find(|entry| entry.name == name)
}

pub fn find_persona(name: &str) -> Option<&'static CharacterTrait> {
    find_trait(PERSONAS, name)
}

pub fn find_lineage(name: &str) -> Option<&'static CharacterTrait> {
    find_trait(LINEAGES, name)
}

pub fn trait_options(table: &[CharacterTrait]) -> Vec<SchemaSelectOption> {
    table
        .iter()
        .map(|entry| {
            SchemaSelectOption::new(entry.name, entry.name).with_description(entry.description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_and_aspect_ids_are_namespaced() {
        assert_eq!(Attribute::Strength.field_id(), "attribute:Strength");
        assert_eq!(Aspect::Fire.field_id(), "aspect:Fire");
        assert_eq!(
            find_core_skill("Sway").map(CoreSkill::field_id),
            Some("coreSkills:Sway".to_string())
        );
    }

    #[test]
    fn names_parse_exactly() {
        assert_eq!("Presence".parse::<Attribute>().unwrap(), Attribute::Presence);
        assert_eq!("Darkness".parse::<Aspect>().unwrap(), Aspect::Darkness);
        assert!("presence".parse::<Attribute>().is_err());
        assert!(" Fire".parse::<Aspect>().is_err());
        assert!("Storm".parse::<Aspect>().is_err());
    }

    #[test]
    fn lookups_reject_other_spellings() {
        assert!(find_core_skill("sway").is_none());
        assert!(find_aspect_skill("GALE").is_none());
        assert!(find_persona("commander").is_none());
        assert!(find_lineage("").is_none());
        assert!(find_persona("Commander").is_some());
    }

    #[test]
    fn trait_tables_have_disjoint_names() {
        assert_eq!(PERSONAS.len(), 6);
        for persona in PERSONAS {
            assert!(find_lineage(persona.name).is_none());
        }
    }

    #[test]
    fn unknown_or_empty_traits_are_absent() {
        assert!(find_persona("").is_none());
        assert!(find_persona("Pirate").is_none());
        assert_eq!(find_persona("Commander").map(|p| p.bonus), Some(TraitBonus::Fatigue(3)));
        assert_eq!(find_lineage("Scalebearer").map(|l| l.bonus.hits_bonus()), Some(3));
    }

    #[test]
    fn every_core_skill_is_governed_by_an_attribute() {
        for attribute in Attribute::ALL {
            assert!(CORE_SKILLS.iter().any(|skill| skill.attribute == attribute));
        }
        for aspect in Aspect::ALL {
            assert!(ASPECT_SKILLS.iter().any(|skill| skill.aspect == aspect));
        }
    }
}
