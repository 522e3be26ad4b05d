//! Stress pools, peril and the unconscious flag.

use serde::{Deserialize, Serialize};

use super::data::{PERIL_STEP, RECOVERY_PERIL, UNCONSCIOUS_PERIL};
use crate::fields::{
    resolve_boolean_field, resolve_number_field, BooleanFieldOptions, FieldStore,
    NumberFieldOptions, ResolvedBooleanField, ResolvedNumberField,
};

pub const UNCONSCIOUS_FIELD: &str = "isUnconscious";

/// A named stress track stored as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressPool {
    Damage,
    Fatigue,
    Anxiety,
    Hits,
}

impl StressPool {
    pub fn field_id(&self) -> &'static str {
        match self {
            StressPool::Damage => "damage",
            StressPool::Fatigue => "fatigue",
            StressPool::Anxiety => "anxiety",
            StressPool::Hits => "hits",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressPool::Damage => "Damage",
            StressPool::Fatigue => "Fatigue",
            StressPool::Anxiety => "Anxiety",
            StressPool::Hits => "Hits",
        }
    }
}

/// Which generation of the sheet a character uses. Only the stress pools
/// differ between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetLayout {
    #[default]
    Standard,
    Classic,
}

impl SheetLayout {
    pub fn stress_pools(&self) -> &'static [StressPool] {
        match self {
            SheetLayout::Standard => {
                &[StressPool::Damage, StressPool::Fatigue, StressPool::Anxiety]
            }
            SheetLayout::Classic => &[StressPool::Hits, StressPool::Fatigue],
        }
    }
}

/// `floor(value / 5)`; stored pools are never negative.
pub fn peril_of(value: i32) -> i32 {
    value.div_euclid(PERIL_STEP)
}

pub fn resolve_stress_field(sheet: &dyn FieldStore, pool: StressPool) -> ResolvedNumberField<'_> {
    resolve_number_field(sheet, &NumberFieldOptions::new(pool.field_id()))
}

/// Every pool of a layout plus the unconscious flag.
#[derive(Debug, Clone, PartialEq)]
pub struct StressTrack<'a> {
    pools: Vec<(StressPool, ResolvedNumberField<'a>)>,
    unconscious: ResolvedBooleanField<'a>,
}

pub fn resolve_stress(sheet: &dyn FieldStore, layout: SheetLayout) -> StressTrack<'_> {
    StressTrack {
        pools: layout
            .stress_pools()
            .iter()
            .map(|pool| (*pool, resolve_stress_field(sheet, *pool)))
            .collect(),
        unconscious: resolve_boolean_field(sheet, &BooleanFieldOptions::new(UNCONSCIOUS_FIELD)),
    }
}

impl<'a> StressTrack<'a> {
    pub fn pools(&self) -> impl Iterator<Item = (StressPool, &ResolvedNumberField<'a>)> {
        self.pools.iter().map(|(pool, field)| (*pool, field))
    }

    pub fn pool(&self, pool: StressPool) -> Option<&ResolvedNumberField<'a>> {
        self.pools
            .iter()
            .find(|(candidate, _)| *candidate == pool)
            .map(|(_, field)| field)
    }

    /// Peril of one pool; pools outside the layout have none.
    pub fn peril(&self, pool: StressPool) -> i32 {
        self.pool(pool).map(|field| peril_of(field.as_int())).unwrap_or(0)
    }

    pub fn peril_sum(&self) -> i32 {
        self.pools.iter().map(|(_, field)| peril_of(field.as_int())).sum()
    }

    /// The flag players toggle; the only source of truth for unconsciousness.
    pub fn unconscious(&self) -> &ResolvedBooleanField<'a> {
        &self.unconscious
    }

    pub fn is_unconscious(&self) -> bool {
        self.unconscious.value()
    }

    /// Advisory: conscious and at or past the unconscious threshold.
    pub fn can_fall_unconscious(&self) -> bool {
        !self.is_unconscious() && self.peril_sum() >= UNCONSCIOUS_PERIL
    }

    /// Advisory: unconscious and healed down to the recovery threshold.
    pub fn can_recover(&self) -> bool {
        self.is_unconscious() && self.peril_sum() <= RECOVERY_PERIL
    }

    pub fn summary(&self) -> StressSummary {
        StressSummary {
            pools: self
                .pools
                .iter()
                .map(|(pool, field)| PoolSummary {
                    pool: *pool,
                    value: field.as_int(),
                    peril: peril_of(field.as_int()),
                })
                .collect(),
            peril_sum: self.peril_sum(),
            is_unconscious: self.is_unconscious(),
            can_fall_unconscious: self.can_fall_unconscious(),
            can_recover: self.can_recover(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    pub pool: StressPool,
    pub value: i32,
    pub peril: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSummary {
    pub pools: Vec<PoolSummary>,
    pub peril_sum: i32,
    pub is_unconscious: bool,
    pub can_fall_unconscious: bool,
    pub can_recover: bool,
}
