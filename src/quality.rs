use crate::error::SxResult;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

/// Discrete response-quality tier. Immutable reference data: the attached
/// classification never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    Good,
    Adequate,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityClassification {
    pub multiplier: f32,
    pub min_points: i32,
    pub bonus: i32,
}

impl QualityTier {
    pub fn classification(&self) -> QualityClassification {
        match self {
            QualityTier::Excellent => QualityClassification {
                multiplier: 1.0,
                min_points: 10,
                bonus: 2,
            },
            QualityTier::Good => QualityClassification {
                multiplier: 0.85,
                min_points: 7,
                bonus: 1,
            },
            QualityTier::Adequate => QualityClassification {
                multiplier: 0.7,
                min_points: 5,
                bonus: 0,
            },
            QualityTier::Poor => QualityClassification {
                multiplier: 0.4,
                min_points: 2,
                bonus: 0,
            },
        }
    }
}

/// Raw sub-scores attached to a dialogue option before quality weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawScores {
    pub empathy: f32,
    pub information: f32,
}

/// The weighted outcome of one dialogue choice. Pure data; the caller
/// applies it to phase state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedResponse {
    pub empathy: f32,
    pub information: f32,
    pub total_points: i32,
    pub tier: QualityTier,
    pub bonus: i32,
}

/// Typed map from (interaction id, option index) to a quality tier.
/// Replaces the legacy flat table keyed by "{id}_option_{index}" strings.
pub struct ResponseTable {
    entries: HashMap<(String, u8), QualityTier>,
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The embedded classification table for the stock case file.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        let rows: &[(&str, u8, QualityTier)] = &[
            // Phase 1: intake interview
            ("intake_greeting", 0, QualityTier::Excellent),
            ("intake_greeting", 1, QualityTier::Adequate),
            ("intake_greeting", 2, QualityTier::Poor),
            ("housing_inquiry", 0, QualityTier::Good),
            ("housing_inquiry", 1, QualityTier::Excellent),
            ("housing_inquiry", 2, QualityTier::Poor),
            ("income_question", 0, QualityTier::Adequate),
            ("income_question", 1, QualityTier::Good),
            ("income_question", 2, QualityTier::Excellent),
            ("family_followup", 0, QualityTier::Excellent),
            ("family_followup", 1, QualityTier::Good),
            ("family_followup", 2, QualityTier::Adequate),
            ("closing_summary", 0, QualityTier::Good),
            ("closing_summary", 1, QualityTier::Poor),
            ("closing_summary", 2, QualityTier::Excellent),
            // Phase 3: crisis scenarios
            ("eviction_notice", 0, QualityTier::Excellent),
            ("eviction_notice", 1, QualityTier::Adequate),
            ("eviction_notice", 2, QualityTier::Poor),
            ("missed_appointment", 0, QualityTier::Good),
            ("missed_appointment", 1, QualityTier::Excellent),
            ("missed_appointment", 2, QualityTier::Adequate),
        ];
        for (id, opt, tier) in rows {
            table.insert(id, *opt, *tier);
        }
        table
    }

    pub fn insert(&mut self, interaction: &str, option: u8, tier: QualityTier) {
        self.entries.insert((interaction.to_string(), option), tier);
    }

    pub fn lookup(&self, interaction: &str, option: u8) -> Option<QualityTier> {
        self.entries
            .get(&(interaction.to_string(), option))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load classifications from CSV with columns `interaction,option,tier`.
    /// Invalid rows are skipped, not fatal; the skip count is logged.
    pub fn from_csv_reader<R: Read>(reader: R) -> SxResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let mut table = Self::empty();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let rec = match result {
                Ok(rec) => rec,
                Err(e) => {
                    debug!("CSV parse error in response table: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            if rec.len() < 3 {
                skipped += 1;
                continue;
            }
            let option: u8 = match rec[1].trim().parse() {
                Ok(v) => v,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let tier = match QualityTier::from_str(rec[2].trim()) {
                Ok(t) => t,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            table.insert(rec[0].trim(), option, tier);
        }

        if skipped > 0 {
            warn!("Skipped {} invalid rows in response table", skipped);
        }
        Ok(table)
    }

    /// Score one dialogue choice. Unknown (interaction, option) pairs fall
    /// back to `adequate`: every choice must be scoreable, and an absent
    /// classification is leniency, not an error.
    pub fn evaluate(&self, interaction: &str, option: u8, raw: RawScores) -> WeightedResponse {
        let tier = match self.lookup(interaction, option) {
            Some(t) => t,
            None => {
                debug!(
                    "No classification for '{}' option {}; defaulting to adequate",
                    interaction, option
                );
                QualityTier::Adequate
            }
        };
        let c = tier.classification();
        let empathy = (raw.empathy * c.multiplier).round();
        let information = (raw.information * c.multiplier).round();
        WeightedResponse {
            empathy,
            information,
            total_points: empathy as i32 + information as i32 + c.bonus,
            tier,
            bonus: c.bonus,
        }
    }
}
