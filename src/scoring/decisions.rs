use strum_macros::{Display, EnumIter, EnumString};

/// Ordinal preference among the fixed referral choice-sets. Each choice is
/// a lookup into a fixed ranking, not open-ended logic: best 0.25, middle
/// 0.20, worst 0.05.
pub const DECISION_COMPONENT_MAX: f32 = 0.25;
pub const DECISION_MAX: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AvailabilityChoice {
    Immediate,
    WithinWeek,
    NextMonth,
}

impl AvailabilityChoice {
    pub fn quality_points(&self) -> f32 {
        match self {
            AvailabilityChoice::Immediate => 0.25,
            AvailabilityChoice::WithinWeek => 0.20,
            AvailabilityChoice::NextMonth => 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CapacityChoice {
    OpenSlots,
    Waitlisted,
    AtCapacity,
}

impl CapacityChoice {
    pub fn quality_points(&self) -> f32 {
        match self {
            CapacityChoice::OpenSlots => 0.25,
            CapacityChoice::Waitlisted => 0.20,
            CapacityChoice::AtCapacity => 0.05,
        }
    }
}

/// Sum of the two independent 0..=0.25 contributions. Zero until both
/// referral choices are made.
pub fn decision_quality(
    availability: Option<AvailabilityChoice>,
    capacity: Option<CapacityChoice>,
) -> f32 {
    match (availability, capacity) {
        (Some(a), Some(c)) => a.quality_points() + c.quality_points(),
        _ => 0.0,
    }
}
