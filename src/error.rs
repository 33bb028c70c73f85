//! Planning error type and its classification.

use crate::models::EquipmentCategory;

/// Classification of a [`PlanningError`].
///
/// Every error aborts the current optimization attempt; the kind tells the
/// caller what to fix before retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A measured value lies outside the tolerance band of its computed target.
    Aberration,
    /// Aggregate stock (calories, equipment coverage, water) is below requirement.
    Insufficiency,
    /// No assignment of batches to backpacks satisfies the capacity constraints.
    Infeasibility,
    /// A pinned-category item has no resolvable owner.
    Ownership,
    /// The hike graph itself violates a data-model invariant.
    Model,
}

/// A physiological metric checked against the profile model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Daily caloric need (kcal).
    DailyCalories,
    /// Daily water need (liters).
    DailyWater,
    /// Maximum carry capacity (kg).
    MaxCarry,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::DailyCalories => write!(f, "daily calories"),
            Metric::DailyWater => write!(f, "daily water"),
            Metric::MaxCarry => write!(f, "max carry"),
        }
    }
}

/// Errors produced by validation, selection, and distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("hike has no participants")]
    NoParticipants,

    #[error("hike duration must be 1 to 3 days, got {days}")]
    InvalidDuration { days: u8 },

    #[error("hike already has the maximum of {max} participants")]
    ParticipantLimit { max: usize },

    #[error("participant '{name}' cannot join as a second creator")]
    DuplicateCreator { name: String },

    #[error("hike creator '{name}' cannot be removed")]
    CreatorRemoval { name: String },

    #[error("participant {id} is not part of the hike")]
    UnknownParticipant { id: u64 },

    #[error("hike has no creator")]
    MissingCreator,

    #[error("participant {id} appears more than once")]
    DuplicateParticipant { id: u64 },

    #[error(
        "backpack of '{participant}' holds {capacity_g} g, but max carry allows {expected_g} g"
    )]
    BackpackCapacityMismatch {
        participant: String,
        capacity_g: u64,
        expected_g: u64,
    },

    #[error("backpack of '{participant}' belongs to participant {owner}")]
    BackpackOwnerMismatch { participant: String, owner: u64 },

    #[error("backpack of '{participant}' carries {total_mass_g} g, above its {capacity_g} g capacity")]
    OverloadedBackpack {
        participant: String,
        total_mass_g: u64,
        capacity_g: u64,
    },

    #[error(
        "daily distance {measured_km:.1} km is implausible for reference participant \
         '{participant}' (target {target_km:.1} km/day)"
    )]
    DailyDistance {
        participant: String,
        measured_km: f64,
        target_km: f64,
    },

    #[error(
        "{metric} of participant '{participant}' is {measured:.2}, outside ±{tolerance_pct:.0}% \
         of target {target:.2}"
    )]
    Aberration {
        participant: String,
        metric: Metric,
        measured: f64,
        target: f64,
        tolerance_pct: f64,
    },

    #[error("food items '{first}' and '{second}' share the common name '{common_name}'")]
    DuplicateFood {
        common_name: String,
        first: String,
        second: String,
    },

    #[error(
        "food item '{item}' has {kcal:.0} kcal per unit, above the {limit:.0} kcal \
         single-item limit"
    )]
    OversizedFoodUnit { item: String, kcal: f64, limit: f64 },

    #[error("food catalogue provides {available:.0} kcal, group needs {required:.0} kcal")]
    InsufficientCalories { available: f64, required: f64 },

    #[error("{category} equipment covers {available} participants, {required} required")]
    InsufficientEquipment {
        category: EquipmentCategory,
        available: u32,
        required: u32,
    },

    #[error("{category} item '{item}' has no owner assigned")]
    MissingOwner {
        item: String,
        category: EquipmentCategory,
    },

    #[error(
        "water containers carry {capacity_liters:.2} L, group needs {required_liters:.2} L per day"
    )]
    InsufficientWater {
        capacity_liters: f64,
        required_liters: f64,
    },

    #[error(
        "total batch weight {total_batch_g} g exceeds total backpack capacity {total_capacity_g} g"
    )]
    CapacityExceeded {
        total_batch_g: u64,
        total_capacity_g: u64,
    },

    #[error(
        "no single backpack can hold batch '{item}' ({batch_g} g, largest backpack {largest_capacity_g} g)"
    )]
    BatchTooHeavy {
        item: String,
        batch_g: u64,
        largest_capacity_g: u64,
    },

    #[error("no assignment of {items} batches fits into {backpacks} backpacks")]
    NoFeasibleAssignment { items: usize, backpacks: usize },

    #[error("hike {id} not found")]
    HikeNotFound { id: u64 },
}

impl PlanningError {
    /// Returns the classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hike::{ErrorKind, PlanningError};
    ///
    /// let err = PlanningError::NoFeasibleAssignment { items: 3, backpacks: 2 };
    /// assert_eq!(err.kind(), ErrorKind::Infeasibility);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanningError::DailyDistance { .. } | PlanningError::Aberration { .. } => {
                ErrorKind::Aberration
            }
            PlanningError::DuplicateFood { .. }
            | PlanningError::OversizedFoodUnit { .. }
            | PlanningError::InsufficientCalories { .. }
            | PlanningError::InsufficientEquipment { .. }
            | PlanningError::InsufficientWater { .. } => ErrorKind::Insufficiency,
            PlanningError::CapacityExceeded { .. }
            | PlanningError::BatchTooHeavy { .. }
            | PlanningError::NoFeasibleAssignment { .. } => ErrorKind::Infeasibility,
            PlanningError::MissingOwner { .. } => ErrorKind::Ownership,
            PlanningError::NoParticipants
            | PlanningError::InvalidDuration { .. }
            | PlanningError::ParticipantLimit { .. }
            | PlanningError::DuplicateCreator { .. }
            | PlanningError::CreatorRemoval { .. }
            | PlanningError::UnknownParticipant { .. }
            | PlanningError::MissingCreator
            | PlanningError::DuplicateParticipant { .. }
            | PlanningError::BackpackCapacityMismatch { .. }
            | PlanningError::BackpackOwnerMismatch { .. }
            | PlanningError::OverloadedBackpack { .. }
            | PlanningError::HikeNotFound { .. } => ErrorKind::Model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = PlanningError::Aberration {
            participant: "Ana".into(),
            metric: Metric::DailyWater,
            measured: 5.0,
            target: 3.0,
            tolerance_pct: 10.0,
        };
        assert_eq!(err.kind(), ErrorKind::Aberration);
        assert_eq!(
            PlanningError::InsufficientWater {
                capacity_liters: 1.0,
                required_liters: 2.0
            }
            .kind(),
            ErrorKind::Insufficiency
        );
        assert_eq!(
            PlanningError::MissingOwner {
                item: "Fleece".into(),
                category: EquipmentCategory::Clothing
            }
            .kind(),
            ErrorKind::Ownership
        );
        assert_eq!(
            PlanningError::CreatorRemoval { name: "Ana".into() }.kind(),
            ErrorKind::Model
        );
    }

    #[test]
    fn test_messages_name_context() {
        let err = PlanningError::Aberration {
            participant: "Ana".into(),
            metric: Metric::DailyCalories,
            measured: 3000.0,
            target: 2500.0,
            tolerance_pct: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Ana"));
        assert!(msg.contains("daily calories"));
        assert!(msg.contains("3000.00"));
        assert!(msg.contains("2500.00"));

        let err = PlanningError::BatchTooHeavy {
            item: "Tent".into(),
            batch_g: 6000,
            largest_capacity_g: 5000,
        };
        assert!(err.to_string().contains("no single backpack"));
    }
}
