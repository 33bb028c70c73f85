//! Participant profile type.

use serde::{Deserialize, Serialize};

use super::{Backpack, ParticipantId};
use crate::error::PlanningError;

/// Fitness level of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Novice,
    Trained,
    Athletic,
}

/// Body build of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Build {
    Light,
    Medium,
    Heavy,
}

/// A hike participant with a physiological profile and declared needs.
///
/// The declared needs (daily calories, daily water, max carry) are the values
/// the validator compares against the profile model. A participant with a
/// positive carry capacity owns exactly one backpack of that capacity; with
/// zero capacity they own none.
///
/// # Examples
///
/// ```
/// use u_hike::models::{Build, FitnessLevel, Participant, ParticipantId};
///
/// let p = Participant::new(ParticipantId::new(1), "Mira", 34, FitnessLevel::Trained, Build::Medium)
///     .with_daily_kcal(2900.0)
///     .with_daily_water_liters(3.2)
///     .with_max_carry_kg(18.0);
/// assert_eq!(p.backpack().map(|b| b.capacity_g()), Some(18_000));
///
/// let kid = Participant::new(ParticipantId::new(2), "Tim", 9, FitnessLevel::Novice, Build::Light)
///     .with_max_carry_kg(0.0);
/// assert!(kid.backpack().is_none());
/// ```
///
/// Deserialization re-derives the backpack from `max_carry_kg`. A stored
/// backpack must match that capacity, belong to this participant, and not be
/// overloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParticipantRecord")]
pub struct Participant {
    id: ParticipantId,
    name: String,
    age: u32,
    level: FitnessLevel,
    build: Build,
    creator: bool,
    daily_kcal: f64,
    daily_water_liters: f64,
    max_carry_kg: f64,
    backpack: Option<Backpack>,
}

impl Participant {
    /// Creates a non-creator participant with zero declared needs and no backpack.
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        age: u32,
        level: FitnessLevel,
        build: Build,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            level,
            build,
            creator: false,
            daily_kcal: 0.0,
            daily_water_liters: 0.0,
            max_carry_kg: 0.0,
            backpack: None,
        }
    }

    /// Flags this participant as the hike's creator.
    pub fn as_creator(mut self) -> Self {
        self.creator = true;
        self
    }

    /// Sets the declared daily caloric need.
    pub fn with_daily_kcal(mut self, kcal: f64) -> Self {
        self.daily_kcal = kcal;
        self
    }

    /// Sets the declared daily water need.
    pub fn with_daily_water_liters(mut self, liters: f64) -> Self {
        self.daily_water_liters = liters;
        self
    }

    /// Sets the maximum carry and replaces the backpack to match it.
    pub fn with_max_carry_kg(mut self, kg: f64) -> Self {
        self.max_carry_kg = kg;
        let capacity_g = carry_grams(kg);
        self.backpack = (capacity_g > 0).then(|| Backpack::new(self.id, capacity_g));
        self
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn level(&self) -> FitnessLevel {
        self.level
    }

    pub fn build(&self) -> Build {
        self.build
    }

    /// Returns `true` if this participant created the hike.
    pub fn is_creator(&self) -> bool {
        self.creator
    }

    pub fn daily_kcal(&self) -> f64 {
        self.daily_kcal
    }

    pub fn daily_water_liters(&self) -> f64 {
        self.daily_water_liters
    }

    pub fn max_carry_kg(&self) -> f64 {
        self.max_carry_kg
    }

    pub fn backpack(&self) -> Option<&Backpack> {
        self.backpack.as_ref()
    }

    pub fn backpack_mut(&mut self) -> Option<&mut Backpack> {
        self.backpack.as_mut()
    }
}

/// Stored form of a [`Participant`], checked on conversion.
#[derive(Deserialize)]
struct ParticipantRecord {
    id: ParticipantId,
    name: String,
    age: u32,
    level: FitnessLevel,
    build: Build,
    #[serde(default)]
    creator: bool,
    daily_kcal: f64,
    daily_water_liters: f64,
    max_carry_kg: f64,
    #[serde(default)]
    backpack: Option<Backpack>,
}

impl TryFrom<ParticipantRecord> for Participant {
    type Error = PlanningError;

    fn try_from(record: ParticipantRecord) -> Result<Self, Self::Error> {
        let expected_g = carry_grams(record.max_carry_kg);
        let backpack = match record.backpack {
            None => (expected_g > 0).then(|| Backpack::new(record.id, expected_g)),
            Some(bp) => {
                if bp.owner() != record.id {
                    return Err(PlanningError::BackpackOwnerMismatch {
                        participant: record.name,
                        owner: bp.owner().get(),
                    });
                }
                if expected_g == 0 || bp.capacity_g() != expected_g {
                    return Err(PlanningError::BackpackCapacityMismatch {
                        participant: record.name,
                        capacity_g: bp.capacity_g(),
                        expected_g,
                    });
                }
                if bp.is_overloaded() {
                    return Err(PlanningError::OverloadedBackpack {
                        participant: record.name,
                        total_mass_g: bp.total_mass_g(),
                        capacity_g: bp.capacity_g(),
                    });
                }
                Some(bp)
            }
        };
        Ok(Self {
            id: record.id,
            name: record.name,
            age: record.age,
            level: record.level,
            build: record.build,
            creator: record.creator,
            daily_kcal: record.daily_kcal,
            daily_water_liters: record.daily_water_liters,
            max_carry_kg: record.max_carry_kg,
            backpack,
        })
    }
}

/// Converts a carry capacity in kilograms to whole grams.
fn carry_grams(kg: f64) -> u64 {
    if !kg.is_finite() || kg <= 0.0 {
        return 0;
    }
    (kg * 1000.0).round() as u64
}
