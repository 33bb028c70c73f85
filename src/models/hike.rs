//! Hike aggregate: participants, catalogues, and waypoints.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    Backpack, EquipmentCategory, EquipmentItem, FoodProduct, GroupEquipment, HikeId, Participant,
    ParticipantId,
};
use crate::distance::{path_length_km, GeoPoint};
use crate::error::PlanningError;

/// Maximum number of participants on a hike (creator included).
pub const MAX_PARTICIPANTS: usize = 3;

/// Allowed hike durations in days.
pub const DURATION_DAYS: std::ops::RangeInclusive<u8> = 1..=3;

/// A named point on the route.
///
/// Intermediate waypoints are visited in ascending `sequence` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    name: String,
    point: GeoPoint,
    sequence: u32,
}

impl Waypoint {
    /// Creates a waypoint with sequence index 0.
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
            sequence: 0,
        }
    }

    /// Sets the sequence index.
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

/// A planned multi-day group hike.
///
/// Owns its participants (at most [`MAX_PARTICIPANTS`], exactly one of them
/// the creator), the food catalogue sorted by descending caloric density, the
/// equipment catalogue grouped by category, and the waypoint chain.
///
/// # Examples
///
/// ```
/// use u_hike::distance::GeoPoint;
/// use u_hike::models::{Build, FitnessLevel, Hike, HikeId, Participant, ParticipantId, Waypoint};
///
/// let creator = Participant::new(ParticipantId::new(1), "Ana", 30, FitnessLevel::Trained, Build::Medium);
/// let start = Waypoint::new("Trailhead", GeoPoint::new(46.0, 7.0).unwrap());
/// let end = Waypoint::new("Hut", GeoPoint::new(46.1, 7.0).unwrap());
/// let mut hike = Hike::new(HikeId::new(1), 2, creator, start, end).unwrap();
///
/// let guest = Participant::new(ParticipantId::new(2), "Ben", 28, FitnessLevel::Novice, Build::Light);
/// hike.add_participant(guest).unwrap();
/// assert_eq!(hike.participant_count(), 2);
/// assert!(hike.remove_participant(ParticipantId::new(1)).is_err());
/// ```
///
/// Deserialization enforces the same lifecycle invariants as the builder
/// methods and re-sorts the catalogues and the waypoint chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HikeRecord")]
pub struct Hike {
    id: HikeId,
    duration_days: u8,
    participants: Vec<Participant>,
    food: Vec<FoodProduct>,
    equipment: BTreeMap<EquipmentCategory, GroupEquipment>,
    start: Waypoint,
    end: Waypoint,
    waypoints: Vec<Waypoint>,
}

impl Hike {
    /// Creates a hike with its creator as the only participant.
    ///
    /// The creator is flagged as such regardless of how it was built.
    pub fn new(
        id: HikeId,
        duration_days: u8,
        creator: Participant,
        start: Waypoint,
        end: Waypoint,
    ) -> Result<Self, PlanningError> {
        if !DURATION_DAYS.contains(&duration_days) {
            return Err(PlanningError::InvalidDuration {
                days: duration_days,
            });
        }
        Ok(Self {
            id,
            duration_days,
            participants: vec![creator.as_creator()],
            food: Vec::new(),
            equipment: BTreeMap::new(),
            start,
            end,
            waypoints: Vec::new(),
        })
    }

    pub fn id(&self) -> HikeId {
        self.id
    }

    pub fn duration_days(&self) -> u8 {
        self.duration_days
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Looks up a participant by id.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// The participant who created the hike.
    pub fn creator(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_creator())
    }

    /// Adds a non-creator participant.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), PlanningError> {
        if self.participants.len() >= MAX_PARTICIPANTS {
            return Err(PlanningError::ParticipantLimit {
                max: MAX_PARTICIPANTS,
            });
        }
        if participant.is_creator() {
            return Err(PlanningError::DuplicateCreator {
                name: participant.name().to_string(),
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Removes a participant. The creator can never be removed.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, PlanningError> {
        let pos = self
            .participants
            .iter()
            .position(|p| p.id() == id)
            .ok_or(PlanningError::UnknownParticipant { id: id.get() })?;
        if self.participants[pos].is_creator() {
            return Err(PlanningError::CreatorRemoval {
                name: self.participants[pos].name().to_string(),
            });
        }
        Ok(self.participants.remove(pos))
    }

    /// Food catalogue, descending by caloric density.
    pub fn food(&self) -> &[FoodProduct] {
        &self.food
    }

    /// Adds a food product, keeping the catalogue sorted by descending
    /// caloric density (stable for equal densities).
    pub fn add_food(&mut self, food: FoodProduct) {
        let density = food.caloric_density();
        let pos = self
            .food
            .partition_point(|f| f.caloric_density() >= density);
        self.food.insert(pos, food);
    }

    /// Equipment catalogue grouped by category.
    pub fn equipment(&self) -> &BTreeMap<EquipmentCategory, GroupEquipment> {
        &self.equipment
    }

    /// Equipment group of one category, if any item was added to it.
    pub fn equipment_group(&self, category: EquipmentCategory) -> Option<&GroupEquipment> {
        self.equipment.get(&category)
    }

    /// Files an equipment item under its category.
    pub fn add_equipment(&mut self, item: EquipmentItem) {
        let category = item.category();
        self.equipment
            .entry(category)
            .or_insert_with(|| GroupEquipment::new(category))
            .insert(item);
    }

    pub fn start(&self) -> &Waypoint {
        &self.start
    }

    pub fn end(&self) -> &Waypoint {
        &self.end
    }

    /// Intermediate waypoints in ascending sequence order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Adds an intermediate waypoint after all waypoints with a lower or
    /// equal sequence index.
    pub fn add_waypoint(&mut self, waypoint: Waypoint) {
        let seq = waypoint.sequence();
        let pos = self.waypoints.partition_point(|w| w.sequence() <= seq);
        self.waypoints.insert(pos, waypoint);
    }

    /// Start, intermediates by sequence, end.
    pub fn route_points(&self) -> Vec<GeoPoint> {
        std::iter::once(self.start.point())
            .chain(self.waypoints.iter().map(|w| w.point()))
            .chain(std::iter::once(self.end.point()))
            .collect()
    }

    /// Total trip distance in kilometers along the waypoint chain.
    pub fn total_distance_km(&self) -> f64 {
        path_length_km(&self.route_points())
    }

    /// Sum of all participants' declared daily caloric needs.
    pub fn group_daily_kcal(&self) -> f64 {
        self.participants.iter().map(|p| p.daily_kcal()).sum()
    }

    /// Sum of all participants' declared daily water needs.
    pub fn group_daily_water_liters(&self) -> f64 {
        self.participants.iter().map(|p| p.daily_water_liters()).sum()
    }

    /// Mutable handles to every participant's backpack.
    pub fn backpacks_mut(&mut self) -> Vec<&mut Backpack> {
        self.participants
            .iter_mut()
            .filter_map(|p| p.backpack_mut())
            .collect()
    }

    /// Every participant's backpack.
    pub fn backpacks(&self) -> impl Iterator<Item = &Backpack> {
        self.participants.iter().filter_map(|p| p.backpack())
    }
}

/// Stored form of a [`Hike`], checked on conversion.
#[derive(Deserialize)]
struct HikeRecord {
    id: HikeId,
    duration_days: u8,
    participants: Vec<Participant>,
    #[serde(default)]
    food: Vec<FoodProduct>,
    #[serde(default)]
    equipment: BTreeMap<EquipmentCategory, GroupEquipment>,
    start: Waypoint,
    end: Waypoint,
    #[serde(default)]
    waypoints: Vec<Waypoint>,
}

impl TryFrom<HikeRecord> for Hike {
    type Error = PlanningError;

    fn try_from(record: HikeRecord) -> Result<Self, Self::Error> {
        if !DURATION_DAYS.contains(&record.duration_days) {
            return Err(PlanningError::InvalidDuration {
                days: record.duration_days,
            });
        }
        if record.participants.is_empty() {
            return Err(PlanningError::NoParticipants);
        }
        if record.participants.len() > MAX_PARTICIPANTS {
            return Err(PlanningError::ParticipantLimit {
                max: MAX_PARTICIPANTS,
            });
        }
        let mut creators = record.participants.iter().filter(|p| p.is_creator());
        if creators.next().is_none() {
            return Err(PlanningError::MissingCreator);
        }
        if let Some(second) = creators.next() {
            return Err(PlanningError::DuplicateCreator {
                name: second.name().to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = record.participants.iter().find(|p| !seen.insert(p.id())) {
            return Err(PlanningError::DuplicateParticipant { id: dup.id().get() });
        }

        let mut hike = Self {
            id: record.id,
            duration_days: record.duration_days,
            participants: record.participants,
            food: Vec::new(),
            equipment: BTreeMap::new(),
            start: record.start,
            end: record.end,
            waypoints: Vec::new(),
        };
        for food in record.food {
            hike.add_food(food);
        }
        for item in record.equipment.values().flat_map(|g| g.items()) {
            hike.add_equipment(item.clone());
        }
        for waypoint in record.waypoints {
            hike.add_waypoint(waypoint);
        }
        Ok(hike)
    }
}
