//! Domain model types for hike planning.
//!
//! Provides the core abstractions: participants with physiological profiles,
//! backpacks as capacity-bounded containers, food and equipment catalogue
//! items, and the hike aggregate that ties them together.

mod backpack;
mod equipment;
mod hike;
mod ids;
mod item;
mod ownership;
mod participant;

pub use backpack::Backpack;
pub use equipment::GroupEquipment;
pub use hike::{Hike, Waypoint, DURATION_DAYS, MAX_PARTICIPANTS};
pub use ids::{HikeId, ItemId, ParticipantId};
pub use item::{CatalogueEntry, EquipmentCategory, EquipmentItem, FoodProduct, Item};
pub use ownership::{OwnershipLookup, OwnershipRegistry};
pub use participant::{Build, FitnessLevel, Participant};
