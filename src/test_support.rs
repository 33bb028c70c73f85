//! Shared hike fixtures for unit tests.

use crate::config::PlannerConfig;
use crate::distance::{path_length_km, GeoPoint};
use crate::models::{
    Build, EquipmentCategory, EquipmentItem, FitnessLevel, FoodProduct, Hike, HikeId, ItemId,
    OwnershipRegistry, Participant, ParticipantId, Waypoint,
};

/// Knobs for [`valid_hike_with`]. The default builds a hike that passes
/// validation with the default configuration.
pub(crate) struct HikeSpec {
    pub duration_days: u8,
    /// North-south extent of the route in degrees of latitude.
    pub distance_deg_lat: f64,
    pub ben_kcal_factor: f64,
    pub food_batches: Option<u32>,
    pub medical_batch: u32,
    pub with_rest: bool,
    pub water_bag_batch: u32,
}

impl Default for HikeSpec {
    fn default() -> Self {
        Self {
            duration_days: 2,
            distance_deg_lat: 0.1,
            ben_kcal_factor: 1.0,
            food_batches: None,
            medical_batch: 3,
            with_rest: true,
            water_bag_batch: 3,
        }
    }
}

pub(crate) fn person(
    id: u64,
    name: &str,
    age: u32,
    level: FitnessLevel,
    build: Build,
) -> Participant {
    Participant::new(ParticipantId::new(id), name, age, level, build)
}

/// Sets the participant's declared needs to exactly the model's targets.
pub(crate) fn matched(participant: Participant, km: f64, config: &PlannerConfig) -> Participant {
    let acc = config.modifier_accumulation;
    let profile = &config.profile;
    let kcal = profile.daily_kcal.target(&participant, km, acc);
    let water = profile.daily_water_liters.target(&participant, km, acc);
    let carry = profile.max_carry_kg.target(&participant, km, acc);
    participant
        .with_daily_kcal(kcal)
        .with_daily_water_liters(water)
        .with_max_carry_kg(carry)
}

pub(crate) fn valid_hike() -> (Hike, OwnershipRegistry) {
    valid_hike_with(&HikeSpec::default())
}

/// Three participants: Ana (creator, 34, trained, medium, 18 kg), Ben (28,
/// athletic, light, 17 kg) and Cleo (62, novice, heavy, 15 kg, the weakest).
pub(crate) fn valid_hike_with(spec: &HikeSpec) -> (Hike, OwnershipRegistry) {
    let config = PlannerConfig::default();
    let start = GeoPoint::new(46.0, 7.0).expect("valid start");
    let end = GeoPoint::new(46.0 + spec.distance_deg_lat, 7.0).expect("valid end");
    let km = path_length_km(&[start, end]);

    let ana = matched(person(1, "Ana", 34, FitnessLevel::Trained, Build::Medium), km, &config);
    let ben = matched(person(2, "Ben", 28, FitnessLevel::Athletic, Build::Light), km, &config);
    let ben_kcal = ben.daily_kcal() * spec.ben_kcal_factor;
    let ben = ben.with_daily_kcal(ben_kcal);
    let cleo = matched(person(3, "Cleo", 62, FitnessLevel::Novice, Build::Heavy), km, &config);

    let mut hike = Hike::new(
        HikeId::new(1),
        spec.duration_days,
        ana,
        Waypoint::new("Trailhead", start),
        Waypoint::new("Hut", end),
    )
    .expect("valid hike");
    hike.add_participant(ben).expect("add Ben");
    hike.add_participant(cleo).expect("add Cleo");

    let batches = |default: u32| spec.food_batches.unwrap_or(default);
    hike.add_food(FoodProduct::new(ItemId::new(10), "Nut mix", 100, batches(8), 600.0));
    hike.add_food(FoodProduct::new(ItemId::new(11), "Pasta", 250, batches(6), 900.0));
    hike.add_food(FoodProduct::new(ItemId::new(12), "Chocolate", 100, batches(4), 540.0));

    let gear = |id: u64, name: &str, category, mass, batch| {
        EquipmentItem::new(ItemId::new(id), name, category, mass, batch)
    };
    hike.add_equipment(gear(20, "First aid kit", EquipmentCategory::Medical, 400, spec.medical_batch));
    hike.add_equipment(gear(21, "Plasters", EquipmentCategory::Medical, 50, 1));
    hike.add_equipment(gear(30, "Map and compass", EquipmentCategory::Progression, 200, 3));
    hike.add_equipment(
        gear(35, "Water bag 4L", EquipmentCategory::Water, 4150, spec.water_bag_batch)
            .with_tare_mass(150),
    );
    hike.add_equipment(gear(36, "Bottle 1L", EquipmentCategory::Water, 1100, 2).with_tare_mass(100));
    hike.add_equipment(gear(50, "Rain jacket", EquipmentCategory::Clothing, 400, 1));
    hike.add_equipment(gear(51, "Rain jacket", EquipmentCategory::Clothing, 400, 1));
    hike.add_equipment(gear(52, "Poncho", EquipmentCategory::Clothing, 300, 1));
    hike.add_equipment(gear(60, "Camera", EquipmentCategory::Other, 600, 1));

    let id = hike.id();
    let mut owners = OwnershipRegistry::new()
        .with_owner(id, ItemId::new(50), ParticipantId::new(1))
        .with_owner(id, ItemId::new(51), ParticipantId::new(2))
        .with_owner(id, ItemId::new(52), ParticipantId::new(3));
    if spec.with_rest {
        hike.add_equipment(gear(40, "Tent", EquipmentCategory::Rest, 800, 3));
        owners.assign(id, ItemId::new(40), ParticipantId::new(1));
    }
    (hike, owners)
}
