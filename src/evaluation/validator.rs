//! Hike feasibility validator.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::config::PlannerConfig;
use crate::error::{Metric, PlanningError};
use crate::models::{
    CatalogueEntry, EquipmentCategory, FoodProduct, Hike, OwnershipLookup, Participant,
};

/// Validates a hike against the physiological and logistics model.
///
/// Checks run in a fixed order and the first violation aborts:
///
/// 1. the hike has participants;
/// 2. the daily distance is plausible for the weakest participant;
/// 3. each participant's declared needs lie within the tolerance band;
/// 4. the food catalogue has no duplicate types, no oversized units, and
///    enough calories;
/// 5. every mandatory equipment category covers every participant, and
///    pinned categories have owners;
/// 6. water containers carry the group's daily need.
///
/// # Examples
///
/// ```
/// use u_hike::config::PlannerConfig;
/// use u_hike::distance::GeoPoint;
/// use u_hike::evaluation::HikeValidator;
/// use u_hike::models::{Build, FitnessLevel, Hike, HikeId, OwnershipRegistry, Participant, ParticipantId, Waypoint};
///
/// let config = PlannerConfig::default();
/// let owners = OwnershipRegistry::new();
/// let validator = HikeValidator::new(&config, &owners);
///
/// let creator = Participant::new(ParticipantId::new(1), "Ana", 30, FitnessLevel::Trained, Build::Medium);
/// let here = Waypoint::new("Hut", GeoPoint::new(46.0, 7.0).unwrap());
/// let hike = Hike::new(HikeId::new(1), 1, creator, here.clone(), here).unwrap();
///
/// // Ana declared no needs at all, which is far outside the model.
/// assert!(validator.validate(&hike).is_err());
/// ```
pub struct HikeValidator<'a, O: OwnershipLookup + ?Sized> {
    config: &'a PlannerConfig,
    ownership: &'a O,
}

impl<'a, O: OwnershipLookup + ?Sized> HikeValidator<'a, O> {
    /// Creates a validator over the given configuration and ownership lookup.
    pub fn new(config: &'a PlannerConfig, ownership: &'a O) -> Self {
        Self { config, ownership }
    }

    /// Runs every check, stopping at the first violation.
    #[instrument(skip_all, fields(hike = %hike.id(), participants = hike.participant_count()))]
    pub fn validate(&self, hike: &Hike) -> Result<(), PlanningError> {
        self.run_checks(hike)
            .inspect(|_| debug!("hike passed validation"))
            .inspect_err(|e| debug!(error = %e, kind = ?e.kind(), "hike rejected"))
    }

    fn run_checks(&self, hike: &Hike) -> Result<(), PlanningError> {
        if hike.participants().is_empty() {
            return Err(PlanningError::NoParticipants);
        }
        let distance_km = hike.total_distance_km();
        self.check_daily_distance(hike, distance_km)?;
        for participant in hike.participants() {
            self.check_participant(participant, distance_km)?;
        }
        self.check_food(hike)?;
        self.check_equipment(hike)?;
        self.check_water(hike)
    }

    /// Checks the daily distance against the weakest participant's pace.
    pub fn check_daily_distance(&self, hike: &Hike, distance_km: f64) -> Result<(), PlanningError> {
        let profile = &self.config.profile;
        let reference = profile
            .weakest(hike.participants())
            .ok_or(PlanningError::NoParticipants)?;
        let target_km = profile.daily_distance_km.target(
            reference,
            0.0,
            self.config.modifier_accumulation,
        );
        let measured_km = distance_km / f64::from(hike.duration_days().max(1));
        let inside = profile.within_tolerance(measured_km, target_km);
        debug!(
            reference = reference.name(),
            measured_km, target_km, inside, "daily distance check"
        );
        if self.config.distance_policy.rejects(inside) {
            return Err(PlanningError::DailyDistance {
                participant: reference.name().to_string(),
                measured_km,
                target_km,
            });
        }
        Ok(())
    }

    /// Checks one participant's declared needs against the model.
    pub fn check_participant(
        &self,
        participant: &Participant,
        distance_km: f64,
    ) -> Result<(), PlanningError> {
        let profile = &self.config.profile;
        let acc = self.config.modifier_accumulation;
        let checks = [
            (
                Metric::DailyCalories,
                participant.daily_kcal(),
                profile.daily_kcal.target(participant, distance_km, acc),
            ),
            (
                Metric::DailyWater,
                participant.daily_water_liters(),
                profile
                    .daily_water_liters
                    .target(participant, distance_km, acc),
            ),
            (
                Metric::MaxCarry,
                participant.max_carry_kg(),
                profile.max_carry_kg.target(participant, distance_km, acc),
            ),
        ];
        for (metric, measured, target) in checks {
            if !profile.within_tolerance(measured, target) {
                return Err(PlanningError::Aberration {
                    participant: participant.name().to_string(),
                    metric,
                    measured,
                    target,
                    tolerance_pct: profile.tolerance * 100.0,
                });
            }
        }
        Ok(())
    }

    /// Checks the food catalogue against the group's daily need.
    pub fn check_food(&self, hike: &Hike) -> Result<(), PlanningError> {
        let required = hike.group_daily_kcal();
        check_duplicate_food(hike.food())?;

        let limit = required * self.config.profile.max_item_kcal_share;
        if let Some(food) = hike.food().iter().find(|f| f.kcal_per_unit() > limit) {
            return Err(PlanningError::OversizedFoodUnit {
                item: food.name().to_string(),
                kcal: food.kcal_per_unit(),
                limit,
            });
        }

        let available: f64 = hike.food().iter().map(|f| f.total_kcal()).sum();
        if available < required {
            return Err(PlanningError::InsufficientCalories {
                available,
                required,
            });
        }
        Ok(())
    }

    /// Checks category coverage and owner assignment of pinned categories.
    ///
    /// Owners are only checked for mandatory categories, so rest gear on a
    /// one-day hike may be listed without an owner.
    pub fn check_equipment(&self, hike: &Hike) -> Result<(), PlanningError> {
        let required = hike.participant_count() as u32;
        for category in EquipmentCategory::mandatory(hike.duration_days()) {
            let group = hike.equipment_group(category);
            let available = group.map_or(0, |g| g.coverage());
            if available < required {
                return Err(PlanningError::InsufficientEquipment {
                    category,
                    available,
                    required,
                });
            }
            if !category.is_owner_pinned() {
                continue;
            }
            for item in group.map(|g| g.items()).unwrap_or_default() {
                let owner = self
                    .ownership
                    .owner_of(hike.id(), item.id())
                    .filter(|id| hike.participant(*id).is_some());
                if owner.is_none() {
                    return Err(PlanningError::MissingOwner {
                        item: item.name().to_string(),
                        category,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that water containers hold the group's daily water need.
    pub fn check_water(&self, hike: &Hike) -> Result<(), PlanningError> {
        let required_liters = hike.group_daily_water_liters();
        let capacity_liters = hike
            .equipment_group(EquipmentCategory::Water)
            .map_or(0.0, |g| g.water_capacity_liters());
        if capacity_liters < required_liters {
            return Err(PlanningError::InsufficientWater {
                capacity_liters,
                required_liters,
            });
        }
        Ok(())
    }
}

/// Rejects two entries sharing a common name (case-insensitive, trimmed).
fn check_duplicate_food(food: &[FoodProduct]) -> Result<(), PlanningError> {
    let mut seen: HashMap<String, &FoodProduct> = HashMap::with_capacity(food.len());
    for f in food {
        if let Some(first) = seen.insert(f.common_key(), f) {
            return Err(PlanningError::DuplicateFood {
                common_name: f.common_name().to_string(),
                first: first.name().to_string(),
                second: f.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistanceBandPolicy;
    use crate::error::ErrorKind;
    use crate::evaluation::ModifierAccumulation;
    use crate::models::{Build, EquipmentItem, FitnessLevel, ItemId, OwnershipRegistry, ParticipantId};
    use crate::test_support::{matched, person, valid_hike, valid_hike_with, HikeSpec};

    fn validate(hike: &Hike, owners: &OwnershipRegistry) -> Result<(), PlanningError> {
        let config = PlannerConfig::default();
        HikeValidator::new(&config, owners).validate(hike)
    }

    #[test]
    fn test_valid_hike_passes() {
        let (hike, owners) = valid_hike();
        assert_eq!(validate(&hike, &owners), Ok(()));
    }

    #[test]
    fn test_daily_distance_inside_band_rejected_by_default() {
        // Cleo (weakest) has a 15 km/day pace; 30 km over 2 days sits on target.
        let spec = HikeSpec {
            distance_deg_lat: 30.0 / 111.19492664455873,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        let err = validate(&hike, &owners).unwrap_err();
        assert!(matches!(
            err,
            PlanningError::DailyDistance { ref participant, .. } if participant == "Cleo"
        ));
        assert_eq!(err.kind(), ErrorKind::Aberration);
    }

    #[test]
    fn test_daily_distance_reject_outside_policy() {
        let config = PlannerConfig::default().with_distance_policy(DistanceBandPolicy::RejectOutside);
        let (far, owners) = valid_hike();
        let validator = HikeValidator::new(&config, &owners);
        let km = far.total_distance_km();
        assert!(validator.check_daily_distance(&far, km).is_err());

        let spec = HikeSpec {
            distance_deg_lat: 30.0 / 111.19492664455873,
            ..HikeSpec::default()
        };
        let (on_pace, owners) = valid_hike_with(&spec);
        let validator = HikeValidator::new(&config, &owners);
        let km = on_pace.total_distance_km();
        assert!(validator.check_daily_distance(&on_pace, km).is_ok());
    }

    #[test]
    fn test_tolerance_band_per_participant() {
        let config = PlannerConfig::default();
        let owners = OwnershipRegistry::new();
        let validator = HikeValidator::new(&config, &owners);
        let km = 12.0;
        let exact = matched(person(1, "Ana", 34, FitnessLevel::Trained, Build::Medium), km, &config);
        assert!(validator.check_participant(&exact, km).is_ok());

        for (factor, ok) in [(1.05, true), (0.95, true), (1.11, false), (0.89, false)] {
            let p = exact.clone().with_daily_kcal(exact.daily_kcal() * factor);
            assert_eq!(validator.check_participant(&p, km).is_ok(), ok, "kcal factor {factor}");
            let p = exact
                .clone()
                .with_daily_water_liters(exact.daily_water_liters() * factor);
            assert_eq!(validator.check_participant(&p, km).is_ok(), ok, "water factor {factor}");
            let p = exact.clone().with_max_carry_kg(exact.max_carry_kg() * factor);
            assert_eq!(validator.check_participant(&p, km).is_ok(), ok, "carry factor {factor}");
        }
    }

    #[test]
    fn test_aberration_names_participant_and_metric() {
        let spec = HikeSpec {
            ben_kcal_factor: 1.5,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        match validate(&hike, &owners) {
            Err(PlanningError::Aberration {
                participant,
                metric,
                ..
            }) => {
                assert_eq!(participant, "Ben");
                assert_eq!(metric, Metric::DailyCalories);
            }
            other => panic!("expected aberration, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_food_rejected_regardless_of_calories() {
        let (mut hike, owners) = valid_hike();
        hike.add_food(
            FoodProduct::new(ItemId::new(500), "Spaghetti", 120, 1, 10.0).with_common_name(" PASTA"),
        );
        let err = validate(&hike, &owners).unwrap_err();
        assert!(matches!(err, PlanningError::DuplicateFood { .. }));
    }

    #[test]
    fn test_oversized_food_unit() {
        let (mut hike, owners) = valid_hike();
        let limit = hike.group_daily_kcal() * 0.25;
        hike.add_food(FoodProduct::new(ItemId::new(500), "Feast", 1000, 1, limit + 1.0));
        let err = validate(&hike, &owners).unwrap_err();
        assert!(matches!(err, PlanningError::OversizedFoodUnit { ref item, .. } if item == "Feast"));
    }

    #[test]
    fn test_insufficient_calories() {
        let spec = HikeSpec {
            food_batches: Some(1),
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        let err = validate(&hike, &owners).unwrap_err();
        assert!(matches!(err, PlanningError::InsufficientCalories { .. }));
        assert_eq!(err.kind(), ErrorKind::Insufficiency);
    }

    #[test]
    fn test_insufficient_equipment_coverage() {
        // One first aid kit plus one pack of plasters covers two of three.
        let spec = HikeSpec {
            medical_batch: 1,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        assert_eq!(
            validate(&hike, &owners),
            Err(PlanningError::InsufficientEquipment {
                category: EquipmentCategory::Medical,
                available: 2,
                required: 3,
            })
        );
    }

    #[test]
    fn test_rest_not_required_for_day_hike() {
        let spec = HikeSpec {
            duration_days: 1,
            with_rest: false,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        assert_eq!(validate(&hike, &owners), Ok(()));

        let spec = HikeSpec {
            with_rest: false,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        assert!(matches!(
            validate(&hike, &owners),
            Err(PlanningError::InsufficientEquipment {
                category: EquipmentCategory::Rest,
                ..
            })
        ));
    }

    #[test]
    fn test_day_hike_rest_gear_needs_no_owner() {
        let spec = HikeSpec {
            duration_days: 1,
            ..HikeSpec::default()
        };
        let (hike, mut owners) = valid_hike_with(&spec);
        assert!(owners.release(hike.id(), ItemId::new(40)).is_some());
        assert_eq!(validate(&hike, &owners), Ok(()));

        let (hike, mut owners) = valid_hike();
        owners.release(hike.id(), ItemId::new(40));
        assert_eq!(
            validate(&hike, &owners),
            Err(PlanningError::MissingOwner {
                item: "Tent".into(),
                category: EquipmentCategory::Rest,
            })
        );
    }

    #[test]
    fn test_last_match_rejects_sum_calibrated_hike() {
        // Ana: trained +2 and age 31-50 +1 add up to 18 kg; the last match alone gives 16 kg.
        let config = PlannerConfig::default()
            .with_modifier_accumulation(ModifierAccumulation::LastMatch);
        let (hike, owners) = valid_hike();
        let err = HikeValidator::new(&config, &owners)
            .validate(&hike)
            .unwrap_err();
        match err {
            PlanningError::Aberration {
                ref participant,
                metric,
                measured,
                target,
                ..
            } => {
                assert_eq!(participant, "Ana");
                assert_eq!(metric, Metric::MaxCarry);
                assert!((measured - 18.0).abs() < 1e-10);
                assert!((target - 16.0).abs() < 1e-10);
            }
            other => panic!("expected aberration, got {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::Aberration);
    }

    #[test]
    fn test_last_match_changes_calorie_target() {
        // Ben: athletic +400 and light -200 sum to +200; the last match is -200.
        let summed = PlannerConfig::default();
        let last = PlannerConfig::default()
            .with_modifier_accumulation(ModifierAccumulation::LastMatch);
        let owners = OwnershipRegistry::new();
        let km = 12.0;
        let ben = matched(person(2, "Ben", 28, FitnessLevel::Athletic, Build::Light), km, &summed);

        assert_eq!(HikeValidator::new(&summed, &owners).check_participant(&ben, km), Ok(()));
        assert!(matches!(
            HikeValidator::new(&last, &owners).check_participant(&ben, km),
            Err(PlanningError::Aberration {
                metric: Metric::DailyCalories,
                ..
            })
        ));

        let ben = matched(person(2, "Ben", 28, FitnessLevel::Athletic, Build::Light), km, &last);
        assert_eq!(HikeValidator::new(&last, &owners).check_participant(&ben, km), Ok(()));
    }

    #[test]
    fn test_clothing_without_owner() {
        let (mut hike, owners) = valid_hike();
        hike.add_equipment(EquipmentItem::new(
            ItemId::new(600),
            "Spare socks",
            EquipmentCategory::Clothing,
            80,
            1,
        ));
        let err = validate(&hike, &owners).unwrap_err();
        assert_eq!(
            err,
            PlanningError::MissingOwner {
                item: "Spare socks".into(),
                category: EquipmentCategory::Clothing,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Ownership);
    }

    #[test]
    fn test_owner_must_be_on_the_hike() {
        let (mut hike, mut owners) = valid_hike();
        hike.add_equipment(EquipmentItem::new(
            ItemId::new(600),
            "Spare socks",
            EquipmentCategory::Clothing,
            80,
            1,
        ));
        owners.assign(hike.id(), ItemId::new(600), ParticipantId::new(77));
        assert!(matches!(
            validate(&hike, &owners),
            Err(PlanningError::MissingOwner { .. })
        ));
        owners.assign(hike.id(), ItemId::new(600), ParticipantId::new(2));
        assert_eq!(validate(&hike, &owners), Ok(()));
    }

    #[test]
    fn test_insufficient_water() {
        let spec = HikeSpec {
            water_bag_batch: 1,
            ..HikeSpec::default()
        };
        let (hike, owners) = valid_hike_with(&spec);
        let err = validate(&hike, &owners).unwrap_err();
        assert!(matches!(err, PlanningError::InsufficientWater { .. }));
    }
}
