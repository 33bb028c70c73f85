//! Parametric physiological model.
//!
//! Every per-participant target is `base + per_km × distance + modifiers`,
//! where the modifiers depend on fitness level, build, and age bracket.
//! The same shape scores fitness for picking the group's weakest member
//! (base 1.0, negative penalties, no distance term).

use serde::{Deserialize, Serialize};

use crate::models::{Build, FitnessLevel, Participant};

/// How matching profile modifiers combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierAccumulation {
    /// All matching modifiers are summed.
    #[default]
    Sum,
    /// Only the last matching non-zero modifier applies (level, then build,
    /// then age bracket): a replace-instead-of-add computation.
    LastMatch,
}

/// Additive modifiers keyed by profile attribute.
///
/// Age brackets are `<16`, `31..=50`, `51..=70`, and `>70`; ages 16 to 30
/// carry no age modifier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierTable {
    pub novice: f64,
    pub trained: f64,
    pub athletic: f64,
    pub light: f64,
    pub medium: f64,
    pub heavy: f64,
    pub under_16: f64,
    pub age_31_50: f64,
    pub age_51_70: f64,
    pub over_70: f64,
}

impl ModifierTable {
    /// Modifiers matching the participant, in level, build, age order.
    fn matching(&self, participant: &Participant) -> [f64; 3] {
        let level = match participant.level() {
            FitnessLevel::Novice => self.novice,
            FitnessLevel::Trained => self.trained,
            FitnessLevel::Athletic => self.athletic,
        };
        let build = match participant.build() {
            Build::Light => self.light,
            Build::Medium => self.medium,
            Build::Heavy => self.heavy,
        };
        let age = match participant.age() {
            0..=15 => self.under_16,
            31..=50 => self.age_31_50,
            51..=70 => self.age_51_70,
            71..=u32::MAX => self.over_70,
            _ => 0.0,
        };
        [level, build, age]
    }

    /// Combined modifier for the participant.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hike::evaluation::{ModifierAccumulation, ModifierTable};
    /// use u_hike::models::{Build, FitnessLevel, Participant, ParticipantId};
    ///
    /// let table = ModifierTable { athletic: 10.0, heavy: -5.0, ..Default::default() };
    /// let p = Participant::new(ParticipantId::new(1), "Ana", 25, FitnessLevel::Athletic, Build::Heavy);
    /// assert_eq!(table.apply(&p, ModifierAccumulation::Sum), 5.0);
    /// assert_eq!(table.apply(&p, ModifierAccumulation::LastMatch), -5.0);
    /// ```
    pub fn apply(&self, participant: &Participant, accumulation: ModifierAccumulation) -> f64 {
        let deltas = self.matching(participant);
        match accumulation {
            ModifierAccumulation::Sum => deltas.iter().sum(),
            ModifierAccumulation::LastMatch => deltas
                .iter()
                .rev()
                .copied()
                .find(|d| *d != 0.0)
                .unwrap_or(0.0),
        }
    }
}

/// A linear target model for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricModel {
    /// Value before any distance term or modifier.
    pub base: f64,
    /// Increment per kilometer of total trip distance.
    #[serde(default)]
    pub per_km: f64,
    #[serde(default)]
    pub modifiers: ModifierTable,
}

impl MetricModel {
    /// Creates a model with no distance term and no modifiers.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            per_km: 0.0,
            modifiers: ModifierTable::default(),
        }
    }

    /// Sets the per-kilometer increment.
    pub fn with_per_km(mut self, per_km: f64) -> Self {
        self.per_km = per_km;
        self
    }

    /// Sets the modifier table.
    pub fn with_modifiers(mut self, modifiers: ModifierTable) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Target value for a participant on a trip of `distance_km`.
    pub fn target(
        &self,
        participant: &Participant,
        distance_km: f64,
        accumulation: ModifierAccumulation,
    ) -> f64 {
        self.base + self.per_km * distance_km + self.modifiers.apply(participant, accumulation)
    }
}

/// Parameters of the physiological and logistics model.
///
/// Defaults encode the planning rules: 25 km/day base pace, 2400 kcal plus
/// 50 kcal per trip kilometer, 2 L water plus 0.1 L per kilometer, 15 kg
/// base carry, a ±10% tolerance band, and a 25% cap on the calories of a
/// single food unit relative to the group's daily need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileModel {
    /// Relative half-width of the tolerance band.
    pub tolerance: f64,
    /// Largest share of the group's daily kcal a single food unit may hold.
    pub max_item_kcal_share: f64,
    /// Fitness score used to pick the weakest participant.
    pub fitness: MetricModel,
    /// Sustainable daily distance in km.
    pub daily_distance_km: MetricModel,
    /// Daily caloric need in kcal.
    pub daily_kcal: MetricModel,
    /// Daily water need in liters.
    pub daily_water_liters: MetricModel,
    /// Maximum carry capacity in kg.
    pub max_carry_kg: MetricModel,
}

impl Default for ProfileModel {
    fn default() -> Self {
        Self {
            tolerance: 0.10,
            max_item_kcal_share: 0.25,
            fitness: MetricModel::new(1.0).with_modifiers(ModifierTable {
                novice: -0.2,
                medium: -0.1,
                heavy: -0.2,
                under_16: -0.3,
                age_51_70: -0.2,
                over_70: -0.3,
                ..Default::default()
            }),
            daily_distance_km: MetricModel::new(25.0).with_modifiers(ModifierTable {
                athletic: 10.0,
                light: 5.0,
                heavy: -5.0,
                under_16: -5.0,
                age_51_70: -5.0,
                over_70: -10.0,
                ..Default::default()
            }),
            daily_kcal: MetricModel::new(2400.0)
                .with_per_km(50.0)
                .with_modifiers(ModifierTable {
                    trained: 200.0,
                    athletic: 400.0,
                    light: -200.0,
                    heavy: 300.0,
                    under_16: -400.0,
                    age_51_70: -200.0,
                    over_70: -400.0,
                    ..Default::default()
                }),
            daily_water_liters: MetricModel::new(2.0)
                .with_per_km(0.1)
                .with_modifiers(ModifierTable {
                    trained: 0.25,
                    athletic: 0.5,
                    light: -0.25,
                    heavy: 0.5,
                    under_16: -0.5,
                    over_70: -0.25,
                    ..Default::default()
                }),
            max_carry_kg: MetricModel::new(15.0).with_modifiers(ModifierTable {
                trained: 2.0,
                athletic: 5.0,
                light: -3.0,
                heavy: 3.0,
                under_16: -7.0,
                age_31_50: 1.0,
                age_51_70: -3.0,
                over_70: -5.0,
                ..Default::default()
            }),
        }
    }
}

impl ProfileModel {
    /// Sets the tolerance band half-width.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fitness score of a participant; lower is weaker. Penalties always add up.
    pub fn fitness_score(&self, participant: &Participant) -> f64 {
        self.fitness
            .target(participant, 0.0, ModifierAccumulation::Sum)
    }

    /// The participant with the lowest fitness score.
    ///
    /// Ties go to the participant listed first.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hike::evaluation::ProfileModel;
    /// use u_hike::models::{Build, FitnessLevel, Participant, ParticipantId};
    ///
    /// let group = vec![
    ///     Participant::new(ParticipantId::new(1), "Ana", 30, FitnessLevel::Athletic, Build::Light),
    ///     Participant::new(ParticipantId::new(2), "Oma", 74, FitnessLevel::Novice, Build::Medium),
    /// ];
    /// let weakest = ProfileModel::default().weakest(&group).unwrap();
    /// assert_eq!(weakest.name(), "Oma");
    /// ```
    pub fn weakest<'a>(&self, participants: &'a [Participant]) -> Option<&'a Participant> {
        let mut best: Option<(&Participant, f64)> = None;
        for p in participants {
            let score = self.fitness_score(p);
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((p, score));
            }
        }
        best.map(|(p, _)| p)
    }

    /// Returns `true` if `actual` lies within the tolerance band of `target`.
    pub fn within_tolerance(&self, actual: f64, target: f64) -> bool {
        within_band(actual, target, self.tolerance)
    }
}

/// Inclusive band check: `target·(1−t) ≤ actual ≤ target·(1+t)`.
///
/// # Examples
///
/// ```
/// use u_hike::evaluation::within_band;
///
/// assert!(within_band(105.0, 100.0, 0.1));
/// assert!(!within_band(111.0, 100.0, 0.1));
/// assert!(!within_band(89.0, 100.0, 0.1));
/// ```
pub fn within_band(actual: f64, target: f64, tolerance: f64) -> bool {
    let a = target * (1.0 - tolerance);
    let b = target * (1.0 + tolerance);
    actual >= a.min(b) && actual <= a.max(b)
}
