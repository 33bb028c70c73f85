//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::evaluation::{ModifierAccumulation, ProfileModel};

/// Which side of the tolerance band the daily-distance check rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBandPolicy {
    /// Reject daily distances inside the band around the reference pace.
    /// Values that sit too close to the generic baseline are treated as
    /// unedited defaults.
    #[default]
    RejectInside,
    /// Reject daily distances outside the band, like the per-participant checks.
    RejectOutside,
}

impl DistanceBandPolicy {
    /// Returns `true` if a value with the given band membership is rejected.
    pub fn rejects(&self, inside_band: bool) -> bool {
        match self {
            DistanceBandPolicy::RejectInside => inside_band,
            DistanceBandPolicy::RejectOutside => !inside_band,
        }
    }
}

/// Configuration shared by the validator, optimizer, and solver.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Examples
///
/// ```
/// use u_hike::config::{DistanceBandPolicy, PlannerConfig};
/// use u_hike::evaluation::ModifierAccumulation;
///
/// let config = PlannerConfig::default()
///     .with_distance_policy(DistanceBandPolicy::RejectOutside)
///     .with_modifier_accumulation(ModifierAccumulation::LastMatch);
/// assert_eq!(config.distance_policy, DistanceBandPolicy::RejectOutside);
/// assert!((config.profile.tolerance - 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub profile: ProfileModel,
    pub modifier_accumulation: ModifierAccumulation,
    pub distance_policy: DistanceBandPolicy,
}

impl PlannerConfig {
    /// Replaces the profile model.
    pub fn with_profile(mut self, profile: ProfileModel) -> Self {
        self.profile = profile;
        self
    }

    /// Sets how profile modifiers combine.
    pub fn with_modifier_accumulation(mut self, accumulation: ModifierAccumulation) -> Self {
        self.modifier_accumulation = accumulation;
        self
    }

    /// Sets the daily-distance rejection side.
    pub fn with_distance_policy(mut self, policy: DistanceBandPolicy) -> Self {
        self.distance_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PlannerConfig::default();
        assert_eq!(c.distance_policy, DistanceBandPolicy::RejectInside);
        assert_eq!(c.modifier_accumulation, ModifierAccumulation::Sum);
        assert_eq!(c.profile, ProfileModel::default());
    }

    #[test]
    fn test_policy_rejects() {
        assert!(DistanceBandPolicy::RejectInside.rejects(true));
        assert!(!DistanceBandPolicy::RejectInside.rejects(false));
        assert!(DistanceBandPolicy::RejectOutside.rejects(false));
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "distance_policy": "reject_outside",
            "profile": { "tolerance": 0.2, "daily_kcal": { "base": 2000.0, "per_km": 40.0 } }
        }"#;
        let c: PlannerConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(c.distance_policy, DistanceBandPolicy::RejectOutside);
        assert_eq!(c.modifier_accumulation, ModifierAccumulation::Sum);
        assert!((c.profile.tolerance - 0.2).abs() < 1e-12);
        assert_eq!(c.profile.daily_kcal.base, 2000.0);
        assert_eq!(c.profile.daily_kcal.modifiers.heavy, 0.0);
        // Untouched sections keep their defaults.
        assert_eq!(c.profile.max_carry_kg, ProfileModel::default().max_carry_kg);
    }
}
