//! Soft-padding decay profiles.
//!
//! A decay profile is the per-ring cost sequence applied beyond the hard
//! padding radius. Each law is evaluated over a normalized ring index
//! r ∈ [0, 1] and floored to an integer cost; the resulting sequence is
//! strictly decreasing.

use serde::{Deserialize, Serialize};

use super::grid::cost;

/// Decay law selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayType {
    Exponential,
    Reciprocal,
    Linear,
}

impl DecayType {
    fn evaluate(&self, r: f64) -> i32 {
        match self {
            DecayType::Exponential => (100.0 * (-3.506 * r).exp() - 2.0).floor() as i32,
            DecayType::Reciprocal => (1.0 / (0.9898 * r + 0.0102)).floor() as i32,
            DecayType::Linear => (100.0 - 97.0 * r - 2.0).floor() as i32,
        }
    }
}

/// Precomputed per-ring soft costs.
///
/// Ring `i` (1-based) carries `values()[i - 1]`. The sequence is strictly
/// decreasing and bounded to `1..=98`; laws that plateau under integer floor
/// are forced down one step per ring, and the profile is truncated rather
/// than emitting a value below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayProfile {
    values: Vec<i8>,
}

impl DecayProfile {
    /// Build a profile of `⌈soft_distance / resolution⌉` rings.
    pub fn generate(decay_type: DecayType, soft_distance: f64, resolution: f64) -> Self {
        let rings = if soft_distance > 0.0 && resolution > 0.0 {
            (soft_distance / resolution).ceil() as usize
        } else {
            0
        };

        let mut values: Vec<i8> = Vec::with_capacity(rings);
        for i in 0..rings {
            let r = if rings > 1 {
                i as f64 / (rings - 1) as f64
            } else {
                0.0
            };
            let mut v = decay_type.evaluate(r).clamp(1, cost::SOFT_MAX as i32);
            if let Some(&prev) = values.last() {
                v = v.min(prev as i32 - 1);
            }
            if v < 1 {
                break;
            }
            values.push(v as i8);
        }

        Self { values }
    }

    /// Empty profile: hard padding only.
    pub fn none() -> Self {
        Self { values: Vec::new() }
    }

    /// Per-ring costs, outermost last.
    #[inline]
    pub fn values(&self) -> &[i8] {
        &self.values
    }

    /// Number of soft rings.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ring_is_98_for_all_laws() {
        // At r = 0 every law lands just below the hard padding value.
        for ty in [DecayType::Exponential, DecayType::Reciprocal, DecayType::Linear] {
            let profile = DecayProfile::generate(ty, 0.05, 0.05);
            assert_eq!(profile.values(), &[98], "law {:?}", ty);
        }
    }

    #[test]
    fn test_length_matches_ceil() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.23, 0.05);
        // ceil(0.23 / 0.05) = 5
        assert_eq!(profile.len(), 5);
    }

    #[test]
    fn test_linear_endpoints() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.5, 0.05);
        assert_eq!(profile.len(), 10);
        assert_eq!(profile.values()[0], 98);
        assert_eq!(*profile.values().last().unwrap(), 1);
    }

    #[test]
    fn test_strictly_decreasing() {
        for ty in [DecayType::Exponential, DecayType::Reciprocal, DecayType::Linear] {
            let profile = DecayProfile::generate(ty, 1.0, 0.025);
            for pair in profile.values().windows(2) {
                assert!(pair[0] > pair[1], "law {:?}: {:?}", ty, profile.values());
            }
        }
    }

    #[test]
    fn test_bounds() {
        for ty in [DecayType::Exponential, DecayType::Reciprocal, DecayType::Linear] {
            let profile = DecayProfile::generate(ty, 2.0, 0.05);
            for &v in profile.values() {
                assert!((1..=98).contains(&v));
            }
        }
    }

    #[test]
    fn test_zero_distance_is_empty() {
        assert!(DecayProfile::generate(DecayType::Linear, 0.0, 0.05).is_empty());
        assert!(DecayProfile::none().is_empty());
    }

    #[test]
    fn test_decay_type_from_config_string() {
        let ty: DecayType = serde_yaml::from_str("exponential").unwrap();
        assert_eq!(ty, DecayType::Exponential);
        assert!(serde_yaml::from_str::<DecayType>("quadratic").is_err());
    }
}
