//! Baseline static when no signal is in reach
//!
//! The floor is a pure lookup from dial position to noise level. It is kept
//! behind a trait so hosts can supply their own curve.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::band::FrequencyBand;

/// Noise level of an empty stretch of the dial
pub trait StaticFloor: Debug + Send + Sync {
    /// Static intensity at `frequency`, in [0, 1]
    fn intensity(&self, band: &FrequencyBand, frequency: f64) -> f64;
}

/// Static that grows linearly towards the band edges
///
/// Mid-band reads `center`, either edge reads `edge`. Monotonic in the
/// distance to the nearest edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeFalloff {
    /// Intensity at the middle of the band
    pub center: f64,
    /// Intensity at either band edge
    pub edge: f64,
}

impl Default for EdgeFalloff {
    fn default() -> Self {
        Self {
            center: 0.45,
            edge: 0.9,
        }
    }
}

impl StaticFloor for EdgeFalloff {
    fn intensity(&self, band: &FrequencyBand, frequency: f64) -> f64 {
        let half_width = band.width() / 2.0;
        let t = (band.edge_distance(frequency) / half_width).clamp(0.0, 1.0);
        (self.edge + (self.center - self.edge) * t).clamp(0.0, 1.0)
    }
}

/// Sinusoidal "dead zones" across the dial
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpectrumNoise;

impl SpectrumNoise {
    const BASE: f64 = 0.3;
    const SPAN: f64 = 0.7;
}

impl StaticFloor for SpectrumNoise {
    fn intensity(&self, band: &FrequencyBand, frequency: f64) -> f64 {
        let f = band.clamp(frequency);
        let factor = (f * 0.5).sin() * 0.3 + 0.5;
        (Self::BASE + factor * Self::SPAN).clamp(0.0, 1.0)
    }
}

/// Serializable selection of a static floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaticFloorConfig {
    /// Linear falloff towards the band edges
    EdgeFalloff { center: f64, edge: f64 },
    /// Sinusoidal dead zones
    SpectrumNoise,
}

impl Default for StaticFloorConfig {
    fn default() -> Self {
        let falloff = EdgeFalloff::default();
        Self::EdgeFalloff {
            center: falloff.center,
            edge: falloff.edge,
        }
    }
}

impl StaticFloorConfig {
    /// Instantiate the configured floor
    pub fn build(&self) -> Box<dyn StaticFloor> {
        match *self {
            Self::EdgeFalloff { center, edge } => Box::new(EdgeFalloff { center, edge }),
            Self::SpectrumNoise => Box::new(SpectrumNoise),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn floor_config() -> impl Strategy<Value = StaticFloorConfig> {
        prop_oneof![
            Just(StaticFloorConfig::default()),
            Just(StaticFloorConfig::SpectrumNoise),
            (0.0f64..1.0, 0.0f64..1.0)
                .prop_map(|(center, edge)| StaticFloorConfig::EdgeFalloff { center, edge }),
        ]
    }

    proptest! {
        #[test]
        fn intensity_in_unit_range(config in floor_config(), f in 60.0f64..140.0) {
            let band = FrequencyBand::default();
            let v = config.build().intensity(&band, f);
            prop_assert!((0.0..=1.0).contains(&v));
        }

        #[test]
        fn edge_falloff_grows_towards_edges(a in 88.0f64..98.0, b in 88.0f64..98.0) {
            let band = FrequencyBand::default();
            let floor = EdgeFalloff::default();
            let (outer, inner) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(floor.intensity(&band, outer) + 1e-12 >= floor.intensity(&band, inner));
        }
    }
}
