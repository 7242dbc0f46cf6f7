//! Sampling resolution for the default volume-object geometry.

/// Resolution of the sampled estimates in [`VolumeObject`](crate::VolumeObject).
///
/// Shapes that can compute coincident volume or face blocking exactly
/// override the defaults and ignore this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Samples per axis when estimating the coincident volume of a box
    /// (`n^3` point tests). Default: 8.
    pub coincidence_samples_per_axis: u32,
    /// Samples per axis when estimating the blocked part of a face
    /// (`n^2` straddling pairs). Default: 8.
    pub face_samples_per_axis: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            coincidence_samples_per_axis: 8,
            face_samples_per_axis: 8,
        }
    }
}

impl SamplingConfig {
    /// Returns `true` if both sample counts are non-zero.
    pub fn is_valid(&self) -> bool {
        self.coincidence_samples_per_axis > 0 && self.face_samples_per_axis > 0
    }

    /// Midpoints of `n` equal sub-intervals of `[lo, hi]`.
    pub(crate) fn midpoints(lo: f64, hi: f64, n: u32) -> impl Iterator<Item = f64> {
        let step = (hi - lo) / n as f64;
        (0..n).map(move |i| lo + step * (i as f64 + 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_valid() {
        assert!(SamplingConfig::default().is_valid());
        let zero = SamplingConfig {
            face_samples_per_axis: 0,
            ..SamplingConfig::default()
        };
        assert!(!zero.is_valid());
    }

    #[test]
    fn midpoints_of_unit_interval() {
        let m: Vec<f64> = SamplingConfig::midpoints(0.0, 1.0, 4).collect();
        assert_eq!(m, vec![0.125, 0.375, 0.625, 0.875]);
    }

    proptest! {
        #[test]
        fn midpoints_stay_strictly_inside(
            lo in -100.0f64..100.0,
            width in 0.001f64..50.0,
            n in 1u32..32,
        ) {
            let hi = lo + width;
            let m: Vec<f64> = SamplingConfig::midpoints(lo, hi, n).collect();
            prop_assert_eq!(m.len(), n as usize);
            for p in &m {
                prop_assert!(*p > lo && *p < hi);
            }
            for pair in m.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }
    }
}
