use crate::{Waveform, WaveformError};
use num_traits::{Float, FromPrimitive};

/// Standard GEDI relative-height levels.
pub const DEFAULT_RH_PERCENTILES: [u8; 5] = [25, 50, 75, 98, 100];

/// Relative-height metrics: for each requested percentile `p`, the
/// height below which `p` percent of the cumulative waveform energy is
/// returned.
#[derive(Debug, Clone, PartialEq)]
pub struct RhMetrics<T: Float = f64> {
    entries: Vec<(u8, T)>,
}

impl<T> RhMetrics<T>
where
    T: Float + FromPrimitive,
{
    /// Derive RH metrics from a waveform's cumulative energy
    /// distribution.
    ///
    /// Each percentile is resolved independently against the same
    /// cumulative array with a left-bound search, so RH values are
    /// non-decreasing in `p` and always drawn from `waveform.bins`.
    pub fn from_waveform(
        waveform: &Waveform<T>,
        percentiles: &[u8],
    ) -> Result<Self, WaveformError> {
        let mut cumulative = Vec::with_capacity(waveform.energy.len());
        let mut acc = T::zero();
        for &e in &waveform.energy {
            acc = acc + e;
            cumulative.push(acc);
        }
        let total = match cumulative.last() {
            Some(&total) if total > T::zero() => total,
            _ => return Err(WaveformError::DegenerateWaveform),
        };

        let hundred = T::from_u8(100).unwrap();
        let entries = percentiles
            .iter()
            .map(|&p| {
                let threshold = total * T::from_u8(p).unwrap() / hundred;
                // Clamp to the last bin if rounding pushed the p = 100
                // threshold past every cumulative value.
                let idx = cumulative
                    .iter()
                    .position(|&c| c >= threshold)
                    .unwrap_or(cumulative.len() - 1);
                (p, waveform.bins[idx])
            })
            .collect();

        Ok(Self { entries })
    }

    /// Height for percentile `p`, if it was requested.
    pub fn get(&self, percentile: u8) -> Option<T> {
        self.entries
            .iter()
            .find(|(p, _)| *p == percentile)
            .map(|&(_, height)| height)
    }

    /// (percentile, height) pairs in requested order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, T)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RhMetrics, DEFAULT_RH_PERCENTILES};
    use crate::{Waveform, WaveformError};

    fn scenario_waveform() -> Waveform {
        Waveform::builder()
            .heights(vec![10.0, 10.2, 10.5, 15.0, 15.1, 20.0])
            .bin_size(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_scenario_metrics() {
        let waveform = scenario_waveform();
        let rh = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES).unwrap();
        // Half the cumulative energy is returned near the mid cluster.
        let rh50 = rh.get(50).unwrap();
        assert!((13.0..=17.0).contains(&rh50), "rh50 = {rh50}");
        assert_eq!(rh.get(100), Some(20.0));
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let waveform = scenario_waveform();
        let rh = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES).unwrap();
        let lowest = *waveform.bins.first().unwrap();
        let highest = *waveform.bins.last().unwrap();
        let mut previous = f64::NEG_INFINITY;
        for (_, height) in rh.iter() {
            assert!(height >= previous);
            assert!((lowest..=highest).contains(&height));
            previous = height;
        }
    }

    #[test]
    fn test_requested_order_preserved() {
        let waveform = scenario_waveform();
        let rh = RhMetrics::from_waveform(&waveform, &[98, 25, 50]).unwrap();
        let labels: Vec<u8> = rh.iter().map(|(p, _)| p).collect();
        assert_eq!(labels, vec![98, 25, 50]);
        assert_eq!(rh.len(), 3);
        assert_eq!(rh.get(75), None);
    }

    #[test]
    fn test_single_value_waveform() {
        let waveform = Waveform::builder().heights(vec![5.0, 5.0, 5.0]).build().unwrap();
        let rh = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES).unwrap();
        for (_, height) in rh.iter() {
            assert_eq!(height, 5.0);
        }
    }

    #[test]
    fn test_degenerate_waveform() {
        let waveform = Waveform {
            bins: vec![0.0, 1.0],
            energy: vec![0.0, 0.0],
        };
        let result = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES);
        assert_eq!(result, Err(WaveformError::DegenerateWaveform));
    }

    #[test]
    fn test_determinism() {
        let waveform = scenario_waveform();
        let a = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES).unwrap();
        let b = RhMetrics::from_waveform(&waveform, &DEFAULT_RH_PERCENTILES).unwrap();
        assert_eq!(a, b);
    }
}
