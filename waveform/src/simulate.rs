use crate::{
    math::{convolve_same, gaussian_pulse},
    WaveformError,
};
use log::debug;
use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Default height-axis resolution in meters per bin.
pub const DEFAULT_BIN_SIZE: f64 = 1.0;

/// Default Gaussian pulse width in meters, approximating a GEDI-like
/// transmit pulse.
pub const DEFAULT_PULSE_WIDTH: f64 = 18.0;

/// A simulated lidar waveform: vertical profile of returned energy as a
/// function of height.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform<T: Float = f64> {
    /// Left edge of each height bin, ascending, in meters.
    pub bins: Vec<T>,

    /// Pulse-smoothed energy per bin, aligned with `bins`.
    pub energy: Vec<T>,
}

impl<T> Waveform<T>
where
    T: Float + FromPrimitive,
{
    pub fn builder() -> WaveformBuilder<T> {
        WaveformBuilder {
            heights: Vec::new(),
            bin_size: None,
            pulse_width: None,
        }
    }

    /// Sum of the smoothed energy across all bins.
    pub fn total_energy(&self) -> T {
        self.energy.iter().fold(T::zero(), |acc, &e| acc + e)
    }
}

pub struct WaveformBuilder<T: Float = f64> {
    heights: Vec<T>,

    /// Height-axis resolution (meters per bin).
    bin_size: Option<T>,

    /// Gaussian pulse width (meters); the kernel stddev is half this.
    pulse_width: Option<T>,
}

impl<T> WaveformBuilder<T>
where
    T: Float + FromPrimitive,
{
    pub fn heights(mut self, heights: Vec<T>) -> Self {
        self.heights = heights;
        self
    }

    pub fn bin_size(mut self, meters: T) -> Self {
        self.bin_size = Some(meters);
        self
    }

    pub fn pulse_width(mut self, meters: T) -> Self {
        self.pulse_width = Some(meters);
        self
    }

    pub fn build(self) -> Result<Waveform<T>, WaveformError> {
        let bin_size = match self.bin_size {
            Some(meters) => meters,
            None => T::from_f64(DEFAULT_BIN_SIZE).unwrap(),
        };
        let pulse_width = match self.pulse_width {
            Some(meters) => meters,
            None => T::from_f64(DEFAULT_PULSE_WIDTH).unwrap(),
        };

        if self.heights.is_empty() {
            return Err(WaveformError::EmptyHeights);
        }
        if bin_size <= T::zero() || !bin_size.is_finite() {
            return Err(WaveformError::InvalidBinSize);
        }
        if pulse_width <= T::zero() || !pulse_width.is_finite() {
            return Err(WaveformError::InvalidPulseWidth);
        }
        if self.heights.iter().any(|h| !h.is_finite()) {
            return Err(WaveformError::NonFiniteHeight);
        }

        let now = std::time::Instant::now();

        let z_min = self
            .heights
            .iter()
            .fold(T::infinity(), |acc, &h| acc.min(h))
            .floor();
        let z_max = self
            .heights
            .iter()
            .fold(T::neg_infinity(), |acc, &h| acc.max(h))
            .ceil();

        // Bin edges from z_min through z_max + bin_size inclusive. The
        // upper bound exceeds every height, so the maximum always falls
        // strictly inside the final interval, and a single-valued input
        // (z_min == z_max) still yields two edges.
        let stop = z_max + bin_size;
        let mut edges: Vec<T> = Vec::new();
        let mut step = T::zero();
        loop {
            let edge = z_min + step * bin_size;
            if edge > stop {
                break;
            }
            edges.push(edge);
            step = step + T::one();
        }
        let n_bins = edges.len() - 1;

        // Raw histogram over [edge_i, edge_{i+1}).
        let mut counts = vec![T::zero(); n_bins];
        for &h in &self.heights {
            let idx = ((h - z_min) / bin_size)
                .floor()
                .to_usize()
                .unwrap_or(0)
                .min(n_bins - 1);
            counts[idx] = counts[idx] + T::one();
        }

        // The smoothing kernel is sampled at every bin edge, so it is one
        // sample longer than the histogram. Intentional: sizing it to bin
        // centers instead would shift every derived RH value.
        let two = T::one() + T::one();
        let sigma = pulse_width / two;
        let center = edges.iter().fold(T::zero(), |acc, &e| acc + e)
            / T::from_usize(edges.len()).unwrap();
        let pulse = gaussian_pulse(&edges, center, sigma);

        let energy = convolve_same(&counts, &pulse);
        edges.truncate(n_bins);

        debug!(
            "waveform; heights: {}, bins: {}, exec: {:?}",
            self.heights.len(),
            n_bins,
            now.elapsed()
        );

        Ok(Waveform {
            bins: edges,
            energy,
        })
    }
}
