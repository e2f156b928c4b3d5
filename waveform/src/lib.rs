//! Simulated large-footprint lidar waveforms from airborne point clouds.
//!
//! Given classified airborne lidar returns and a footprint boundary, this
//! crate selects the contained point heights, bins them into a
//! pulse-smoothed vertical energy profile ([`Waveform`]), and inverts the
//! cumulative energy distribution into relative-height metrics
//! ([`RhMetrics`]).

mod error;
mod math;
mod metrics;
mod point;
mod simulate;

pub use crate::{
    error::WaveformError,
    metrics::{RhMetrics, DEFAULT_RH_PERCENTILES},
    point::{class, Footprint, Point},
    simulate::{Waveform, WaveformBuilder, DEFAULT_BIN_SIZE, DEFAULT_PULSE_WIDTH},
};
