use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, str::FromStr};
use waveform::{DEFAULT_BIN_SIZE, DEFAULT_PULSE_WIDTH};

/// A tool for simulating GEDI-style waveforms and RH metrics from
/// airborne lidar returns.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Lidar returns file, one "x,y,z,classification" record per line.
    #[arg(short, long)]
    pub points: PathBuf,

    /// Footprints file, one "id,x,y[,radius]" record per line.
    #[arg(short, long)]
    pub footprints: PathBuf,

    /// Footprint radius in meters, for records that do not carry one.
    #[arg(long, default_value_t = 12.5)]
    pub radius: f64,

    /// Height-axis resolution in meters per bin.
    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: f64,

    /// Gaussian pulse width in meters.
    #[arg(long, default_value_t = DEFAULT_PULSE_WIDTH)]
    pub pulse_width: f64,

    /// Classification codes to keep, e.g. "2,3,4,5". All codes are kept
    /// when absent.
    #[arg(long)]
    pub classes: Option<ClassList>,

    /// RH percentile levels to derive.
    #[arg(long, default_value = "25,50,75,98,100")]
    pub percentiles: PercentileList,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug)]
pub struct ClassList(pub Vec<u8>);

impl FromStr for ClassList {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let codes = s
            .split(',')
            .map(|code| u8::from_str(code.trim()))
            .collect::<Result<Vec<u8>, _>>()?;
        Ok(Self(codes))
    }
}

#[derive(Clone, Debug)]
pub struct PercentileList(pub Vec<u8>);

impl FromStr for PercentileList {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let levels = s
            .split(',')
            .map(|level| u8::from_str(level.trim()))
            .collect::<Result<Vec<u8>, _>>()?;
        if let Some(level) = levels.iter().find(|&&level| level > 100) {
            return Err(anyhow!("percentile {level} out of range"));
        }
        Ok(Self(levels))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print per-footprint RH metrics to screen.
    Display,

    /// Print per-footprint RH metrics as JSON.
    Json,
}
