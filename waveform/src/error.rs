use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaveformError {
    #[error("empty height sample set")]
    EmptyHeights,

    #[error("bin size must be positive")]
    InvalidBinSize,

    #[error("pulse width must be positive")]
    InvalidPulseWidth,

    #[error("height sample set contains a non-finite value")]
    NonFiniteHeight,

    #[error("waveform has zero total energy")]
    DegenerateWaveform,
}
