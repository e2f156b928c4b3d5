mod convolve;
mod gaussian;

pub(crate) use {convolve::convolve_same, gaussian::gaussian_pulse};
