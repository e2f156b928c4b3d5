use num_traits::Float;

/// Gaussian pulse sampled at `positions`, normalized so the samples sum
/// to one. A unit-sum kernel preserves total histogram energy under
/// convolution.
pub fn gaussian_pulse<T>(positions: &[T], center: T, sigma: T) -> Vec<T>
where
    T: Float,
{
    let two = T::one() + T::one();
    let mut pulse: Vec<T> = positions
        .iter()
        .map(|&x| {
            let d = x - center;
            (-(d * d) / (two * sigma * sigma)).exp()
        })
        .collect();
    let sum = pulse.iter().fold(T::zero(), |acc, &v| acc + v);
    for v in &mut pulse {
        *v = *v / sum;
    }
    pulse
}
