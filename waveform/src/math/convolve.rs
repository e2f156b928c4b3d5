use num_traits::Float;

/// Same-length discrete linear convolution.
///
/// Output index `i` is the full convolution evaluated at
/// `i + (kernel.len() - 1) / 2`, i.e. the kernel is centered on each
/// output position and `signal` is implicitly zero-padded outside its
/// support. Output length equals `signal.len()`.
pub fn convolve_same<T>(signal: &[T], kernel: &[T]) -> Vec<T>
where
    T: Float,
{
    let n = signal.len();
    let m = kernel.len();
    debug_assert!(n > 0 && m > 0);
    let offset = (m - 1) / 2;

    let mut out = vec![T::zero(); n];
    for (i, out_val) in out.iter_mut().enumerate() {
        let k = i + offset;
        let j_lo = k.saturating_sub(m - 1);
        let j_hi = k.min(n - 1);
        let mut acc = T::zero();
        for j in j_lo..=j_hi {
            acc = acc + signal[j] * kernel[k - j];
        }
        *out_val = acc;
    }
    out
}
