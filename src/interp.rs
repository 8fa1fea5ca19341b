//! Piecewise-linear lookup over breakpoint tables

/// Linearly interpolate `x` over the breakpoints `xp` with values `fp`.
///
/// Inputs outside the breakpoint range hold the nearest endpoint value.
/// `xp` must be non-decreasing and as long as `fp`; an empty table yields 0.
pub fn interp(x: f32, xp: &[f32], fp: &[f32]) -> f32 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }

    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    for i in 0..n - 1 {
        let (x0, x1) = (xp[i], xp[i + 1]);
        if x >= x0 && x < x1 {
            let t = (x - x0) / (x1 - x0);
            return fp[i] + t * (fp[i + 1] - fp[i]);
        }
    }

    // NaN input
    fp[n - 1]
}

/// True when every breakpoint is no smaller than the one before it.
pub fn is_non_decreasing(xp: &[f32]) -> bool {
    xp.iter().all(|v| !v.is_nan()) && xp.windows(2).all(|w| w[0] <= w[1])
}
