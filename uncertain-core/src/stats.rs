//! Confidence-interval half-widths.
//!
//! Student-t quantiles come from bisection on the t CDF, expressed through the regularized incomplete beta function
//! (continued fraction, `libm::lgamma`). Normal quantiles use Acklam's rational approximation polished by one Halley
//! step on `libm::erfc`.

use crate::flags::Distribution;
use crate::value::DOF_UNKNOWN;
use core::f64::consts::{PI, SQRT_2};

/// Two-sided half-width `sd * q(1 - level / 2)` of a confidence interval.
///
/// `dof` selects the Student-t quantile (values below one are evaluated as one); `None` or the unknown sentinel
/// falls back to the normal quantile. `confidence_level` is the two-sided tail probability (`0.05` means 95 %).
///
/// Returns `None` when the result is indeterminate: non-finite or negative `std_dev`, or a level outside `(0, 1)`.
///
/// ```rust
/// use uncertain_core::stats::confidence_half_width;
/// let hw = confidence_half_width(1.0, None, 0.05).unwrap();
/// assert!((hw - 1.959964).abs() < 1e-6);
/// ```
pub fn confidence_half_width(std_dev: f64, dof: Option<u16>, confidence_level: f64) -> Option<f64> {
    interval_half_width(std_dev, dof, confidence_level, Distribution::Gaussian)
}

/// Half-width of the central `1 - confidence_level` interval for the given distribution shape.
///
/// - `Gaussian`: Student-t or normal quantile, as [`confidence_half_width`].
/// - `Rectangular`: `(1 - level) * √3 * sd`.
/// - `Triangular`: `√6 * sd * (1 - √level)`.
pub fn interval_half_width(
    std_dev: f64,
    dof: Option<u16>,
    confidence_level: f64,
    distribution: Distribution,
) -> Option<f64> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return None;
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return None;
    }

    let half_width = match distribution {
        Distribution::Gaussian => {
            let p = 1.0 - confidence_level / 2.0;
            let factor = match dof.filter(|&d| d != DOF_UNKNOWN) {
                Some(d) => students_t_quantile(p, f64::from(d.max(1))),
                None => normal_quantile(p),
            };
            std_dev * factor
        }
        Distribution::Rectangular => (1.0 - confidence_level) * 3f64.sqrt() * std_dev,
        Distribution::Triangular => 6f64.sqrt() * std_dev * (1.0 - confidence_level.sqrt()),
    };
    Some(half_width)
}

/// Quantile of the standard normal distribution.
///
/// `p <= 0` and `p >= 1` return the corresponding infinities; NaN propagates.
pub fn normal_quantile(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    let x = if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    };

    // One Halley step brings the approximation to full double precision.
    let e = 0.5 * libm::erfc(-x / SQRT_2) - p;
    let u = e * (2.0 * PI).sqrt() * (x * x / 2.0).exp();
    x - u / (1.0 + x * u / 2.0)
}

/// Quantile of Student's t distribution with `dof` degrees of freedom.
pub fn students_t_quantile(p: f64, dof: f64) -> f64 {
    if p.is_nan() || !(dof > 0.0) {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p < 0.5 {
        return -students_t_quantile(1.0 - p, dof);
    }
    if p == 0.5 {
        return 0.0;
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    while students_t_cdf(hi, dof) < p {
        lo = hi;
        hi *= 2.0;
        if !hi.is_finite() {
            return f64::INFINITY;
        }
    }

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if students_t_cdf(mid, dof) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= 1e-14 * hi {
            break;
        }
    }
    0.5 * (lo + hi)
}

/// Cumulative distribution function of Student's t distribution.
pub fn students_t_cdf(t: f64, dof: f64) -> f64 {
    if t.is_nan() || !(dof > 0.0) {
        return f64::NAN;
    }
    let x = dof / (dof + t * t);
    let tail = 0.5 * incomplete_beta_regularized(x, dof / 2.0, 0.5);
    if t >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn incomplete_beta_regularized(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front = (libm::lgamma(a + b) - libm::lgamma(a) - libm::lgamma(b)
        + a * x.ln()
        + b * (1.0 - x).ln())
    .exp();

    // I_x(a, b) = 1 - I_{1-x}(b, a) keeps the continued fraction in its fast-converging region.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(x, a, b) / a
    } else {
        1.0 - front * beta_continued_fraction(1.0 - x, b, a) / b
    }
}

fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPSILON: f64 = 1e-15;
    const FPMIN: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < FPMIN { FPMIN } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + aa * d);
        c = guard(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }

    h
}
