//! Trip-Curve Function Library
//!
//! Pure numeric implementations of the standardized time-current
//! characteristics. Each function returns sampled current/time sequences;
//! segment concatenation and argument resolution live in the evaluator.
//! Sampling semantics (inclusive-endpoint geometric spacing, `t_min`
//! floor, empty result for zero-width segments) are load-bearing for
//! existing coordination studies and must not drift.

/// Sampled (current, time) sequences produced by one curve segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSamples {
    pub currents: Vec<f64>,
    pub times: Vec<f64>,
}

impl CurveSamples {
    pub fn new(currents: Vec<f64>, times: Vec<f64>) -> Self {
        Self { currents, times }
    }

    pub fn is_empty(&self) -> bool {
        self.currents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.currents.len()
    }

    /// Append another segment's samples in order.
    pub fn extend(&mut self, other: CurveSamples) {
        self.currents.extend(other.currents);
        self.times.extend(other.times);
    }
}

/// IEC 60255-3 standard inverse (k, c, alpha).
pub const IEC_INVERSE: (f64, f64, f64) = (0.14, 0.0, 0.02);
/// IEC 60255-3 very inverse.
pub const IEC_VERY_INVERSE: (f64, f64, f64) = (13.5, 0.0, 1.0);
/// IEC 60255-3 extremely inverse.
pub const IEC_EXTREMELY_INVERSE: (f64, f64, f64) = (80.0, 0.0, 2.0);
/// IEEE C37.112 moderately inverse.
pub const IEEE_MODERATELY_INVERSE: (f64, f64, f64) = (0.0515, 0.1140, 0.02);
/// IEEE C37.112 very inverse.
pub const IEEE_VERY_INVERSE: (f64, f64, f64) = (19.61, 0.491, 2.0);
/// IEEE C37.112 extremely inverse.
pub const IEEE_EXTREMELY_INVERSE: (f64, f64, f64) = (28.2, 0.1217, 2.0);

/// `n` currents geometrically spaced between `i1` and `i2`, both endpoints
/// included exactly.
pub fn log_spaced(i1: f64, i2: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![i1],
        _ => {
            let ln1 = i1.ln();
            let ln2 = i2.ln();
            let steps = (n - 1) as f64;
            (0..n)
                .map(|k| match k {
                    0 => i1,
                    k if k == n - 1 => i2,
                    k => (ln1 + (ln2 - ln1) * k as f64 / steps).exp(),
                })
                .collect()
        }
    }
}

/// Single fixed point of the characteristic.
pub fn point(i1: f64, t1: f64) -> CurveSamples {
    CurveSamples::new(vec![i1], vec![t1])
}

/// Generic IEC inverse-time characteristic:
/// `t = tms * (k / ((i/i_n)^alpha - 1) + c)`, floored at `t_min`.
///
/// A segment with `i2 <= i1` has zero width and yields empty sequences;
/// this disables the segment rather than raising an error.
pub fn iec(
    tms: f64,
    i_n: f64,
    k: f64,
    c: f64,
    alpha: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    if i2 <= i1 {
        return CurveSamples::default();
    }
    let currents = log_spaced(i1, i2, n);
    let times = currents
        .iter()
        .map(|i| (tms * (k / ((i / i_n).powf(alpha) - 1.0) + c)).max(t_min))
        .collect();
    CurveSamples::new(currents, times)
}

/// IEC 60255-3 standard inverse.
pub fn iec_inverse(tms: f64, i_n: f64, i1: f64, i2: f64, t_min: f64, n: usize) -> CurveSamples {
    let (k, c, alpha) = IEC_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// IEC 60255-3 very inverse.
pub fn iec_very_inverse(
    tms: f64,
    i_n: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    let (k, c, alpha) = IEC_VERY_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// IEC 60255-3 extremely inverse.
pub fn iec_extremely_inverse(
    tms: f64,
    i_n: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    let (k, c, alpha) = IEC_EXTREMELY_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// IEEE C37.112 moderately inverse.
pub fn ieee_moderately_inverse(
    tms: f64,
    i_n: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    let (k, c, alpha) = IEEE_MODERATELY_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// IEEE C37.112 very inverse.
pub fn ieee_very_inverse(
    tms: f64,
    i_n: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    let (k, c, alpha) = IEEE_VERY_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// IEEE C37.112 extremely inverse.
pub fn ieee_extremely_inverse(
    tms: f64,
    i_n: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    let (k, c, alpha) = IEEE_EXTREMELY_INVERSE;
    iec(tms, i_n, k, c, alpha, i1, i2, t_min, n)
}

/// Thermal image characteristic per IEC 60255-8:
/// `t = tms * ln(i^2 / (i^2 - i_n^2))`.
///
/// Callers must keep every sampled current above `i_n`; below it the log
/// argument is undefined. The curve author owns that precondition.
pub fn thermal(tms: f64, i_n: f64, i1: f64, i2: f64, n: usize) -> CurveSamples {
    let currents = log_spaced(i1, i2, n);
    let times = currents
        .iter()
        .map(|i| tms * (i * i / (i * i - i_n * i_n)).ln())
        .collect();
    CurveSamples::new(currents, times)
}

/// Constant I²t-style characteristic:
/// `t = tms * k / (i/i_n)^alpha`, floored at `t_min`. Zero-width segments
/// (`i2 <= i1`) yield empty sequences.
pub fn i2t(
    tms: f64,
    i_n: f64,
    k: f64,
    alpha: f64,
    i1: f64,
    i2: f64,
    t_min: f64,
    n: usize,
) -> CurveSamples {
    if i2 <= i1 {
        return CurveSamples::default();
    }
    let currents = log_spaced(i1, i2, n);
    let times = currents
        .iter()
        .map(|i| (tms * k / (i / i_n).powf(alpha)).max(t_min))
        .collect();
    CurveSamples::new(currents, times)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_log_spaced_endpoints_and_count() {
        let xs = log_spaced(100.0, 1000.0, 10);
        assert_eq!(xs.len(), 10);
        assert_eq!(xs[0], 100.0);
        assert_eq!(xs[9], 1000.0);
    }

    #[test]
    fn test_log_spaced_is_geometric() {
        let xs = log_spaced(10.0, 10000.0, 4);
        // Common ratio 10 between consecutive samples.
        for pair in xs.windows(2) {
            assert!((pair[1] / pair[0] - 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_log_spaced_degenerate_counts() {
        assert!(log_spaced(1.0, 10.0, 0).is_empty());
        assert_eq!(log_spaced(5.0, 10.0, 1), vec![5.0]);
    }

    #[test]
    fn test_point() {
        let s = point(630.0, 0.02);
        assert_eq!(s.currents, vec![630.0]);
        assert_eq!(s.times, vec![0.02]);
    }

    #[test]
    fn test_iec_monotonic_sampling_with_floor() {
        let s = iec(1.0, 100.0, 0.14, 0.0, 0.02, 100.0, 1000.0, 0.01, 10);
        assert_eq!(s.len(), 10);
        for pair in s.currents.windows(2) {
            assert!(pair[1] > pair[0], "currents must be strictly increasing");
        }
        assert!(s.times.iter().all(|t| *t >= 0.01));
    }

    #[test]
    fn test_iec_formula_value() {
        // Single interior check against the closed form.
        let s = iec(0.5, 100.0, 0.14, 0.0, 0.02, 200.0, 800.0, 0.0, 3);
        let i = s.currents[1];
        let expected = 0.5 * (0.14 / ((i / 100.0).powf(0.02) - 1.0));
        assert!((s.times[1] - expected).abs() < EPS);
    }

    #[test]
    fn test_iec_zero_width_segment_is_empty() {
        let s = iec(1.0, 100.0, 0.14, 0.0, 0.02, 1000.0, 100.0, 0.01, 10);
        assert!(s.currents.is_empty());
        assert!(s.times.is_empty());

        let equal = iec(1.0, 100.0, 0.14, 0.0, 0.02, 500.0, 500.0, 0.01, 10);
        assert!(equal.is_empty());
    }

    #[test]
    fn test_named_variants_match_their_triples() {
        let args = (0.2, 150.0, 300.0, 3000.0, 0.05, 7);
        let cases: Vec<(CurveSamples, (f64, f64, f64))> = vec![
            (
                iec_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEC_INVERSE,
            ),
            (
                iec_very_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEC_VERY_INVERSE,
            ),
            (
                iec_extremely_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEC_EXTREMELY_INVERSE,
            ),
            (
                ieee_moderately_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEEE_MODERATELY_INVERSE,
            ),
            (
                ieee_very_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEEE_VERY_INVERSE,
            ),
            (
                ieee_extremely_inverse(args.0, args.1, args.2, args.3, args.4, args.5),
                IEEE_EXTREMELY_INVERSE,
            ),
        ];
        for (samples, (k, c, alpha)) in cases {
            let expected = iec(args.0, args.1, k, c, alpha, args.2, args.3, args.4, args.5);
            assert_eq!(samples, expected);
        }
    }

    #[test]
    fn test_thermal_formula() {
        let s = thermal(2.0, 100.0, 150.0, 600.0, 5);
        assert_eq!(s.len(), 5);
        let i = s.currents[0];
        let expected = 2.0 * (i * i / (i * i - 100.0 * 100.0)).ln();
        assert!((s.times[0] - expected).abs() < EPS);
        // Heating time shrinks as current rises.
        for pair in s.times.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_i2t_formula_and_floor() {
        let s = i2t(1.0, 100.0, 80.0, 2.0, 200.0, 2000.0, 0.1, 6);
        let i = s.currents[0];
        let expected = (80.0 / (i / 100.0).powi(2)).max(0.1);
        assert!((s.times[0] - expected).abs() < EPS);
        assert!(s.times.iter().all(|t| *t >= 0.1));
        assert!(i2t(1.0, 100.0, 80.0, 2.0, 2000.0, 200.0, 0.1, 6).is_empty());
    }
}
