use crate::util::{
    difficulty::{lerp, logistic},
    float_ext::FloatExt,
    strains_vec::StrainsVec,
};

pub trait OsuStrainSkill {
    /// Multiplier of the highest section peak; the reduction fades out over
    /// the following peaks.
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;

    fn difficulty_to_performance(difficulty: f64) -> f64 {
        difficulty_to_performance(difficulty)
    }
}

/// Scales the descendingly sorted non-zero peaks by
/// `lerp(baseline, 1.0, log10(lerp(1.0, n, i / n)))`.
///
/// The result is sorted descendingly. A baseline of `1.0` leaves the peaks
/// untouched.
pub fn reduce_strain_peaks(peaks: Vec<f64>, reduced_strain_baseline: f64) -> Vec<f64> {
    let mut peaks = StrainsVec::from(peaks);
    peaks.retain_non_zero_and_sort();

    let n = peaks.len();
    let mut peaks = peaks.into_vec();

    for (i, strain) in peaks.iter_mut().enumerate() {
        let clamped = f64::from((i as f32 / n as f32).clamp(0.0, 1.0));
        let scale = f64::log10(lerp(1.0, n as f64, clamped));
        *strain *= lerp(reduced_strain_baseline, 1.0, scale);
    }

    peaks.sort_by(|a, b| b.total_cmp(a));

    peaks
}

/// Sum of `peaks[i] * decay_weight^i`.
pub fn weighted_sum(peaks: &[f64], decay_weight: f64) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub fn difficulty_value(
    current_strain_peaks: StrainsVec,
    reduced_strain_baseline: f64,
    decay_weight: f64,
) -> f64 {
    let peaks = reduce_strain_peaks(current_strain_peaks.into_vec(), reduced_strain_baseline);

    weighted_sum(&peaks, decay_weight)
}

pub fn count_top_weighted_sliders(slider_strains: &[f64], difficulty_value: f64) -> f64 {
    if slider_strains.is_empty() {
        return 0.0;
    }

    // What would the top strain be if all strain values were identical
    let consistent_top_strain = difficulty_value / 10.0;

    if FloatExt::eq(consistent_top_strain, 0.0) {
        return 0.0;
    }

    slider_strains
        .iter()
        .map(|s| logistic(*s / consistent_top_strain, 0.88, 10.0, Some(1.1)))
        .sum()
}

/// Logistic weight of each strain relative to the highest one.
pub fn count_relative_to_max(strains: &[f64]) -> f64 {
    let max_strain = strains.iter().copied().fold(0.0, f64::max);

    if FloatExt::eq(max_strain, 0.0) {
        return 0.0;
    }

    strains
        .iter()
        .map(|strain| 1.0 / (1.0 + f64::exp(-(strain / max_strain * 12.0 - 6.0))))
        .sum()
}

pub fn difficulty_to_performance(difficulty: f64) -> f64 {
    f64::powf(5.0 * f64::max(1.0, difficulty / 0.0675) - 4.0, 3.0) / 100_000.0
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_peaks() {
        assert!(reduce_strain_peaks(Vec::new(), 0.75).is_empty());
        assert!(weighted_sum(&[], 0.9).abs() < f64::EPSILON);
        assert!(difficulty_value(StrainsVec::from(vec![0.0, 0.0]), 0.75, 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn highest_peak_is_reduced() {
        let peaks = reduce_strain_peaks(vec![10.0, 0.0, 5.0, 1.0], 0.75);

        assert_eq!(peaks.len(), 3);
        assert!((peaks[0] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn count_relative_to_max_without_strain() {
        assert!(count_relative_to_max(&[]).abs() < f64::EPSILON);
        assert!(count_relative_to_max(&[0.0, 0.0]).abs() < f64::EPSILON);
        assert!(count_relative_to_max(&[1.0, 1.0]) > 1.9);
    }

    #[test]
    fn performance_floor() {
        let floor = difficulty_to_performance(0.0);

        assert!((floor - 1.0 / 100_000.0).abs() < 1e-15);
        assert!(difficulty_to_performance(1.0) > floor);
    }

    proptest! {
        #[test]
        fn aggregation_is_idempotent(peaks in prop::collection::vec(0.0..1_000.0_f64, 0..200)) {
            let once = reduce_strain_peaks(peaks, 1.0);
            let twice = reduce_strain_peaks(once.clone(), 1.0);

            prop_assert_eq!(&once, &twice);
            prop_assert!(once.windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(once.iter().all(|&s| s > 0.0));
        }

        #[test]
        fn reduction_keeps_non_zero_peaks(peaks in prop::collection::vec(0.0..1_000.0_f64, 0..200)) {
            let non_zero = peaks.iter().filter(|&&s| s > 0.0).count();
            let reduced = reduce_strain_peaks(peaks, 0.75);

            prop_assert_eq!(reduced.len(), non_zero);
            prop_assert!(reduced.iter().all(|s| s.is_finite() && *s > 0.0));
            prop_assert!(weighted_sum(&reduced, 0.9) >= 0.0);
        }
    }
}
