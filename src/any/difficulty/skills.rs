use crate::util::{float_ext::FloatExt, hint::unlikely, strains_vec::StrainsVec};

/// A skill that folds difficulty objects into a decaying strain and keeps
/// track of the highest strain per section.
///
/// Implementations are generated through `define_skill!`.
pub trait StrainSkill: Sized {
    type DifficultyObject<'a>;
    type DifficultyObjects<'a>: ?Sized;

    /// Weight decay applied to the sorted section peaks.
    const DECAY_WEIGHT: f64 = 0.9;
    /// Length of a section in milliseconds.
    const SECTION_LENGTH: i32 = 400;

    /// Process the next difficulty object.
    ///
    /// Objects must be passed in order, starting at index `1`.
    fn process<'a>(
        &mut self,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    );

    fn count_top_weighted_strains(&self, difficulty_value: f64) -> f64;

    fn count_relevant_objects(&self, difficulty_value: f64) -> f64;

    /// The strain value of each processed object.
    fn object_strains(&self) -> &[f64];

    fn save_current_peak(&mut self);

    fn start_new_section_from<'a>(
        &mut self,
        time: f64,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    );

    /// All section peaks so far, including the current section.
    fn current_strain_peaks(&self) -> StrainsVec;

    fn into_current_strain_peaks(self) -> StrainsVec;

    fn get_current_strain_peaks(
        mut strain_peaks: StrainsVec,
        current_section_peak: f64,
    ) -> StrainsVec {
        strain_peaks.push(current_section_peak);

        strain_peaks
    }

    fn difficulty_value(current_strain_peaks: StrainsVec) -> f64;

    fn into_difficulty_value(self) -> f64;

    fn cloned_difficulty_value(&self) -> f64;
}

/// A [`StrainSkill`] whose strain is a single accumulator that decays
/// exponentially over time.
pub trait StrainDecaySkill: StrainSkill {
    fn calculate_initial_strain<'a>(
        &self,
        time: f64,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    ) -> f64;

    fn strain_value_at<'a>(
        &mut self,
        curr: &Self::DifficultyObject<'a>,
        objects: &Self::DifficultyObjects<'a>,
    ) -> f64;

    fn strain_decay(ms: f64) -> f64;
}

pub fn count_top_weighted_strains(object_strains: &[f64], difficulty_value: f64) -> f64 {
    if unlikely(object_strains.is_empty()) {
        return 0.0;
    }

    // What would the top strain be if all strain values were identical
    let consistent_top_strain = difficulty_value / 10.0;

    if unlikely(FloatExt::eq(consistent_top_strain, 0.0)) {
        return object_strains.len() as f64;
    }

    object_strains
        .iter()
        .map(|s| 1.1 / (1.0 + f64::exp(-10.0 * (s / consistent_top_strain - 0.88))))
        .sum()
}

/// Estimates how many objects contribute to the difficulty, relative to the
/// average strain of the `section_count` non-zero sections.
pub fn count_relevant_objects(
    object_strains: &[f64],
    section_count: usize,
    difficulty_value: f64,
) -> f64 {
    if unlikely(FloatExt::eq(difficulty_value, 0.0) || section_count == 0) {
        return 0.0;
    }

    let section_count = section_count as f64;
    let consistent_top_strain = difficulty_value / section_count * 0.8;
    let midpoint = section_count / 12.0;

    object_strains
        .iter()
        .map(|s| 1.0 / (1.0 + f64::exp(-10.0 * (s / consistent_top_strain - midpoint))))
        .sum()
}

/// Weighted sum of the non-zero peaks, sorted descendingly.
pub fn difficulty_value(current_strain_peaks: StrainsVec, decay_weight: f64) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    // Sections with 0 strain are excluded to avoid worst-case time complexity
    // of the following sort. These sections would not contribute anyway.
    let mut peaks = current_strain_peaks;
    peaks.retain_non_zero_and_sort();

    for strain in peaks.iter() {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    f64::powf(strain_decay_base, ms / 1000.0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn top_weighted_without_difficulty() {
        assert!(count_top_weighted_strains(&[], 100.0).abs() < f64::EPSILON);
        assert!((count_top_weighted_strains(&[1.0, 2.0, 3.0], 0.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relevant_objects_without_difficulty() {
        assert!(count_relevant_objects(&[1.0, 2.0], 2, 0.0).abs() < f64::EPSILON);
        assert!(count_relevant_objects(&[1.0, 2.0], 0, 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_sum() {
        let peaks = StrainsVec::from(vec![0.0, 1.0, 0.0, 3.0, 2.0]);
        let expected = 3.0 + 2.0 * 0.9 + 1.0 * 0.81;

        assert!((difficulty_value(peaks, 0.9) - expected).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn decay_monotonic(a in 0.0..100_000.0_f64, b in 0.0..100_000.0_f64, base in 0.01..1.0_f64) {
            let (short, long) = if a <= b { (a, b) } else { (b, a) };

            let short_decay = strain_decay(short, base);
            let long_decay = strain_decay(long, base);

            prop_assert!(long_decay <= short_decay);
            prop_assert!((0.0..=1.0).contains(&short_decay));
        }

        #[test]
        fn relevant_objects_bounded(
            strains in prop::collection::vec(0.0..1_000.0_f64, 1..300),
            section_count in 1_usize..50,
            difficulty_value in 1.0..10_000.0_f64,
        ) {
            let count = count_relevant_objects(&strains, section_count, difficulty_value);

            prop_assert!(count >= 0.0);
            prop_assert!(count <= strains.len() as f64);
        }
    }
}
