use crate::{
    any::difficulty::{
        object::{HasStartTime, IDifficultyObject},
        skills::{strain_decay, StrainSkill},
    },
    osu::difficulty::{evaluators::AimEvaluator, object::OsuDifficultyObject},
    util::strains_vec::StrainsVec,
};

use super::strain::{count_relative_to_max, OsuStrainSkill};

define_skill! {
    #[derive(Clone)]
    pub struct Aim: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        include_sliders: bool,
        current_strain: f64 = 0.0,
        slider_strains: Vec<f64> = Vec::with_capacity(64),
    }
}

impl Aim {
    const SKILL_MULTIPLIER: f64 = 13.15;
    const STRAIN_DECAY_BASE: f64 = 0.175;
    /// Scales the mitigation so that it's roughly `1.0` at 0ms.
    const MITIGATION_MULTIPLIER: f64 = 573.7336;
    const MITIGATION_MAX: f64 = 5.0;

    fn calculate_initial_strain(
        &mut self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, objects)
            .map_or(0.0, HasStartTime::start_time);

        self.current_strain * strain_decay(time - prev_start_time, Self::STRAIN_DECAY_BASE)
    }

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        // Compensates for `d / t^(2 + f(t))`
        let mitigation = Self::mitigation(curr.lazy_jump_dist, curr.strain_time);

        // NaN for objects without distance
        if mitigation.is_nan() {
            #[cfg(feature = "tracing")]
            tracing::trace!(idx = curr.idx, "skipping aim mitigation");
        } else {
            self.current_strain *=
                mitigation.min(Self::MITIGATION_MAX) * Self::MITIGATION_MULTIPLIER;
        }

        self.current_strain *= strain_decay(curr.delta_time, Self::STRAIN_DECAY_BASE);
        self.current_strain += AimEvaluator::evaluate_diff_of(curr, objects, self.include_sliders)
            * Self::SKILL_MULTIPLIER;

        if curr.base.is_slider() {
            self.slider_strains.push(self.current_strain);
        }

        self.current_strain
    }

    fn mitigation(dist: f64, strain_time: f64) -> f64 {
        let decay = strain_decay(strain_time, Self::STRAIN_DECAY_BASE);

        (dist / strain_time.powf(2.0)) / ((decay / (1.0 - decay)) * (dist / strain_time))
    }

    pub fn get_difficult_sliders(&self) -> f64 {
        count_relative_to_max(&self.slider_strains)
    }

    pub fn slider_strains(&self) -> &[f64] {
        &self.slider_strains
    }

    // From `OsuStrainSkill`; native rather than trait function so that it has
    // priority over `StrainSkill::difficulty_value`
    fn difficulty_value(current_strain_peaks: StrainsVec) -> f64 {
        super::strain::difficulty_value(
            current_strain_peaks,
            Self::REDUCED_STRAIN_BASELINE,
            Self::DECAY_WEIGHT,
        )
    }
}

impl OsuStrainSkill for Aim {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_without_distance_is_nan() {
        assert!(Aim::mitigation(0.0, 100.0).is_nan());
    }

    #[test]
    fn mitigation_is_about_one_at_min_delta() {
        let mitigation = Aim::mitigation(100.0, OsuDifficultyObject::MIN_DELTA_TIME);
        let scaled = mitigation.min(Aim::MITIGATION_MAX) * Aim::MITIGATION_MULTIPLIER;

        assert!((scaled - 1.0).abs() < 0.05);
    }
}
