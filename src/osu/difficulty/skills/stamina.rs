use crate::{
    any::difficulty::{
        object::{HasStartTime, IDifficultyObject},
        skills::StrainSkill,
    },
    osu::difficulty::{
        evaluators::{RhythmEvaluator, StaminaEvaluator},
        object::OsuDifficultyObject,
    },
    util::strains_vec::StrainsVec,
};

use super::strain::OsuStrainSkill;

define_skill! {
    /// Endurance of sustained tapping with rhythm complexity factored out.
    #[derive(Clone)]
    pub struct Stamina: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        hit_window: f64,
        current_strain: f64 = 0.0,
    }
}

impl Stamina {
    const SKILL_MULTIPLIER: f64 = 0.01;
    const STRAIN_DECAY_BASE: f64 = 0.1;
    const DECAY_EXPONENT: f64 = 3.5;

    fn strain_decay(ms: f64) -> f64 {
        f64::powf(Self::STRAIN_DECAY_BASE, (ms / 1000.0).powf(Self::DECAY_EXPONENT))
    }

    fn calculate_initial_strain(
        &mut self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, objects)
            .map_or(0.0, HasStartTime::start_time);

        self.current_strain * Self::strain_decay(time - prev_start_time)
    }

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let rhythm = RhythmEvaluator::evaluate_diff_of(curr, objects, self.hit_window);

        self.current_strain *= Self::strain_decay(curr.strain_time);
        self.current_strain +=
            StaminaEvaluator::evaluate_diff_of(curr, objects, rhythm) * Self::SKILL_MULTIPLIER;

        if rhythm > 0.0 {
            self.current_strain / rhythm
        } else {
            self.current_strain
        }
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

impl OsuStrainSkill for Stamina {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_is_gentle_for_short_gaps() {
        assert!(Stamina::strain_decay(100.0) > 0.999);
        assert!(Stamina::strain_decay(1000.0) < 0.11);
        assert!(Stamina::strain_decay(2000.0) < Stamina::strain_decay(1000.0));
    }
}
