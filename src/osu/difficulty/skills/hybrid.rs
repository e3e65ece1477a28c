use crate::{
    any::difficulty::skills::StrainSkill,
    osu::difficulty::{evaluators::HybridEvaluator, object::OsuDifficultyObject},
    util::strains_vec::StrainsVec,
};

use super::strain::OsuStrainSkill;

define_skill! {
    /// Sudden shifts between aim and speed load.
    #[derive(Clone)]
    pub struct Hybrid: StrainDecaySkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        with_sliders: bool,
        hit_window: f64,
        has_autopilot_mod: bool,
    }
}

impl Hybrid {
    const SKILL_MULTIPLIER: f64 = 1.0;
    const STRAIN_DECAY_BASE: f64 = 0.5;

    fn strain_value_of(
        &self,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        HybridEvaluator::evaluate_diff_of(
            curr,
            objects,
            self.with_sliders,
            self.hit_window,
            self.has_autopilot_mod,
        )
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

impl OsuStrainSkill for Hybrid {}
