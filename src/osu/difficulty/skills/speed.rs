use crate::{
    any::difficulty::{
        object::{HasStartTime, IDifficultyObject},
        skills::{strain_decay, StrainSkill},
    },
    osu::difficulty::{
        evaluators::{RhythmEvaluator, SpeedEvaluator, StaminaEvaluator},
        object::OsuDifficultyObject,
    },
    util::strains_vec::StrainsVec,
};

use super::strain::{count_relative_to_max, OsuStrainSkill};

define_skill! {
    /// Tapping speed, tracked by a fast decaying burst strain on top of a
    /// slowly decaying stamina strain.
    #[derive(Clone)]
    pub struct Speed: StrainSkill => [OsuDifficultyObject<'a>][OsuDifficultyObject<'a>] {
        current_burst_strain: f64 = 0.0,
        current_stamina_strain: f64 = 0.0,
        current_rhythm: f64 = 0.0,
        hit_window: f64,
        has_autopilot_mod: bool,
        slider_strains: Vec<f64> = Vec::with_capacity(64),
    }
}

impl Speed {
    const BURST_MULTIPLIER: f64 = 1.8;
    const STAMINA_MULTIPLIER: f64 = 0.11;
    const BURST_DECAY_BASE: f64 = 0.1;
    const STAMINA_DECAY_BASE: f64 = 0.1;
    const SINGLE_SPACING_THRESHOLD: f64 = OsuDifficultyObject::NORMALIZED_DIAMETER as f64 * 1.5;
    const DIST_MULTIPLIER: f64 = 0.5;

    fn burst_decay(ms: f64) -> f64 {
        strain_decay(ms, Self::BURST_DECAY_BASE)
    }

    fn stamina_decay(ms: f64) -> f64 {
        f64::powf(Self::STAMINA_DECAY_BASE, (ms / 1000.0).powf(2.0))
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

        (self.current_burst_strain * self.current_rhythm)
            * Self::burst_decay(time - prev_start_time)
    }

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        self.current_burst_strain *= Self::burst_decay(curr.strain_time);
        self.current_rhythm = RhythmEvaluator::evaluate_diff_of(curr, objects, self.hit_window);

        let travel_dist = curr.previous(0, objects).map_or(0.0, |prev| prev.travel_dist);
        let dist = travel_dist + curr.min_jump_dist;
        let dist_bonus = (dist / Self::SINGLE_SPACING_THRESHOLD).powf(3.95) * Self::DIST_MULTIPLIER;

        let stamina = StaminaEvaluator::evaluate_diff_of(curr, objects, self.current_rhythm);
        let speed = SpeedEvaluator::evaluate_diff_of(
            curr,
            objects,
            self.hit_window,
            self.has_autopilot_mod,
        );

        self.current_burst_strain += f64::max(
            stamina * Self::STAMINA_MULTIPLIER,
            speed - 10.0 * dist_bonus,
        ) * Self::BURST_MULTIPLIER
            * self.current_rhythm.sqrt();

        self.current_stamina_strain *= Self::stamina_decay(curr.strain_time);
        self.current_stamina_strain += stamina * Self::STAMINA_MULTIPLIER;

        let total_strain = self.current_burst_strain + self.current_stamina_strain;

        if curr.base.is_slider() {
            self.slider_strains.push(total_strain);
        }

        total_strain
    }

    pub fn relevant_note_count(&self) -> f64 {
        count_relative_to_max(&self.object_strains)
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

impl OsuStrainSkill for Speed {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamina_decays_slower_than_burst() {
        for ms in [25.0, 100.0, 250.0, 500.0] {
            assert!(Speed::stamina_decay(ms) >= Speed::burst_decay(ms));
        }
    }
}
