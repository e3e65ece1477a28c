use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::difficulty::object::OsuDifficultyObject,
    util::difficulty::{bpm_to_milliseconds, milliseconds_to_bpm},
};

pub struct StaminaEvaluator;

impl StaminaEvaluator {
    pub const SPEED_BALANCING_FACTOR: f64 = 40.0;

    /// Evaluates how taxing it is to keep tapping at the current tempo.
    ///
    /// Spinners, the object after a spinner, and the first object yield `0.0`.
    ///
    /// `rhythm` is the [`RhythmEvaluator`] value of `curr`. The speed bonus is
    /// divided by it so complex rhythms don't count twice.
    ///
    /// [`RhythmEvaluator`]: super::RhythmEvaluator
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        rhythm: f64,
    ) -> f64 {
        if curr.idx == 0
            || curr.base.is_spinner()
            || curr
                .previous(0, diff_objects)
                .is_some_and(|prev| prev.base.is_spinner())
        {
            return 0.0;
        }

        let mut strain_time = curr.strain_time;
        let bpm = milliseconds_to_bpm(strain_time, None);

        let mut speed_bonus = 0.0;

        if bpm > 200.0 {
            speed_bonus = Self::tier(200.0, strain_time).powf(1.6);
        }

        if bpm > 300.0 {
            speed_bonus += Self::tier(300.0, strain_time).powf(2.0);
        }

        if bpm > 350.0 {
            speed_bonus += 2.0 * Self::tier(350.0, strain_time).powf(2.4);
        }

        if bpm < 200.0 {
            strain_time *= (strain_time / bpm_to_milliseconds(200.0, None)).sqrt();
        }

        if rhythm > 0.0 {
            speed_bonus /= rhythm;
        }

        (1.0 + speed_bonus) * 1000.0 / strain_time
    }

    const fn tier(bpm: f64, strain_time: f64) -> f64 {
        (bpm_to_milliseconds(bpm, None) - strain_time) / Self::SPEED_BALANCING_FACTOR
    }
}
