use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::difficulty::object::OsuDifficultyObject,
    util::difficulty::{bpm_to_milliseconds, milliseconds_to_bpm},
};

pub struct SpeedEvaluator;

impl SpeedEvaluator {
    /// 1.25 circles distance between centers
    pub const SINGLE_SPACING_THRESHOLD: f64 = OsuDifficultyObject::NORMALIZED_DIAMETER as f64 * 1.25;
    /// 200 BPM 1/4th
    pub const MIN_SPEED_BONUS: f64 = 200.0;
    pub const SPEED_BALANCING_FACTOR: f64 = 40.0;
    pub const DIST_MULTIPLIER: f64 = 0.8;

    /// Evaluates the difficulty of tapping the current object based on its
    /// strain time, the distance to the previous object, and how much it
    /// can be doubletapped.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        if curr.idx == 0
            || curr.base.is_spinner()
            || curr
                .previous(0, diff_objects)
                .is_some_and(|prev| prev.base.is_spinner())
        {
            return 0.0;
        }

        let osu_curr_obj = curr;
        let osu_prev_obj = curr.previous(0, diff_objects);
        let osu_next_obj = curr.next(0, diff_objects);

        let mut strain_time = curr.strain_time;
        let doubletapness = 1.0 - osu_curr_obj.get_doubletapness(osu_next_obj, hit_window);

        // * cap strain time to the great hit window. 0.93 keeps 260bpm OD8
        // * streams from being nerfed harshly while 0.92 limits the cap.
        strain_time /= ((strain_time / hit_window) / 0.93).clamp(0.92, 1.0);

        let speed_bonus = if milliseconds_to_bpm(strain_time, None) > Self::MIN_SPEED_BONUS {
            let base = (bpm_to_milliseconds(Self::MIN_SPEED_BONUS, None) - strain_time)
                / Self::SPEED_BALANCING_FACTOR;

            0.75 * base.powf(2.0)
        } else {
            0.0
        };

        let travel_dist = osu_prev_obj.map_or(0.0, |obj| obj.travel_dist);
        let dist = Self::SINGLE_SPACING_THRESHOLD.min(travel_dist + osu_curr_obj.min_jump_dist);

        // * max distance bonus is `DIST_MULTIPLIER` at the spacing threshold
        let dist_bonus = if autopilot {
            0.0
        } else {
            (dist / Self::SINGLE_SPACING_THRESHOLD).powf(3.95) * Self::DIST_MULTIPLIER
        };

        let difficulty = (1.0 + speed_bonus + dist_bonus) * 1000.0 / strain_time;

        // * penalty for doubletappable doubles
        difficulty * doubletapness
    }
}

#[cfg(test)]
mod tests {
    use crate::osu::difficulty::evaluators::test_objects::{around_spinner, diff_objects};

    use super::*;

    #[test]
    fn spinner_and_follower_have_no_speed() {
        let objects = around_spinner();
        let diff_objects = diff_objects(&objects);

        let speed = |idx: usize| {
            SpeedEvaluator::evaluate_diff_of(&diff_objects[idx], &diff_objects, 50.0, false)
        };

        assert!(speed(0).abs() < f64::EPSILON);
        assert!(speed(1) > 0.0);
        assert!(speed(2).abs() < f64::EPSILON);
        assert!(speed(3).abs() < f64::EPSILON);
        assert!(speed(4) > 0.0);
    }
}
