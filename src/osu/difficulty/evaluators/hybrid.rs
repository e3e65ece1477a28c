use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::difficulty::object::OsuDifficultyObject,
    util::difficulty::{reverse_lerp, smoothstep},
};

use super::{AimEvaluator, SpeedEvaluator};

/// Measures how quickly the balance between aim and speed load shifts.
pub struct HybridEvaluator;

impl HybridEvaluator {
    /// Amount of objects that make up one rolling average.
    pub const WINDOW_LEN: usize = 5;
    /// Upper bound of the evaluated ratio change.
    pub const MAX_RATIO_CHANGE: f64 = 10.0;
    /// Share of the ratio change that is removed for short flowing jumps.
    pub const SHORT_FLOW_PENALTY: f64 = 0.5;

    /// Ratio between the aim/speed balance at the current position and the
    /// balance five objects earlier, always at least `1.0` outside of the
    /// warm-up.
    ///
    /// The earlier window reaches six objects back so the first value is at
    /// index 6. Before that, and for spinners and their followers, it's `0.0`.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        with_slider_travel_dist: bool,
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        let Some(last) = curr.previous(0, diff_objects) else {
            return 0.0;
        };

        if curr.base.is_spinner() || last.base.is_spinner() {
            return 0.0;
        }

        let prev = |i: usize| curr.previous(i, diff_objects);

        let (Some(p1), Some(p2), Some(p3), Some(p4), Some(p5)) =
            (prev(1), prev(2), prev(3), prev(4), prev(5))
        else {
            return 0.0;
        };

        let aim = |obj: &'a OsuDifficultyObject<'a>| {
            AimEvaluator::evaluate_diff_of(obj, diff_objects, with_slider_travel_dist)
        };

        let speed = |obj: &'a OsuDifficultyObject<'a>| {
            SpeedEvaluator::evaluate_diff_of(obj, diff_objects, hit_window, autopilot)
        };

        let curr_window: [_; Self::WINDOW_LEN] = [curr, last, p1, p2, p3];
        let last_window: [_; Self::WINDOW_LEN] = [p5, p4, p1, p2, p3];

        let curr_ratio = balance_ratio(
            window_average(&curr_window, &aim),
            window_average(&curr_window, &speed),
        );
        let last_ratio = balance_ratio(
            window_average(&last_window, &aim),
            window_average(&last_window, &speed),
        );

        let ratio_change = balance_ratio(curr_ratio, last_ratio);

        let excess = (ratio_change - 1.0) * (1.0 - Self::short_flow_penalty(curr));

        (1.0 + excess).min(Self::MAX_RATIO_CHANGE)
    }

    /// Short jumps with wide angles flow into each other and shift the
    /// balance less than their raw values suggest.
    fn short_flow_penalty(curr: &OsuDifficultyObject<'_>) -> f64 {
        let Some(angle) = curr.angle else {
            return 0.0;
        };

        let radius = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS);
        let diameter = f64::from(OsuDifficultyObject::NORMALIZED_DIAMETER);

        let shortness = reverse_lerp(curr.lazy_jump_dist, diameter, radius);
        let wideness = smoothstep(angle, f64::to_radians(90.0), f64::to_radians(150.0));

        Self::SHORT_FLOW_PENALTY * shortness * wideness
    }
}

fn window_average<'a>(
    window: &[&'a OsuDifficultyObject<'a>],
    f: impl Fn(&'a OsuDifficultyObject<'a>) -> f64,
) -> f64 {
    window.iter().map(|obj| f(*obj)).sum::<f64>() / window.len() as f64
}

/// Larger over smaller value, `1.0` if either is not positive.
fn balance_ratio(a: f64, b: f64) -> f64 {
    let min = a.min(b);

    if min <= 0.0 {
        return 1.0;
    }

    a.max(b) / min
}

#[cfg(test)]
mod tests {
    use crate::{
        model::hit_object::{HitObject, Pos},
        osu::{
            difficulty::evaluators::test_objects::{diff_objects, zigzag},
            object::OsuObject,
        },
    };

    use super::*;

    fn hybrid(idx: usize, diff_objects: &[OsuDifficultyObject<'_>]) -> f64 {
        HybridEvaluator::evaluate_diff_of(&diff_objects[idx], diff_objects, true, 50.0, false)
    }

    #[test]
    fn degenerate_ratio_is_neutral() {
        assert!((balance_ratio(0.0, 5.0) - 1.0).abs() < f64::EPSILON);
        assert!((balance_ratio(-1.0, 5.0) - 1.0).abs() < f64::EPSILON);
        assert!((balance_ratio(2.0, 8.0) - 4.0).abs() < f64::EPSILON);
        assert!((balance_ratio(8.0, 2.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn warm_up() {
        let objects = zigzag(10);
        let diff_objects = diff_objects(&objects);

        for idx in 0..6 {
            assert!(hybrid(idx, &diff_objects).abs() < f64::EPSILON, "index {idx}");
        }

        for idx in 6..10 {
            let value = hybrid(idx, &diff_objects);

            assert!(value >= 1.0, "index {idx}: {value}");
            assert!(value <= HybridEvaluator::MAX_RATIO_CHANGE);
        }
    }

    #[test]
    fn spinner_and_follower_have_no_hybrid() {
        let mut objects = zigzag(10);
        objects[6] = OsuObject::new(&HitObject::spinner(Pos::new(256.0, 192.0), 1720.0, 100.0));

        let diff_objects = diff_objects(&objects);

        assert!(hybrid(6, &diff_objects).abs() < f64::EPSILON);
        assert!(hybrid(7, &diff_objects).abs() < f64::EPSILON);
        assert!(hybrid(8, &diff_objects) >= 1.0);
    }
}
