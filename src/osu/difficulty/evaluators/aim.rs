use std::f64::consts::FRAC_PI_2;

use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::difficulty::object::OsuDifficultyObject,
    util::difficulty::{reverse_lerp, smootherstep, smoothstep},
};

pub struct AimEvaluator;

impl AimEvaluator {
    pub const WIDE_ANGLE_MULTIPLIER: f64 = 1.5;
    pub const ACUTE_ANGLE_MULTIPLIER: f64 = 20_000.0;
    pub const SLIDER_MULTIPLIER: f64 = 1.35;
    pub const VELOCITY_CHANGE_MULTIPLIER: f64 = 0.75;
    pub const WIGGLE_MULTIPLIER: f64 = 1.02;

    /// Evaluates the distance the cursor has to cover to reach the current
    /// object.
    ///
    /// If the previous object is a slider and `with_slider_travel_dist` is
    /// set, the movement through the slider is taken into account.
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        with_slider_travel_dist: bool,
    ) -> f64 {
        let Some(osu_last_obj) = curr
            .previous(0, diff_objects)
            .filter(|last| !(curr.base.is_spinner() || last.base.is_spinner()))
        else {
            return 0.0;
        };

        let mut curr_dist = curr.lazy_jump_dist;

        if osu_last_obj.base.is_slider() && with_slider_travel_dist {
            let travel_dist = osu_last_obj.travel_dist;
            let movement_dist = curr.min_jump_dist;

            curr_dist = curr_dist.max(movement_dist + travel_dist);
        }

        curr_dist
    }

    /// Evaluates angle, velocity change, wiggle, and slider bonuses of the
    /// current object.
    pub fn evaluate_bonus_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        with_slider_travel_dist: bool,
    ) -> f64 {
        let osu_curr_obj = curr;

        let Some((osu_last_last_obj, osu_last_obj)) = curr
            .previous(1, diff_objects)
            .zip(curr.previous(0, diff_objects))
            .filter(|(_, last)| !(curr.base.is_spinner() || last.base.is_spinner()))
        else {
            return 0.0;
        };

        #[allow(clippy::items_after_statements)]
        const RADIUS: i32 = OsuDifficultyObject::NORMALIZED_RADIUS;
        #[allow(clippy::items_after_statements)]
        const DIAMETER: i32 = OsuDifficultyObject::NORMALIZED_DIAMETER;

        let radius = f64::from(RADIUS);
        let diameter = f64::from(DIAMETER);

        // * velocity to the current object, assuming the last object is a circle
        let mut curr_velocity = osu_curr_obj.lazy_jump_dist / osu_curr_obj.strain_time;

        // * extend the velocity through the last object if it's a slider
        if osu_last_obj.base.is_slider() && with_slider_travel_dist {
            let travel_velocity = osu_last_obj.travel_dist / osu_last_obj.travel_time;
            let movement_velocity = osu_curr_obj.min_jump_dist / osu_curr_obj.min_jump_time;

            curr_velocity = curr_velocity.max(movement_velocity + travel_velocity);
        }

        let mut prev_velocity = osu_last_obj.lazy_jump_dist / osu_last_obj.strain_time;

        if osu_last_last_obj.base.is_slider() && with_slider_travel_dist {
            let travel_velocity = osu_last_last_obj.travel_dist / osu_last_last_obj.travel_time;
            let movement_velocity = osu_last_obj.min_jump_dist / osu_last_obj.min_jump_time;

            prev_velocity = prev_velocity.max(movement_velocity + travel_velocity);
        }

        let mut wide_angle_bonus = 0.0;
        let mut acute_angle_bonus = 0.0;
        let mut slider_bonus = 0.0;
        let mut vel_change_bonus = 0.0;
        let mut wiggle_bonus = 0.0;

        let min_strain_time = osu_curr_obj.strain_time.min(osu_last_obj.strain_time);
        let max_strain_time = osu_curr_obj.strain_time.max(osu_last_obj.strain_time);

        if prev_velocity.max(curr_velocity) > 0.0 {
            // * average velocity over the whole object rather than the
            // * individual jump and slider path velocities
            let diff_prev_velocity = (osu_last_obj.lazy_jump_dist + osu_last_last_obj.travel_dist)
                / osu_last_obj.strain_time;
            let diff_curr_velocity =
                (osu_curr_obj.lazy_jump_dist + osu_last_obj.travel_dist) / osu_curr_obj.strain_time;

            let max_diff_velocity = diff_prev_velocity.max(diff_curr_velocity);

            let dist_ratio = if max_diff_velocity > 0.0 {
                (FRAC_PI_2 * (diff_prev_velocity - diff_curr_velocity).abs() / max_diff_velocity)
                    .sin()
                    .powf(2.0)
            } else {
                0.0
            };

            // * reward overlaps where the velocity is still changing
            let overlap_vel_buff = (diameter * 1.25 / min_strain_time)
                .min((diff_prev_velocity - diff_curr_velocity).abs());

            vel_change_bonus = overlap_vel_buff * dist_ratio;

            // * penalize rhythm changes
            vel_change_bonus *= (min_strain_time / max_strain_time).powf(2.0);
        }

        let angles = osu_curr_obj
            .angle
            .zip(osu_last_obj.angle)
            .zip(osu_last_last_obj.angle)
            .map(|((curr, last), last_last)| (curr, last, last_last));

        // * same rhythm only
        if let Some((curr_angle, last_angle, last_last_angle)) =
            angles.filter(|_| max_strain_time < 1.25 * min_strain_time)
        {
            let avg_angle = (curr_angle + last_angle + last_last_angle) / 3.0;
            let min_dist = osu_curr_obj
                .lazy_jump_dist
                .min(osu_last_obj.lazy_jump_dist)
                .min(osu_last_last_obj.lazy_jump_dist);
            let avg_angle_cos = (avg_angle.cos() + 1.0) / 2.0;

            // * the smaller velocity is the base for angle bonuses
            let angle_bonus = curr_velocity.min(prev_velocity);

            wide_angle_bonus = Self::calc_wide_angle_bonus(curr_angle);
            acute_angle_bonus = Self::calc_acute_angle_bonus(curr_angle);

            // * penalize angle repetition
            wide_angle_bonus *=
                1.0 - wide_angle_bonus.min(Self::calc_wide_angle_bonus(last_angle).powf(3.0));

            let repetition_weight = (angle_bonus * (vel_change_bonus + 1.0).sqrt() / 15.0).min(0.3);
            acute_angle_bonus *= (0.5 - repetition_weight)
                + (0.5 + repetition_weight)
                    * (1.0
                        - acute_angle_bonus
                            .min(Self::calc_acute_angle_bonus(last_angle).powf(3.0)));

            // * full wide angle bonus for distances above one diameter
            wide_angle_bonus *= angle_bonus * smootherstep(min_dist, 0.0, diameter);

            acute_angle_bonus *= angle_bonus.sqrt()
                * smootherstep(
                    min_dist,
                    avg_angle_cos.max(0.25) * diameter,
                    avg_angle_cos.max(0.5) * diameter * 2.0,
                );

            acute_angle_bonus /= osu_curr_obj.strain_time.powf(2.0);

            // * wiggles are jumps of [radius, 3*diameter] with angles below 110°
            wiggle_bonus = angle_bonus
                * smootherstep(osu_curr_obj.lazy_jump_dist, radius, diameter)
                * reverse_lerp(osu_curr_obj.lazy_jump_dist, diameter * 3.0, diameter).powf(1.8)
                * smootherstep(curr_angle, f64::to_radians(110.0), f64::to_radians(60.0))
                * smootherstep(osu_last_obj.lazy_jump_dist, radius, diameter)
                * reverse_lerp(osu_last_obj.lazy_jump_dist, diameter * 3.0, diameter).powf(1.8)
                * smootherstep(last_angle, f64::to_radians(110.0), f64::to_radians(60.0));
        }

        if osu_last_obj.base.is_slider() {
            slider_bonus = osu_last_obj.travel_dist / osu_last_obj.travel_time;
        }

        let mut aim_strain = wiggle_bonus * Self::WIGGLE_MULTIPLIER;

        // * acute angle bonus or wide angle plus velocity change bonus,
        // * whichever is larger
        aim_strain += (acute_angle_bonus
            * Self::ACUTE_ANGLE_MULTIPLIER
            * (vel_change_bonus + 1.0).sqrt())
        .max(
            wide_angle_bonus * Self::WIDE_ANGLE_MULTIPLIER
                + vel_change_bonus * Self::VELOCITY_CHANGE_MULTIPLIER,
        );

        if with_slider_travel_dist {
            aim_strain += slider_bonus * Self::SLIDER_MULTIPLIER;
        }

        aim_strain
    }

    fn calc_wide_angle_bonus(angle: f64) -> f64 {
        smoothstep(angle, f64::to_radians(40.0), f64::to_radians(140.0))
    }

    fn calc_acute_angle_bonus(angle: f64) -> f64 {
        smoothstep(angle, f64::to_radians(140.0), f64::to_radians(40.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::hit_object::{HitObject, Pos},
        osu::{difficulty::scaling_factor::ScalingFactor, object::OsuObject},
    };

    use super::*;

    fn diff_objects<'a>(
        objects: &'a [OsuObject],
        scaling_factor: &ScalingFactor,
    ) -> Vec<OsuDifficultyObject<'a>> {
        let mut diff_objects: Vec<OsuDifficultyObject<'a>> = Vec::with_capacity(objects.len());

        for (idx, h) in objects.iter().enumerate() {
            let last = idx.checked_sub(1).and_then(|i| objects.get(i));
            let last_diff = idx.checked_sub(1).and_then(|i| diff_objects.get(i));
            let last_last_diff = idx.checked_sub(2).and_then(|i| diff_objects.get(i));

            let diff = OsuDifficultyObject::new(
                h,
                last,
                last_diff,
                last_last_diff,
                1.0,
                idx,
                scaling_factor,
            );

            diff_objects.push(diff);
        }

        diff_objects
    }

    #[test]
    fn base_is_lazy_jump_dist() {
        let scaling_factor = ScalingFactor::new(4.0);
        let objects = [
            OsuObject::new(&HitObject::circle(Pos::new(100.0, 100.0), 1000.0)),
            OsuObject::new(&HitObject::circle(Pos::new(200.0, 100.0), 1200.0)),
        ];

        let diff_objects = diff_objects(&objects, &scaling_factor);

        let first = AimEvaluator::evaluate_diff_of(&diff_objects[0], &diff_objects, true);
        let second = AimEvaluator::evaluate_diff_of(&diff_objects[1], &diff_objects, true);

        assert!(first.abs() < f64::EPSILON);
        assert!((second - diff_objects[1].lazy_jump_dist).abs() < f64::EPSILON);
        assert!(second > 0.0);
    }

    #[test]
    fn bonus_needs_two_predecessors() {
        let scaling_factor = ScalingFactor::new(4.0);
        let objects = [
            OsuObject::new(&HitObject::circle(Pos::new(100.0, 100.0), 1000.0)),
            OsuObject::new(&HitObject::circle(Pos::new(300.0, 100.0), 1200.0)),
            OsuObject::new(&HitObject::circle(Pos::new(300.0, 300.0), 1300.0)),
        ];

        let diff_objects = diff_objects(&objects, &scaling_factor);

        let early = AimEvaluator::evaluate_bonus_of(&diff_objects[1], &diff_objects, true);
        let late = AimEvaluator::evaluate_bonus_of(&diff_objects[2], &diff_objects, true);

        assert!(early.abs() < f64::EPSILON);
        assert!(late > 0.0);
    }

    #[test]
    fn spinner_blocks_aim() {
        let scaling_factor = ScalingFactor::new(4.0);
        let objects = [
            OsuObject::new(&HitObject::circle(Pos::new(100.0, 100.0), 1000.0)),
            OsuObject::new(&HitObject::spinner(Pos::new(256.0, 192.0), 1200.0, 500.0)),
            OsuObject::new(&HitObject::circle(Pos::new(400.0, 300.0), 2000.0)),
        ];

        let diff_objects = diff_objects(&objects, &scaling_factor);

        for curr in diff_objects.iter() {
            let base = AimEvaluator::evaluate_diff_of(curr, &diff_objects, true);
            let bonus = AimEvaluator::evaluate_bonus_of(curr, &diff_objects, true);

            assert!(base.abs() < f64::EPSILON);
            assert!(bonus.abs() < f64::EPSILON);
        }
    }
}
