use crate::GameMods;

/// Turns the aggregated difficulty values of each skill into ratings.
///
/// Besides the square root scaling, ratings are adjusted for mods and for the
/// amount of objects that contribute to a skill.
pub struct OsuRatingCalculator<'mods> {
    mods: &'mods GameMods,
}

impl<'mods> OsuRatingCalculator<'mods> {
    pub const DIFFICULTY_MULTIPLIER: f64 = 0.0655;

    /// Upper bound of the hybrid rating before it is doubled.
    const HYBRID_RATING_MAX: f64 = 0.4;

    pub const fn new(mods: &'mods GameMods) -> Self {
        Self { mods }
    }

    pub fn calculate_difficulty_rating(difficulty_value: f64) -> f64 {
        difficulty_value.sqrt() * Self::DIFFICULTY_MULTIPLIER
    }
}

impl OsuRatingCalculator<'_> {
    pub fn compute_aim_rating(&self, difficulty_value: f64, relevant_objects: f64) -> f64 {
        let mut aim_rating = Self::calculate_difficulty_rating(difficulty_value);

        if self.mods.td() {
            aim_rating = aim_rating.powf(0.8);
        }

        if self.mods.rx() {
            aim_rating *= 0.9;
        } else if self.mods.ap() {
            aim_rating = 0.0;
        }

        aim_rating * aim_length_bonus(relevant_objects).cbrt()
    }

    /// Same as the aim rating but autopilot leaves it untouched.
    pub fn compute_aim_no_sliders_rating(
        &self,
        difficulty_value: f64,
        relevant_objects: f64,
    ) -> f64 {
        let mut aim_rating = Self::calculate_difficulty_rating(difficulty_value);

        if self.mods.td() {
            aim_rating = aim_rating.powf(0.8);
        }

        if self.mods.rx() {
            aim_rating *= 0.9;
        }

        aim_rating * aim_length_bonus(relevant_objects).cbrt()
    }

    pub fn compute_speed_rating(&self, difficulty_value: f64, relevant_objects: f64) -> f64 {
        if self.mods.rx() {
            return 0.0;
        }

        let mut speed_rating = Self::calculate_difficulty_rating(difficulty_value);

        if self.mods.ap() {
            speed_rating *= 0.5;
        }

        speed_rating * speed_length_bonus(relevant_objects).cbrt()
    }

    /// The hybrid rating relative to the larger of the final aim and speed
    /// ratings, clamped to `[0, 0.8]`.
    pub fn compute_hybrid_rating(
        difficulty_value: f64,
        relevant_objects: f64,
        aim_rating: f64,
        speed_rating: f64,
    ) -> f64 {
        let hybrid_rating = Self::calculate_difficulty_rating(difficulty_value)
            * hybrid_length_bonus(relevant_objects).cbrt();

        let max_rating = aim_rating.max(speed_rating);

        if max_rating <= 0.0 {
            return 0.0;
        }

        2.0 * f64::min(
            Self::HYBRID_RATING_MAX,
            1.5 * (hybrid_rating / max_rating).powf(3.0),
        )
    }

    pub fn compute_stamina_rating(difficulty_value: f64) -> f64 {
        Self::calculate_difficulty_rating(difficulty_value)
    }

    pub fn compute_flashlight_rating(&self, difficulty_value: f64) -> f64 {
        if !self.mods.fl() {
            return 0.0;
        }

        let mut flashlight_rating = Self::calculate_difficulty_rating(difficulty_value);

        if self.mods.td() {
            flashlight_rating = flashlight_rating.powf(0.8);
        }

        if self.mods.rx() {
            flashlight_rating *= 0.7;
        } else if self.mods.ap() {
            flashlight_rating *= 0.4;
        }

        flashlight_rating
    }
}

fn aim_length_bonus(relevant_objects: f64) -> f64 {
    let mut bonus = 1.0 + (relevant_objects / 300.0).min(1.0);

    if relevant_objects > 300.0 {
        bonus += 2.0 * (relevant_objects / 300.0).log10();
    }

    bonus
}

fn speed_length_bonus(relevant_objects: f64) -> f64 {
    let mut bonus = 1.0 + (relevant_objects / 900.0).min(0.2);

    if relevant_objects > 300.0 {
        bonus += 0.5 * (relevant_objects / 300.0).log10();
    }

    bonus
}

fn hybrid_length_bonus(relevant_objects: f64) -> f64 {
    let mut bonus = 1.0 + (relevant_objects / 800.0).min(0.5);

    if relevant_objects > 400.0 {
        bonus += 0.5 * (relevant_objects / 400.0).log10();
    }

    bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bonuses_start_at_one() {
        assert!((aim_length_bonus(0.0) - 1.0).abs() < f64::EPSILON);
        assert!((speed_length_bonus(0.0) - 1.0).abs() < f64::EPSILON);
        assert!((hybrid_length_bonus(0.0) - 1.0).abs() < f64::EPSILON);

        assert!((aim_length_bonus(300.0) - 2.0).abs() < 1e-12);
        assert!((speed_length_bonus(900.0) - (1.2 + 0.5 * 3.0_f64.log10())).abs() < 1e-12);
        assert!(hybrid_length_bonus(1600.0) > 1.5);
    }

    #[test]
    fn hybrid_rating_is_clamped() {
        let rating = |dv, aim, speed| {
            OsuRatingCalculator::compute_hybrid_rating(dv, 0.0, aim, speed)
        };

        assert!(rating(100.0, 0.0, 0.0).abs() < f64::EPSILON);
        assert!((rating(1e6, 1.0, 1.0) - 0.8).abs() < 1e-12);
        assert!(rating(1.0, 10.0, 1.0) < 0.8);
        assert!(rating(0.0, 1.0, 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relax_and_autopilot() {
        let rx = GameMods::from(128);
        let ap = GameMods::from(8192);

        let rx_calc = OsuRatingCalculator::new(&rx);
        let ap_calc = OsuRatingCalculator::new(&ap);
        let nomod = GameMods::default();
        let calc = OsuRatingCalculator::new(&nomod);

        assert!(rx_calc.compute_speed_rating(100.0, 50.0).abs() < f64::EPSILON);
        assert!(ap_calc.compute_aim_rating(100.0, 50.0).abs() < f64::EPSILON);
        assert!(ap_calc.compute_aim_no_sliders_rating(100.0, 50.0) > 0.0);

        let speed = calc.compute_speed_rating(100.0, 50.0);
        assert!((ap_calc.compute_speed_rating(100.0, 50.0) - speed * 0.5).abs() < 1e-12);

        let aim = calc.compute_aim_rating(100.0, 50.0);
        assert!((rx_calc.compute_aim_rating(100.0, 50.0) - aim * 0.9).abs() < 1e-12);
    }

    #[test]
    fn flashlight_requires_mod() {
        let nomod = GameMods::default();
        let fl = GameMods::from(1024);

        assert!(OsuRatingCalculator::new(&nomod)
            .compute_flashlight_rating(100.0)
            .abs()
            < f64::EPSILON);
        assert!(OsuRatingCalculator::new(&fl).compute_flashlight_rating(100.0) > 0.0);
    }
}
