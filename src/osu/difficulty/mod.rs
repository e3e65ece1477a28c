use std::cmp;

use crate::{
    any::difficulty::{skills::StrainSkill, Difficulty},
    model::{beatmap::BeatmapAttributes, hit_object::HitObjectKind, mods::GameMods},
    osu::object::OsuObject,
    Beatmap,
};

use self::{
    object::OsuDifficultyObject,
    rating::OsuRatingCalculator,
    scaling_factor::ScalingFactor,
    skills::{
        aim::Aim,
        flashlight::Flashlight,
        speed::Speed,
        strain::{count_top_weighted_sliders, OsuStrainSkill},
        OsuSkills,
    },
};

use super::attributes::OsuDifficultyAttributes;

pub mod evaluators;
pub(crate) mod object;
pub mod rating;
pub mod scaling_factor;
pub mod skills;

const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.15;
const STAR_RATING_MULTIPLIER: f64 = 0.026;

/// Base exponent of the power mean over the skill performances.
const POWER_MEAN_BASE: f64 = 1.9;

const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

pub fn difficulty(difficulty: &Difficulty, map: &Beatmap) -> OsuDifficultyAttributes {
    let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(difficulty, map);

    // A single object has no transition to evaluate
    if attrs.n_objects() < 2 {
        return attrs;
    }

    DifficultyValues::eval(&mut attrs, difficulty.get_mods(), &skills);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        stars = attrs.stars,
        aim = attrs.aim,
        speed = attrs.speed,
        hybrid = attrs.hybrid,
        "calculated difficulty"
    );

    attrs
}

pub struct OsuDifficultySetup {
    scaling_factor: ScalingFactor,
    map_attrs: BeatmapAttributes,
    attrs: OsuDifficultyAttributes,
    time_preempt: f64,
}

impl OsuDifficultySetup {
    pub fn new(difficulty: &Difficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();
        let map_attrs = map.attributes().difficulty(difficulty).build();
        let scaling_factor = ScalingFactor::new(map_attrs.cs);

        let attrs = OsuDifficultyAttributes {
            ar: map_attrs.ar,
            od: map_attrs.od,
            hp: map_attrs.hp,
            great_hit_window: map_attrs.hit_windows.od_great,
            ok_hit_window: map_attrs.hit_windows.od_ok,
            meh_hit_window: map_attrs.hit_windows.od_meh,
            ..Default::default()
        };

        // Objects keep their unscaled times so the preempt must be unscaled too
        let time_preempt = map_attrs.hit_windows.ar * clock_rate;

        Self {
            scaling_factor,
            map_attrs,
            attrs,
            time_preempt,
        }
    }
}

pub struct DifficultyValues {
    pub skills: OsuSkills,
    pub attrs: OsuDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &Difficulty, map: &Beatmap) -> Self {
        let mods = difficulty.get_mods();
        let take = difficulty.get_passed_objects();

        let OsuDifficultySetup {
            scaling_factor,
            map_attrs,
            mut attrs,
            time_preempt,
        } = OsuDifficultySetup::new(difficulty, map);

        let osu_objects = convert_objects(map, mods.hr(), take, &mut attrs);

        let diff_objects = Self::create_difficulty_objects(
            difficulty.get_clock_rate(),
            &scaling_factor,
            &osu_objects,
        );

        let mut skills = OsuSkills::new(mods, &scaling_factor, &map_attrs, time_preempt);

        // The first object has no predecessor and never produces strain
        for hit_object in diff_objects.iter().skip(1) {
            skills.process(hit_object, &diff_objects);
        }

        Self { skills, attrs }
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut OsuDifficultyAttributes, mods: &GameMods, skills: &OsuSkills) {
        let OsuSkills {
            aim,
            aim_no_sliders,
            speed,
            stamina,
            hybrid,
            flashlight,
        } = skills;

        let aim_difficulty_value = aim.cloned_difficulty_value();
        let aim_no_sliders_difficulty_value = aim_no_sliders.cloned_difficulty_value();
        let speed_difficulty_value = speed.cloned_difficulty_value();
        let stamina_difficulty_value = stamina.cloned_difficulty_value();
        let hybrid_difficulty_value = hybrid.cloned_difficulty_value();

        let aim_difficult_strain_count = aim.count_top_weighted_strains(aim_difficulty_value);
        let speed_difficult_strain_count = speed.count_top_weighted_strains(speed_difficulty_value);
        let hybrid_difficult_strain_count =
            hybrid.count_top_weighted_strains(hybrid_difficulty_value);

        let aim_no_sliders_top_weighted_slider_count = count_top_weighted_sliders(
            aim_no_sliders.slider_strains(),
            aim_no_sliders_difficulty_value,
        );
        let aim_no_sliders_difficult_strain_count =
            aim_no_sliders.count_top_weighted_strains(aim_no_sliders_difficulty_value);

        let aim_top_weighted_slider_factor = aim_no_sliders_top_weighted_slider_count
            / (aim_no_sliders_difficult_strain_count - aim_no_sliders_top_weighted_slider_count)
                .max(1.0);

        let speed_top_weighted_slider_count =
            count_top_weighted_sliders(speed.slider_strains(), speed_difficulty_value);

        let speed_top_weighted_slider_factor = speed_top_weighted_slider_count
            / (speed_difficult_strain_count - speed_top_weighted_slider_count).max(1.0);

        let rating_calculator = OsuRatingCalculator::new(mods);

        let aim_rating = rating_calculator.compute_aim_rating(
            aim_difficulty_value,
            aim.count_relevant_objects(aim_difficulty_value),
        );
        let aim_no_sliders_rating = rating_calculator.compute_aim_no_sliders_rating(
            aim_no_sliders_difficulty_value,
            aim_no_sliders.count_relevant_objects(aim_no_sliders_difficulty_value),
        );
        let speed_rating = rating_calculator.compute_speed_rating(
            speed_difficulty_value,
            speed.count_relevant_objects(speed_difficulty_value),
        );
        let hybrid_rating = OsuRatingCalculator::compute_hybrid_rating(
            hybrid_difficulty_value,
            hybrid.count_relevant_objects(hybrid_difficulty_value),
            aim_rating,
            speed_rating,
        );
        let stamina_rating = OsuRatingCalculator::compute_stamina_rating(stamina_difficulty_value);

        let flashlight_rating = if mods.fl() {
            rating_calculator.compute_flashlight_rating(flashlight.cloned_difficulty_value())
        } else {
            0.0
        };

        let slider_factor = if aim_rating > 0.0 {
            aim_no_sliders_rating / aim_rating
        } else {
            1.0
        };

        let base_performance = combine_performances(
            Aim::difficulty_to_performance(aim_rating),
            Speed::difficulty_to_performance(speed_rating),
            Flashlight::difficulty_to_performance(flashlight_rating),
            hybrid_rating,
        );

        attrs.aim = aim_rating;
        attrs.aim_no_sliders = aim_no_sliders_rating;
        attrs.speed = speed_rating;
        attrs.hybrid = hybrid_rating;
        attrs.stamina = stamina_rating;
        attrs.flashlight = flashlight_rating;
        attrs.slider_factor = slider_factor;
        attrs.speed_note_count = speed.relevant_note_count();
        attrs.aim_difficult_slider_count = aim.get_difficult_sliders();
        attrs.aim_difficult_strain_count = aim_difficult_strain_count;
        attrs.speed_difficult_strain_count = speed_difficult_strain_count;
        attrs.hybrid_difficult_strain_count = hybrid_difficult_strain_count;
        attrs.aim_top_weighted_slider_factor = aim_top_weighted_slider_factor;
        attrs.speed_top_weighted_slider_factor = speed_top_weighted_slider_factor;
        attrs.stars = calculate_star_rating(base_performance);
    }

    /// One difficulty object per osu object; the first one has no
    /// predecessor.
    pub fn create_difficulty_objects<'a>(
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
        osu_objects: &'a [OsuObject],
    ) -> Vec<OsuDifficultyObject<'a>> {
        let mut diff_objects: Vec<OsuDifficultyObject<'a>> = Vec::with_capacity(osu_objects.len());

        for (idx, h) in osu_objects.iter().enumerate() {
            let last = idx.checked_sub(1).and_then(|i| osu_objects.get(i));
            let last_diff = idx.checked_sub(1).and_then(|i| diff_objects.get(i));
            let last_last_diff = idx.checked_sub(2).and_then(|i| diff_objects.get(i));

            let diff_object = OsuDifficultyObject::new(
                h,
                last,
                last_diff,
                last_last_diff,
                clock_rate,
                idx,
                scaling_factor,
            );

            diff_objects.push(diff_object);
        }

        diff_objects
    }
}

/// Converts the first `take` hit objects and fills in the object counts.
fn convert_objects(
    map: &Beatmap,
    hard_rock: bool,
    take: usize,
    attrs: &mut OsuDifficultyAttributes,
) -> Vec<OsuObject> {
    let take = cmp::min(map.hit_objects.len(), take);
    let mut osu_objects = Vec::with_capacity(take);

    for h in map.hit_objects.iter().take(take) {
        match h.kind {
            HitObjectKind::Circle => {
                attrs.n_circles += 1;
                attrs.max_combo += 1;
            }
            HitObjectKind::Slider(ref slider) => {
                attrs.n_sliders += 1;
                attrs.max_combo += 1 + slider.nested.len() as u32;
            }
            HitObjectKind::Spinner(_) => {
                attrs.n_spinners += 1;
                attrs.max_combo += 1;
            }
        }

        let mut osu_object = OsuObject::new(h);

        if hard_rock {
            osu_object.reflect_vertically();
        }

        osu_objects.push(osu_object);
    }

    osu_objects
}

/// Power mean of the skill performances whose exponent shrinks as the hybrid
/// rating grows.
fn combine_performances(aim: f64, speed: f64, flashlight: f64, hybrid_rating: f64) -> f64 {
    let p = POWER_MEAN_BASE - hybrid_rating;

    (aim.powf(p) + speed.powf(p) + flashlight.powf(p)).powf(1.0 / p)
}

fn calculate_star_rating(base_performance: f64) -> f64 {
    if base_performance <= 0.00001 {
        return 0.0;
    }

    PERFORMANCE_BASE_MULTIPLIER.cbrt()
        * STAR_RATING_MULTIPLIER
        * ((100_000.0 / 2.0_f64.powf(1.0 / 1.1) * base_performance).cbrt() + 4.0)
}
