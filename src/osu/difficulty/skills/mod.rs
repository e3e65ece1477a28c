use crate::{
    any::difficulty::skills::StrainSkill,
    model::{beatmap::BeatmapAttributes, mods::GameMods},
    osu::object::OsuObject,
};

use self::{
    aim::Aim, flashlight::Flashlight, hybrid::Hybrid, speed::Speed, stamina::Stamina,
};

use super::{
    object::OsuDifficultyObject, scaling_factor::ScalingFactor, HD_FADE_IN_DURATION_MULTIPLIER,
};

pub mod aim;
pub mod flashlight;
pub mod hybrid;
pub mod speed;
pub mod stamina;
pub mod strain;

/// All strain accumulators of a calculation, fed with the same objects.
pub struct OsuSkills {
    pub aim: Aim,
    pub aim_no_sliders: Aim,
    pub speed: Speed,
    pub stamina: Stamina,
    pub hybrid: Hybrid,
    pub flashlight: Flashlight,
}

impl OsuSkills {
    pub fn new(
        mods: &GameMods,
        scaling_factor: &ScalingFactor,
        map_attrs: &BeatmapAttributes,
        time_preempt: f64,
    ) -> Self {
        let hit_window = 2.0 * map_attrs.hit_windows.od_great;

        // Below the minimum preempt the fade-in shrinks along with it so
        // objects still fully fade in.
        let time_fade_in = if mods.hd() {
            time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / OsuObject::PREEMPT_MIN).min(1.0)
        };

        let autopilot = mods.ap();

        Self {
            aim: Aim::new(true),
            aim_no_sliders: Aim::new(false),
            speed: Speed::new(hit_window, autopilot),
            stamina: Stamina::new(hit_window),
            hybrid: Hybrid::new(true, hit_window, autopilot),
            flashlight: Flashlight::new(mods, scaling_factor.radius, time_preempt, time_fade_in),
        }
    }

    pub fn process(&mut self, curr: &OsuDifficultyObject<'_>, objects: &[OsuDifficultyObject<'_>]) {
        self.aim.process(curr, objects);
        self.aim_no_sliders.process(curr, objects);
        self.speed.process(curr, objects);
        self.stamina.process(curr, objects);
        self.hybrid.process(curr, objects);
        self.flashlight.process(curr, objects);
    }
}
