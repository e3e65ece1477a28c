use rosu_map::util::Pos;

pub use self::{attributes::OsuDifficultyAttributes, strains::OsuStrains};

mod attributes;
pub(crate) mod difficulty;
pub(crate) mod object;
pub(crate) mod strains;

pub use self::{
    difficulty::{
        evaluators::{
            AimEvaluator, FlashlightEvaluator, HybridEvaluator, RhythmEvaluator, SpeedEvaluator,
            StaminaEvaluator,
        },
        object::OsuDifficultyObject,
        scaling_factor::ScalingFactor,
        skills::strain::{reduce_strain_peaks, weighted_sum},
    },
    object::OsuObject,
};

const PLAYFIELD_BASE_SIZE: Pos = Pos::new(512.0, 384.0);
