pub use self::{
    aim::AimEvaluator, flashlight::FlashlightEvaluator, hybrid::HybridEvaluator,
    rhythm::RhythmEvaluator, speed::SpeedEvaluator, stamina::StaminaEvaluator,
};

mod aim;
mod flashlight;
mod hybrid;
mod rhythm;
mod speed;
mod stamina;
