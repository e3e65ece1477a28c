pub use self::{
    attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows},
    suspicious::TooSuspicious,
};

use super::hit_object::HitObject;

mod attributes;
mod suspicious;

/// All beatmap data that is relevant for difficulty calculation.
///
/// Hitobjects are expected to be sorted by their start time. Use
/// [`Beatmap::new`] to ensure that they are.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Create a new [`Beatmap`] with the given hitobjects and all difficulty
    /// settings set to `5.0`.
    ///
    /// The hitobjects will be sorted by start time. Objects that share the
    /// same start time keep their relative order.
    pub fn new(mut hit_objects: Vec<HitObject>) -> Self {
        hit_objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        Self {
            hit_objects,
            ..Self::default()
        }
    }

    /// Specify the approach rate, circle size, drain rate, and overall
    /// difficulty in that order.
    #[must_use]
    pub const fn with_settings(mut self, ar: f32, cs: f32, hp: f32, od: f32) -> Self {
        self.ar = ar;
        self.cs = cs;
        self.hp = hp;
        self.od = od;

        self
    }

    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Check whether hitobjects appear too suspicious for further calculation.
    ///
    /// Sometimes a [`Beatmap`] isn't created for gameplay but rather to test
    /// the limits of osu! itself. Difficulty calculation should likely be
    /// avoided on these maps due to potential performance issues or
    /// meaningless results.
    pub fn check_suspicion(&self) -> Result<(), TooSuspicious> {
        match TooSuspicious::new(self) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            hit_objects: Vec::default(),
        }
    }
}
