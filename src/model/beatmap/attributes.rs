use crate::{any::difficulty::ModsDependent, model::mods::GameMods, Difficulty};

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in milliseconds.
    pub od_great: f64,
    /// Hit window for overall difficulty i.e. time to hit a 100 ("Ok") in milliseconds.
    pub od_ok: f64,
    /// Hit window for overall difficulty i.e. time to hit a 50 ("Meh") in milliseconds.
    pub od_meh: f64,
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    ar: ModsDependent,
    od: ModsDependent,
    cs: ModsDependent,
    hp: ModsDependent,
    mods: GameMods,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_MID: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    const GREAT_MIN: f64 = 80.0;
    const GREAT_MID: f64 = 50.0;
    const GREAT_MAX: f64 = 20.0;

    const OK_MIN: f64 = 140.0;
    const OK_MID: f64 = 100.0;
    const OK_MAX: f64 = 60.0;

    const MEH_MIN: f64 = 200.0;
    const MEH_MID: f64 = 150.0;
    const MEH_MAX: f64 = 100.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// Attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            ar: ModsDependent::new(5.0),
            od: ModsDependent::new(5.0),
            cs: ModsDependent::new(5.0),
            hp: ModsDependent::new(5.0),
            mods: GameMods::DEFAULT,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes.
    pub const fn map(mut self, map: &Beatmap) -> Self {
        self.ar = ModsDependent::new(map.ar);
        self.od = ModsDependent::new(map.od);
        self.cs = ModsDependent::new(map.cs);
        self.hp = ModsDependent::new(map.hp);

        self
    }

    /// Specify the approach rate.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn ar(mut self, ar: f32, with_mods: bool) -> Self {
        self.ar = ModsDependent {
            value: ar,
            with_mods,
        };

        self
    }

    /// Specify the overall difficulty.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn od(mut self, od: f32, with_mods: bool) -> Self {
        self.od = ModsDependent {
            value: od,
            with_mods,
        };

        self
    }

    /// Specify the circle size.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn cs(mut self, cs: f32, with_mods: bool) -> Self {
        self.cs = ModsDependent {
            value: cs,
            with_mods,
        };

        self
    }

    /// Specify the drain rate.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn hp(mut self, hp: f32, with_mods: bool) -> Self {
        self.hp = ModsDependent {
            value: hp,
            with_mods,
        };

        self
    }

    /// Specify the mods.
    pub fn mods(self, mods: impl Into<GameMods>) -> Self {
        Self {
            mods: mods.into(),
            ..self
        }
    }

    /// Specify a custom clock rate.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Specify all settings through [`Difficulty`].
    pub fn difficulty(self, difficulty: &Difficulty) -> Self {
        Self {
            ar: difficulty.get_ar().unwrap_or(self.ar),
            od: difficulty.get_od().unwrap_or(self.od),
            cs: difficulty.get_cs().unwrap_or(self.cs),
            hp: difficulty.get_hp().unwrap_or(self.hp),
            mods: difficulty.get_mods().clone(),
            clock_rate: Some(difficulty.get_clock_rate()),
        }
    }

    fn mod_mult(&self, value: f32) -> f32 {
        if self.mods.hr() {
            (value * 1.4).min(10.0)
        } else if self.mods.ez() {
            value * 0.5
        } else {
            value
        }
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let clock_rate = self.clock_rate.unwrap_or_else(|| self.mods.clock_rate());
        let ar_clock_rate = if self.ar.with_mods { 1.0 } else { clock_rate };
        let od_clock_rate = if self.od.with_mods { 1.0 } else { clock_rate };

        let raw_ar = if self.ar.with_mods {
            self.ar.value
        } else {
            self.mod_mult(self.ar.value)
        };

        let preempt = difficulty_range(
            f64::from(raw_ar),
            Self::PREEMPT_MIN,
            Self::PREEMPT_MID,
            Self::PREEMPT_MAX,
        ) / ar_clock_rate;

        let raw_od = if self.od.with_mods {
            self.od.value
        } else {
            self.mod_mult(self.od.value)
        };

        let od = f64::from(raw_od);

        let great = difficulty_range(od, Self::GREAT_MIN, Self::GREAT_MID, Self::GREAT_MAX);
        let ok = difficulty_range(od, Self::OK_MIN, Self::OK_MID, Self::OK_MAX);
        let meh = difficulty_range(od, Self::MEH_MIN, Self::MEH_MID, Self::MEH_MAX);

        HitWindows {
            ar: preempt,
            od_great: great / od_clock_rate,
            od_ok: ok / od_clock_rate,
            od_meh: meh / od_clock_rate,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let clock_rate = self.clock_rate.unwrap_or_else(|| self.mods.clock_rate());

        // HP
        let mut hp = self.hp.value;

        if !self.hp.with_mods {
            hp *= self.mods.od_ar_hp_multiplier() as f32;
        }

        hp = hp.min(10.0);

        // CS
        let mut cs = self.cs.value;

        if !self.cs.with_mods {
            if self.mods.hr() {
                cs = (cs * 1.3).min(10.0);
            } else if self.mods.ez() {
                cs *= 0.5;
            }
        }

        let hit_windows = self.hit_windows();

        // AR
        let ar = if hit_windows.ar > Self::PREEMPT_MID {
            (Self::PREEMPT_MIN - hit_windows.ar) / 120.0
        } else {
            (Self::PREEMPT_MID - hit_windows.ar) / 150.0 + 5.0
        };

        // OD
        let od = (Self::GREAT_MIN - hit_windows.od_great) / 6.0;

        BeatmapAttributes {
            ar,
            od,
            cs: f64::from(cs),
            hp: f64::from(hp),
            clock_rate,
            hit_windows,
        }
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear interpolation of a difficulty setting between three values at
/// `0.0`, `5.0`, and `10.0`.
pub(crate) fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn consider_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5, false)
            .mods(64)
            .build();

        let expected = 10.0;

        assert!(attrs.ar.eq(expected), "{} != {expected}", attrs.ar);
    }

    #[test]
    fn skip_mods() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(8.5, true)
            .mods(64)
            .build();

        let expected = 8.5;

        assert!(attrs.ar.eq(expected), "{} != {expected}", attrs.ar);
    }

    #[test]
    fn hit_windows_od5() {
        let HitWindows {
            ar,
            od_great,
            od_ok,
            od_meh,
        } = BeatmapAttributesBuilder::new().hit_windows();

        assert!(ar.eq(1200.0), "{ar}");
        assert!(od_great.eq(50.0), "{od_great}");
        assert!(od_ok.eq(100.0), "{od_ok}");
        assert!(od_meh.eq(150.0), "{od_meh}");
    }

    #[test]
    fn hard_rock_caps() {
        let attrs = BeatmapAttributesBuilder::new()
            .ar(9.0, false)
            .od(9.0, false)
            .cs(4.0, false)
            .mods(16)
            .build();

        assert!(attrs.ar.eq(10.0), "{}", attrs.ar);
        assert!(attrs.od.eq(10.0), "{}", attrs.od);
        assert!((attrs.cs - 5.2).abs() < 1e-5, "{}", attrs.cs);
    }

    #[test]
    fn range_breakpoints() {
        assert!(difficulty_range(0.0, 80.0, 50.0, 20.0).eq(80.0));
        assert!(difficulty_range(5.0, 80.0, 50.0, 20.0).eq(50.0));
        assert!(difficulty_range(10.0, 80.0, 50.0, 20.0).eq(20.0));
    }
}
