use std::cmp::Ordering;

pub use rosu_map::util::Pos;

/// All hitobject related data required for difficulty calculation.
///
/// Sliders don't carry their curve. Instead they carry their already
/// evaluated checkpoints, see [`Slider`].
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Create a new circle.
    pub const fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Circle,
        }
    }

    /// Create a new slider.
    pub const fn slider(pos: Pos, start_time: f64, slider: Slider) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Slider(slider),
        }
    }

    /// Create a new spinner.
    pub const fn spinner(pos: Pos, start_time: f64, duration: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: HitObjectKind::Spinner(Spinner { duration }),
        }
    }

    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// The end time of the object.
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(slider) => slider.end_time,
            HitObjectKind::Spinner(Spinner { duration }) => self.start_time + *duration,
        }
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data for a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A slider.
///
/// The path itself is not needed for difficulty calculation, only the
/// positions and times at which the cursor must be within the follow circle.
/// These are the ticks, the repeat points, and the tail.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    pub end_time: f64,
    pub repeats: usize,
    /// Checkpoints with absolute positions, ordered by time.
    pub nested: Vec<SliderCheckpoint>,
}

impl Slider {
    /// Create a new [`Slider`].
    ///
    /// Checkpoints will be sorted by time.
    pub fn new(end_time: f64, repeats: usize, mut nested: Vec<SliderCheckpoint>) -> Self {
        nested.sort_by(|a, b| a.time.total_cmp(&b.time));

        Self {
            end_time,
            repeats,
            nested,
        }
    }

    /// The amount of spans of the slider.
    pub const fn span_count(&self) -> usize {
        self.repeats + 1
    }

    /// The tail checkpoint, if any.
    pub fn tail(&self) -> Option<&SliderCheckpoint> {
        self.nested
            .iter()
            // The tail is not necessarily the last checkpoint, e.g. on very
            // short and fast buzz sliders
            .rfind(|nested| matches!(nested.kind, SliderCheckpointKind::Tail))
    }
}

/// A point of a [`Slider`] that needs to be tracked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderCheckpoint {
    pub pos: Pos,
    pub time: f64,
    pub kind: SliderCheckpointKind,
}

impl SliderCheckpoint {
    pub const fn new(pos: Pos, time: f64, kind: SliderCheckpointKind) -> Self {
        Self { pos, time, kind }
    }

    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, SliderCheckpointKind::Repeat)
    }

    pub const fn is_tick(&self) -> bool {
        matches!(self.kind, SliderCheckpointKind::Tick)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliderCheckpointKind {
    Tick,
    Repeat,
    Tail,
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spinner {
    pub duration: f64,
}
