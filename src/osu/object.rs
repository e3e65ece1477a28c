use rosu_map::util::Pos;

use crate::model::hit_object::{
    HitObject, HitObjectKind, SliderCheckpoint, SliderCheckpointKind, Spinner,
};

use super::PLAYFIELD_BASE_SIZE;

/// A [`HitObject`] prepared for difficulty calculation.
pub struct OsuObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: OsuObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;
    pub const PREEMPT_MIN: f64 = 450.0;

    pub fn new(h: &HitObject) -> Self {
        let kind = match h.kind {
            HitObjectKind::Circle => OsuObjectKind::Circle,
            HitObjectKind::Slider(ref slider) => OsuObjectKind::Slider(OsuSlider {
                end_time: slider.end_time,
                repeats: slider.repeats,
                nested_objects: slider.nested.clone(),
            }),
            HitObjectKind::Spinner(spinner) => OsuObjectKind::Spinner(spinner),
        };

        Self {
            pos: h.pos,
            start_time: h.start_time,
            kind,
        }
    }

    pub fn reflect_vertically(&mut self) {
        fn reflect_y(y: &mut f32) {
            *y = PLAYFIELD_BASE_SIZE.y - *y;
        }

        reflect_y(&mut self.pos.y);

        if let OsuObjectKind::Slider(ref mut slider) = self.kind {
            for nested in slider.nested_objects.iter_mut() {
                reflect_y(&mut nested.pos.y);
            }
        }
    }

    pub fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner(_) => self.pos,
            OsuObjectKind::Slider(ref slider) => slider.tail().map_or(self.pos, |tail| tail.pos),
        }
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner(_))
    }
}

pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner(Spinner),
}

pub struct OsuSlider {
    pub end_time: f64,
    pub repeats: usize,
    pub nested_objects: Vec<SliderCheckpoint>,
}

impl OsuSlider {
    pub const fn repeat_count(&self) -> usize {
        self.repeats
    }

    pub fn tail(&self) -> Option<&SliderCheckpoint> {
        self.nested_objects
            .iter()
            // The tail is not necessarily the last nested object, e.g. on very
            // short and fast buzz sliders
            .rfind(|nested| matches!(nested.kind, SliderCheckpointKind::Tail))
    }

    /// Position of the slider ball at the given time.
    ///
    /// The path is approximated by straight segments between the head and
    /// the checkpoints.
    pub fn position_at(&self, head: Pos, start_time: f64, time: f64) -> Pos {
        let mut prev_pos = head;
        let mut prev_time = start_time;

        for nested in self.nested_objects.iter() {
            if time <= nested.time {
                let duration = nested.time - prev_time;

                if duration <= 0.0 {
                    return nested.pos;
                }

                let progress = ((time - prev_time) / duration).clamp(0.0, 1.0);

                return prev_pos + (nested.pos - prev_pos) * progress as f32;
            }

            prev_pos = nested.pos;
            prev_time = nested.time;
        }

        prev_pos
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::Slider;

    use super::*;

    fn slider() -> OsuObject {
        let nested = vec![
            SliderCheckpoint::new(Pos::new(200.0, 100.0), 1100.0, SliderCheckpointKind::Tick),
            SliderCheckpoint::new(Pos::new(300.0, 100.0), 1200.0, SliderCheckpointKind::Repeat),
            SliderCheckpoint::new(Pos::new(100.0, 100.0), 1400.0, SliderCheckpointKind::Tail),
        ];

        let h = HitObject::slider(
            Pos::new(100.0, 100.0),
            1000.0,
            Slider::new(1400.0, 1, nested),
        );

        OsuObject::new(&h)
    }

    #[test]
    fn position_along_checkpoints() {
        let h = slider();

        let OsuObjectKind::Slider(ref slider) = h.kind else {
            panic!("expected slider");
        };

        let pos = slider.position_at(h.pos, h.start_time, 1050.0);
        assert!((pos.x - 150.0).abs() < 1e-4);

        let pos = slider.position_at(h.pos, h.start_time, 1300.0);
        assert!((pos.x - 200.0).abs() < 1e-4);

        let pos = slider.position_at(h.pos, h.start_time, 2000.0);
        assert!((pos.x - 100.0).abs() < 1e-4);

        let pos = slider.position_at(h.pos, h.start_time, 0.0);
        assert!((pos.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn reflection_includes_checkpoints() {
        let mut h = slider();
        h.reflect_vertically();

        assert!((h.pos.y - 284.0).abs() < f32::EPSILON);
        assert!((h.end_pos().y - 284.0).abs() < f32::EPSILON);
    }
}
