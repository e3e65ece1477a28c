#![allow(dead_code)]

use rosu_hybrid::{
    model::hit_object::{HitObject, Pos, Slider, SliderCheckpoint, SliderCheckpointKind},
    Beatmap,
};

pub const NM: u32 = 0;
pub const TD: u32 = 4;
pub const HD: u32 = 8;
pub const HR: u32 = 16;
pub const DT: u32 = 64;
pub const RX: u32 = 128;
pub const HT: u32 = 256;
pub const FL: u32 = 1024;
pub const AP: u32 = 8192;

/// Circles bouncing horizontally between two points `spacing` apart.
pub fn stream(count: usize, interval: f64, spacing: f32) -> Beatmap {
    let hit_objects = (0..count)
        .map(|i| {
            let x = if i % 2 == 0 { 200.0 } else { 200.0 + spacing };

            HitObject::circle(Pos::new(x, 192.0), 1000.0 + i as f64 * interval)
        })
        .collect();

    Beatmap::new(hit_objects).with_settings(9.0, 4.0, 5.0, 8.0)
}

/// Circles jumping between the corners of a triangle.
pub fn jumps(count: usize, interval: f64) -> Beatmap {
    const CORNERS: [(f32, f32); 3] = [(60.0, 60.0), (450.0, 90.0), (250.0, 330.0)];

    let hit_objects = (0..count)
        .map(|i| {
            let (x, y) = CORNERS[i % CORNERS.len()];

            HitObject::circle(Pos::new(x, y), 1000.0 + i as f64 * interval)
        })
        .collect();

    Beatmap::new(hit_objects).with_settings(9.0, 4.0, 5.0, 8.0)
}

/// Circles at the same position.
pub fn stack(count: usize, interval: f64) -> Beatmap {
    let hit_objects = (0..count)
        .map(|i| HitObject::circle(Pos::new(256.0, 192.0), 1000.0 + i as f64 * interval))
        .collect();

    Beatmap::new(hit_objects)
}

/// A straight slider from `pos` to `tail_pos` with a single tick halfway.
pub fn slider(pos: Pos, start_time: f64, end_time: f64, tail_pos: Pos) -> HitObject {
    let mid = Pos::new((pos.x + tail_pos.x) / 2.0, (pos.y + tail_pos.y) / 2.0);
    let mid_time = (start_time + end_time) / 2.0;

    let nested = vec![
        SliderCheckpoint::new(mid, mid_time, SliderCheckpointKind::Tick),
        SliderCheckpoint::new(tail_pos, end_time - 36.0, SliderCheckpointKind::Tail),
    ];

    HitObject::slider(pos, start_time, Slider::new(end_time, 0, nested))
}

/// Alternates between circles and sliders.
pub fn sliders(count: usize, interval: f64) -> Beatmap {
    let hit_objects = (0..count)
        .map(|i| {
            let start_time = 1000.0 + i as f64 * interval;

            if i % 2 == 0 {
                HitObject::circle(Pos::new(80.0, 300.0), start_time)
            } else {
                slider(
                    Pos::new(200.0, 100.0),
                    start_time,
                    start_time + interval * 0.6,
                    Pos::new(420.0, 140.0),
                )
            }
        })
        .collect();

    Beatmap::new(hit_objects).with_settings(9.0, 4.0, 5.0, 8.0)
}
