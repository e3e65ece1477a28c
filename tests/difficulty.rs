use proptest::prelude::*;
use rosu_hybrid::{
    model::{
        beatmap::TooSuspicious,
        hit_object::{HitObject, Pos},
    },
    osu::{AimEvaluator, OsuDifficultyObject, OsuObject, ScalingFactor, SpeedEvaluator},
    Beatmap, Difficulty, OsuDifficultyAttributes,
};

use self::common::*;

mod common;

fn assert_non_negative(attrs: &OsuDifficultyAttributes) {
    let values = [
        ("stars", attrs.stars),
        ("aim", attrs.aim),
        ("aim_no_sliders", attrs.aim_no_sliders),
        ("speed", attrs.speed),
        ("hybrid", attrs.hybrid),
        ("stamina", attrs.stamina),
        ("flashlight", attrs.flashlight),
        ("speed_note_count", attrs.speed_note_count),
    ];

    for (name, value) in values {
        assert!(
            value.is_finite() && value >= 0.0,
            "{name} should be finite and non-negative: {value}"
        );
    }
}

#[test]
fn empty_map() {
    let attrs = Difficulty::new().calculate(&Beatmap::default());

    assert!(attrs.stars.abs() < f64::EPSILON);
    assert!(attrs.aim.abs() < f64::EPSILON);
    assert!(attrs.speed.abs() < f64::EPSILON);
    assert!(attrs.hybrid.abs() < f64::EPSILON);
    assert!(attrs.stamina.abs() < f64::EPSILON);
    assert_eq!(attrs.n_objects(), 0);
    assert_eq!(attrs.max_combo(), 0);
}

#[test]
fn single_object() {
    let map = Beatmap::new(vec![HitObject::circle(Pos::new(100.0, 100.0), 500.0)]);
    let attrs = Difficulty::new().calculate(&map);

    assert!(attrs.stars.abs() < f64::EPSILON);
    assert_eq!(attrs.n_circles, 1);
    assert_eq!(attrs.max_combo(), 1);
}

#[test]
fn deterministic() {
    let map = sliders(80, 180.0);
    let difficulty = Difficulty::new().mods(HD + DT);

    let first = difficulty.calculate(&map);
    let second = difficulty.calculate(&map);

    assert_eq!(format!("{first:?}"), format!("{second:?}"));
    assert_non_negative(&first);
}

#[test]
fn counts_and_combo() {
    let attrs = Difficulty::new().calculate(&sliders(10, 300.0));

    assert_eq!(attrs.n_circles, 5);
    assert_eq!(attrs.n_sliders, 5);
    assert_eq!(attrs.n_spinners, 0);
    // Head, tick, and tail per slider
    assert_eq!(attrs.max_combo(), 5 + 5 * 3);
}

#[test]
fn stacked_circles_have_no_aim() {
    let attrs = Difficulty::new().calculate(&stack(6, 500.0));

    assert!(attrs.aim.abs() < f64::EPSILON);
    assert!(attrs.aim_no_sliders.abs() < f64::EPSILON);
    assert!(attrs.speed > 0.0);
    assert_non_negative(&attrs);
}

#[test]
fn spinners_only() {
    let map = Beatmap::new(
        (0..4)
            .map(|i| {
                let start_time = 1000.0 + f64::from(i) * 2000.0;

                HitObject::spinner(Pos::new(256.0, 192.0), start_time, 1500.0)
            })
            .collect(),
    );

    let attrs = Difficulty::new().calculate(&map);

    assert!(attrs.aim.abs() < f64::EPSILON);
    assert!(attrs.speed.abs() < f64::EPSILON);
    assert!(attrs.hybrid.abs() < f64::EPSILON);
    assert!(attrs.stars.abs() < f64::EPSILON);
    assert_eq!(attrs.n_spinners, 4);
}

#[test]
fn wider_jumps_need_more_aim() {
    let narrow = Difficulty::new().calculate(&stream(60, 200.0, 100.0));
    let wide = Difficulty::new().calculate(&stream(60, 200.0, 300.0));

    assert!(wide.aim > narrow.aim);
}

#[test]
fn faster_streams_need_more_speed() {
    let slow = Difficulty::new().calculate(&stream(120, 150.0, 60.0));
    let fast = Difficulty::new().calculate(&stream(120, 80.0, 60.0));

    assert!(fast.speed > slow.speed);
    assert!(fast.stamina > slow.stamina);
}

#[test]
fn clock_rate_speeds_up() {
    let map = stream(120, 150.0, 60.0);

    let nomod = Difficulty::new().calculate(&map);
    let dt = Difficulty::new().mods(DT).calculate(&map);
    let ht = Difficulty::new().mods(HT).calculate(&map);

    assert!(dt.speed > nomod.speed);
    assert!(ht.speed < nomod.speed);
    assert!(dt.great_hit_window < nomod.great_hit_window);
}

#[test]
fn relax_and_autopilot() {
    let map = jumps(60, 250.0);

    let rx = Difficulty::new().mods(RX).calculate(&map);
    let ap = Difficulty::new().mods(AP).calculate(&map);

    assert!(rx.speed.abs() < f64::EPSILON);
    assert!(rx.aim > 0.0);
    assert!(ap.aim.abs() < f64::EPSILON);
    assert!(ap.speed > 0.0);
    assert!((ap.slider_factor - 1.0).abs() < f64::EPSILON);
}

#[test]
fn flashlight_needs_mod() {
    let map = jumps(60, 250.0);

    let nomod = Difficulty::new().calculate(&map);
    let fl = Difficulty::new().mods(FL).calculate(&map);

    assert!(nomod.flashlight.abs() < f64::EPSILON);
    assert!(fl.flashlight > 0.0);
    assert!(fl.stars > nomod.stars);
}

#[test]
fn hybrid_is_clamped() {
    let mut hit_objects = jumps(40, 300.0).hit_objects;
    let offset = hit_objects.last().map_or(0.0, |h| h.start_time) + 300.0;

    hit_objects.extend(
        stream(80, 90.0, 40.0)
            .hit_objects
            .into_iter()
            .map(|h| HitObject::circle(h.pos, h.start_time + offset)),
    );

    let attrs = Difficulty::new().calculate(&Beatmap::new(hit_objects));

    assert!(attrs.hybrid >= 0.0);
    assert!(attrs.hybrid <= 0.8);
    assert_non_negative(&attrs);
}

#[test]
fn hybrid_warm_up() {
    let map = jumps(5, 200.0);

    let attrs = Difficulty::new().calculate(&map);
    let strains = Difficulty::new().strains(&map);

    assert!(attrs.hybrid.abs() < f64::EPSILON);
    assert!(strains.hybrid.iter().all(|strain| strain.abs() < f64::EPSILON));
    assert!(strains.aim.iter().any(|strain| *strain > 0.0));
}

#[test]
fn passed_objects_truncate() {
    let map = sliders(60, 200.0);

    let partial = Difficulty::new().passed_objects(15).calculate(&map);

    let truncated = Beatmap {
        hit_objects: map.hit_objects[..15].to_vec(),
        ..map.clone()
    };

    let full = Difficulty::new().calculate(&truncated);

    assert_eq!(format!("{partial:?}"), format!("{full:?}"));
}

#[test]
fn slider_factor() {
    let attrs = Difficulty::new().calculate(&sliders(60, 250.0));

    assert!(attrs.aim > 0.0);
    assert!(attrs.slider_factor > 0.0);
    assert!(attrs.aim_difficult_slider_count > 0.0);
}

#[test]
fn strains_per_section() {
    let map = jumps(30, 200.0);
    let strains = Difficulty::new().strains(&map);

    let len = strains.aim.len();

    assert!(len > 0);
    assert_eq!(strains.aim_no_sliders.len(), len);
    assert_eq!(strains.speed.len(), len);
    assert_eq!(strains.stamina.len(), len);
    assert_eq!(strains.hybrid.len(), len);
    assert_eq!(strains.flashlight.len(), len);

    // 29 transitions over 5.8s
    let duration = 29.0 * 200.0;
    assert!(len as f64 >= duration / rosu_hybrid::OsuStrains::SECTION_LEN);
}

#[test]
fn checked_calculate() {
    let map = jumps(20, 200.0);

    assert!(Difficulty::new().checked_calculate(&map).is_ok());

    let broken = Beatmap::new(vec![
        HitObject::circle(Pos::new(100.0, 100.0), 0.0),
        HitObject::circle(Pos::new(f32::NAN, 100.0), 100.0),
    ]);

    assert_eq!(
        Difficulty::new().checked_calculate(&broken),
        Err(TooSuspicious::RedFlag)
    );
}

#[test]
fn evaluators_on_custom_objects() {
    let scaling_factor = ScalingFactor::new(4.0);

    let objects = [
        OsuObject::new(&HitObject::circle(Pos::new(100.0, 100.0), 1000.0)),
        OsuObject::new(&HitObject::circle(Pos::new(300.0, 100.0), 1200.0)),
    ];

    let first = OsuDifficultyObject::new(&objects[0], None, None, None, 1.0, 0, &scaling_factor);
    let second = OsuDifficultyObject::new(
        &objects[1],
        Some(&objects[0]),
        Some(&first),
        None,
        1.0,
        1,
        &scaling_factor,
    );

    let diff_objects = [first, second];

    let aim = AimEvaluator::evaluate_diff_of(&diff_objects[1], &diff_objects, true);
    let speed = SpeedEvaluator::evaluate_diff_of(&diff_objects[1], &diff_objects, 50.0, false);

    assert!((aim - diff_objects[1].lazy_jump_dist).abs() < f64::EPSILON);
    assert!(speed > 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn attributes_are_non_negative(
        objects in prop::collection::vec((0.0..512.0_f32, 0.0..384.0_f32, 20.0..600.0_f64), 0..60),
        mods in prop::sample::select(vec![NM, HD, HR, DT, HT, FL, RX, AP, TD, HD + HR + DT + FL]),
    ) {
        let mut time = 0.0;

        let hit_objects = objects
            .into_iter()
            .map(|(x, y, delta)| {
                time += delta;

                HitObject::circle(Pos::new(x, y), time)
            })
            .collect();

        let attrs = Difficulty::new().mods(mods).calculate(&Beatmap::new(hit_objects));

        assert_non_negative(&attrs);
        prop_assert!(attrs.hybrid <= 0.8);
    }
}
