use std::cmp;

use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::difficulty::object::OsuDifficultyObject,
    util::difficulty::{logistic, smoothstep_bell_curve},
};

pub struct RhythmEvaluator;

impl RhythmEvaluator {
    /// 5 seconds
    pub const HISTORY_TIME_MAX: u32 = 5 * 1000;
    pub const HISTORY_OBJECTS_MAX: usize = 32;
    pub const RHYTHM_OVERALL_MULTIPLIER: f64 = 1.0;
    pub const RHYTHM_RATIO_MULTIPLIER: f64 = 15.0;

    /// Multiplier of at least `1.0` that rewards complex rhythms within the
    /// recent history of the current object, before doubletaps are penalized.
    ///
    /// Spinners, the object after a spinner, and the first object yield `0.0`.
    #[expect(clippy::too_many_lines, reason = "single pass over the rhythm history")]
    pub fn evaluate_diff_of<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
    ) -> f64 {
        if curr.idx == 0
            || curr.base.is_spinner()
            || curr
                .previous(0, diff_objects)
                .is_some_and(|prev| prev.base.is_spinner())
        {
            return 0.0;
        }

        let mut rhythm_complexity_sum = 0.0;

        let delta_difference_eps = hit_window * 0.3;

        let mut island = RhythmIsland::new(delta_difference_eps);
        let mut prev_island = RhythmIsland::new(delta_difference_eps);

        // * islands are compared with a tolerance so they can't be hashed
        let mut island_counts = Vec::<IslandCount>::new();

        // * ratio at the start of the current island, buffs tighter rhythms
        let mut start_ratio = 0.0;

        let mut first_delta_switch = false;

        // * the first object has no delta time so it doesn't count
        let historical_note_count = cmp::min(curr.idx - 1, Self::HISTORY_OBJECTS_MAX);

        let mut rhythm_start = 0;

        while curr
            .previous(rhythm_start, diff_objects)
            .filter(|prev| {
                rhythm_start + 2 < historical_note_count
                    && curr.start_time - prev.start_time < f64::from(Self::HISTORY_TIME_MAX)
            })
            .is_some()
        {
            rhythm_start += 1;
        }

        let Some((mut prev_obj, mut last_obj)) = curr
            .previous(rhythm_start, diff_objects)
            .zip(curr.previous(rhythm_start + 1, diff_objects))
        else {
            return Self::finalize(curr, diff_objects, hit_window, rhythm_complexity_sum);
        };

        // * walk from the oldest object up to the current one
        for i in (1..=rhythm_start).rev() {
            let Some(curr_obj) = curr.previous(i - 1, diff_objects) else {
                break;
            };

            // * scales from 0 in the past up to 1 at the current object
            let time_decay = (f64::from(Self::HISTORY_TIME_MAX)
                - (curr.start_time - curr_obj.start_time))
                / f64::from(Self::HISTORY_TIME_MAX);
            let note_decay = (historical_note_count - i) as f64 / historical_note_count as f64;

            let curr_historical_decay = note_decay.min(time_decay);

            let curr_delta = curr_obj.delta_time.max(1e-7);
            let prev_delta = prev_obj.delta_time.max(1e-7);
            let last_delta = last_obj.delta_time.max(1e-7);

            // * deltas that are multiples of each other, e.g. 100 and 200,
            // * get a reduced bonus
            let delta_difference = prev_delta.max(curr_delta) / prev_delta.min(curr_delta);
            let delta_difference_fraction = delta_difference - delta_difference.trunc();

            let curr_ratio = 1.0
                + Self::RHYTHM_RATIO_MULTIPLIER
                    * smoothstep_bell_curve(delta_difference_fraction, 0.5, 0.5).min(0.5);

            let difference_multiplier = (2.0 - delta_difference / 8.0).clamp(0.0, 1.0);

            let window_penalty = (((prev_delta - curr_delta).abs() - delta_difference_eps)
                .max(0.0)
                / delta_difference_eps)
                .min(1.0);

            let mut effective_ratio = window_penalty * curr_ratio * difference_multiplier;

            if first_delta_switch {
                if (prev_delta - curr_delta).abs() < delta_difference_eps {
                    island.add_delta(curr_delta as i32);
                } else {
                    // * changes into or out of sliders are easy to acc
                    if curr_obj.base.is_slider() {
                        effective_ratio *= 0.125;
                    }

                    if prev_obj.base.is_slider() {
                        effective_ratio *= 0.3;
                    }

                    // * repeated polarity e.g. 2 -> 4 or 3 -> 5
                    if island.is_similar_polarity(&prev_island) {
                        effective_ratio *= 0.5;
                    }

                    // * previous increase happened a note ago e.g. 1/1 -> 1/2 -> 1/4
                    if last_delta > prev_delta + delta_difference_eps
                        && prev_delta > curr_delta + delta_difference_eps
                    {
                        effective_ratio *= 0.125;
                    }

                    // * repeated island size e.g. triplet -> triplet
                    if prev_island.delta_count == island.delta_count {
                        effective_ratio *= 0.5;
                    }

                    if let Some(island_count) = island_counts
                        .iter_mut()
                        .find(|entry| entry.island == island)
                        .filter(|entry| !entry.island.is_default())
                    {
                        // * only consecutive islands count as repetitions
                        if prev_island == island {
                            island_count.count += 1;
                        }

                        let power = logistic(f64::from(island.delta), 58.33, 0.24, Some(2.75));
                        effective_ratio *= (3.0 / island_count.count as f64)
                            .min((island_count.count as f64).recip().powf(power));
                    } else {
                        island_counts.push(IslandCount { island, count: 1 });
                    }

                    let doubletapness = prev_obj.get_doubletapness(Some(curr_obj), hit_window);
                    effective_ratio *= 1.0 - doubletapness * 0.75;

                    rhythm_complexity_sum +=
                        (effective_ratio * start_ratio).sqrt() * curr_historical_decay;

                    start_ratio = effective_ratio;

                    prev_island = island;

                    // * slowing down stops the island, speeding up keeps counting
                    if prev_delta + delta_difference_eps < curr_delta {
                        first_delta_switch = false;
                    }

                    island = RhythmIsland::new_with_delta(curr_delta as i32, delta_difference_eps);
                }
            } else if prev_delta > curr_delta + delta_difference_eps {
                // * speeding up, count the island until the speed changes again
                first_delta_switch = true;

                if curr_obj.base.is_slider() {
                    effective_ratio *= 0.6;
                }

                if prev_obj.base.is_slider() {
                    effective_ratio *= 0.6;
                }

                start_ratio = effective_ratio;

                island = RhythmIsland::new_with_delta(curr_delta as i32, delta_difference_eps);
            }

            last_obj = prev_obj;
            prev_obj = curr_obj;
        }

        Self::finalize(curr, diff_objects, hit_window, rhythm_complexity_sum)
    }

    fn finalize<'a>(
        curr: &'a OsuDifficultyObject<'a>,
        diff_objects: &'a [OsuDifficultyObject<'a>],
        hit_window: f64,
        rhythm_complexity_sum: f64,
    ) -> f64 {
        let rhythm_difficulty =
            (4.0 + rhythm_complexity_sum * Self::RHYTHM_OVERALL_MULTIPLIER).sqrt() / 2.0;

        rhythm_difficulty * (1.0 - curr.get_doubletapness(curr.next(0, diff_objects), hit_window))
    }
}

#[derive(Copy, Clone)]
struct RhythmIsland {
    delta_difference_eps: f64,
    delta: i32,
    delta_count: i32,
}

const MIN_DELTA_TIME: i32 = OsuDifficultyObject::MIN_DELTA_TIME as i32;

impl RhythmIsland {
    /// An island without deltas.
    const fn new(delta_difference_eps: f64) -> Self {
        Self {
            delta_difference_eps,
            delta: i32::MAX,
            delta_count: 0,
        }
    }

    fn new_with_delta(delta: i32, delta_difference_eps: f64) -> Self {
        Self {
            delta_difference_eps,
            delta: delta.max(MIN_DELTA_TIME),
            delta_count: 1,
        }
    }

    fn add_delta(&mut self, delta: i32) {
        if self.delta == i32::MAX {
            self.delta = delta.max(MIN_DELTA_TIME);
        }

        self.delta_count += 1;
    }

    const fn is_similar_polarity(&self, other: &Self) -> bool {
        self.delta_count % 2 == other.delta_count % 2
    }

    const fn is_default(&self) -> bool {
        self.delta == i32::MAX && self.delta_count == 0
    }
}

impl PartialEq for RhythmIsland {
    fn eq(&self, other: &Self) -> bool {
        f64::from((self.delta - other.delta).abs()) < self.delta_difference_eps
            && self.delta_count == other.delta_count
    }
}

struct IslandCount {
    island: RhythmIsland,
    count: usize,
}

#[cfg(test)]
mod tests {
    use crate::osu::difficulty::evaluators::test_objects::{around_spinner, diff_objects};

    use super::*;

    #[test]
    fn spinner_and_follower_have_no_rhythm() {
        let objects = around_spinner();
        let diff_objects = diff_objects(&objects);

        let rhythm = |idx: usize| {
            RhythmEvaluator::evaluate_diff_of(&diff_objects[idx], &diff_objects, 50.0)
        };

        assert!(rhythm(0).abs() < f64::EPSILON);
        assert!(rhythm(1) > 0.0);
        assert!(rhythm(2).abs() < f64::EPSILON);
        assert!(rhythm(3).abs() < f64::EPSILON);
        assert!(rhythm(4) > 0.0);
    }
}
