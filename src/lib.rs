//! Hybrid strain difficulty calculation for [osu!]standard.
//!
//! ## Description
//!
//! Every hit object becomes a difficulty object that knows its distances and
//! timings relative to its predecessors. Six strain skills fold these objects
//! into decaying strains: aim (with and without sliders), speed, stamina,
//! flashlight, and a hybrid skill that measures how quickly the load shifts
//! between aim and speed. The section peaks of each skill are aggregated into
//! a difficulty value and the ratings are combined into a star rating.
//!
//! Maps are not decoded by this crate. Instead, a [`Beatmap`] is built from
//! already evaluated hit objects.
//!
//! ## Usage
//!
//! ```
//! use rosu_hybrid::{Beatmap, Difficulty};
//! use rosu_hybrid::model::hit_object::{
//!     HitObject, Pos, Slider, SliderCheckpoint, SliderCheckpointKind,
//! };
//!
//! let slider = Slider::new(
//!     1800.0,
//!     0,
//!     vec![SliderCheckpoint::new(Pos::new(400.0, 100.0), 1764.0, SliderCheckpointKind::Tail)],
//! );
//!
//! let map = Beatmap::new(vec![
//!     HitObject::circle(Pos::new(100.0, 100.0), 1000.0),
//!     HitObject::circle(Pos::new(300.0, 200.0), 1250.0),
//!     HitObject::slider(Pos::new(200.0, 100.0), 1500.0, slider),
//!     HitObject::spinner(Pos::new(256.0, 192.0), 2000.0, 1000.0),
//! ])
//! .with_settings(9.0, 4.0, 5.0, 8.0);
//!
//! let attrs = Difficulty::new()
//!     .mods(8 + 16) // HDHR
//!     .calculate(&map);
//!
//! println!("Stars: {} | Hybrid: {}", attrs.stars(), attrs.hybrid);
//!
//! // Section peaks of every skill, e.g. for plotting
//! let strains = Difficulty::new().strains(&map);
//! assert_eq!(strains.aim.len(), strains.hybrid.len());
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Skipped aim mitigations are logged through `tracing::trace` and the final rating through `tracing::debug`. | [`tracing`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[macro_use]
mod util;

#[doc(inline)]
pub use self::{
    any::Difficulty,
    model::{beatmap::Beatmap, mods::GameMods},
    osu::{OsuDifficultyAttributes, OsuStrains},
};

/// Types for calculations independent of a specific skill.
pub mod any;

/// Types for osu!standard calculations.
pub mod osu;

/// Types used in and around this crate.
pub mod model;
