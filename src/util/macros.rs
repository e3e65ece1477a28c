/// Defines a skill struct alongside its `new` function and implements
/// [`StrainSkill`] (or [`StrainDecaySkill`] and [`StrainSkill`]) for it.
///
/// Fields required by the trait(s) are appended automatically. The skill
/// itself still has to provide the inherent functions
/// `calculate_initial_strain` and `strain_value_at` for `StrainSkill`, or
/// `strain_value_of` plus the consts `SKILL_MULTIPLIER` and
/// `STRAIN_DECAY_BASE` for `StrainDecaySkill`.
///
/// An inherent `difficulty_value` function takes precedence over the trait's
/// default aggregation.
///
/// [`StrainSkill`]: crate::any::difficulty::skills::StrainSkill
/// [`StrainDecaySkill`]: crate::any::difficulty::skills::StrainDecaySkill
macro_rules! define_skill {
    // Entry point without `new` function
    (
        $( #[$meta:meta] )*
        $vis:vis struct $skill:ident: $trait:ident => $objects:ty[$object:ty] {
            $( $field_name:ident: $field_type:ty $( = $field_default:expr )?, )*
        }
    ) => {
        define_skill! {
            @$trait $objects[$object]
            extend_fields $trait
            fields { $( $field_name $field_type $( = $field_default )?, )* }
            struct { $( #[$meta] )* $vis $skill }
            new {
                setup {}
                args {}
                assigns {}
            }
        }
    };

    // Entry point with `new` function
    (
        $( #[$meta:meta] )*
        $vis:vis struct $skill:ident: $trait:ident => $objects:ty[$object:ty] {
            $( $field_name:ident: $field_type:ty, )*
        }

        $_new_vis:vis fn new( $( $arg_name:ident: $arg_type:ty ),* ) -> Self {
            $( { $( $setup:tt )* } )?

            Self {
                $( $assign_name:ident: $assign_expr:expr, )*
            }
        }
    ) => {
        define_skill! {
            @$trait $objects[$object]
            extend_fields $trait
            fields { $( $field_name $field_type |, )* }
            struct { $( #[$meta] )* $vis $skill }
            new {
                setup { $( $( $setup )* )? }
                args { $( $arg_name $arg_type, )* }
                assigns { $( $assign_name $assign_expr, )* }
            }
        }
    };

    // Extend `StrainDecaySkill`'s fields
    (
        @$trait:ident $objects:ty[$object:ty]
        extend_fields StrainDecaySkill
        fields { $( $fields:tt )* }
        $( $rest:tt )*
    ) => {
        define_skill! {
            @$trait $objects[$object]
            extend_fields StrainSkill
            fields {
                $( $fields )*
                decay_strain f64 = 0.0,
            }
            $( $rest )*
        }
    };

    // Extend `StrainSkill`'s fields
    (
        @$trait:ident $objects:ty[$object:ty]
        extend_fields StrainSkill
        fields { $( $fields:tt )* }
        $( $rest:tt )*
    ) => {
        define_skill! {
            @$trait $objects[$object]
            fields {
                $( $fields )*
                section_peak f64 = 0.0,
                section_end f64 = 0.0,
                strain_peaks crate::util::strains_vec::StrainsVec
                    = crate::util::strains_vec::StrainsVec::with_capacity(256),
                object_strains Vec<f64> = Vec::with_capacity(256),
            }
            $( $rest )*
        }
    };

    // Parse field without default
    (
        @$trait:ident $objects:ty[$object:ty]
        fields {
            $field_name:ident $field_type:ty,
            $( $fields:tt )*
        }
        struct { $( $struct:tt )* }
        new {
            setup { $( $setup:tt )* }
            args { $( $args:tt )* }
            assigns { $( $assigns:tt )* }
        }
    ) => {
        define_skill! {
            @$trait $objects[$object]
            fields { $( $fields )* }
            struct { $( $struct )* $field_name $field_type, }
            new {
                setup { $( $setup )* }
                args { $( $args )* $field_name $field_type, }
                assigns { $( $assigns )* $field_name, }
            }
        }
    };

    // Parse field with default
    (
        @$trait:ident $objects:ty[$object:ty]
        fields {
            $field_name:ident $field_type:ty = $field_default:expr,
            $( $fields:tt )*
        }
        struct { $( $struct:tt )* }
        new {
            setup { $( $setup:tt )* }
            args { $( $args:tt )* }
            assigns { $( $assigns:tt )* }
        }
    ) => {
        define_skill! {
            @$trait $objects[$object]
            fields { $( $fields )* }
            struct { $( $struct )* $field_name $field_type, }
            new {
                setup { $( $setup )* }
                args { $( $args )* }
                assigns { $( $assigns )* $field_name $field_default, }
            }
        }
    };

    // Parse field that is assigned by a custom `new` function
    (
        @$trait:ident $objects:ty[$object:ty]
        fields {
            $field_name:ident $field_type:ty |,
            $( $fields:tt )*
        }
        struct { $( $struct:tt )* }
        $( $rest:tt )*
    ) => {
        define_skill! {
            @$trait $objects[$object]
            fields { $( $fields )* }
            struct { $( $struct )* $field_name $field_type, }
            $( $rest )*
        }
    };

    // Final output
    (
        @$trait:ident $objects:ty[$object:ty]
        fields {}
        struct {
            $( #[$meta:meta] )*
            $vis:vis $name:ident
            $( $field_name:ident $field_type:ty, )*
        }
        new {
            setup { $( $setup:tt )* }
            args { $( $arg_name:ident $arg_type:ty, )* }
            assigns { $( $assign_name:ident $( $assign_expr:expr )?, )* }
        }
    ) => {
        $( #[$meta] )*
        $vis struct $name {
            $( $field_name: $field_type, )*
        }

        impl $name {
            #[allow(unused)]
            $vis fn new(
                $( $arg_name: $arg_type, )*
            ) -> Self {
                $( $setup )*

                Self {
                    $( $assign_name $( : $assign_expr )?, )*
                }
            }
        }

        const _: () = {
            #[allow(unused_imports)]
            use crate::{
                any::difficulty::{
                    object::{IDifficultyObject, HasStartTime},
                    skills::{StrainSkill, StrainDecaySkill},
                },
                util::strains_vec::StrainsVec,
            };

            define_skill!( @impl $trait $name $objects[$object] );
        };
    };

    // Implement `StrainSkill` trait
    ( @impl StrainSkill $name:ident $objects:ty[$object:ty] ) => {
        impl StrainSkill for $name {
            type DifficultyObject<'a> = $object;
            type DifficultyObjects<'a> = $objects;

            fn process<'a>(
                &mut self,
                curr: &Self::DifficultyObject<'a>,
                objects: &Self::DifficultyObjects<'a>,
            ) {
                let section_length = f64::from(Self::SECTION_LENGTH);

                // The first object doesn't generate a strain so the first
                // processed object anchors the section end
                if curr.idx() == 1 {
                    self.section_end = f64::ceil(curr.start_time() / section_length) * section_length;
                }

                while curr.start_time() > self.section_end {
                    self.save_current_peak();
                    self.start_new_section_from(self.section_end, curr, objects);
                    self.section_end += section_length;
                }

                let strain = self.strain_value_at(curr, objects);
                self.section_peak = f64::max(strain, self.section_peak);
                self.object_strains.push(strain);
            }

            fn count_top_weighted_strains(&self, difficulty_value: f64) -> f64 {
                crate::any::difficulty::skills::count_top_weighted_strains(
                    &self.object_strains,
                    difficulty_value,
                )
            }

            fn count_relevant_objects(&self, difficulty_value: f64) -> f64 {
                let mut section_count = self.strain_peaks.count_non_zero();

                if self.section_peak > 0.0 {
                    section_count += 1;
                }

                crate::any::difficulty::skills::count_relevant_objects(
                    &self.object_strains,
                    section_count,
                    difficulty_value,
                )
            }

            fn object_strains(&self) -> &[f64] {
                &self.object_strains
            }

            fn save_current_peak(&mut self) {
                self.strain_peaks.push(self.section_peak);
            }

            fn start_new_section_from<'a>(
                &mut self,
                time: f64,
                curr: &Self::DifficultyObject<'a>,
                objects: &Self::DifficultyObjects<'a>,
            ) {
                self.section_peak = self.calculate_initial_strain(time, curr, objects);
            }

            fn current_strain_peaks(&self) -> StrainsVec {
                Self::get_current_strain_peaks(self.strain_peaks.clone(), self.section_peak)
            }

            fn into_current_strain_peaks(self) -> StrainsVec {
                Self::get_current_strain_peaks(self.strain_peaks, self.section_peak)
            }

            fn difficulty_value(current_strain_peaks: StrainsVec) -> f64 {
                crate::any::difficulty::skills::difficulty_value(
                    current_strain_peaks,
                    Self::DECAY_WEIGHT,
                )
            }

            fn into_difficulty_value(self) -> f64 {
                Self::difficulty_value(self.into_current_strain_peaks())
            }

            fn cloned_difficulty_value(&self) -> f64 {
                Self::difficulty_value(self.current_strain_peaks())
            }
        }
    };

    // Implement `StrainDecaySkill` and `StrainSkill` traits
    ( @impl StrainDecaySkill $name:ident $objects:ty[$object:ty] ) => {
        define_skill!( @impl StrainSkill $name $objects[$object] );

        impl StrainDecaySkill for $name {
            fn calculate_initial_strain<'a>(
                &self,
                time: f64,
                curr: &Self::DifficultyObject<'a>,
                objects: &Self::DifficultyObjects<'a>,
            ) -> f64 {
                let prev_start_time = curr
                    .previous(0, objects)
                    .map_or(0.0, HasStartTime::start_time);

                self.decay_strain * Self::strain_decay(time - prev_start_time)
            }

            fn strain_value_at<'a>(
                &mut self,
                curr: &Self::DifficultyObject<'a>,
                objects: &Self::DifficultyObjects<'a>,
            ) -> f64 {
                self.decay_strain *= Self::strain_decay(curr.delta_time);
                self.decay_strain += self.strain_value_of(curr, objects) * Self::SKILL_MULTIPLIER;

                self.decay_strain
            }

            fn strain_decay(ms: f64) -> f64 {
                crate::any::difficulty::skills::strain_decay(ms, Self::STRAIN_DECAY_BASE)
            }
        }
    };
}
