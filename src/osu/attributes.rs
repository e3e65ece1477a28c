/// The result of a difficulty calculation on an osu!standard map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuDifficultyAttributes {
    /// The difficulty of the aim skill.
    pub aim: f64,
    /// The difficulty of the aim skill without sliders.
    pub aim_no_sliders: f64,
    /// The difficulty of the speed skill.
    pub speed: f64,
    /// The clamped hybrid rating i.e. how much aim and speed difficulty
    /// shift against each other.
    pub hybrid: f64,
    /// The difficulty of the stamina skill.
    ///
    /// Not part of the star rating.
    pub stamina: f64,
    /// The difficulty of the flashlight skill.
    pub flashlight: f64,
    /// The ratio of the aim strain with and without considering sliders
    pub slider_factor: f64,
    /// The number of clickable objects weighted by difficulty.
    pub speed_note_count: f64,
    /// Weighted sum of aim strains of sliders.
    pub aim_difficult_slider_count: f64,
    /// Weighted sum of aim strains.
    pub aim_difficult_strain_count: f64,
    /// Weighted sum of speed strains.
    pub speed_difficult_strain_count: f64,
    /// Weighted sum of hybrid strains.
    pub hybrid_difficult_strain_count: f64,
    /// Ratio of top weighted slider strains to the other top weighted aim
    /// strains.
    pub aim_top_weighted_slider_factor: f64,
    /// Ratio of top weighted slider strains to the other top weighted speed
    /// strains.
    pub speed_top_weighted_slider_factor: f64,
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty
    pub od: f64,
    /// The health drain rate.
    pub hp: f64,
    /// The perceived hit window for a 300 ("Great") including clock rate.
    pub great_hit_window: f64,
    /// The perceived hit window for a 100 ("Ok") including clock rate.
    pub ok_hit_window: f64,
    /// The perceived hit window for a 50 ("Meh") including clock rate.
    pub meh_hit_window: f64,
    /// The amount of circles.
    pub n_circles: u32,
    /// The amount of sliders.
    pub n_sliders: u32,
    /// The amount of spinners.
    pub n_spinners: u32,
    /// The final star rating
    pub stars: f64,
    /// The maximum combo.
    pub max_combo: u32,
}

impl OsuDifficultyAttributes {
    /// Return the maximum combo.
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Return the amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.n_circles + self.n_sliders + self.n_spinners
    }

    /// Return the star rating.
    pub const fn stars(&self) -> f64 {
        self.stars
    }
}
