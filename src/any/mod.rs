pub use self::difficulty::{Difficulty, ModsDependent};

pub(crate) mod difficulty;
