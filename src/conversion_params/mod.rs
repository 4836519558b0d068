pub mod color;
pub mod gif;
pub mod options;
pub mod palette;
pub mod params_trait;
pub mod unified;
