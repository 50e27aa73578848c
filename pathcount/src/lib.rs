pub mod combinations;
pub mod configuration;
pub mod dp;
pub mod enumerate;
pub mod error;
pub mod grid;

pub use configuration::Configuration;
pub use dp::count_paths;
pub use error::Error;
pub use grid::Grid;
