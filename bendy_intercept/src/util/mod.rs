pub mod geometry;
pub mod registry;
