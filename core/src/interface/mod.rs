pub mod source;

pub use source::{flatten_shapes, load_fire_coords, CoordinateSource, InMemorySource, Shape};
