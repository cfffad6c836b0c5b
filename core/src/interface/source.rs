use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// One geometry from a source file, as `(longitude, latitude)` pairs.
pub type Shape = Vec<(f64, f64)>;

/// Anything that can produce fire geometries: shape files, CSV exports,
/// geometries posted to the report bridge.
pub trait CoordinateSource {
    type Error;

    fn shapes(&mut self) -> Result<Vec<Shape>, Self::Error>;
}

/// Concatenates every shape into one point sequence, dropping the shape
/// boundaries.
pub fn flatten_shapes(shapes: Vec<Shape>) -> Vec<(f64, f64)> {
    shapes.into_iter().flatten().collect()
}

/// Reads all shapes from `source` and flattens them.
pub fn load_fire_coords<S: CoordinateSource>(source: &mut S) -> Result<Vec<(f64, f64)>, S::Error> {
    Ok(flatten_shapes(source.shapes()?))
}

/// Shapes already held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySource {
    pub shapes: Vec<Shape>,
}

impl InMemorySource {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Treats every point as its own single-point shape.
    pub fn from_points(points: Vec<(f64, f64)>) -> Self {
        Self {
            shapes: points.into_iter().map(|point| vec![point]).collect(),
        }
    }
}

impl CoordinateSource for InMemorySource {
    type Error = Infallible;

    fn shapes(&mut self) -> Result<Vec<Shape>, Self::Error> {
        Ok(self.shapes.clone())
    }
}
