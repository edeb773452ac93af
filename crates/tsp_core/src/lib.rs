//! Euclidean TSP solving over 2D points: an exact Held-Karp solver, the
//! MST-doubling 2-approximation and a seeded random skip-and-reinsert
//! heuristic built on the same spanning tree.

pub mod algo;
mod error;
mod io;
pub mod logging;
mod matrix;
mod point;
pub mod runner;
mod tour;

pub(crate) use io::{options, tour_file};

pub use error::{Error, Result};
pub use io::input::SolverInput;
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::tour_file::TourFile;
pub use matrix::{Dist, DistanceMatrix};
pub use point::Point;
pub use tour::{Tour, TourMetrics};
