//! TSPLIB `.tour` writer.

use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
};

use crate::{Dist, Error, Result, Tour};

const TOUR_SECTION_HEADER: &str = "TOUR_SECTION";
const TOUR_END_MARKER: &str = "-1";
const EOF_MARKER: &str = "EOF";
const TSPLIB_NODE_ID_OFFSET: usize = 1;

/// A solved tour rendered in TSPLIB's tour format with 1-based node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourFile<'a> {
    name: String,
    comment: String,
    tour: &'a Tour,
}

impl<'a> TourFile<'a> {
    pub fn new(name: impl Into<String>, tour: &'a Tour, cost: Dist) -> Self {
        Self {
            name: name.into(),
            comment: format!("Length = {cost}"),
            tour,
        }
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).map_err(|e| {
            Error::other(format!("failed to write tour file {}: {e}", path.display()))
        })?;
        log::info!("tour_file: wrote {} nodes to {}", self.tour.len(), path.display());
        Ok(())
    }
}

impl Display for TourFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "NAME: {}", self.name)?;
        writeln!(f, "COMMENT: {}", self.comment)?;
        writeln!(f, "TYPE: TOUR")?;
        writeln!(f, "DIMENSION: {}", self.tour.len())?;
        writeln!(f, "{TOUR_SECTION_HEADER}")?;
        for &node in self.tour.nodes() {
            writeln!(f, "{}", node + TSPLIB_NODE_ID_OFFSET)?;
        }
        writeln!(f, "{TOUR_END_MARKER}")?;
        writeln!(f, "{EOF_MARKER}")
    }
}
