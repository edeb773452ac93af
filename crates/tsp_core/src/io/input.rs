use std::{
    fs,
    path::{Path, PathBuf},
};

use tsp_derive::KvDisplay;

use crate::{Error, Point, Result};

const SECTION_MARKER: &str = "NODE_COORD_SECTION";
const END_MARKERS: [&str; 2] = ["EOF", "END"];

/// Coordinates loaded from a TSPLIB-style file, in file order.
#[derive(Clone, Debug, KvDisplay)]
pub struct SolverInput {
    #[kv(fmt = "path")]
    pub(crate) path: PathBuf,
    #[kv(fmt = "len")]
    pub(crate) points: Vec<Point>,
    pub(crate) skipped_lines: usize,
}

impl SolverInput {
    /// Reads and parses `path`. Invalid UTF-8 is replaced rather than
    /// rejected; such lines simply fail to parse and are skipped.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let (points, skipped_lines) = parse_points(&text);

        if skipped_lines > 0 {
            log::debug!(
                "input: skipped {skipped_lines} malformed coordinate line(s) in {}",
                path.display()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            points,
            skipped_lines,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_len(&self) -> usize {
        self.points.len()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// File stem, used as the `NAME` of a written tour.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("tour"))
    }
}

/// Points after the `NODE_COORD_SECTION` line, and how many lines in that
/// section were not `<int> <float> <float>`.
pub(crate) fn parse_points(text: &str) -> (Vec<Point>, usize) {
    let mut lines = text.lines();
    if !lines.by_ref().any(|line| line.contains(SECTION_MARKER)) {
        return (Vec::new(), 0);
    }

    let mut points = Vec::new();
    let mut skipped = 0;
    for line in lines {
        let trimmed = line.trim();
        if END_MARKERS.contains(&trimmed) {
            break;
        }
        match parse_coord_line(trimmed) {
            Some(point) => points.push(point),
            None => skipped += 1,
        }
    }

    (points, skipped)
}

fn parse_coord_line(line: &str) -> Option<Point> {
    let mut tokens = line.split_whitespace();
    tokens.next()?.parse::<i64>().ok()?;
    let x: f64 = tokens.next()?.parse().ok()?;
    let y: f64 = tokens.next()?.parse().ok()?;

    let point = Point::new(x, y);
    point.is_finite().then_some(point)
}
