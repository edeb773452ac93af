use crate::{Error, Point, Result};

/// Integer edge weight. Rounded Euclidean distances always fit.
pub type Dist = u64;

const MIN_POINTS: usize = 2;

/// Dense symmetric matrix of rounded Euclidean distances, stored row-major.
///
/// Built once per instance and only ever read afterwards, so every strategy
/// can share the same matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    weights: Vec<Dist>,
}

impl DistanceMatrix {
    /// Builds the matrix for `points`; node `i` is `points[i]`.
    ///
    /// Entries are `round(hypot(dx, dy))` with halves rounded away from zero.
    /// Fewer than two points is rejected rather than yielding a degenerate
    /// matrix.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let n = points.len();
        if n < MIN_POINTS {
            return Err(Error::InsufficientInput { found: n });
        }

        let mut weights = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rounded_distance(&points[i], &points[j]);
                weights[i * n + j] = d;
                weights[j * n + i] = d;
            }
        }

        log::debug!("matrix: built n={n} entries={}", weights.len());
        Ok(Self { n, weights })
    }

    /// Builds a matrix from explicit rows, checking that they are square,
    /// symmetric and zero on the diagonal.
    pub fn from_rows(rows: Vec<Vec<Dist>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::InsufficientInput { found: 0 });
        }

        let mut weights = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_matrix(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            weights.extend(row);
        }

        let matrix = Self { n, weights };
        for i in 0..n {
            if matrix.get(i, i) != 0 {
                return Err(Error::invalid_matrix(format!(
                    "diagonal entry ({i},{i}) is {}",
                    matrix.get(i, i)
                )));
            }
            for j in (i + 1)..n {
                if matrix.get(i, j) != matrix.get(j, i) {
                    return Err(Error::invalid_matrix(format!(
                        "entries ({i},{j})={} and ({j},{i})={} differ",
                        matrix.get(i, j),
                        matrix.get(j, i)
                    )));
                }
            }
        }

        Ok(matrix)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Dist {
        self.weights[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[Dist] {
        &self.weights[i * self.n..(i + 1) * self.n]
    }
}

fn rounded_distance(a: &Point, b: &Point) -> Dist {
    // `f64::round` rounds halves away from zero; the cast saturates.
    a.dist(b).round() as Dist
}
