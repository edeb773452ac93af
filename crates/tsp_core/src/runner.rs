use std::{
    fmt,
    io::{self, Write},
    process::ExitCode,
    time::{Duration, Instant},
};

use log::Level;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Dist, DistanceMatrix, Result, SolverInput, SolverOptions, Tour,
    algo::{held_karp::held_karp, tree_tour::two_approx_tour},
    logging,
    tour_file::TourFile,
};

/// One executable per strategy; each shares the whole pipeline below.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    Exact,
    MstApprox,
    Reinsertion,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "Held-Karp optimal cost",
            Self::MstApprox => "2-Approx (CLRS) cost",
            Self::Reinsertion => "RS-MST cost",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub strategy: Strategy,
    pub tour: Tour,
    pub cost: Dist,
    /// Strategy time only. Parsing, matrix construction and the RS-MST base
    /// tour are excluded.
    pub elapsed: Duration,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}   time: {:.6}s",
            self.strategy.label(),
            self.cost,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Runs `strategy` over an already built matrix and times it.
///
/// For the reinsertion strategy the clock covers only the skip-and-reinsert
/// pass and the cost of its result; the base tree tour is built beforehand.
pub fn solve(
    strategy: Strategy,
    matrix: &DistanceMatrix,
    options: &SolverOptions,
) -> Result<Solution> {
    let (tour, cost, elapsed) = match strategy {
        Strategy::Exact => {
            let now = Instant::now();
            let solution = held_karp(matrix)?;
            (solution.tour, solution.cost, now.elapsed())
        }
        Strategy::MstApprox => {
            let now = Instant::now();
            let tour = two_approx_tour(matrix);
            let cost = tour.cost(matrix);
            (tour, cost, now.elapsed())
        }
        Strategy::Reinsertion => {
            let heuristic = options.reinsertion()?;
            let seed = resolve_seed(options.seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let base = two_approx_tour(matrix);

            let now = Instant::now();
            let tour = heuristic.run(&base, matrix, &mut rng);
            let cost = tour.cost(matrix);
            (tour, cost, now.elapsed())
        }
    };

    log::debug!("runner: tour={tour}");
    if log::log_enabled!(Level::Info) {
        let metrics = tour.metrics(matrix);
        log::info!("metrics: n={} {metrics}", tour.len());
    }

    Ok(Solution {
        strategy,
        tour,
        cost,
        elapsed,
    })
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => {
            log::info!("rs_mst: seed={seed}");
            seed
        }
        None => {
            let seed = rand::rng().random::<u64>();
            log::info!("rs_mst: seed={seed} (drawn, pass --seed={seed} to reproduce)");
            seed
        }
    }
}

/// Whole executable: options, logging, input, solve, report.
///
/// Prints the report line on success. Any failure is printed to stderr as
/// `error: <message>` and mapped to exit code 1.
pub fn run(strategy: Strategy) -> ExitCode {
    match try_run(strategy) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("runner: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(strategy: Strategy) -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    let input = SolverInput::from_path(options.input_path())?;
    log::info!("input: {input}");
    log::info!("options: {options}");

    let matrix = DistanceMatrix::from_points(input.points())?;
    let solution = solve(strategy, &matrix, &options)?;

    if let Some(path) = options.tour_output_path() {
        TourFile::new(input.name(), &solution.tour, solution.cost).write_to_file(path)?;
    }

    log::info!(
        "output: n={} cost={} total_time={:.2}s",
        solution.tour.len(),
        solution.cost,
        now.elapsed().as_secs_f32()
    );
    write_report(&solution, &mut io::stdout().lock())
}

/// Writes the single report line. A closed stdout surfaces as `Error::Io`.
fn write_report(solution: &Solution, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{solution}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io, time::Duration};

    use rand::{SeedableRng, rngs::StdRng};

    use super::{Solution, Strategy, solve, write_report};
    use crate::{
        DistanceMatrix, Error, Point, SolverOptions, Tour, algo::tree_tour::two_approx_tour,
    };

    fn unit_square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .expect("matrix")
    }

    fn seeded_options(seed: u64) -> SolverOptions {
        SolverOptions {
            seed: Some(seed),
            ..SolverOptions::default()
        }
    }

    #[test]
    fn labels_match_each_executable() {
        assert_eq!(Strategy::Exact.label(), "Held-Karp optimal cost");
        assert_eq!(Strategy::MstApprox.label(), "2-Approx (CLRS) cost");
        assert_eq!(Strategy::Reinsertion.label(), "RS-MST cost");
    }

    #[test]
    fn report_line_has_label_cost_and_seconds() {
        let solution = Solution {
            strategy: Strategy::MstApprox,
            tour: Tour::new(vec![0, 1]),
            cost: 42,
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(
            solution.to_string(),
            "2-Approx (CLRS) cost: 42   time: 1.500000s"
        );
    }

    struct ClosedPipe;

    impl io::Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_report_emits_one_line() {
        let solution = Solution {
            strategy: Strategy::Exact,
            tour: Tour::new(vec![0, 1]),
            cost: 14,
            elapsed: Duration::ZERO,
        };
        let mut out = Vec::new();
        write_report(&solution, &mut out).expect("write report");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Held-Karp optimal cost: 14   time: 0.000000s\n"
        );
    }

    #[test]
    fn write_report_surfaces_io_errors() {
        let solution = Solution {
            strategy: Strategy::Reinsertion,
            tour: Tour::new(vec![0, 1]),
            cost: 2,
            elapsed: Duration::ZERO,
        };

        let err = write_report(&solution, &mut ClosedPipe).expect_err("closed pipe");
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn every_strategy_solves_the_unit_square() {
        let matrix = unit_square();
        let options = seeded_options(7);

        for strategy in [Strategy::Exact, Strategy::MstApprox, Strategy::Reinsertion] {
            let solution = solve(strategy, &matrix, &options).expect("solve");

            assert!(solution.tour.is_permutation_of(4), "{strategy:?}");
            assert_eq!(solution.tour.start(), Some(0));
            assert_eq!(solution.cost, solution.tour.cost(&matrix));
        }

        let exact = solve(Strategy::Exact, &matrix, &options).expect("exact");
        assert_eq!(exact.cost, 4);
        let approx = solve(Strategy::MstApprox, &matrix, &options).expect("approx");
        assert_eq!(approx.cost, 4);
    }

    #[test]
    fn seeded_reinsertion_is_reproducible() {
        let points: Vec<Point> = (0..30)
            .map(|i| Point::new(f64::from(i * 7 % 13), f64::from(i * 5 % 11)))
            .collect();
        let matrix = DistanceMatrix::from_points(&points).expect("matrix");
        let options = SolverOptions {
            skip_fraction: 0.3,
            ..seeded_options(99)
        };

        let first = solve(Strategy::Reinsertion, &matrix, &options).expect("first");
        let second = solve(Strategy::Reinsertion, &matrix, &options).expect("second");
        assert_eq!(first.tour, second.tour);
        assert_eq!(first.cost, second.cost);
    }

    #[test]
    fn reinsertion_perturbs_the_tree_tour_built_before_timing() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new(f64::from(i * 11 % 19), f64::from(i * 3 % 7)))
            .collect();
        let matrix = DistanceMatrix::from_points(&points).expect("matrix");
        let options = SolverOptions {
            skip_fraction: 0.25,
            ..seeded_options(12)
        };

        let base = two_approx_tour(&matrix);
        let expected = options.reinsertion().expect("heuristic").run(
            &base,
            &matrix,
            &mut StdRng::seed_from_u64(12),
        );
        let solution = solve(Strategy::Reinsertion, &matrix, &options).expect("solve");

        assert_eq!(solution.tour, expected);
        assert_eq!(solution.cost, expected.cost(&matrix));
        assert_eq!(solution.strategy, Strategy::Reinsertion);
    }

    #[test]
    fn exact_strategy_surfaces_too_many_nodes() {
        let points: Vec<Point> = (0..40).map(|i| Point::new(f64::from(i), 0.0)).collect();
        let matrix = DistanceMatrix::from_points(&points).expect("matrix");

        let err = solve(Strategy::Exact, &matrix, &SolverOptions::default())
            .expect_err("too many nodes");
        assert!(matches!(err, Error::TooManyNodes { nodes: 40, .. }));
    }

    #[test]
    fn invalid_skip_fraction_is_rejected_before_solving() {
        let options = SolverOptions {
            skip_fraction: 2.0,
            ..seeded_options(1)
        };

        let err = solve(Strategy::Reinsertion, &unit_square(), &options).expect_err("bad fraction");
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
