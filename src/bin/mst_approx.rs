use std::process::ExitCode;

use tsp_core::runner::{self, Strategy};

fn main() -> ExitCode {
    runner::run(Strategy::MstApprox)
}
