//! Prints the canonical outcome of a fixed correction run.
//!
//! Used by the cross-process determinism test: the run must produce
//! byte-identical output regardless of cwd, locale, or spurious
//! environment variables. Output format, one line each:
//!
//! ```text
//! h_corrected=[…]
//! h_admissible=[…]
//! solved=[…]
//! report=<JSON>
//! ```

use underbound_harness::worlds::sliding_tile::{SlidingTile, TileBoard};
use underbound_search::convergence::{converge, CorrectionPolicyV1};

fn main() {
    // Shallow scrambles: every true cost sits inside the default step
    // budget, so the fixture settles in one round.
    let states: Vec<TileBoard> = (0..12).map(|seed| SlidingTile::scramble(seed, 4)).collect();
    // 1.7x-inflated Manhattan: inadmissible on purpose.
    let h_raw: Vec<f64> = states
        .iter()
        .map(|board| SlidingTile::manhattan(board) * 1.7)
        .collect();

    let policy = CorrectionPolicyV1 {
        backoff_margin: 0.0,
        ..CorrectionPolicyV1::default()
    };

    let outcome = match converge(&SlidingTile, &states, &h_raw, &policy) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("correction run failed: {err}");
            std::process::exit(1);
        }
    };

    println!("h_corrected={:?}", outcome.h_corrected);
    println!("h_admissible={:?}", outcome.h_admissible);
    println!("solved={:?}", outcome.solved);
    println!("report={}", outcome.report.to_json());
}
