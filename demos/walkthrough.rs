//! Headless walkthrough: drive each search variant on the sample grid, with
//! dynamic obstacles spawning between steps, and print the final frame.
//!
//! Run: cargo run --bin walkthrough [variant] [seed]
//!
//! Set `STEPSEEK_LOG` to `debug` or `trace` to see controller transitions
//! and replans on stderr.

use stepseek_demos::{SAMPLE_SEED, run_variant};
use stepseek_paths::Variant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("STEPSEEK_LOG", "info"))
        .init();

    let mut args = std::env::args().skip(1);
    let variants = match args.next() {
        None => Variant::ALL.to_vec(),
        Some(name) => match name.parse::<Variant>() {
            Ok(v) => vec![v],
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => SAMPLE_SEED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Error: bad seed: {e}");
            std::process::exit(2);
        }
    };

    for v in variants {
        match run_variant(v, seed) {
            Ok(outcome) => println!("{outcome}\n"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}
