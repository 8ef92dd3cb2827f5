//! Builds skip lists from numbered file sets and reports on searches and removals.
//!
//! Usage: cargo run --bin skipset-driver -- -<c|s|i|r|g> <num> [--dir <path>]

use std::{env, io, process};

use skipset::driver::{self, Config, Mode};

fn main() {
    let mut args = env::args();
    let command = args.next().unwrap_or_else(|| "skipset-driver".to_owned());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            print!("{}", driver::usage(&command));
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = driver::run(&config, &mut stdout.lock()) {
        eprintln!("{}", err);
        process::exit(1);
    }

    // list dumps leave the line open
    if matches!(config.mode, Mode::Construct | Mode::Remove) {
        println!();
    }
}
