//! png2ico - convert a PNG logo into a multi-resolution Windows icon.

use env_logger::Env;
use png2ico::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse_args();

    // RUST_LOG still wins over the verbosity flag
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    process::exit(cli::run(args));
}
