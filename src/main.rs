use std::path::{Path, PathBuf};

extern crate clap;
use clap::Parser;

extern crate env_logger;
extern crate log;

use vmi_offsets::{
    run,
    settings::OUTPUT_FILENAME,
    Mode,
};

/// Extract EPROCESS offsets from Volatility3 symbols into a LibVMI config
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Volatility3 symbols file (*.json.xz)
    #[clap(value_name = "FILENAME")]
    symbols: Option<PathBuf>,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let mode = Mode::from_arg(cli.symbols);

    if let Err(e) = run(&mode, Path::new(OUTPUT_FILENAME)) {
        log::error!("{:#}", e);
    }
}
