pub mod extract;
pub mod render;
pub mod settings;

use std::{
    env,
    path::{Path, PathBuf},
};

extern crate log;
use log::debug;

use extract::find_eprocess_offsets;
use render::generate_config;
use settings::{
    BANNER_WIDTH,
    DEFAULT_SYMBOLS_PATH,
};

/// Where the symbols file came from.
#[derive(Clone, PartialEq, Debug)]
pub enum Mode {
    /// Built-in location, checked for existence before use
    Default(PathBuf),
    /// Given on the command line, used as is
    Explicit(PathBuf),
}

impl Mode {
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) => Self::Explicit(path),
            None => Self::Default(expand_home(DEFAULT_SYMBOLS_PATH)),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Outcome {
    SymbolsNotFound,
    ExtractionFailed,
    Generated,
}

/// Replace a leading `~` with `$HOME`. Paths without it, or with `HOME`
/// unset, come back unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return PathBuf::from(path),
    };
    match env::var_os("HOME") {
        Some(home) => {
            let mut p = PathBuf::from(home);
            let rest = rest.trim_start_matches('/');
            if !rest.is_empty() {
                p.push(rest);
            }
            p
        }
        None => PathBuf::from(path),
    }
}

fn print_next_steps(out_path: &Path) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("NEXT STEPS:");
    println!("1. sudo cp {} /etc/libvmi.conf", out_path.display());
    println!("2. sudo vmi-process-list win7-vmi");
    println!("3. Verify process names are readable (no more garbled text)");
    println!("{}", "=".repeat(BANNER_WIDTH));
}

/// Extract offsets for `mode` and write the config to `out_path`.
pub fn run(mode: &Mode, out_path: &Path) -> anyhow::Result<Outcome> {
    debug!("mode: {:?}", mode);

    match mode {
        Mode::Default(symbols_path) => {
            if !symbols_path.exists() {
                println!("[-] Symbols file not found at expected location");
                println!("    Expected: {}", symbols_path.display());
                println!("\nPlease provide the correct path to your symbols file:");
                println!("    vmi_offsets /path/to/symbols.json.xz");
                return Ok(Outcome::SymbolsNotFound);
            }

            match find_eprocess_offsets(symbols_path).filter(|o| !o.is_empty()) {
                Some(offsets) => {
                    generate_config(Some(&offsets), out_path)?;
                    print_next_steps(out_path);
                    Ok(Outcome::Generated)
                }
                None => {
                    println!("[-] Failed to extract offsets");
                    Ok(Outcome::ExtractionFailed)
                }
            }
        }
        Mode::Explicit(symbols_path) => {
            match find_eprocess_offsets(symbols_path).filter(|o| !o.is_empty()) {
                Some(offsets) => {
                    generate_config(Some(&offsets), out_path)?;
                    Ok(Outcome::Generated)
                }
                None => Ok(Outcome::ExtractionFailed),
            }
        }
    }
}
