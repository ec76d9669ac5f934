//! Eel Forage entry point
//!
//! On the web this only installs logging and the panic hook; the page drives
//! a `WebSession` from JavaScript. Natively it runs a headless session with
//! the autopilot at the helm and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }
    log::info!("Eel Forage (web) loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use eel_forage::sim::{GameState, TickInput, seeded, tick};
    use eel_forage::{ConfigError, LevelTable, Tuning};

    /// Headless autopilot run of Eel Forage
    #[derive(Parser, Debug)]
    #[command(name = "eel-forage", version, about)]
    pub struct Options {
        /// Seed for spawn placement and wander jitter
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Stop after this many ticks even if the game isn't over
        #[arg(
            long = "ticks",
            value_name = "COUNT",
            default_value_t = 60 * 60 * 10,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pub max_ticks: u64,
        /// Tuning JSON; missing keys keep their defaults
        #[arg(long, value_name = "FILE")]
        pub tuning: Option<PathBuf>,
        /// Level table JSON (`{"levels": [...]}`)
        #[arg(long, value_name = "FILE")]
        pub levels: Option<PathBuf>,
        /// Print the final state as JSON
        #[arg(long)]
        pub dump: bool,
    }

    fn load<T>(path: &Option<PathBuf>, parse: fn(&str) -> Result<T, ConfigError>) -> Option<T> {
        let path = path.as_ref()?;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Can't read {}: {}, using defaults", path.display(), e);
                return None;
            }
        };
        match parse(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn run(opts: &Options) -> GameState {
        let tuning = load(&opts.tuning, Tuning::from_json)
            .filter(|t| match t.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Invalid tuning: {}, using defaults", e);
                    false
                }
            })
            .unwrap_or_default();
        let levels = load(&opts.levels, LevelTable::from_json).unwrap_or_default();

        let mut rng = seeded(opts.seed);
        let mut state = GameState::new(tuning, levels, &mut rng);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        log::info!("Headless run, seed {}", opts.seed);
        while !state.phase.is_over() && state.time_ticks < opts.max_ticks {
            let report = tick(&mut state, &input, &mut rng);
            if report.trapped {
                log::trace!("Trapped at tick {}", state.time_ticks);
            }
        }
        state
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_options() {
            let opts = Options::try_parse_from(["eel-forage", "--seed", "9", "--ticks", "120", "--dump"]).unwrap();
            assert_eq!(opts.seed, 9);
            assert_eq!(opts.max_ticks, 120);
            assert!(opts.dump);
            assert!(opts.levels.is_none());

            let opts = Options::try_parse_from(["eel-forage"]).unwrap();
            assert_eq!(opts.seed, 1);
            assert!(!opts.dump);
        }

        #[test]
        fn test_parse_options_rejects_garbage() {
            assert!(Options::try_parse_from(["eel-forage", "--seed"]).is_err());
            assert!(Options::try_parse_from(["eel-forage", "--seed", "x"]).is_err());
            assert!(Options::try_parse_from(["eel-forage", "--ticks", "0"]).is_err());
            assert!(Options::try_parse_from(["eel-forage", "--fast"]).is_err());
        }

        #[test]
        fn test_run_respects_tick_cap() {
            let opts = Options::try_parse_from(["eel-forage", "--ticks", "30"]).unwrap();
            let state = run(&opts);
            assert!(state.time_ticks <= 30);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let opts = <headless::Options as clap::Parser>::parse();

    let state = headless::run(&opts);
    println!(
        "{} on level {}/{} after {} ticks, {} eggs collected",
        state.phase.as_str(),
        state.level_index + 1,
        state.levels.len(),
        state.time_ticks,
        state.collected
    );

    if opts.dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize state: {}", e),
        }
    }
}
