//! Native entry point: runs a toolbar script from a file or stdin.
//!
//! Usage: `thinkboard [--config settings.json] [script.txt]`

#[cfg(feature = "native")]
fn main() {
    use std::io::{self, BufRead};
    use thinkboard_app::{parse_line, AppConfig, Session};
    use thinkboard_core::theme::FileThemeStore;
    use thinkboard_core::{MemoryThemeStore, ThemeStore};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    let mut script_path = None;
    while let Some(arg) = args.next() {
        if arg == "--config" {
            config_path = args.next();
        } else {
            script_path = Some(arg);
        }
    }

    let config = match config_path {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| AppConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    log::info!("Starting {}", config.title);

    let store = match &config.preferences_dir {
        Some(dir) => FileThemeStore::new(dir.clone()),
        None => FileThemeStore::default_location(),
    };
    let store: Box<dyn ThemeStore> = match store {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("Theme preference will not persist: {}", err);
            Box::new(MemoryThemeStore::new())
        }
    };

    let input: Box<dyn BufRead> = match &script_path {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(io::BufReader::new(file)),
            Err(err) => {
                log::error!("Failed to open {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Box::new(io::BufReader::new(io::stdin())),
    };

    let mut session = Session::new(&config, store);
    for (number, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read input: {}", err);
                break;
            }
        };
        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("line {}: {}", number + 1, err);
                continue;
            }
        };
        match pollster::block_on(session.apply(action)) {
            Ok(Some(text)) => println!("{}", text),
            Ok(None) => {}
            Err(err) => eprintln!("line {}: {}", number + 1, err),
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
