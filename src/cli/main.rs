use std::{
    io::{BufReader, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::ArgMatches;

use cnfident::{
    builder::{self, write::check_sanitized, write::write_dimacs},
    config::{GateConfig, WlConfig},
    db::store::PointerStore,
    features,
    gates::GateAnalyzer,
    identify,
    types::err::{self, ErrorKind, LimitError},
};

mod parse_args;

fn main() -> ExitCode {
    env_logger::init();

    let matches = parse_args::cli().get_matches();
    let (tool, sub_matches) = match matches.subcommand() {
        Some(pair) => pair,
        None => return ExitCode::from(2),
    };

    let file: &PathBuf = match sub_matches.get_one("file") {
        Some(path) => path,
        None => return ExitCode::from(2),
    };

    log::info!("Running: {tool} {}", file.display());

    match run_tool(tool, file, sub_matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ ErrorKind::Limit(_)) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

fn run_tool(tool: &str, file: &Path, matches: &ArgMatches) -> Result<(), ErrorKind> {
    let verbose = matches.get_flag("verbose");

    match tool {
        "gbdhash" => {
            println!("{}", identify::gbd_hash(file)?);
        }

        "isohash" => {
            let config = WlConfig {
                depth: *matches.get_one("depth").unwrap_or(&13),
                measurements: verbose,
                ..WlConfig::default()
            };
            println!("{}", identify::iso_hash(file, &config)?);
        }

        "id" => match builder::content_extension(file) {
            Some("cnf") | Some("wecnf") => {
                log::info!("Detected CNF, using CNF hash");
                println!("{}", identify::gbd_hash(file)?);
            }
            _ => {
                eprintln!("Unrecognized content type: {}", file.display());
                return Err(ErrorKind::Io(std::io::ErrorKind::InvalidInput));
            }
        },

        "normalize" => {
            let (store, _) = builder::normalized_store_from_path::<PointerStore>(file)?;
            emit(matches, |sink| write_dimacs(sink, &store))?;
        }

        "sanitize" => {
            let store: PointerStore = builder::store_from_path(file)?;
            emit(matches, |sink| write_dimacs(sink, &store))?;
        }

        "checksani" => {
            let reader = BufReader::new(builder::open_dimacs(file)?);
            if !check_sanitized(reader)? {
                eprintln!("{} needs sanitization", file.display());
            }
        }

        "extract" => {
            for (name, value) in features::extract_base_features(file)? {
                println!("{name}={value}");
            }
        }

        "gates" => {
            let store: PointerStore = builder::store_from_path(file)?;
            let config = GateConfig {
                tries: *matches.get_one("repeat").unwrap_or(&1),
                time_limit: time_limit(matches),
                ..GateConfig::default()
            };
            let analyzer = GateAnalyzer::new(&store, config)?;
            let gate_formula = analyzer.analyze();

            if !gate_formula.complete {
                return Err(ErrorKind::from(LimitError::Time));
            }
            if verbose {
                eprintln!(
                    "Found {} gates of which {} are monotonic",
                    gate_formula.gate_count(),
                    gate_formula.monotonic_gate_count()
                );
                eprintln!("Number of root clauses is {}", gate_formula.root_count());
            }
            for (name, value) in features::gate_features(&gate_formula, &store) {
                println!("{name}={value}");
            }
        }

        _ => return Err(ErrorKind::Io(std::io::ErrorKind::InvalidInput)),
    }

    Ok(())
}

fn time_limit(matches: &ArgMatches) -> Option<std::time::Duration> {
    match matches.get_one::<u64>("timeout") {
        Some(0) | None => None,
        Some(seconds) => Some(std::time::Duration::from_secs(*seconds)),
    }
}

/// Write through the `-o` choice, respecting the generated-file-size budget.
fn emit(
    matches: &ArgMatches,
    write: impl Fn(&mut Vec<u8>) -> Result<(), ErrorKind>,
) -> Result<(), ErrorKind> {
    let mut buffer = Vec::default();
    write(&mut buffer)?;

    if let Some(megabytes) = matches.get_one::<u64>("fileout") {
        if *megabytes > 0 && buffer.len() as u64 > megabytes * 1024 * 1024 {
            return Err(ErrorKind::from(err::LimitError::FileSize));
        }
    }

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            file.write_all(&buffer)?;
        }
        None => {
            std::io::stdout().write_all(&buffer)?;
        }
    }
    Ok(())
}
