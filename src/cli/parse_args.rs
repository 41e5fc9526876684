use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub fn cli() -> Command {
    Command::new("cnfident")
        .about("Identifies and analyzes DIMACS CNF formulas")
        .subcommand_required(true)

        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .num_args(1)
            .global(true)
            .help("Path to the output file (default is stdout)."))

        .arg(Arg::new("timeout")
            .short('t')
            .long("timeout")
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .global(true)
            .help("Wall-clock budget in seconds (default: 0, disabled).")
            .long_help("Wall-clock budget in seconds (default: 0, disabled).

An exceeded budget stops the running analysis and exits with code 1.
Gate recognition reports the partial gate formula gathered so far as incomplete."))

        .arg(Arg::new("memout")
            .short('m')
            .long("memout")
            .value_name("MEGABYTES")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .global(true)
            .help("Memory budget in megabytes (default: 0, disabled)."))

        .arg(Arg::new("fileout")
            .short('f')
            .long("fileout")
            .value_name("MEGABYTES")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .global(true)
            .help("Maximum generated file size in megabytes (default: 0, disabled)."))

        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .required(false)
            .global(true)
            .help("Verbose output.
For isohash this appends parse time, calculation time, memory, and iteration count."))

        .arg(Arg::new("repeat")
            .short('r')
            .long("repeat")
            .value_name("ROUNDS")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .global(true)
            .help("Number of root selection rounds for gate recognition (default: 1)."))

        .subcommand(file_command("gbdhash")
            .about("Print the GBD hash of the formula, a digest of the name-normalized clause text."))

        .subcommand(file_command("isohash")
            .about("Print the Weisfeiler-Leman hash of the formula.")
            .long_about("Print the Weisfeiler-Leman hash of the formula.

The hash is invariant under variable renaming and polarity flips, so isomorphic
formulas receive equal hashes (though equal hashes do not prove isomorphism).")
            .arg(Arg::new("depth")
                .long("depth")
                .value_parser(value_parser!(u32))
                .required(false)
                .num_args(1)
                .help("Maximum refinement half-iterations (default: 13).")))

        .subcommand(file_command("id")
            .about("Print the identifying hash matching the file's content type."))

        .subcommand(file_command("normalize")
            .about("Emit the formula with variables renamed to a gapless range."))

        .subcommand(file_command("sanitize")
            .about("Emit the formula with canonical clauses.")
            .long_about("Emit the formula with canonical clauses.

Literals are sorted, duplicate literals dropped, tautological and empty clauses
removed, and the header recomputed."))

        .subcommand(file_command("checksani")
            .about("Report whether sanitization would change the file."))

        .subcommand(file_command("extract")
            .about("Print base features of the formula, one name=value per line."))

        .subcommand(file_command("gates")
            .about("Run gate recognition and print gate features, one name=value per line."))
}

fn file_command(name: &'static str) -> Command {
    Command::new(name).arg(
        Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Path to the input file, optionally compressed (.xz, .lzma, .gz, .bz2)."),
    )
}
