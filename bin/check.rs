use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process;

use clap::{App, Arg};

use mal_checker::error::render;
use mal_checker::report::{identifier_inventory, write_report};
use mal_checker::{validate, Program};

fn main() {
    let matches = App::new("check_mal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A syntax checker for the MAL teaching assembly language")
        .arg(Arg::with_name("PROGRAM")
            .help("Path of the MAL program to check, without the .mal extension")
            .required(true))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .help("Suppress console diagnostics; only write the log file"))
        .get_matches();

    let base = matches.value_of("PROGRAM").unwrap();
    match run(base, matches.is_present("quiet")) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(error) => {
            eprintln!("check_mal: {}", error);
            process::exit(2);
        }
    }
}

fn run(base: &str, quiet: bool) -> io::Result<usize> {
    let input_name = format!("{}.mal", base);
    let output_name = format!("{}.log", base);

    let source = fs::read_to_string(&input_name)?;
    let program = Program::parse(&source);
    let diagnostics = validate(&program);
    let identifiers = identifier_inventory(&program);

    if !quiet {
        for diagnostic in &diagnostics {
            let line = diagnostic
                .line
                .and_then(|number| program.lines.iter().find(|line| line.number == number));
            println!("{}\n", render(diagnostic, line.map(|l| l.src), Some(input_name.as_str())));
        }
    }

    let log = BufWriter::new(File::create(&output_name)?);
    let tally = write_report(log, &program, &diagnostics, &identifiers,
                             &input_name, &output_name)?;

    println!("Finished creating the log for {}", input_name);
    Ok(tally.total_errors())
}
