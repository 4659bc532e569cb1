use crate::osmsimp::{
    config,
    document::{self, SimplifyStats},
    error::Error,
    files,
};
use clap::ArgMatches;
use geojson::GeoJson;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

fn log_stats(stats: &SimplifyStats) {
    log::info!(
        "Simplified {} features: {} -> {} coordinates",
        stats.features,
        stats.coords_before,
        stats.coords_after
    );
}

pub fn simplify_file(input: &Path, output: &Path, tolerance: f64) -> Result<SimplifyStats, Error> {
    files::ensure_exists(input)?;
    let gj: GeoJson = std::fs::read_to_string(input)?.parse()?;
    let (simplified, stats) = document::simplify_document(gj, tolerance)?;
    log_stats(&stats);
    files::write_json(output, &simplified, files::INDENT_2)?;
    Ok(stats)
}

fn simplify_stdin(tolerance: f64) -> Result<(), Error> {
    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let gj: GeoJson = raw.parse()?;
    let (simplified, stats) = document::simplify_document(gj, tolerance)?;
    log_stats(&stats);
    println!("{}", serde_json::to_string_pretty(&simplified)?);
    Ok(())
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    let tolerance = match matches.value_of("tolerance") {
        Some(arg) => match config::parse_tolerance(arg) {
            Ok(t) => t,
            Err(e) => {
                eprintln!(
                    "Invalid tolerance: {:?} - must be a non-negative number, e.g. 0.001.",
                    arg
                );
                return Err(e);
            }
        },
        None => return Err(Error::MissingArgument),
    };

    match matches.value_of("input") {
        Some(i) => {
            let input = PathBuf::from(i);
            let output = matches
                .value_of("output")
                .map(PathBuf::from)
                .unwrap_or_else(|| files::simplified_output_path(&input));
            let stats = simplify_file(&input, &output, tolerance)?;
            println!(
                "Simplified {} features ({} -> {} coordinates) into {}",
                stats.features,
                stats.coords_before,
                stats.coords_after,
                output.display()
            );
            Ok(())
        }
        None => simplify_stdin(tolerance),
    }
}
