use crate::osmsimp::{config::Config, error::Error, files, overpass};
use clap::ArgMatches;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub fn run_to_file(config: &Config, query: &str, output: &Path) -> Result<(), Error> {
    let data = overpass::fetch(&config.overpass, query)?;
    files::write_json(output, &data, files::INDENT_2)?;
    Ok(())
}

pub fn output_path(config: &Config, name: &str) -> PathBuf {
    files::query_output_path(&config.workdir, name)
}

pub fn run(matches: &ArgMatches, config: &Config) -> Result<(), Error> {
    let name = matches.value_of("name").ok_or(Error::MissingArgument)?;
    let query = match matches.value_of("query") {
        Some(q) => q.to_string(),
        None => {
            let mut q = String::new();
            io::stdin().read_to_string(&mut q)?;
            q
        }
    };

    let output = output_path(config, name);
    run_to_file(config, &query, &output)?;
    println!("Query results saved to {}", output.display());
    Ok(())
}
