use crate::osmsimp::{error::Error, files, osm};
use clap::ArgMatches;
use geojson::GeoJson;
use std::path::{Path, PathBuf};

/// Converts an Overpass JSON file to GeoJSON, returning the number of features written.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize, Error> {
    let data: osm::OsmData = files::read_json(input)?;
    let fc = osm::to_feature_collection(&data);
    let count = fc.features.len();
    files::write_json(output, &GeoJson::from(fc), files::INDENT_4)?;
    Ok(count)
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = match matches.value_of("input") {
        Some(i) => PathBuf::from(i),
        None => return Err(Error::MissingArgument),
    };
    let output = matches
        .value_of("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| files::geojson_output_path(&input));

    let count = convert_file(&input, &output)?;
    println!("Wrote {} features to {}", count, output.display());
    Ok(())
}
