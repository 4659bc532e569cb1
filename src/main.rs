mod osmsimp;
use osmsimp::commands;
use osmsimp::config::{self, Config};
use osmsimp::error::Error;
use osmsimp::text;

use clap::{App, Arg, ArgMatches, SubCommand};
use std::process;

fn run(matches: ArgMatches) -> Result<(), Error> {
    let config = Config::from_matches(&matches)?;
    log::debug!("{:?}", config);
    match matches.subcommand() {
        ("ls", Some(_)) => commands::ls::run(&config),
        ("query", Some(m)) => commands::query::run(m, &config),
        ("convert", Some(m)) => commands::convert::run(m),
        ("simplify", Some(m)) => commands::simplify::run(m),
        ("menu", Some(_)) | ("", None) => commands::menu::run(&config),
        _ => Err(Error::UnknownCommand),
    }
}

const VERSION: &'static str = env!("CARGO_PKG_VERSION");

fn main() {
    let query = SubCommand::with_name("query")
        .about("Run an Overpass query and save the result as <name>.json")
        .after_help(text::QUERY_AFTER_HELP)
        .arg(
            Arg::with_name("name")
                .help("Output file name, .json is added if missing")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("query")
                .help("Overpass QL query. Read from STDIN when not given.")
                .takes_value(true)
                .long("query")
                .short("q"),
        );

    let convert = SubCommand::with_name("convert")
        .about("Convert Overpass JSON to GeoJSON")
        .arg(
            Arg::with_name("input")
                .help("Overpass JSON file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Output file. Defaults to the input name with a .geojson extension.")
                .takes_value(true)
                .long("output")
                .short("o"),
        );

    let simplify = SubCommand::with_name("simplify")
        .about("Reduce vertices of GeoJSON lines and polygons")
        .after_help(text::SIMPLIFY_AFTER_HELP)
        .arg(
            Arg::with_name("tolerance")
                .help("Maximum distance a removed vertex may lie from the simplified line, e.g. 0.001")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("input")
                .help("GeoJSON file to simplify. Reads STDIN when not given.")
                .takes_value(true)
                .long("input")
                .short("i"),
        )
        .arg(
            Arg::with_name("output")
                .help("Output file. Defaults to <input>_simplified.geojson.")
                .takes_value(true)
                .long("output")
                .short("o")
                .requires("input"),
        );

    let matches = App::new("osmsimp")
        .version(VERSION)
        .about(text::MAIN_ABOUT)
        .after_help(text::MAIN_AFTER_HELP)
        .arg(
            Arg::with_name("verbose")
                .help("Log more, repeat for even more (-vv)")
                .short("v")
                .multiple(true)
                .global(true),
        )
        .arg(
            Arg::with_name("overpass-url")
                .help("Overpass API interpreter endpoint")
                .long("overpass-url")
                .env("OVERPASS_URL")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("timeout")
                .help("Overpass request timeout in seconds")
                .long("timeout")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("dir")
                .help("Directory to list and resolve file names in")
                .long("dir")
                .short("d")
                .takes_value(true)
                .global(true),
        )
        .subcommand(SubCommand::with_name("menu").about("Interactive menu (the default)"))
        .subcommand(SubCommand::with_name("ls").about("List json and geojson files"))
        .subcommand(query)
        .subcommand(convert)
        .subcommand(simplify)
        .get_matches();

    env_logger::Builder::new()
        .filter_level(config::log_level(config::verbosity(&matches)))
        .format_timestamp(None)
        .parse_default_env()
        .init();

    if let Err(e) = run(matches) {
        eprintln!("Application error: {:?}", e);
        process::exit(1);
    }
}
