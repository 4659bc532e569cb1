use crate::osmsimp::{config::Config, error::Error, menu};
use std::io;

pub fn run(config: &Config) -> Result<(), Error> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(config, &mut stdin.lock(), &mut stdout.lock())
}
