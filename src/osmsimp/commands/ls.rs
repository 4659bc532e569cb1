use crate::osmsimp::{config::Config, error::Error, files};

pub fn run(config: &Config) -> Result<(), Error> {
    for name in files::list_data_files(&config.workdir)? {
        println!("{}", name);
    }
    Ok(())
}
