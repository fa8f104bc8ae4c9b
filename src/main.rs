use clap::Parser;
use color_eyre::Result;
use novelsplit::{app::App, args::Options, logging};

fn main() -> Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    logging::init(options.log_level.as_deref())?;

    App::new(options.resolve()).run()?;
    Ok(())
}
