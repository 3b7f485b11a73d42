use std::error::Error;

use chrono::Local;
use clap::Parser;
use log::info;
use rand::thread_rng;

use sales_history::config::GeneratorConfig;
use sales_history::generator::SalesGenerator;
use sales_history::report::{write_csv_path, Summary, DEFAULT_OUTPUT_FILE};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The file to write the generated sales history to
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub(crate) output_file: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let generator = SalesGenerator::new(GeneratorConfig::default())?;
    let mut rng = thread_rng();
    let history = generator.generate(Local::now().date_naive(), &mut rng)?;

    write_csv_path(history.records(), &cli.output_file)?;
    info!("Wrote sales history to {}", cli.output_file);

    println!("{}", Summary::new(&history, cli.output_file));

    Ok(())
}
