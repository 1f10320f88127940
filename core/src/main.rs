use clap::Parser;
use log::error;
use std::process;
use volpreview_core::cli::Cli;
use volpreview_core::VolumePipeline;

const DISPLAY_TITLE: &str = concat!(
    "volpreview ",
    env!("CARGO_PKG_VERSION"),
    " - brain volume reports and slice previews"
);

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    eprintln!("{}", DISPLAY_TITLE);

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let pipeline = match VolumePipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = pipeline.run(&cli.input_dir, &cli.output_dir) {
        error!("{}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
