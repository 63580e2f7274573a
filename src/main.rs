use clap::Parser;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

mod cli;
mod commands;

fn main() {
    let cli = cli::Cli::parse();
    init_logging(&cli);
    if let Err(err) = commands::run(cli) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn init_logging(cli: &cli::Cli) {
    let level = cli.log_level.into();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &cli.log_file {
        match std::fs::File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("unable to create log file {}: {}", path.display(), err),
        }
    }
    // Init can only fail if a logger is already installed.
    let _ = CombinedLogger::init(loggers);
}
