//! Proprel CLI - Command-line interface for the property relationship engine.

use clap::Parser;
use proprel_cli::commands;
use proprel_cli::config::OutputFormat;
use proprel_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    if let Err(e) = run(cli.command, &config, &formatter) {
        let message = formatter.format_failure(&e.to_string());
        match formatter.format() {
            OutputFormat::Json => println!("{}", message),
            OutputFormat::Text => eprintln!("{}", message),
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &Config, formatter: &Formatter) -> proprel_cli::Result<()> {
    match command {
        Command::Check(args) => commands::execute_check(args, formatter),
        Command::Validate(args) => commands::execute_validate(args, config, formatter),
        Command::Recommend(args) => commands::execute_recommend(args, config, formatter),
    }
}
