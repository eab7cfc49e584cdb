use anyhow::Result;
use clap::Parser;

use tasklist::logging::{init_tracing, LogSink};

fn main() -> Result<()> {
    let cli = tasklist::cli::Cli::parse();
    let config = tasklist::AppConfig::from_cli(&cli);

    match cli.command {
        Some(tasklist::cli::CliCommand::Tui) | None => {
            init_tracing(&config, LogSink::FileOnly)?;
            tasklist::tui::run(config)?;
        }
        Some(command) => {
            init_tracing(&config, LogSink::Stderr)?;
            let stdout = std::io::stdout();
            let handle = stdout.lock();
            tasklist::commands::execute(&config, command, handle)?;
        }
    }

    Ok(())
}
