mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use panactl_core::Coordinator;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    init_tracing(cli.global.verbose);
    cli.global.output =
        config::output_format(&cli.global, &panactl_config::load_config_or_default());

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Commands that never talk to a player
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,
        Command::Commands => commands::commands_list::handle(&cli.global),
        Command::Speed(args) if args.list => commands::speed::list(&cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "panactl", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = panactl_config::load_config()?;
            let device = config::resolve_device(&cli.global, &cfg)?;
            let coordinator = Coordinator::from_config(&device)?;

            tracing::debug!(command = ?cmd, host = %device.host, "dispatching command");
            commands::dispatch(cmd, &coordinator, &cli.global).await
        }
    }
}
