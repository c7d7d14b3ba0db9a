use clap::{Parser, Subcommand};
use glue_logger as logger;
use gluemeister::{
    commands::{
        config::{self, ConfigAction},
        resolve::{self, ResolveCommand},
    },
    GlobalOpts,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gluemeister")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "GlueMeister manifest resolver",
    long_about = "GlueMeister resolves glue manifests against a host's symbols and checks that generated code can reach them."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve manifests and print the resolved model as JSON
    Resolve(ResolveCommand),
    /// Configure gluemeister
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log file lives next to the config file.
    let log_file = glue_config::Config::path()
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.join("gluemeister.log")));
    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), log_file) {
        logger::warn(&format!("Failed to initialize logger: {}", e));
    }

    let result: anyhow::Result<()> = match cli.command {
        Commands::Resolve(cmd) => resolve::handle_resolve(cmd, &cli.global).map_err(Into::into),
        Commands::Config { action } => config::handle_config(action, &cli.global).map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::error(&e.to_string());
            for cause in e.chain().skip(1) {
                logger::debug(&format!("caused by: {}", cause));
            }
            ExitCode::FAILURE
        }
    }
}
