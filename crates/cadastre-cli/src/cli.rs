use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cadastre_server::StoreBackend;

#[derive(Parser)]
#[command(
    name = "cadastre",
    about = "Cadastre — property registry ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the registry server
    Serve(ServeArgs),
    /// Walk a property lifecycle against an embedded registry
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides the configuration file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Store backend (overrides the configuration file)
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BackendArg {
    Memory,
    WorldState,
}

impl From<BackendArg> for StoreBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Memory => StoreBackend::Memory,
            BackendArg::WorldState => StoreBackend::WorldState,
        }
    }
}

#[derive(Args)]
pub struct DemoArgs {}
