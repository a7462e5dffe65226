mod auth;
mod output;
mod records;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::services::{FileSessionGate, MemorySessionGate, Session, SessionGate};
use crate::store::{self, RecordStore};
use crate::tui;

pub use auth::LoginArgs;
pub use records::{BookingsCommand, ClientsCommand, PaymentsCommand, RatingsArgs, SuppliersCommand};

/// Admin console for the EventEase marketplace
#[derive(Parser)]
#[command(name = "eventease-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.eventease-admin/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use a JSON snapshot instead of Firestore
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Keep the login in memory only
    #[arg(long, global = true)]
    no_persist_session: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Log in with the configured admin credentials
    Login(LoginArgs),

    /// Clear the saved session
    Logout,

    /// Show per-offering rating summaries
    Ratings(RatingsArgs),

    /// Review supplier accounts
    #[command(subcommand)]
    Suppliers(SuppliersCommand),

    /// Manage client accounts
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Review pending bookings
    #[command(subcommand)]
    Bookings(BookingsCommand),

    /// Show payment history
    #[command(subcommand)]
    Payments(PaymentsCommand),
}

/// Everything a command needs, built once per invocation
pub struct Context {
    pub config: Config,
    pub session: Session,
}

impl Context {
    /// Open the configured store; fails unless logged in
    pub fn authorized_store(&self) -> crate::types::Result<Box<dyn RecordStore>> {
        self.session.require()?;
        store::open(&self.config)
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let is_tui = matches!(self.command, None | Some(Commands::Tui));
        logging::init(if is_tui {
            LogTarget::File
        } else {
            LogTarget::Stderr
        })?;

        let ctx = self.context()?;
        match self.command {
            None | Some(Commands::Tui) => {
                let store = Arc::from(store::open(&ctx.config)?);
                tui::run(ctx.session, store, ctx.config.refresh_interval())
            }
            Some(Commands::Login(args)) => args.run(ctx),
            Some(Commands::Logout) => auth::logout(ctx),
            Some(Commands::Ratings(args)) => args.run(&ctx),
            Some(Commands::Suppliers(cmd)) => cmd.run(&ctx),
            Some(Commands::Clients(cmd)) => cmd.run(&ctx),
            Some(Commands::Bookings(cmd)) => cmd.run(&ctx),
            Some(Commands::Payments(cmd)) => cmd.run(&ctx),
        }
    }

    fn context(&self) -> anyhow::Result<Context> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(path) = &self.data {
            config = config.with_data_file(path.clone());
        }

        let gate: Box<dyn SessionGate> = if self.no_persist_session {
            Box::new(MemorySessionGate::default())
        } else {
            Box::new(FileSessionGate::new()?)
        };
        let session = Session::new(gate, config.credentials().cloned());
        Ok(Context { config, session })
    }
}
