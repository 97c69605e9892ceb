use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ticket_to_now::commands;
use ticket_to_now::commands::draw::FollowUp;
use ticket_to_now::config::Config;
use ticket_to_now::controller::App;
use ticket_to_now::terminal::{self, TerminalView};

const LOG_ENV: &str = "TICKET_TO_NOW_LOG";

#[derive(Parser)]
#[command(name = "ticket-to-now")]
#[command(about = "Draw a ticket to the present moment")]
#[command(version)]
struct Cli {
    /// Directory holding the local store (default: nearest .ticket-to-now)
    #[arg(long, global = true, env = "TICKET_TO_NOW_DIR")]
    data_dir: Option<PathBuf>,

    /// Ticket catalog JSON (default: built-in catalog)
    #[arg(long, global = true, env = "TICKET_TO_NOW_TICKETS")]
    tickets: Option<PathBuf>,

    /// Breath pattern JSON (default: built-in patterns)
    #[arg(long, global = true, env = "TICKET_TO_NOW_BREATH")]
    breath: Option<PathBuf>,

    /// Breathing animation steps per second
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=60))]
    fps: u32,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .ticket-to-now directory here
    Init,

    /// Draw the ticket with the given number (1-500)
    Draw {
        /// Ticket number
        number: String,
        #[command(flatten)]
        follow_up: FollowUpArgs,
    },

    /// Draw a random ticket from the catalog
    Random {
        #[command(flatten)]
        follow_up: FollowUpArgs,
    },

    /// List saved tickets, newest first
    Saved,

    /// Reopen a ticket by number
    Open {
        /// Ticket number
        id: u32,
    },

    /// Show the ticket drawn today
    Today,

    /// Interactive session (default)
    Interactive,
}

#[derive(clap::Args)]
struct FollowUpArgs {
    /// Save the ticket
    #[arg(short, long)]
    save: bool,
    /// Copy the ticket text to share it
    #[arg(short = 'p', long)]
    share: bool,
    /// Start a breathing practice afterwards
    #[arg(short, long)]
    breathe: bool,
}

impl From<FollowUpArgs> for FollowUp {
    fn from(args: FollowUpArgs) -> Self {
        FollowUp {
            save: args.save,
            share: args.share,
            breathe: args.breathe,
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn get_app(config: &Config) -> Result<App<TerminalView<Stdout>>> {
    let store = config.open_store()?;
    let catalogs = config.load_catalogs();
    let mut app = App::new(store, catalogs, terminal::platform(), TerminalView::stdout());
    app.start()?;
    Ok(app)
}

/// Ctrl-C raises this flag instead of killing the process, so a breathing
/// practice can end cleanly.
fn stop_flag() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))
        .context("Failed to install Ctrl-C handler")?;
    Ok(stop)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = Config {
        data_dir: cli.data_dir,
        tickets: cli.tickets,
        breath: cli.breath,
        fps: cli.fps,
    };
    let frame_interval = config.frame_interval();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Init => {
            let cwd = env::current_dir()?;
            commands::init::run(&cwd)
        }

        Commands::Draw { number, follow_up } => {
            let stop = stop_flag()?;
            let mut app = get_app(&config)?;
            commands::draw::run(&mut app, &number, follow_up.into(), frame_interval, &stop)
        }

        Commands::Random { follow_up } => {
            let stop = stop_flag()?;
            let mut app = get_app(&config)?;
            commands::draw::run_random(&mut app, follow_up.into(), frame_interval, &stop)
        }

        Commands::Saved => {
            let mut app = get_app(&config)?;
            commands::saved::list(&mut app)
        }

        Commands::Open { id } => {
            let mut app = get_app(&config)?;
            commands::saved::open(&mut app, id)
        }

        Commands::Today => {
            let store = config.open_store()?;
            commands::today::run(&store, &mut io::stdout())
        }

        Commands::Interactive => {
            let stop = stop_flag()?;
            let mut app = get_app(&config)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            commands::interactive::run(&mut app, stdin.lock(), &mut stdout, frame_interval, &stop)
        }
    }
}
