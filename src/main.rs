use clap::{Parser, Subcommand};
use log::{error, info};
use tokio_util::sync::CancellationToken;

use uptimerobot::{Client, Config, DebugMode, Error, Monitor, Tracer};

#[derive(Parser, Debug)]
#[command(name = "uptimerobot")]
#[command(version, about = "Command-line client for the UptimeRobot v2 API", long_about = None)]
struct Cli {
    /// UptimeRobot API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Dump every API request and response to stdout
    #[arg(short, long, global = true)]
    debug: bool,

    /// Show API requests without making them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show account details
    Account,
    /// List alert contacts
    Contacts,
    /// List all monitors
    Monitors,
    /// Find monitors whose name or URL match the text
    Search { text: String },
    /// Show the monitor with the given ID
    Get { id: i64 },
    /// Add a new HTTP monitor
    New {
        url: String,
        name: String,
        /// Comma-separated list of alert contact IDs to notify
        #[arg(short, long, value_delimiter = ',')]
        contacts: Vec<String>,
    },
    /// Add a new HTTP monitor unless one for the URL already exists
    Ensure {
        url: String,
        name: String,
        /// Comma-separated list of alert contact IDs to notify
        #[arg(short, long, value_delimiter = ',')]
        contacts: Vec<String>,
    },
    /// Pause a monitor
    Pause { id: i64 },
    /// Resume a paused monitor
    Start { id: i64 },
    /// Delete a monitor
    Delete { id: i64 },
    /// Show the version
    Version,
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    if matches!(cli.command, Command::Version) {
        println!("uptimerobot {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(api_key) = cli.api_key {
        config.api_key = api_key;
    }
    config.debug |= cli.debug;
    config.validate()?;

    let token = CancellationToken::new();
    let mut client = Client::from_config(&config)?.with_cancellation(token.clone());
    if cli.dry_run {
        client = client.with_tracer(Tracer::stdout(DebugMode::DryRun));
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling request");
            token.cancel();
        }
    });

    match cli.command {
        Command::Account => println!("{}", client.account().await?),
        Command::Contacts => {
            let contacts = client.alert_contacts().await?;
            if contacts.is_empty() {
                println!("No contacts found");
            }
            for contact in contacts {
                println!("{contact}\n");
            }
        }
        Command::Monitors => match client.all_monitors().await {
            Ok(monitors) => print_monitors(&monitors),
            Err(partial) => {
                print_monitors(&partial.monitors);
                return Err(partial.into());
            }
        },
        Command::Search { text } => print_monitors(&client.search_monitors(&text).await?),
        Command::Get { id } => println!("{}", client.monitor(id).await?),
        Command::New {
            url,
            name,
            contacts,
        } => {
            let id = client.create_monitor(&new_monitor(url, name, contacts)).await?;
            println!("New monitor created with ID {id}");
        }
        Command::Ensure {
            url,
            name,
            contacts,
        } => {
            let id = client.ensure_monitor(&new_monitor(url, name, contacts)).await?;
            println!("Monitor ID {id}");
        }
        Command::Pause { id } => {
            let monitor = client.pause_monitor(id).await?;
            println!("Monitor ID {} paused", monitor.id);
        }
        Command::Start { id } => {
            let monitor = client.resume_monitor(id).await?;
            println!("Monitor ID {} resumed", monitor.id);
        }
        Command::Delete { id } => {
            client.delete_monitor(id).await?;
            println!("Monitor ID {id} deleted");
        }
        Command::Version => unreachable!("handled before configuration is loaded"),
    }
    Ok(())
}

fn new_monitor(url: String, name: String, contacts: Vec<String>) -> Monitor {
    Monitor {
        alert_contacts: contacts,
        ..Monitor::http(url, name)
    }
}

fn print_monitors(monitors: &[Monitor]) {
    if monitors.is_empty() {
        println!("No matching monitors found");
    }
    for monitor in monitors {
        println!("{monitor}\n");
    }
}
