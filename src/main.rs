use clap::Parser;
use dotenv::dotenv;
use healthcheckup::cli::{self, Commands, ServerCommands};
use healthcheckup::config::CONFIG;
use healthcheckup::server::Server;
use healthcheckup::{checks, client, Registry};
use log::{debug, error, info};
use std::process::exit;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    debug!("Config: {:?}", *CONFIG);

    // Parse the CLI arguments.
    let args = cli::Cli::parse();
    debug!("Parsed args: {:?}", args);

    let registry = Arc::new(Registry::new());
    if let Err(e) = checks::register_configured(&registry, &CONFIG) {
        error!("Failed to register checks: {}", e);
        exit(1);
    }

    let mut server = Server::new(Arc::clone(&registry));
    match args.command {
        Some(Commands::Check) => {
            let report = registry.checkup().await;
            println!("{}", report);
            if !report.is_healthy() {
                exit(1);
            }
        }
        Some(Commands::Server { command }) => match command {
            Some(ServerCommands::Start) => {
                if server.start().await.is_err() {
                    exit(1);
                }
            }
            Some(ServerCommands::Status) => {
                if client::is_running().await {
                    println!("running");
                } else {
                    println!("not running");
                }
            }
            Some(ServerCommands::Report) => match client::get_report().await {
                Ok(report) => {
                    println!("{}", report);
                    if !report.is_healthy() {
                        exit(1);
                    }
                }
                Err(e) => {
                    error!("Failed to get report: {}", e);
                    exit(1);
                }
            },
            None => {}
        },
        None => {}
    }

    if !server.is_running() {
        debug!("Exiting.");
        return;
    }

    // The server has been started, keep it running until a Ctrl+C signal is received.
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    } else {
        info!("Received SIGINT, shutting down.");
    }
    server.stop().await;
}
