use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "healthcheckup")]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs all configured checks once and prints the report.
    Check,
    /// Commands related to the web server.
    Server {
        #[command(subcommand)]
        command: Option<ServerCommands>,
    },
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help = true)]
pub enum ServerCommands {
    /// Starts the web server.
    Start,
    /// Returns whether the web server is running.
    Status,
    /// Prints the health report of the running web server.
    Report,
}
