use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "job-board",
    about = "Serve the job board API: listings, search sessions, applications",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub port: Option<u16>,
    /// Serve jobs from this JSON file instead of the embedded dataset
    #[arg(long)]
    pub jobs_file: Option<PathBuf>,
}

/// Parse the command line; no subcommand means `serve` with defaults
pub fn parse() -> ServeArgs {
    match Cli::parse().command {
        Some(Command::Serve(args)) => args,
        None => ServeArgs::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_are_parsed() {
        let cli = Cli::parse_from(["job-board", "serve", "--port", "9000", "--jobs-file", "jobs.json"]);
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.host, None);
        assert_eq!(args.jobs_file, Some(PathBuf::from("jobs.json")));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        assert!(Cli::parse_from(["job-board"]).command.is_none());
    }
}
