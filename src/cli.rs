use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ship-lineup",
    version,
    about = "Normalised expected-vessel lineup for the Port of Santos"
)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP service
    Serve,
    /// Fetch once and print the envelope to stdout
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpArgs {
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Include each record's source cells
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
