use clap::{Parser, Subcommand};

/// Job board REST service
#[derive(Parser, Debug)]
#[command(name = "jobboard", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply pending migrations, then serve HTTP (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["jobboard"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::try_parse_from(["jobboard", "migrate"]).unwrap();
        assert_eq!(cli.command(), Command::Migrate);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["jobboard", "seed"]).is_err());
    }
}
