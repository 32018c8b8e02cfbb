//! Command-line definition.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bliss-harness")]
#[command(version, about = "Deterministic BLISS-B test-vector harness", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Which BLISS-B parameter set to use (0..4)
    #[arg(
        short = 'k',
        long = "kind",
        global = true,
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=4)
    )]
    pub kind: u32,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Generate a private key and print s1, s2, a
    Keygen,
    /// Generate a key, sign the fixed message and print the signature
    Sign,
    /// Generate a key, read z1, z2, c from stdin and verify them
    Verify,
    /// Sample a Gaussian vector and print it before and after bit dropping
    Dropbits,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_after_subcommand() {
        let cli = Cli::try_parse_from(["bliss-harness", "sign", "-k", "3"]).unwrap();
        assert_eq!(cli.command, Command::Sign);
        assert_eq!(cli.kind, 3);
    }

    #[test]
    fn test_default_kind() {
        let cli = Cli::try_parse_from(["bliss-harness", "dropbits"]).unwrap();
        assert_eq!(cli.command, Command::Dropbits);
        assert_eq!(cli.kind, 0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["bliss-harness", "keygen", "-k", "5"]).is_err());
        assert!(Cli::try_parse_from(["bliss-harness", "keygen", "-k", "x"]).is_err());
        assert!(Cli::try_parse_from(["bliss-harness", "dropbit"]).is_err());
        assert!(Cli::try_parse_from(["bliss-harness"]).is_err());
    }
}
