//! Command-line flags. Hand-parsed; unknown flags are ignored.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: Option<PathBuf>,
    pub out_dir: PathBuf,
    /// Upper-cased ticker, when `--symbol` was given.
    pub symbol: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            input: None,
            out_dir: PathBuf::from("callsheet_out"),
            symbol: None,
            config_path: None,
        }
    }
}

impl CliArgs {
    /// Parse flags, excluding the program name.
    pub fn parse_from<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(a) = args.next() {
            match a.as_str() {
                "--input" | "-i" => parsed.input = args.next().map(PathBuf::from),
                "--out" | "-o" => {
                    if let Some(d) = args.next() {
                        parsed.out_dir = PathBuf::from(d);
                    }
                }
                "--symbol" => parsed.symbol = args.next().map(|s| s.trim().to_uppercase()),
                "--config" => parsed.config_path = args.next().map(PathBuf::from),
                _ => {}
            }
        }
        parsed
    }
}

pub fn print_usage() {
    eprintln!("Callsheet: analyst question attribution");
    eprintln!("  --input PATH        Transcript JSON file or directory (required)");
    eprintln!("  --out DIR           Output directory (default ./callsheet_out)");
    eprintln!("  --symbol TICKER     Only process transcripts for this symbol");
    eprintln!("  --config FILE       TOML extraction config (else CALLSHEET_* env vars)");
    eprintln!();
    eprintln!("Log level: RUST_LOG (default info).");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]);
        assert_eq!(args, CliArgs::default());
        assert_eq!(args.out_dir, PathBuf::from("callsheet_out"));
    }

    #[test]
    fn flags_and_short_forms() {
        let args = parse(&["-i", "in", "-o", "out", "--symbol", " msft ", "--config", "c.toml", "--verbose"]);
        assert_eq!(args.input, Some(PathBuf::from("in")));
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.symbol.as_deref(), Some("MSFT"));
        assert_eq!(args.config_path, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn dangling_out_keeps_default() {
        assert_eq!(parse(&["--out"]).out_dir, PathBuf::from("callsheet_out"));
    }
}
