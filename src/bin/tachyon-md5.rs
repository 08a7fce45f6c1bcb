//! Print or check the MD5 signing digest of strings.
//!
//! ```text
//! tachyon-md5 hello world          # one hex digest per argument
//! printf 'abc' | tachyon-md5       # stdin when no argument (or `-`) is given
//! tachyon-md5 --check 5d41402abc4b2a76b9719d911017c592 hello
//! ```

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tachyon_digest::encoding::{Newlines, TextEncoding};
use tachyon_digest::{Digest, DigestOptions, Error, Result};

#[derive(Parser, Debug)]
#[command(name = "tachyon-md5")]
#[command(about = "Compute MD5 request-signing digests of text")]
#[command(version)]
struct Cli {
    /// Strings to digest. `-` or no argument reads stdin.
    inputs: Vec<String>,

    /// How characters are expanded to bytes before hashing.
    #[arg(long, value_enum, default_value_t = Encoding::Utf16Capped)]
    encoding: Encoding,

    /// Rewrite "\r\n" to "\n" before hashing.
    #[arg(long)]
    normalize_crlf: bool,

    /// Compare each digest against HEX instead of printing it.
    #[arg(long, value_name = "HEX")]
    check: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Encoding {
    /// UTF-16 code units, at most 3 bytes each
    Utf16Capped,
    /// Plain UTF-8
    Utf8,
}

impl From<Encoding> for TextEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Utf16Capped => TextEncoding::Utf16Capped,
            Encoding::Utf8 => TextEncoding::Utf8,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_stdin() -> Result<String> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    debug!(len = buf.len(), "read stdin");
    Ok(String::from_utf8(buf)?)
}

/// Returns whether every checked digest matched.
fn run(cli: Cli) -> Result<bool> {
    let options = DigestOptions {
        encoding: cli.encoding.into(),
        newlines: if cli.normalize_crlf {
            Newlines::NormalizeCrlf
        } else {
            Newlines::Preserve
        },
    };
    info!(?options, "digest options");

    let expected = cli.check.as_deref().map(str::parse::<Digest>).transpose()?;

    let inputs = if cli.inputs.is_empty() {
        vec!["-".to_owned()]
    } else {
        cli.inputs
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_matched = true;

    for input in inputs {
        let (label, text) = if input == "-" {
            ("-".to_owned(), read_stdin()?)
        } else {
            (format!("{input:?}"), input)
        };

        match expected {
            Some(expected) => {
                let matched = tachyon_digest::verify(&text, &expected.to_hex(), &options)?;
                all_matched &= matched;
                writeln!(out, "{}: {}", label, if matched { "OK" } else { "FAILED" })?;
            }
            None => writeln!(out, "{}", Digest::of_str(&text, &options))?,
        }
    }

    Ok(all_matched)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(Error::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("tachyon-md5: {error}");
            ExitCode::from(2)
        }
    }
}
