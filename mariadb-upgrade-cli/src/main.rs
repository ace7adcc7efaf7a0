//! Interactive front end for the MariaDB upgrade advisor.
//!
//! Prompts for whatever connection details were not given on the command line
//! (the password is always prompted, without echo), connects, and prints the
//! advisory reports for the upgrade to the requested target version.

use std::io::{self, BufRead, Write};

use clap::Parser;
use mariadb_upgrade::{Advisor, ConnectionSettings, MysqlConnector, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "mariadb-upgrade")]
#[command(about = "Plan a MariaDB upgrade to 10.11", long_about = None)]
struct CliArgs {
    /// Server hostname (prompted if omitted)
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// User to connect as (prompted if omitted)
    #[arg(long)]
    user: Option<String>,

    /// Target version, e.g. 10.11 (prompted if omitted)
    #[arg(long)]
    target: Option<String>,

    /// Log more to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let host = match args.host {
        Some(host) => host,
        None => prompt(&mut input, &mut stdout, "Enter hostname: ")?,
    };
    let user = match args.user {
        Some(user) => user,
        None => prompt(&mut input, &mut stdout, "Enter username: ")?,
    };
    let password = rpassword::prompt_password("Enter password: ")?;
    let target = match args.target {
        Some(target) => target,
        None => prompt(&mut input, &mut stdout, "Enter target version: ")?,
    };

    let connector =
        MysqlConnector::new(ConnectionSettings::new(host, user, password).with_port(args.port));
    Advisor::new(&connector).run(&target, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Print `label`, then read one line, stripping the line terminator.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<String> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("no input for '{}'", label.trim_end_matches([':', ' '])),
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_strips_line_terminator() {
        let mut input = io::Cursor::new("db1.internal\r\n");
        let mut out = Vec::new();

        let value = prompt(&mut input, &mut out, "Enter hostname: ").unwrap();

        assert_eq!(value, "db1.internal");
        assert_eq!(out, b"Enter hostname: ");
    }

    #[test]
    fn prompt_fails_on_closed_input() {
        let mut input = io::Cursor::new("");
        let mut out = Vec::new();

        let err = prompt(&mut input, &mut out, "Enter target version: ").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("Enter target version"));
    }

    #[test]
    fn arguments_are_optional() {
        let args = CliArgs::try_parse_from(["mariadb-upgrade"]).unwrap();
        assert_eq!(args.host, None);
        assert_eq!(args.user, None);
        assert_eq!(args.target, None);
        assert_eq!(args.port, 3306);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn arguments_prefill_prompts() {
        let args = CliArgs::try_parse_from([
            "mariadb-upgrade",
            "--host",
            "db1",
            "--user",
            "admin",
            "--target",
            "10.11",
            "--port",
            "3307",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.host.as_deref(), Some("db1"));
        assert_eq!(args.user.as_deref(), Some("admin"));
        assert_eq!(args.target.as_deref(), Some("10.11"));
        assert_eq!(args.port, 3307);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn password_is_not_an_argument() {
        assert!(CliArgs::try_parse_from(["mariadb-upgrade", "--password", "x"]).is_err());
    }
}
