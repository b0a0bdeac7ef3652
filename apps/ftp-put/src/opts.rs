//! Command line parsing.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgMatches, Command, ValueHint, value_parser};
use ftpput_upload::UploaderConfig;

const ARGS_CONFIG_FILE: &str = "config-file";
const ARGS_HOST: &str = "host";
const ARGS_USER: &str = "user";
const ARGS_PASSWORD: &str = "password";
const ARGS_PORT: &str = "port";
const ARGS_TIMEOUT: &str = "timeout";
const ARGS_LOCAL: &str = "local";
const ARGS_REMOTE: &str = "remote";

/// Environment variable consulted for the password when none is given.
pub const PASSWORD_ENV: &str = "FTPPUT_PASSWORD";

#[derive(Debug)]
pub struct ProcArgs {
    pub config: UploaderConfig,
    pub local: PathBuf,
    pub remote: String,
}

fn build_cli_args() -> Command {
    Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Upload one file to an FTP server, creating missing directories")
        .arg(
            Arg::new(ARGS_CONFIG_FILE)
                .help("TOML file with connection settings")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .short('c')
                .long("config-file"),
        )
        .arg(
            Arg::new(ARGS_HOST)
                .help("Server host name or address")
                .num_args(1)
                .value_name("HOST")
                .value_hint(ValueHint::Hostname)
                .short('H')
                .long("host"),
        )
        .arg(
            Arg::new(ARGS_USER)
                .help("Login user")
                .num_args(1)
                .value_name("USER")
                .short('u')
                .long("user"),
        )
        .arg(
            Arg::new(ARGS_PASSWORD)
                .help("Login password (default: $FTPPUT_PASSWORD, then empty)")
                .num_args(1)
                .value_name("PASSWORD")
                .short('p')
                .long("password"),
        )
        .arg(
            Arg::new(ARGS_PORT)
                .help("Control port")
                .num_args(1)
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .short('P')
                .long("port"),
        )
        .arg(
            Arg::new(ARGS_TIMEOUT)
                .help("Control connection timeout in seconds")
                .num_args(1)
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .short('t')
                .long("timeout"),
        )
        .arg(
            Arg::new(ARGS_LOCAL)
                .help("Local file to upload")
                .required(true)
                .value_name("LOCAL")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARGS_REMOTE)
                .help("Destination path on the server")
                .required(true)
                .value_name("REMOTE"),
        )
}

pub fn parse_clap() -> anyhow::Result<ProcArgs> {
    let args = build_cli_args().get_matches();
    let env_password = std::env::var(PASSWORD_ENV).ok();
    proc_args(&args, env_password)
}

#[cfg(test)]
fn parse_from<I, T>(itr: I, env_password: Option<String>) -> anyhow::Result<ProcArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = build_cli_args().try_get_matches_from(itr)?;
    proc_args(&args, env_password)
}

/// Layers values: config file < environment < command line.
fn proc_args(args: &ArgMatches, env_password: Option<String>) -> anyhow::Result<ProcArgs> {
    let mut config = match args.get_one::<PathBuf>(ARGS_CONFIG_FILE) {
        Some(path) => UploaderConfig::from_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => UploaderConfig::default(),
    };

    if let Some(password) = env_password {
        config.password = password;
    }
    if let Some(host) = args.get_one::<String>(ARGS_HOST) {
        config.host = host.clone();
    }
    if let Some(user) = args.get_one::<String>(ARGS_USER) {
        config.user = user.clone();
    }
    if let Some(password) = args.get_one::<String>(ARGS_PASSWORD) {
        config.password = password.clone();
    }
    if let Some(port) = args.get_one::<u16>(ARGS_PORT) {
        config.port = *port;
    }
    if let Some(timeout) = args.get_one::<u64>(ARGS_TIMEOUT) {
        config.timeout_secs = *timeout;
    }

    let local = args
        .get_one::<PathBuf>(ARGS_LOCAL)
        .cloned()
        .context("missing local file")?;
    let remote = args
        .get_one::<String>(ARGS_REMOTE)
        .cloned()
        .context("missing remote path")?;

    Ok(ProcArgs {
        config,
        local,
        remote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_args_and_defaults() {
        let args = parse_from(["ftp-put", "-H", "ftp.local", "a.txt", "/up/a.txt"], None).unwrap();
        assert_eq!(args.config.host, "ftp.local");
        assert_eq!(args.config.user, "anonymous");
        assert_eq!(args.config.port, 21);
        assert_eq!(args.local, PathBuf::from("a.txt"));
        assert_eq!(args.remote, "/up/a.txt");
    }

    #[test]
    fn cli_overrides_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ftp.toml");
        std::fs::write(&path, "host = \"from-file\"\nuser = \"filer\"\nport = 2121\n").unwrap();

        let args = parse_from(
            [
                "ftp-put",
                "-c",
                path.to_str().unwrap(),
                "--user",
                "cli",
                "x",
                "/x",
            ],
            None,
        )
        .unwrap();
        assert_eq!(args.config.host, "from-file");
        assert_eq!(args.config.user, "cli");
        assert_eq!(args.config.port, 2121);
    }

    #[test]
    fn password_precedence() {
        let from_env = parse_from(["ftp-put", "x", "/x"], Some("env".into())).unwrap();
        assert_eq!(from_env.config.password, "env");

        let from_cli =
            parse_from(["ftp-put", "-p", "cli", "x", "/x"], Some("env".into())).unwrap();
        assert_eq!(from_cli.config.password, "cli");
    }

    #[test]
    fn missing_positionals_rejected() {
        assert!(parse_from(["ftp-put", "only-local"], None).is_err());
    }

    #[test]
    fn bad_port_rejected() {
        assert!(parse_from(["ftp-put", "-P", "70000", "x", "/x"], None).is_err());
    }
}
