//! Client credential discovery
//!
//! The client publishes its port and auth token in a lockfile next to the
//! install (`name:pid:port:password:protocol`) and on the command line of its
//! UX process (`--app-port=`, `--remoting-auth-token=`). Either source works.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::client::ClientError;
use crate::config::ClientConfig;

/// Connection details for the local client API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub port: u16,
    pub token: String,
    pub protocol: String,
}

impl Credentials {
    pub fn base_url(&self) -> String {
        format!("{}://127.0.0.1:{}", self.protocol, self.port)
    }
}

/// Usual lockfile locations per platform
fn default_lockfile_paths() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        vec![PathBuf::from(r"C:\Riot Games\League of Legends\lockfile")]
    } else if cfg!(target_os = "macos") {
        vec![PathBuf::from("/Applications/League of Legends.app/Contents/LoL/lockfile")]
    } else {
        Vec::new()
    }
}

/// Parse lockfile contents
pub fn parse_lockfile(contents: &str) -> Result<Credentials, ClientError> {
    let parts: Vec<&str> = contents.trim().split(':').collect();
    if parts.len() < 5 {
        return Err(ClientError::CredentialsUnparseable(contents.trim().to_string()));
    }

    let port = parts[2]
        .parse()
        .map_err(|_| ClientError::CredentialsUnparseable(contents.trim().to_string()))?;

    Ok(Credentials {
        port,
        token: parts[3].to_string(),
        protocol: parts[4].to_string(),
    })
}

/// Value of `--<flag>=` in a command line, stripped of quotes
fn flag_value<'a>(command_line: &'a str, flag: &str) -> Option<&'a str> {
    let needle = format!("--{}=", flag);
    let start = command_line.find(&needle)? + needle.len();
    let rest = &command_line[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '"')
        .unwrap_or(rest.len());
    Some(&rest[..end]).filter(|v| !v.is_empty())
}

/// Parse the UX process command line
pub fn parse_command_line(command_line: &str) -> Result<Credentials, ClientError> {
    let port = flag_value(command_line, "app-port").and_then(|p| p.parse().ok());
    let token = flag_value(command_line, "remoting-auth-token");

    match (port, token) {
        (Some(port), Some(token)) => Ok(Credentials {
            port,
            token: token.to_string(),
            protocol: "https".to_string(),
        }),
        _ => Err(ClientError::CredentialsUnparseable(command_line.trim().to_string())),
    }
}

fn read_lockfile(path: &Path) -> Result<Credentials, ClientError> {
    let contents = std::fs::read_to_string(path)?;
    parse_lockfile(&contents)
}

/// Command lines of running client UX processes
fn client_process_command_line() -> Result<String, ClientError> {
    let output = if cfg!(target_os = "windows") {
        Command::new("powershell")
            .args([
                "-Command",
                "Get-CimInstance Win32_Process -Filter \"name = 'LeagueClientUx.exe'\" | Select-Object -ExpandProperty CommandLine",
            ])
            .output()?
    } else {
        Command::new("ps").args(["-A", "-o", "args"]).output()?
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|line| line.contains("--remoting-auth-token="))
        .map(str::to_string)
        .ok_or_else(|| ClientError::CredentialsNotFound("League Client not found".to_string()))
}

/// Find credentials from config, known lockfile paths, then the process list
pub fn discover(config: &ClientConfig) -> Result<Credentials, ClientError> {
    if let Some(path) = &config.lockfile_path {
        debug!("Reading configured lockfile {:?}", path);
        return read_lockfile(path);
    }

    for path in default_lockfile_paths() {
        if path.exists() {
            info!("Found client lockfile at {:?}", path);
            return read_lockfile(&path);
        }
    }

    let command_line = client_process_command_line()?;
    parse_command_line(&command_line)
}
