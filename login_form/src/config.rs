use clap::Parser;
use std::path::PathBuf;

/// A terminal login form
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Config {
    /// The server to log into. Should only be the protocol and domain.
    #[clap(long, env = "LOGIN_SERVER", default_value = "http://localhost:8080")]
    pub server: String,

    /// Where should we write logs?
    #[clap(long, env = "LOGIN_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default log directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("com", "login", "login_form")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
