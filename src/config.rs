//! Server configuration

use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

const DATA_DIR_NAME: &str = ".hc";
const DB_FILE_NAME: &str = "hc.db";

/// Where to listen and where to keep the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            db_path: PathBuf::from(DB_FILE_NAME),
        }
    }
}

impl ServerConfig {
    /// `host:port` as handed to the listener; host names are resolved there.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// URL to open in a browser for the UI.
    pub fn ui_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

/// `<home>/.hc/hc.db`, creating `<home>/.hc` if needed.
pub fn default_db_path() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory")
    })?;
    let dir = home.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(DB_FILE_NAME))
}
