use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "192.168.4.1";
pub const DEFAULT_PORT: u16 = 80;

pub const API_PATH: &str = "/api/fetchAndCleanCache";

pub const CSV_FILE: &str = "./data.csv";
pub const BACKUP_FILE: &str = "./backup.dat";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub csv_path: PathBuf,
    pub backup_path: PathBuf,
}

impl Config {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, API_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            csv_path: PathBuf::from(CSV_FILE),
            backup_path: PathBuf::from(BACKUP_FILE),
        }
    }
}
