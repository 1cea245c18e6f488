use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "serve.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Directory that request paths are resolved against.
    pub root: PathBuf,
    /// Appended to every resolved path before the file lookup.
    pub suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 32400,
            root: PathBuf::from("."),
            suffix: String::from(".json"),
        }
    }
}

impl Config {
    /// Load `serve.toml` from the working directory, or the defaults when there is none.
    pub fn load() -> Result<Config> {
        Config::load_from(&env::current_dir()?)
    }

    /// Parent directories are not searched.
    pub fn load_from(dir: &Path) -> Result<Config> {
        match read_config(dir)? {
            None => Ok(Config::default()),
            Some((path, content)) => {
                log::info!("using config from {}", path.display());
                Config::from_toml(&content).map_err(|error| Error::Config { path, error })
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn read_config(dir: &Path) -> io::Result<Option<(PathBuf, String)>> {
    let config_file = dir.join(CONFIG_FILE);

    match fs::read_to_string(&config_file) {
        Ok(content) => Ok(Some((config_file, content))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
