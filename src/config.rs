use chrono_tz::Tz;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "site/fights.json";
pub const DEFAULT_SITE_DIR: &str = "site";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub site_dir: PathBuf,
    pub timezone: Tz,
}

impl Config {
    pub fn new(data_path: PathBuf, site_dir: PathBuf, timezone: Tz) -> Self {
        Self {
            data_path,
            site_dir,
            timezone,
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.site_dir.join("index.html")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_DATA_PATH),
            PathBuf::from(DEFAULT_SITE_DIR),
            chrono_tz::America::Los_Angeles,
        )
    }
}
