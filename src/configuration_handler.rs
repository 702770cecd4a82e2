use crate::{
    configuration::Configuration,
    types::{default_time_slots, DEFAULT_STORAGE_KEY},
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Book a consultation slot from the terminal")]
pub struct ConfigurationHandler {
    /// Directory the bookings are persisted in. Kept in memory when unset.
    #[arg(long, env = "BOOKING_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    #[arg(long, env = "BOOKING_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    /// Bookable times of every day, comma separated.
    #[arg(
        long,
        env = "BOOKING_TIME_SLOTS",
        value_delimiter = ',',
        default_values_t = default_time_slots()
    )]
    time_slots: Vec<String>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone()
    }

    fn storage_key(&self) -> String {
        self.storage_key.clone()
    }

    fn time_slots(&self) -> Vec<String> {
        self.time_slots
            .iter()
            .map(|slot| slot.trim().to_string())
            .filter(|slot| !slot.is_empty())
            .collect()
    }
}
