use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "kt_consultation_bookings";

pub const DEFAULT_TIME_SLOTS: [&str; 6] = ["10:00", "11:00", "13:00", "14:00", "15:00", "16:00"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booking {
    pub date: String,
    pub time: String,
}

impl Booking {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn matches(&self, date: &str, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

/// Written once when the storage holds no collection yet.
pub fn seed_bookings() -> Vec<Booking> {
    vec![
        Booking::new("2026-02-20", "14:00"),
        Booking::new("2026-02-20", "15:00"),
        Booking::new("2026-02-25", "10:00"),
    ]
}

pub fn default_time_slots() -> Vec<String> {
    DEFAULT_TIME_SLOTS.iter().map(|slot| slot.to_string()).collect()
}
