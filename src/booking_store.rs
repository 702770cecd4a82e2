use crate::{
    storage::{KeyValueStorage, StorageError},
    types::{seed_bookings, Booking},
};
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

/// Upper bound for re-checking a booking when the stored collection changes
/// underneath a write.
const MAX_WRITE_ATTEMPTS: usize = 8;

/// Canonical `YYYY-MM-DD` key joining calendar days and stored bookings.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone)]
pub struct BookingStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> BookingStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the seed collection if nothing is stored under the key yet.
    /// Existing values are never touched, even unreadable ones.
    pub fn initialize(&self) -> Result<(), StorageError> {
        let seed = serde_json::to_string(&seed_bookings())?;
        if self.storage.compare_and_swap(&self.key, None, &seed)? {
            info!(key = %self.key, "Seeded empty booking storage");
        } else {
            debug!(key = %self.key, "Booking storage already initialized");
        }
        Ok(())
    }

    /// Current collection. Missing, unreadable or corrupt storage counts as
    /// no bookings.
    pub fn bookings(&self) -> Vec<Booking> {
        match self.storage.get(&self.key) {
            Ok(raw) => self.parse(raw.as_deref()),
            Err(err) => {
                warn!(?err, key = %self.key, "Failed to read bookings");
                vec![]
            }
        }
    }

    pub fn is_booked(&self, date: &str, time: &str) -> bool {
        self.bookings()
            .iter()
            .any(|booking| booking.matches(date, time))
    }

    pub fn bookings_on(&self, date: &str) -> usize {
        self.bookings()
            .iter()
            .filter(|booking| booking.date == date)
            .count()
    }

    /// Appends `(date, time)` unless it is already booked.
    ///
    /// The check runs against the collection as stored right now and the
    /// write only lands if nobody changed it in between, otherwise the check
    /// is repeated. `Ok(false)` is authoritative: the slot is taken.
    pub fn add_booking(&self, date: &str, time: &str) -> Result<bool, StorageError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let raw = self.storage.get(&self.key)?;
            let mut bookings = self.parse(raw.as_deref());

            if bookings.iter().any(|booking| booking.matches(date, time)) {
                info!(date, time, "Slot was already booked");
                return Ok(false);
            }

            bookings.push(Booking::new(date, time));
            let updated = serde_json::to_string(&bookings)?;

            match self
                .storage
                .compare_and_swap(&self.key, raw.as_deref(), &updated)
            {
                Ok(true) => {
                    info!(date, time, "Booking added");
                    return Ok(true);
                }
                Ok(false) => debug!(date, time, "Bookings changed during write, checking again"),
                Err(err) => {
                    error!(?err, date, time, "Failed to store booking");
                    return Err(err);
                }
            }
        }

        error!(date, time, "Giving up on booking, storage keeps changing");
        Err(StorageError::Contention(self.key.clone(), MAX_WRITE_ATTEMPTS))
    }

    fn parse(&self, raw: Option<&str>) -> Vec<Booking> {
        let Some(raw) = raw else {
            return vec![];
        };
        serde_json::from_str(raw).unwrap_or_else(|err| {
            warn!(?err, key = %self.key, "Stored bookings are corrupt, treating as empty");
            vec![]
        })
    }
}
