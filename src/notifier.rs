use crate::{render::long_date, types::Booking};
use chrono::NaiveDate;
use std::fmt;

/// User-facing feedback raised by the calendar controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DayFullyBooked { date: NaiveDate },
    MissingSelection,
    SlotTaken { date: NaiveDate, time: String },
    /// Booking stored, continue with the next step of the flow.
    Confirmed { date: NaiveDate, booking: Booking },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DayFullyBooked { date } => write!(
                f,
                "{} is fully booked, please pick another day.",
                long_date(*date)
            ),
            Notice::MissingSelection => write!(f, "Please select a date and a time slot first."),
            Notice::SlotTaken { date, time } => write!(
                f,
                "Sorry, {time} on {} was just booked by someone else. Please choose another slot.",
                long_date(*date)
            ),
            Notice::Confirmed { date, booking } => write!(
                f,
                "Appointment reserved for {} at {}.",
                long_date(*date),
                booking.time
            ),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::DayFullyBooked { date: date(20) }.to_string(),
            "Friday, February 20, 2026 is fully booked, please pick another day."
        );
        assert_eq!(
            Notice::Confirmed {
                date: date(20),
                booking: Booking::new("2026-02-20", "16:00"),
            }
            .to_string(),
            "Appointment reserved for Friday, February 20, 2026 at 16:00."
        );
        assert!(Notice::SlotTaken {
            date: date(21),
            time: "10:00".into()
        }
        .to_string()
        .starts_with("Sorry, 10:00 on Saturday, February 21, 2026"));
    }
}
