use crate::{
    booking_store::{format_date, BookingStore},
    notifier::{Notice, Notifier},
    render::{is_full, render, CalendarViewState, RenderInstructions},
    storage::{KeyValueStorage, StorageError},
    types::Booking,
};
use chrono::NaiveDate;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelection {
    Selected(NaiveDate),
    FullyBooked,
    /// Past or nonexistent day, nothing happens.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSelection {
    Selected,
    Booked,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    Confirmed(Booking),
    MissingSelection,
    Conflict,
}

/// Drives the month grid and slot list, routing every action through the
/// booking store before committing it.
pub struct CalendarController<S: KeyValueStorage, N: Notifier> {
    store: BookingStore<S>,
    notifier: N,
    time_slots: Vec<String>,
    today: NaiveDate,
    state: CalendarViewState,
}

impl<S: KeyValueStorage, N: Notifier> CalendarController<S, N> {
    pub fn new(
        store: BookingStore<S>,
        notifier: N,
        time_slots: Vec<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            notifier,
            time_slots,
            today,
            state: CalendarViewState::new(today),
        }
    }

    pub fn state(&self) -> &CalendarViewState {
        &self.state
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn render(&self) -> RenderInstructions {
        render(
            &self.state,
            &self.store.bookings(),
            &self.time_slots,
            self.today,
        )
    }

    pub fn prev_month(&mut self) {
        if self.state.current_month == 0 {
            self.state.current_month = 11;
            self.state.current_year -= 1;
        } else {
            self.state.current_month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.state.current_month == 11 {
            self.state.current_month = 0;
            self.state.current_year += 1;
        } else {
            self.state.current_month += 1;
        }
    }

    /// Selects a day of the displayed month.
    pub fn select_date(&mut self, day: u32) -> DateSelection {
        let Some(date) = self.state.date_of_day(day) else {
            debug!(day, "Ignoring day outside the displayed month");
            return DateSelection::Unavailable;
        };
        if date < self.today {
            debug!(%date, "Ignoring past date");
            return DateSelection::Unavailable;
        }
        if is_full(self.store.bookings_on(&format_date(date)), &self.time_slots) {
            info!(%date, "Rejected fully booked date");
            self.notifier.notify(&Notice::DayFullyBooked { date });
            return DateSelection::FullyBooked;
        }

        self.state.selected_date = Some(date);
        self.update_time_slots_availability();
        DateSelection::Selected(date)
    }

    /// Re-reads which slots of the selected date are booked and drops the
    /// slot selection.
    pub fn update_time_slots_availability(&mut self) {
        self.state.selected_time_slot = None;
        self.state.booked_time_slots = match self.state.selected_date {
            Some(date) => {
                let date = format_date(date);
                self.time_slots
                    .iter()
                    .filter(|label| self.store.is_booked(&date, label))
                    .cloned()
                    .collect()
            }
            None => vec![],
        };
    }

    pub fn select_time_slot(&mut self, label: &str) -> SlotSelection {
        if !self.time_slots.iter().any(|slot| slot == label) {
            debug!(label, "Ignoring unknown time slot");
            return SlotSelection::Unknown;
        }
        if self.state.is_slot_booked(label) {
            debug!(label, "Ignoring booked time slot");
            return SlotSelection::Booked;
        }
        self.state.selected_time_slot = Some(label.into());
        SlotSelection::Selected
    }

    /// Confirms the current selection.
    ///
    /// Storage failures are returned, the state is left untouched in that
    /// case so the user can retry.
    pub fn handle_enter(&mut self) -> Result<EnterOutcome, StorageError> {
        let selection = self.state.selected_date.zip(
            self.state
                .selected_time_slot
                .clone()
                .filter(|label| !self.state.is_slot_booked(label)),
        );
        let Some((date, time)) = selection else {
            self.notifier.notify(&Notice::MissingSelection);
            return Ok(EnterOutcome::MissingSelection);
        };

        let date_key = format_date(date);
        let booked = self.store.add_booking(&date_key, &time).map_err(|err| {
            error!(?err, date = %date_key, time = %time, "Booking could not be stored");
            err
        })?;

        let outcome = if booked {
            let booking = Booking::new(date_key, time);
            self.notifier.notify(&Notice::Confirmed {
                date,
                booking: booking.clone(),
            });
            EnterOutcome::Confirmed(booking)
        } else {
            self.notifier.notify(&Notice::SlotTaken { date, time });
            EnterOutcome::Conflict
        };
        self.update_time_slots_availability();
        Ok(outcome)
    }
}
