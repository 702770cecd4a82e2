//! Pure projection of the calendar state into what the front-end draws.

use crate::{booking_store::format_date, types::Booking};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;

/// Transient state owned by the calendar controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarViewState {
    /// Zero based, 0 = January.
    pub current_month: u32,
    pub current_year: i32,
    pub selected_date: Option<NaiveDate>,
    pub selected_time_slot: Option<String>,
    /// Slot labels found booked for `selected_date` at the last refresh.
    pub booked_time_slots: Vec<String>,
}

impl CalendarViewState {
    /// Starts on the month containing `today` with nothing selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_month: today.month0(),
            current_year: today.year(),
            selected_date: None,
            selected_time_slot: None,
            booked_time_slots: vec![],
        }
    }

    pub fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.current_year, self.current_month + 1, 1)
    }

    pub fn date_of_day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.current_year, self.current_month + 1, day)
    }

    pub fn is_slot_booked(&self, label: &str) -> bool {
        self.booked_time_slots.iter().any(|booked| booked == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCell {
    Empty,
    Date(DateCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCell {
    pub day: u32,
    pub disabled: bool,
    pub full: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotView {
    pub label: String,
    pub booked: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstructions {
    pub month_label: String,
    pub slots_header: String,
    pub cells: Vec<DayCell>,
    pub time_slots: Vec<TimeSlotView>,
    pub enter_enabled: bool,
}

impl RenderInstructions {
    pub fn date_cell(&self, day: u32) -> Option<&DateCell> {
        self.cells.iter().find_map(|cell| match cell {
            DayCell::Date(cell) if cell.day == day => Some(cell),
            _ => None,
        })
    }

    pub fn time_slot(&self, label: &str) -> Option<&TimeSlotView> {
        self.time_slots.iter().find(|slot| slot.label == label)
    }
}

pub const NO_DATE_HEADER: &str = "Select a date";

/// Blank cells before day 1 in a week starting on Monday.
pub fn start_day_index(first_of_month: NaiveDate) -> u32 {
    first_of_month.weekday().num_days_from_monday()
}

/// Day 0 of the next month, i.e. the last day of this one.
pub fn days_in_month(first_of_month: NaiveDate) -> u32 {
    first_of_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Long form used for the slots header, e.g. "Friday, February 20, 2026".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn month_label(state: &CalendarViewState) -> String {
    match state.first_of_month() {
        Some(first) => first.format("%B %Y").to_string(),
        None => format!("{}/{}", state.current_month + 1, state.current_year),
    }
}

/// Whether a date counts as fully booked given how many bookings it has.
pub fn is_full(bookings_on_date: usize, time_slots: &[String]) -> bool {
    bookings_on_date >= time_slots.len()
}

pub fn render(
    state: &CalendarViewState,
    bookings: &[Booking],
    time_slots: &[String],
    today: NaiveDate,
) -> RenderInstructions {
    let mut per_date: HashMap<&str, usize> = HashMap::new();
    for booking in bookings {
        *per_date.entry(booking.date.as_str()).or_default() += 1;
    }

    let mut cells = vec![];
    if let Some(first) = state.first_of_month() {
        cells.extend((0..start_day_index(first)).map(|_| DayCell::Empty));

        for day in 1..=days_in_month(first) {
            let Some(date) = state.date_of_day(day) else {
                continue;
            };
            let booked = per_date
                .get(format_date(date).as_str())
                .copied()
                .unwrap_or_default();
            cells.push(DayCell::Date(DateCell {
                day,
                disabled: date < today,
                full: is_full(booked, time_slots),
                selected: state.selected_date == Some(date),
            }));
        }
    }

    let time_slots = time_slots
        .iter()
        .map(|label| TimeSlotView {
            label: label.clone(),
            booked: state.is_slot_booked(label),
            selected: state.selected_time_slot.as_deref() == Some(label.as_str()),
        })
        .collect();

    RenderInstructions {
        month_label: month_label(state),
        slots_header: state
            .selected_date
            .map(long_date)
            .unwrap_or_else(|| NO_DATE_HEADER.into()),
        cells,
        time_slots,
        enter_enabled: state.selected_date.is_some() && state.selected_time_slot.is_some(),
    }
}
