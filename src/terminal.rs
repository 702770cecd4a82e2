use crate::{
    calendar::{CalendarController, DateSelection, SlotSelection},
    notifier::{Notice, Notifier},
    render::{DayCell, RenderInstructions},
    storage::KeyValueStorage,
};
use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

const HELP: &str = "Commands:
  prev | next      show the previous / next month
  date <day>       select a day of the shown month
  slot <time>      select a time slot, e.g. `slot 14:00`
  enter            book the selected date and time
  show             draw the calendar again
  help             show this text
  quit             leave";

/// Prints notices straight to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Confirmed { .. } => println!("✔ {notice}"),
            _ => println!("! {notice}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    Date(u32),
    Slot(String),
    Enter,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next();

        match (command.as_str(), argument) {
            ("prev" | "p", None) => Ok(Command::Prev),
            ("next" | "n", None) => Ok(Command::Next),
            ("date" | "d", Some(day)) => day
                .parse()
                .map(Command::Date)
                .map_err(|_| format!("'{day}' is not a day number")),
            ("slot" | "s", Some(slot)) => Ok(Command::Slot(slot.into())),
            ("enter" | "e", None) => Ok(Command::Enter),
            ("show" | "", None) => Ok(Command::Show),
            ("help" | "h" | "?", None) => Ok(Command::Help),
            ("quit" | "q" | "exit", None) => Ok(Command::Quit),
            _ => Err(format!("Unknown command '{}', type `help`", line.trim())),
        }
    }
}

pub fn draw(instructions: &RenderInstructions) -> String {
    let mut out = format!("{:^28}\n{WEEKDAY_HEADER}\n", instructions.month_label);

    for (index, cell) in instructions.cells.iter().enumerate() {
        let text = match cell {
            DayCell::Empty => "    ".to_string(),
            DayCell::Date(cell) if cell.selected => format!("[{:>2}]", cell.day),
            DayCell::Date(cell) if cell.disabled => format!(" {:>2}.", cell.day),
            DayCell::Date(cell) if cell.full => format!(" {:>2}#", cell.day),
            DayCell::Date(cell) => format!(" {:>2} ", cell.day),
        };
        out.push_str(&text);
        if index % 7 == 6 {
            out.push('\n');
        }
    }
    if instructions.cells.len() % 7 != 0 {
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", instructions.slots_header));
    let slots: Vec<String> = instructions
        .time_slots
        .iter()
        .map(|slot| match (slot.selected, slot.booked) {
            (true, _) => format!("[{}]", slot.label),
            (false, true) => format!("({} booked)", slot.label),
            (false, false) => slot.label.clone(),
        })
        .collect();
    out.push_str(&slots.join("  "));
    out.push('\n');

    if instructions.enter_enabled {
        out.push_str("Type `enter` to book.\n");
    }
    out
}

/// Reads commands until `quit` or end of input, redrawing after every change.
pub fn run<S, N, R, W>(
    controller: &mut CalendarController<S, N>,
    input: R,
    mut output: W,
    today: impl Fn() -> NaiveDate,
) -> io::Result<()>
where
    S: KeyValueStorage,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    controller.set_today(today());
    write!(output, "{}", draw(&controller.render()))?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        debug!(?command, "Handle command");
        controller.set_today(today());

        match command {
            Command::Prev => controller.prev_month(),
            Command::Next => controller.next_month(),
            Command::Date(day) => {
                if controller.select_date(day) == DateSelection::Unavailable {
                    writeln!(output, "Day {day} can't be selected.")?;
                }
            }
            Command::Slot(label) => match controller.select_time_slot(&label) {
                SlotSelection::Selected => {}
                SlotSelection::Booked => writeln!(output, "{label} is already booked.")?,
                SlotSelection::Unknown => writeln!(
                    output,
                    "{label} is not a slot, choose one of {}.",
                    controller.time_slots().join(", ")
                )?,
            },
            Command::Enter => {
                if let Err(err) = controller.handle_enter() {
                    error!(?err, "Booking failed");
                    writeln!(output, "Booking could not be saved: {err}")?;
                }
            }
            Command::Show => {}
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }
        write!(output, "{}", draw(&controller.render()))?;
    }
    Ok(())
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
