use consultation_booking::{
    booking_store::BookingStore,
    calendar::CalendarController,
    configuration::Configuration,
    configuration_handler::ConfigurationHandler,
    file_storage::FileStorage,
    local_storage::LocalStorage,
    storage::{KeyValueStorage, StorageError},
    terminal::{self, local_today, TerminalNotifier},
};
use std::{io, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn start<S: KeyValueStorage>(
    storage: S,
    configuration: &ConfigurationHandler,
) -> Result<(), StorageError> {
    let store = BookingStore::new(storage, configuration.storage_key());
    store.initialize()?;
    info!(bookings = store.bookings().len(), "Loaded bookings");

    let mut controller = CalendarController::new(
        store,
        TerminalNotifier,
        configuration.time_slots(),
        local_today(),
    );
    terminal::run(
        &mut controller,
        io::stdin().lock(),
        io::stdout().lock(),
        local_today,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("########################");
    println!("# Consultation Booking #");
    println!("########################");

    let configuration = ConfigurationHandler::parse_arguments();

    let result = if let Some(storage_dir) = configuration.storage_dir() {
        FileStorage::new(storage_dir).and_then(|storage| start(storage, &configuration))
    } else {
        info!("No storage directory configured, bookings are kept in memory");
        start(LocalStorage::default(), &configuration)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(?err, "Booking calendar stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
