pub mod booking_store;
pub mod calendar;
pub mod configuration;
pub mod configuration_handler;
pub mod file_storage;
pub mod local_storage;
pub mod notifier;
pub mod render;
pub mod storage;
pub mod terminal;
#[cfg(test)]
mod testutils;
pub mod types;
