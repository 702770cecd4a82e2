use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn storage_dir(&self) -> Option<PathBuf>;
    fn storage_key(&self) -> String;
    fn time_slots(&self) -> Vec<String>;
}
