pub mod csv_export;
pub mod csv_import;
pub mod file;
pub mod prefs;

pub use file::{load_plan, save_plan};
pub use prefs::Prefs;
