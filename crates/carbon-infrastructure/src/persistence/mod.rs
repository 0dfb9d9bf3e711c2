mod calculation_log;
mod database;
mod memory_slot_store;
mod result_ext;
mod slot_store;

pub use calculation_log::JsonCalculationLog;
pub use database::Database;
pub use memory_slot_store::InMemorySlotStore;
pub use result_ext::ResultExt;
pub use slot_store::SqliteSlotStore;
