pub mod entry;
pub mod new_entry;
