mod entry;
mod store;

pub use entry::{is_name_valid, Checkpoint, NAME_MAX_LEN, NAME_RULES};
pub use store::CheckpointStore;
