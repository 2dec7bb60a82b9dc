// # State Store Implementations
//
// - memory: process-local, lost on exit
// - file: JSON file with atomic writes and backup recovery

pub mod file;
pub mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;
