//! Filesystem adapters.
//!
//! Both adapters implement the read side ([`FileSource`]) and the write side
//! ([`OutputSink`]), so a tree can be rendered from disk to memory, from
//! memory to disk, or any mix of the two.
//!
//! [`FileSource`]: treeplate_core::application::ports::FileSource
//! [`OutputSink`]: treeplate_core::application::ports::OutputSink

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
