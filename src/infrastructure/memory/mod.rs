//! Process-local repository implementations.
//!
//! Selected with `STORAGE_BACKEND=memory`. Nothing survives a restart.

pub mod memory_link_repository;
pub mod memory_user_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use memory_user_repository::MemoryUserRepository;
