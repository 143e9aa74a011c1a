//! Storage backends for the filegate streaming endpoint.
//!
//! The server only needs a small contract from its object store: open a
//! readable stream, read whole objects, list by prefix, and report
//! existence, plus the write-side operations used by tooling and tests.
//! [`StorageBackend`] captures that contract; [`MemoryBackend`] and
//! [`FilesystemBackend`] implement it.
//!
//! Backend faults are a distinct error class from token rejection: a
//! storage failure after successful verification maps to a 5xx response,
//! never to 401.

pub mod backend;
pub mod errors;
pub mod filesystem;
pub mod memory;

pub use self::{
    backend::{ObjectReader, StorageBackend},
    errors::{Result, StorageError},
    filesystem::FilesystemBackend,
    memory::MemoryBackend,
};
