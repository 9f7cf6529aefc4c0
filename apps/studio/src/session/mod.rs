//! Persisted client state: the in-progress resume and the signed-in user.

pub mod auth;
pub mod persist;
pub mod resume;

pub use auth::AuthSession;
pub use persist::{BlobStore, FileBlobStore, MemoryBlobStore, PersistError};
pub use resume::ResumeSession;
