pub mod blob;
pub mod local;
pub mod remote;

pub use blob::{BlobInfo, BlobStore, FsBlobStore, MemoryBlobStore, PROGRESS_BLOB};
pub use local::{
    FileLocalStore, LocalStore, MemoryLocalStore, PROGRESS_KEY, read_local_progress,
    write_local_progress,
};
pub use remote::{HttpRemoteStore, MemoryRemoteStore, RemoteStore};
