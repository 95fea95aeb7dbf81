pub mod loader;
pub mod remote;

pub use loader::{decode_lossy, read_local_text, SourceOrigin, SourceText};
pub use remote::{HttpFetcher, RemoteSource};
