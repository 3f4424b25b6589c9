mod backend;
mod error;
mod supabase;

pub use backend::{MapBackend, PathRecorder, PathRecordingRequest};
pub use error::BackendError;
pub use supabase::SupabaseClient;
