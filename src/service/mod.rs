pub mod repository;
pub mod session;
pub mod upload;

pub use repository::ModelRepository;
pub use session::{SessionGate, SessionState};
pub use upload::{UploadForm, UploadPipeline};
