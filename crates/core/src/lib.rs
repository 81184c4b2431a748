pub mod session;
pub mod status;
pub mod transcript;

pub use session::{DocumentHandle, Phase, Session, UploadGeneration};
pub use status::BackendStatus;
pub use transcript::{Speaker, Transcript, Turn};
