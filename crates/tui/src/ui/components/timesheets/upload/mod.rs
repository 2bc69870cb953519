mod state;
mod upload_component;

pub use state::UploadState;
pub use upload_component::UploadComponent;
