pub mod content_sources;
pub mod mock_transport;
pub mod smtp_transport;

pub use content_sources::*;
pub use mock_transport::*;
pub use smtp_transport::*;
