pub mod body;
pub mod resolve;
pub mod response;

pub use body::JsonBody;
pub use resolve::{resolve_folder, resolve_note};
pub use response::{resource_location, ApiResponse};
