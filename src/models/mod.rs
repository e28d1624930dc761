mod folder;
mod response;
mod status;

pub use folder::Folder;
pub use response::{ErrorResponse, StatusData, StatusResponse, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use status::{StatusReport, StatusResult};
