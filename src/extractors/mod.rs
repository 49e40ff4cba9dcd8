pub mod json;
pub mod path;

pub use json::ApiJson;
pub use path::IdPath;
