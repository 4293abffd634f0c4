pub mod embed_search;
pub mod json_search;
pub mod mock_search;
pub mod search_service;

pub use embed_search::*;
pub use json_search::*;
pub use mock_search::*;
pub use search_service::*;
