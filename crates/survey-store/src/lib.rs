pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod store;

pub use config::{DEFAULT_STORE_URL, NAME_QUESTION_ENV, STORE_URL_ENV, StoreConfig};
pub use error::{CatalogLoadError, StoreError};
pub use http::HttpAnswerStore;
pub use memory::MemoryAnswerStore;
pub use store::{AnswerStore, execute, load_catalog};
