// Concrete implementations of the domain ports, plus document reading and writing.

pub mod document;
pub mod http;
pub mod model_writer;
pub mod storage;

pub use document::load_site;
pub use http::HttpFixtureClient;
pub use model_writer::to_model_string;
pub use storage::{LocalStorage, MemoryStorage};
