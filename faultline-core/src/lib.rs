pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;

pub use config::FaultlineConfig;
pub use error::FaultlineError;
pub use models::exception::ExceptionRecord;
pub use query::{
    has_next_page, has_previous_page, CountQuery, GetQuery, PageParam, QueryParams, RawQuery,
    TimestampOrder, PAGE_LIMIT,
};
pub use store::{ExceptionStore, MemoryStore};
