pub mod error;
pub mod extract;
pub mod intercept;
pub mod scroll;

pub use error::{ScraperError, SelectorError};
pub use extract::extract_records;
pub use intercept::{
    is_relevant_url, wrap_onload, InterceptedResponse, InterceptingClient, Interceptor, XhrLoad,
};
pub use scroll::{Overflow, ScrollDriver, ScrollExtent, ScrollPage, ScrollTarget};
