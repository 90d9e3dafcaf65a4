pub mod client;
pub mod error;
pub mod retry;

pub use client::ApiClient;
pub use error::ApiError;
pub use promptshare_api;
pub use retry::{upload_with_retry, RetryConfig};
