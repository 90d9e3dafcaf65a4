pub mod config;
pub mod feed;
pub mod file;
pub mod prompt;
pub mod time;

pub use feed::{Applied, Feed, PageRequest};
pub use file::StoredFile;
pub use prompt::{Prompt, PromptImage};
