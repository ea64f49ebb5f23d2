pub mod command;
pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod proxy;
pub mod render;
pub mod store;
pub mod types;
pub mod view;

pub use error::FetchError;
pub use fetch::{NewsClient, NewsSource};
pub use pipeline::SearchPipeline;
pub use store::{Action, Store};
pub use types::*;
pub use view::View;
