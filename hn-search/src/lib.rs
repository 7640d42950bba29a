mod client;
mod search_url;

pub mod domain;

pub(crate) use search_url::*;

pub use client::*;
pub use domain::*;
