mod client;
pub mod domain;
mod reqres_url;

pub(crate) use reqres_url::*;

pub use client::*;
pub use domain::*;
