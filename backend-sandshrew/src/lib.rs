pub mod api_structs;

mod backend;
mod client;

pub use backend::SandshrewBackend;
pub use client::{HttpClient, ReqwestClient, SandshrewClient};
