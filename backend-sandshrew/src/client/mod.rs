mod client;
mod http_trait;
mod reqwest_impl;

pub use client::SandshrewClient;
pub use http_trait::HttpClient;
pub use reqwest_impl::ReqwestClient;
