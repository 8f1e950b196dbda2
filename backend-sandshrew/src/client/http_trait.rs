use anyhow::Result;
use async_trait::async_trait;

/// Minimal async HTTP client trait that can be implemented with any HTTP
/// library.
///
/// This allows consumers to bring their own HTTP client implementation:
/// hyper, isahc, surf, platform-specific APIs, or any other stack. The
/// Sandshrew API is JSON-RPC over POST, so a single method suffices.
///
/// # Implementing the trait
///
/// ```ignore
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use backend_sandshrew::HttpClient;
///
/// #[derive(Clone)]
/// struct MyHttpClient {
///     // Your HTTP client here
/// }
///
/// #[async_trait]
/// impl HttpClient for MyHttpClient {
///     async fn post_json(&self, url: &str, json_body: &str) -> Result<String> {
///         // Send the JSON body and return the response body
///         Ok("response".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    /// Perform a POST request with a JSON body.
    ///
    /// # Arguments
    /// * `url` - The full URL to request
    /// * `json_body` - The JSON body as a string
    ///
    /// # Returns
    /// The response body as a string
    async fn post_json(&self, url: &str, json_body: &str) -> Result<String>;
}
