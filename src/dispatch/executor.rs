// src/dispatch/executor.rs
// =============================================================================
// This module executes a single ping: it turns one URL template into a
// concrete URL and fires an HTTP GET at it.
//
// Key functionality:
// - Substitutes the {url} marker in a template with the website identifier
// - Builds the shared HTTP client (no cert checks, big connection pool)
// - Folds every kind of request failure into a synthetic 500 outcome
//
// Rust concepts:
// - const: Compile-time constants for our fixed settings
// - async/await: For network I/O
// - match: To handle success and failure in one place
// =============================================================================

use reqwest::Client;
use std::time::Duration;

// The placeholder we look for inside each URL template.
// Every occurrence gets replaced by the website identifier.
pub const SUBSTITUTION_MARKER: &str = "{url}";

// Ping endpoints tend to reject obvious bots, so we identify as a
// regular desktop Chrome browser on every request
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

// Total wait per request (connect + response), in seconds
const REQUEST_TIMEOUT_SECONDS: u64 = 5;

// How many idle connections we keep around per host.
// The templates hit the same ping services over and over, so a big
// idle pool means most requests reuse an existing connection
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 200;

// The status code we report when a request never got a real response
// (DNS failure, connect failure, TLS failure, timeout, bad URL).
// Folding failures into the 5xx bucket keeps the outcome type uniform
const SYNTHETIC_FAILURE_CODE: u16 = 500;

// The result of executing one task
//
// Every task produces exactly one of these, whether the request
// succeeded or not. The code is either the real HTTP status or the
// synthetic 500 above; the url is the concrete URL we attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// HTTP status code (or 500 for transport failures)
    pub code: u16,
    /// The URL after marker substitution
    pub url: String,
}

// Replaces every occurrence of the {url} marker with the website identifier
//
// A template without the marker is not an error: it passes through
// unchanged and gets requested as-is.
//
// Example input:
//   template = "http://ping.example/submit?site={url}"
//   website_url = "mysite.com"
//
// Example output:
//   "http://ping.example/submit?site=mysite.com"
pub fn resolve_template(template: &str, website_url: &str) -> String {
    template.replace(SUBSTITUTION_MARKER, website_url)
}

// Builds the HTTP client shared by the whole worker pool
//
// Why one shared client?
// - reqwest clients hold a connection pool internally
// - Sharing the client means workers reuse each other's connections
// - A per-worker client would reconnect far more often
//
// The settings mirror how ping endpoints behave in practice:
// - Many run with broken or self-signed certificates, so certificate
//   verification is switched off on purpose
// - Responses we care about come back fast, so 5 seconds is plenty
pub fn build_client() -> anyhow::Result<Client> {
    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
        .user_agent(BROWSER_USER_AGENT)
        .build()?;
    Ok(client)
}

// Executes one task: substitute, GET, classify
//
// Parameters:
//   client: the shared HTTP client (borrowed, we don't own it)
//   template: one URL template from the input list
//   website_url: the website identifier for this run
//
// Returns: Outcome - never an error. A failed request is still a
// perfectly good outcome (code 500), and the worker moves on to its
// next task either way.
pub async fn execute(client: &Client, template: &str, website_url: &str) -> Outcome {
    let url = resolve_template(template, website_url);

    match client.get(&url).send().await {
        Ok(response) => {
            let code = response.status().as_u16();

            // Drain and discard the body. We never inspect it, but
            // reading it to the end hands the connection back to the
            // pool in a reusable state
            let _ = response.bytes().await;

            Outcome { code, url }
        }
        // Any transport-level failure: DNS, connect, TLS, timeout,
        // or a template that doesn't even parse as a URL
        Err(_) => Outcome {
            code: SYNTHETIC_FAILURE_CODE,
            url,
        },
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is execute() infallible?
//    - The tool pings thousands of third-party endpoints; some WILL fail
//    - One dead endpoint must not stop the run or need special handling
//    - So failures become data (a 500 outcome) instead of errors
//
// 2. What does client.get(&url) do with a bad URL?
//    - reqwest parses the URL lazily and reports the problem from send()
//    - That means a malformed template takes the same Err path as a
//      network failure - exactly the uniform behavior we want
//
// 3. Why drain the body with .bytes()?
//    - Dropping a response mid-body can force the connection closed
//    - Reading it to completion lets reqwest reuse the connection
//    - We throw the bytes away; only the status code matters
//
// 4. What is danger_accept_invalid_certs?
//    - It disables TLS certificate verification for this client
//    - The "danger_" prefix is reqwest making sure we opt in knowingly
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_marker_is_replaced() {
        let resolved = resolve_template("http://ping.test/submit?site={url}", "mysite.com");
        assert_eq!(resolved, "http://ping.test/submit?site=mysite.com");
    }

    #[test]
    fn test_every_marker_occurrence_is_replaced() {
        let resolved = resolve_template("http://ping.test/{url}/check/{url}", "mysite.com");
        assert_eq!(resolved, "http://ping.test/mysite.com/check/mysite.com");
        assert!(!resolved.contains(SUBSTITUTION_MARKER));
    }

    #[test]
    fn test_template_without_marker_passes_through() {
        let template = "http://ping.test/static-endpoint";
        assert_eq!(resolve_template(template, "mysite.com"), template);
    }

    #[tokio::test]
    async fn test_successful_request_reports_real_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let template = format!("{}/ping/{{url}}", server.uri());
        let outcome = execute(&client, &template, "mysite.com").await;

        assert_eq!(outcome.code, 204);
        assert!(outcome.url.ends_with("/ping/mysite.com"));
    }

    #[tokio::test]
    async fn test_unparsable_url_becomes_synthetic_500() {
        let client = build_client().unwrap();
        // Spaces and a missing scheme: request construction fails before
        // anything touches the network
        let outcome = execute(&client, "not a real url {url}", "mysite.com").await;

        assert_eq!(outcome.code, 500);
        assert_eq!(outcome.url, "not a real url mysite.com");
    }
}
