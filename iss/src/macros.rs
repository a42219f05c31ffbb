//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - anonymous GET expecting JSON back
///
macro_rules! http_get {
    ($client:expr, $url:expr) => {
        $client
            .get($url)
            .header("user-agent", $crate::version())
            .header("content-type", "application/json")
            .send()
    };
}
