use crate::domain::ApiKey;

/// Default Kavenegar REST host.
pub const API_HOST: &str = "api.kavenegar.com";

/// REST API version path segment.
pub const API_VERSION: &str = "v1";

/// Compose the endpoint URL for an `{action}/{method}` pair.
///
/// Kavenegar authenticates through the path, so the raw key appears here and
/// nowhere else. Pure string interpolation; action/method come from
/// hard-coded literals in the client layer.
pub fn build_url(host: &str, version: &str, api_key: &ApiKey, action: &str, method: &str) -> String {
    format!(
        "https://{host}/{version}/{key}/{action}/{method}.json",
        key = api_key.secret()
    )
}
