//! Rules for turning a GitHub host name into an API endpoint.

/// The public instance everyone gets unless they say otherwise
pub const DEFAULT_HOST: &str = "github.com";

/// Lowercase the host and strip anything that isn't the host itself
///
/// People paste `https://github.example.com/` into config files, so we
/// accept that too. Subdomains of github.com collapse to github.com.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host.as_str());
    let host = host.trim_end_matches('/');

    if host.ends_with(&format!(".{}", DEFAULT_HOST)) {
        return DEFAULT_HOST.to_string();
    }

    host.to_string()
}

/// Anything that isn't github.com is treated as GitHub Enterprise Server
pub fn is_enterprise(host: &str) -> bool {
    normalize_host(host) != DEFAULT_HOST
}

/// GraphQL endpoint for a host
pub fn graphql_endpoint(host: &str) -> String {
    let host = normalize_host(host);
    if host == DEFAULT_HOST {
        "https://api.github.com/graphql".to_string()
    } else {
        format!("https://{}/api/graphql", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_endpoint() {
        assert_eq!(graphql_endpoint("github.com"), "https://api.github.com/graphql");
        assert_eq!(graphql_endpoint("GitHub.com"), "https://api.github.com/graphql");
        assert_eq!(graphql_endpoint("api.github.com"), "https://api.github.com/graphql");
    }

    #[test]
    fn test_enterprise_endpoint() {
        assert_eq!(
            graphql_endpoint("ghe.example.com"),
            "https://ghe.example.com/api/graphql"
        );
        assert_eq!(
            graphql_endpoint("https://ghe.example.com/"),
            "https://ghe.example.com/api/graphql"
        );
    }

    #[test]
    fn test_is_enterprise() {
        assert!(!is_enterprise("github.com"));
        assert!(!is_enterprise(" GITHUB.COM "));
        assert!(is_enterprise("ghe.example.com"));
    }
}
