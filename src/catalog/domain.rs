/// Normalizes a user-supplied domain into a base URL.
///
/// Prepends `https://` when no scheme is present, lowercases an existing
/// `http`/`https` scheme and strips trailing slashes.
/// Idempotent: `normalize_domain(&normalize_domain(d)) == normalize_domain(d)`.
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    let (scheme, rest) = split_scheme(trimmed).unwrap_or(("https://", trimmed));
    format!("{}{}", scheme, rest.trim_end_matches('/'))
}

/// Whether a normalized domain names a host after its scheme.
pub fn has_host(normalized: &str) -> bool {
    let rest = split_scheme(normalized).map_or(normalized, |(_, rest)| rest);
    !rest.is_empty()
}

fn split_scheme(value: &str) -> Option<(&'static str, &str)> {
    ["https://", "http://"].into_iter().find_map(|scheme| {
        let head = value.get(..scheme.len())?;
        head.eq_ignore_ascii_case(scheme)
            .then(|| (scheme, &value[scheme.len()..]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_scheme() {
        assert_eq!(normalize_domain("acme.atlassian.net"), "https://acme.atlassian.net");
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(normalize_domain("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_domain("https://gitlab.com"), "https://gitlab.com");
    }

    #[test]
    fn strips_trailing_slashes_and_whitespace() {
        assert_eq!(normalize_domain(" https://acme.okta.com// "), "https://acme.okta.com");
    }

    #[test]
    fn scheme_match_ignores_case() {
        assert_eq!(normalize_domain("HTTPS://acme.okta.com"), "https://acme.okta.com");
        assert_eq!(normalize_domain("Http://intranet/"), "http://intranet");
    }

    #[test]
    fn scheme_only_input_has_no_host() {
        assert_eq!(normalize_domain("https://"), "https://");
        assert_eq!(normalize_domain("/"), "https://");
        assert!(!has_host(&normalize_domain("/")));
        assert!(has_host(&normalize_domain("acme.okta.com")));
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "acme.zendesk.com",
            "https://acme.zendesk.com/",
            "http://10.0.0.1:9000/",
            "  sentry.example.org ",
            "https://",
            "/",
            "HTTPS://acme.okta.com",
            "https:",
        ] {
            let once = normalize_domain(input);
            assert_eq!(normalize_domain(&once), once, "input: {input}");
        }
    }
}
