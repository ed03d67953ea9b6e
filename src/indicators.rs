// Heuristic phishing indicators — explanations, not signals.
//
// These checks surface the classic tells a human reviewer would point at
// (IP-address host, credential keywords, punycode). They are attached to
// verdicts for display; the model score never depends on them.

/// Keywords that commonly appear in credential-harvesting URLs.
const SUSPICIOUS_KEYWORDS: [&str; 10] = [
    "login", "signin", "verify", "secure", "account", "update", "confirm", "banking",
    "password", "wallet",
];

/// Hosts with at least this many dot-separated labels count as a deep
/// subdomain chain (e.g. paypal.com.security.example.net).
const DEEP_SUBDOMAIN_LABELS: usize = 4;

/// URLs longer than this are flagged as unusually long.
const LONG_URL_CHARS: usize = 100;

/// Inspect a URL string for phishing indicators.
///
/// Returns human-readable reasons, empty for a clean URL. Pure string
/// inspection — no DNS, no fetching.
pub fn detect(url: &str) -> Vec<String> {
    let mut reasons = Vec::new();
    let lower = url.to_lowercase();

    if lower.starts_with("http://") {
        reasons.push("no TLS (plain http)".to_string());
    }

    if let Some(authority) = authority_of(&lower) {
        if authority.contains('@') {
            reasons.push("userinfo (@) in authority".to_string());
        }

        let host = host_of(authority);
        if is_ipv4(host) {
            reasons.push("IP address host".to_string());
        } else {
            if host.split('.').count() >= DEEP_SUBDOMAIN_LABELS {
                reasons.push("deep subdomain chain".to_string());
            }
            if host.split('.').any(|label| label.starts_with("xn--")) {
                reasons.push("punycode host label".to_string());
            }
        }

        if let Some(port) = port_of(authority) {
            if port != 80 && port != 443 {
                reasons.push(format!("non-standard port {port}"));
            }
        }
    }

    for keyword in SUSPICIOUS_KEYWORDS {
        if lower.contains(keyword) {
            reasons.push(format!("credential keyword \"{keyword}\""));
        }
    }

    if url.chars().count() > LONG_URL_CHARS {
        reasons.push("unusually long URL".to_string());
    }

    reasons
}

/// The authority component of a URL: everything between `://` and the
/// first `/`, `?`, or `#`. None if the string has no scheme separator.
fn authority_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest)?;
    Some(rest.split(['/', '?', '#']).next().unwrap_or(rest))
}

/// The host within an authority: strips userinfo and port.
/// IPv6 bracket literals are not handled — they stay intact.
fn host_of(authority: &str) -> &str {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) && !port.is_empty() => host,
        _ => host_port,
    }
}

/// The explicit port of an authority, if one is present and numeric.
fn port_of(authority: &str) -> Option<u16> {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let (_, port) = host_port.rsplit_once(':')?;
    port.parse().ok()
}

/// A host is an IPv4 literal when it is exactly four numeric octets.
fn is_ipv4(host: &str) -> bool {
    let mut labels = 0;
    for part in host.split('.') {
        if part.parse::<u8>().is_err() {
            return false;
        }
        labels += 1;
    }
    labels == 4
}
