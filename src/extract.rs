// URL extraction from free text.
//
// Pulls http(s) URLs out of arbitrary text (a pasted message, an email
// body) so every link in it can be scored. First-seen order, deduplicated.

use std::collections::HashSet;

use regex_lite::Regex;

/// Characters trimmed from the end of a match. A URL at the end of a
/// sentence drags its punctuation into the regex match; stripping closing
/// brackets can clip a legitimate parenthesized URL, which is acceptable
/// for scanning purposes.
const TRAILING_PUNCTUATION: [char; 9] = ['.', ',', ';', ':', '!', '?', ')', ']', '}'];

/// Extract all http(s) URLs from a block of text.
///
/// Duplicates are collapsed, keeping first-seen order. Returns an empty
/// vec when the text contains no URLs.
pub fn extract_urls(text: &str) -> Vec<String> {
    let re = Regex::new(r#"https?://[^\s<>"']+"#).expect("valid URL regex");

    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for m in re.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.is_empty() {
            continue;
        }
        if seen.insert(url.to_string()) {
            urls.push(url.to_string());
        }
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_url() {
        let urls = extract_urls("check this out: https://example.com/page");
        assert_eq!(urls, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_no_urls_gives_empty_vec() {
        assert!(extract_urls("nothing linkable here").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_is_trimmed() {
        let urls = extract_urls("go to https://example.com/login.");
        assert_eq!(urls, vec!["https://example.com/login"]);
    }

    #[test]
    fn test_duplicates_collapse_first_seen_order() {
        let text = "https://b.example https://a.example https://b.example";
        let urls = extract_urls(text);
        assert_eq!(urls, vec!["https://b.example", "https://a.example"]);
    }

    #[test]
    fn test_http_and_https_both_match() {
        let text = "http://plain.example and https://tls.example";
        let urls = extract_urls(text);
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_url_stops_at_quote() {
        let urls = extract_urls(r#"<a href="https://example.com/x">link</a>"#);
        assert_eq!(urls, vec!["https://example.com/x"]);
    }
}
