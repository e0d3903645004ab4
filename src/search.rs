//! Web search through the search provider's HTML results page.
//!
//! The results page is fetched through the same redirect resolver and cache as
//! any other page. Result anchors are recognized by their class marker and the
//! real destination is recovered from the provider's click-tracking wrapper.

use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::config::{
    ACCEPT_HTML, MAX_SEARCH_RESULTS, SEARCH_ENDPOINT, SEARCH_RESULT_CLASS, SEARCH_TRACKING_PARAM,
};
use crate::error_handling::SearchError;
use crate::fetch::RedirectResolver;
use crate::http::{HttpResponse, Transport};
use crate::render::{decode_entities, html_to_text};
use crate::url::Url;

// Regex patterns
const ANCHOR_PATTERN: &str = r"(?is)<a\s([^>]*)>(.*?)</a\s*>";
const CLASS_ATTR_PATTERN: &str = r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#;
const HREF_ATTR_PATTERN: &str = r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ANCHOR_PATTERN).expect("Failed to compile anchor regex - this is a bug")
});
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CLASS_ATTR_PATTERN).expect("Failed to compile class regex - this is a bug")
});
static HREF_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HREF_ATTR_PATTERN).expect("Failed to compile href regex - this is a bug")
});

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// 1-based position in the results page
    pub rank: usize,
    pub title: String,
    pub url: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}\n   {}", self.rank, self.title, self.url)
    }
}

/// Runs searches through a redirect resolver.
pub struct SearchClient<'a, T> {
    resolver: &'a mut RedirectResolver<T>,
}

impl<'a, T: Transport> SearchClient<'a, T> {
    pub fn new(resolver: &'a mut RedirectResolver<T>) -> Self {
        Self { resolver }
    }

    /// Returns up to ten results for `term`, in page order.
    ///
    /// An empty list is a valid answer (no matches, or a page layout without
    /// result anchors).
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Fetch` if the results page cannot be fetched and
    /// `SearchError::Render` if it has no header/body boundary.
    pub async fn search(&mut self, term: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = search_url(term);
        debug!("Searching via {url}");

        let raw = self
            .resolver
            .resolve(&url, ACCEPT_HTML)
            .await
            .map_err(|source| SearchError::Fetch {
                term: term.to_string(),
                source,
            })?;
        let response = HttpResponse::parse(&raw)?;

        let results = extract_results(&response.body);
        debug!("Extracted {} search results", results.len());
        Ok(results)
    }
}

/// Builds the provider query URL; spaces in `term` become `+`.
pub fn search_url(term: &str) -> Url {
    let query: String = url::form_urlencoded::byte_serialize(term.trim().as_bytes()).collect();
    Url::parse(&format!("{SEARCH_ENDPOINT}{query}"))
}

/// Extracts the first ten result links from a results page.
pub fn extract_results(html: &str) -> Vec<SearchResult> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            if !has_result_class(attrs) {
                return None;
            }
            let href = attr_value(&HREF_ATTR_RE, attrs)?;
            Some((href, caps.get(2).map_or("", |m| m.as_str())))
        })
        .take(MAX_SEARCH_RESULTS)
        .enumerate()
        .map(|(idx, (href, inner))| SearchResult {
            rank: idx + 1,
            title: html_to_text(inner),
            url: destination(href),
        })
        .collect()
}

/// Recovers the real destination from a result href.
///
/// Tracking links carry the percent-encoded destination in the `uddg` query
/// parameter; links without it are returned entity-decoded as they are.
pub fn destination(href: &str) -> String {
    let href = decode_entities(href);
    let tracked = href.split_once('?').and_then(|(_, query)| {
        let query = query.split('#').next().unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == SEARCH_TRACKING_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    match tracked {
        Some(url) => url,
        None if href.starts_with("//") => format!("https:{href}"),
        None => href,
    }
}

fn has_result_class(attrs: &str) -> bool {
    attr_value(&CLASS_ATTR_RE, attrs)
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == SEARCH_RESULT_CLASS))
}

fn attr_value<'h>(re: &Regex, attrs: &'h str) -> Option<&'h str> {
    let caps = re.captures(attrs)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::config::Config;
    use crate::error_handling::{FetchError, RenderError};
    use crate::test_helpers::{ok_html, ScriptedTransport};

    fn result_anchor(target: &str, title: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!(
            "<a rel=\"nofollow\" class=\"result__a\" \
             href=\"//duckduckgo.com/l/?uddg={encoded}&amp;rut=abc123\">{title}</a>"
        )
    }

    fn results_page(anchors: &[String]) -> String {
        let mut page = String::from("<html><body><div class=\"results\">");
        for anchor in anchors {
            page.push_str("<div class=\"result\"><h2 class=\"result__title\">");
            page.push_str(anchor);
            page.push_str("</h2><a class=\"result__url\" href=\"/ignored\">ignored</a></div>");
        }
        page.push_str("</div></body></html>");
        page
    }

    #[test]
    fn test_search_url_encodes_spaces_as_plus() {
        let url = search_url("rust programming language");
        assert_eq!(url.host, "html.duckduckgo.com");
        assert_eq!(url.path, "/html/?q=rust+programming+language");
        assert!(url.scheme.is_tls());
    }

    #[test]
    fn test_search_url_escapes_reserved_characters() {
        assert_eq!(search_url("c++ & rust").path, "/html/?q=c%2B%2B+%26+rust");
    }

    #[test]
    fn test_destination_decodes_tracking_parameter() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2Flearn%3Fa%3D1&amp;rut=x";
        assert_eq!(destination(href), "https://www.rust-lang.org/learn?a=1");
    }

    #[test]
    fn test_destination_without_tracking_parameter() {
        assert_eq!(destination("https://example.com/page"), "https://example.com/page");
        assert_eq!(destination("//example.com/x?y=1"), "https://example.com/x?y=1");
        assert_eq!(destination("https://a.com/?q=1&amp;r=2"), "https://a.com/?q=1&r=2");
    }

    #[test]
    fn test_extract_results_in_document_order() {
        let page = results_page(&[
            result_anchor("https://www.rust-lang.org/", "<b>Rust</b> Programming Language"),
            result_anchor("https://doc.rust-lang.org/book/", "The Rust   Book"),
        ]);

        let results = extract_results(&page);

        assert_eq!(
            results,
            vec![
                SearchResult {
                    rank: 1,
                    title: "Rust Programming Language".to_string(),
                    url: "https://www.rust-lang.org/".to_string(),
                },
                SearchResult {
                    rank: 2,
                    title: "The Rust Book".to_string(),
                    url: "https://doc.rust-lang.org/book/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_extract_results_keeps_first_ten() {
        let anchors: Vec<String> = (1..=15)
            .map(|n| result_anchor(&format!("https://site{n}.com/"), &format!("Site {n}")))
            .collect();

        let results = extract_results(&results_page(&anchors));

        assert_eq!(results.len(), 10);
        assert_eq!(results[0].title, "Site 1");
        assert_eq!(results[9].rank, 10);
        assert_eq!(results[9].url, "https://site10.com/");
    }

    #[test]
    fn test_extract_results_matches_class_token_only() {
        let page = "<a class=\"result__url\" href=\"/a\">no</a>\
                    <a href='https://b.com/' class='result__a js-result'>yes</a>\
                    <a class=\"result__ablation\" href=\"/c\">no</a>";

        let results = extract_results(page);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://b.com/");
        assert_eq!(results[0].title, "yes");
    }

    #[test]
    fn test_extract_results_empty_page() {
        assert!(extract_results("<html><body>No results.</body></html>").is_empty());
    }

    #[tokio::test]
    async fn test_search_through_resolver() {
        let page = results_page(&[
            result_anchor("https://one.example/", "One"),
            result_anchor("https://two.example/path", "Two &amp; more"),
        ]);
        let transport = ScriptedTransport::new()
            .route("https://html.duckduckgo.com/html/?q=foo", ok_html(&page));
        let mut resolver =
            RedirectResolver::new(transport, ResponseCache::in_memory(), &Config::default());

        let results = SearchClient::new(&mut resolver)
            .search("foo")
            .await
            .expect("search");

        assert_eq!(results.len(), 2);
        assert_eq!((results[0].rank, results[0].url.as_str()), (1, "https://one.example/"));
        assert_eq!((results[1].rank, results[1].title.as_str()), (2, "Two & more"));

        let requests = resolver.transport().requests();
        assert_eq!(requests[0].accept(), "text/html");
    }

    #[tokio::test]
    async fn test_search_is_cached() {
        let transport = ScriptedTransport::new().route(
            "https://html.duckduckgo.com/html/?q=foo+bar",
            ok_html(&results_page(&[result_anchor("https://x.example/", "X")])),
        );
        let mut resolver =
            RedirectResolver::new(transport, ResponseCache::in_memory(), &Config::default());

        let first = SearchClient::new(&mut resolver).search("foo bar").await.expect("first");
        let second = SearchClient::new(&mut resolver).search("foo bar").await.expect("second");

        assert_eq!(first, second);
        assert_eq!(resolver.transport().call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_errors_are_typed() {
        let transport = ScriptedTransport::new().route(
            "https://html.duckduckgo.com/html/?q=broken",
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n".to_string(),
        );
        let mut resolver =
            RedirectResolver::new(transport, ResponseCache::in_memory(), &Config::default());

        let err = SearchClient::new(&mut resolver)
            .search("unrouted")
            .await
            .expect_err("no route");
        match err {
            SearchError::Fetch { term, source } => {
                assert_eq!(term, "unrouted");
                assert!(matches!(source, FetchError::Connect { .. }));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }

        let err = SearchClient::new(&mut resolver)
            .search("broken")
            .await
            .expect_err("no boundary");
        assert!(matches!(err, SearchError::Render(RenderError::MissingHeaderBoundary)));
    }

    #[test]
    fn test_display() {
        let result = SearchResult {
            rank: 3,
            title: "Title".to_string(),
            url: "https://a.com/".to_string(),
        };
        assert_eq!(result.to_string(), "3. Title\n   https://a.com/");
    }
}
