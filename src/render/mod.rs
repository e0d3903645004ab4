//! Content-type driven rendering of raw responses.
//!
//! - `application/json` bodies are pretty-printed (raw body plus a diagnostic
//!   when they do not parse)
//! - `text/html` bodies, or bodies without a content type, are reduced to the
//!   visible text of their `<body>` element
//! - anything else is passed through unmodified

mod html;

use std::fmt;

use log::debug;

use crate::error_handling::RenderError;
use crate::http::HttpResponse;

pub use html::{
    collapse_whitespace, decode_entities, extract_body, html_to_text, render_html, strip_tags,
};

/// How a body was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Html,
    Raw,
}

/// Result of rendering a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub kind: ContentKind,
    pub text: String,
    /// Set when rendering fell back to the raw body
    pub diagnostic: Option<String>,
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Picks a renderer from a `Content-Type` value. A missing header means HTML.
pub fn classify(content_type: Option<&str>) -> ContentKind {
    let content_type = content_type.unwrap_or("text/html").to_ascii_lowercase();
    if content_type.contains("application/json") {
        ContentKind::Json
    } else if content_type.contains("text/html") {
        ContentKind::Html
    } else {
        ContentKind::Raw
    }
}

/// Renders a raw response.
///
/// # Errors
///
/// Returns `RenderError::MissingHeaderBoundary` if the response has no blank
/// line between headers and body. A JSON body that fails to parse is not an
/// error: the raw body is returned with a diagnostic.
pub fn render(raw: &str) -> Result<RenderedOutput, RenderError> {
    let response = HttpResponse::parse(raw)?;
    let kind = classify(response.header("Content-Type"));
    debug!(
        "Rendering {} byte body as {kind:?} (status {})",
        response.body.len(),
        response.status_code
    );

    let output = match kind {
        ContentKind::Json => render_json(response.body),
        ContentKind::Html => RenderedOutput {
            kind,
            text: render_html(&response.body),
            diagnostic: None,
        },
        ContentKind::Raw => RenderedOutput {
            kind,
            text: response.body,
            diagnostic: None,
        },
    };
    Ok(output)
}

fn render_json(body: String) -> RenderedOutput {
    let pretty = serde_json::from_str::<serde_json::Value>(&body)
        .and_then(|value| serde_json::to_string_pretty(&value));

    match pretty {
        Ok(text) => RenderedOutput {
            kind: ContentKind::Json,
            text,
            diagnostic: None,
        },
        Err(e) => {
            let diagnostic = format!("Response body is not valid JSON: {e}");
            debug!("{diagnostic}");
            RenderedOutput {
                kind: ContentKind::Json,
                text: body,
                diagnostic: Some(diagnostic),
            }
        }
    }
}
