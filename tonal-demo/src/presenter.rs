//! Single-page HTML rendering.
//!
//! The page is the whole UI: a heading, a short description, one text area,
//! one button and at most one message box below it. Nothing here touches
//! the pipeline; handlers pass in what to show.

use std::fmt::Write;

use tonal_types::{SentimentLabel, Severity, Variant};

/// Static text of one demo page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCopy {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub prompt: &'static str,
    pub placeholder: &'static str,
    pub button: &'static str,
}

const DESCRIPTION: &str = "This app analyzes the sentiment of tweets about <strong>Apple</strong> \
     and <strong>Google</strong> products.<br>Enter a tweet below to see if it's \
     <strong>Positive</strong>, <strong>Negative</strong>, or <strong>Neutral</strong>!";

impl PageCopy {
    pub const fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classifier => PageCopy {
                page_title: "Apple & Google Tweet Sentiment Analyzer",
                heading: "Twitter Sentiment Analyzer",
                prompt: "Enter a tweet about Apple or Google:",
                placeholder: "e.g., I love my new iPhone 15!",
                button: "Analyze Sentiment",
            },
            Variant::Lexicon => PageCopy {
                page_title: "Sentiment on Apple & Google",
                heading: "Sentiment Analyzer",
                prompt: "Enter a tweet about Apple or Google:",
                placeholder: "e.g., The new Google Pixel camera is amazing!",
                button: "Analyze",
            },
        }
    }
}

/// What the message box shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// First visit, nothing submitted yet.
    Idle,
    /// Submission rejected; the text is shown as-is.
    Warning(&'static str),
    /// A label to show with its color.
    Labeled(SentimentLabel),
}

impl Outcome {
    fn message(&self) -> Option<(Severity, String)> {
        match *self {
            Outcome::Idle => None,
            Outcome::Warning(text) => Some((Severity::Warning, escape_html(text))),
            Outcome::Labeled(label) => Some((
                label.severity(),
                format!("Sentiment: <strong>{}</strong>", label.as_str()),
            )),
        }
    }
}

/// Renders the full page. `input` is echoed back into the text area.
pub fn render_page(variant: Variant, input: &str, outcome: Outcome) -> String {
    let copy = PageCopy::for_variant(variant);
    let mut html = String::with_capacity(2048);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{page_title}</title>
<style>
body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}
textarea {{ width: 100%; height: 7rem; font-size: 1rem; }}
button {{ margin-top: .5rem; padding: .4rem 1rem; font-size: 1rem; }}
.msg {{ margin-top: 1rem; padding: .8rem 1rem; border-radius: .4rem; }}
.success {{ background: #e6f4ea; color: #1e7b34; }}
.error {{ background: #fdecea; color: #a8271b; }}
.info {{ background: #e8f0fe; color: #1a4fa0; }}
.warning {{ background: #fff8e1; color: #8a6d00; }}
</style>
</head>
<body>
<h1>{heading}</h1>
<p>{description}</p>
<form method="post" action="/">
<label for="text">{prompt}</label>
<textarea id="text" name="text" placeholder="{placeholder}">{input}</textarea>
<button type="submit">{button}</button>
</form>
"#,
        page_title = escape_html(copy.page_title),
        heading = copy.heading,
        description = DESCRIPTION,
        prompt = copy.prompt,
        placeholder = copy.placeholder,
        input = escape_html(input),
        button = copy.button,
    );

    if let Some((severity, message)) = outcome.message() {
        let _ = writeln!(
            html,
            r#"<div class="msg {}" role="status">{}</div>"#,
            severity.as_str(),
            message
        );
    }

    html.push_str("<hr>\n</body>\n</html>\n");
    html
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
