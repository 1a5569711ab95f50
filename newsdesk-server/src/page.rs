//! The single HTML page: topic form, busy indicator, result area.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// What the result area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    Idle,
    /// Markdown article.
    Article(&'a str),
    /// Error message, shown as plain text.
    Error(&'a str),
}

/// Render markdown to HTML. Raw HTML in the source is shown as text, and
/// link or image targets outside `http`, `https` and `mailto` become `#`.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                Event::Start(Tag::Link { link_type, dest_url: safe_url(dest_url), title, id })
            }
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                Event::Start(Tag::Image { link_type, dest_url: safe_url(dest_url), title, id })
            }
            other => other,
        });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

const ALLOWED_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim_start().to_ascii_lowercase();
    if ALLOWED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render_page(topic: &str, outcome: Outcome<'_>) -> String {
    let result = match outcome {
        Outcome::Idle => String::new(),
        Outcome::Article(markdown) => {
            format!("<article class=\"result\">\n{}</article>", render_markdown(markdown))
        }
        Outcome::Error(message) => format!(
            "<div class=\"error\" role=\"alert\">An error occurred: {}</div>",
            escape_html(message)
        ),
    };

    format!("{}{}{}{}{}", PAGE_HEAD, escape_html(topic), PAGE_FORM_END, result, PAGE_TAIL)
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI-Powered Tech News Generator</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 64rem; padding: 0 1rem; }
  label { display: block; margin-bottom: .5rem; }
  input[type=text] { width: 100%; padding: .5rem; font-size: 1rem; box-sizing: border-box; }
  button { margin-top: 1rem; padding: .5rem 1rem; font-size: 1rem; }
  #spinner { display: none; margin-top: 1rem; color: #555; }
  .busy #spinner { display: block; }
  .error {
    margin-top: 1rem; padding: 1rem; background: #fde8e8; color: #9b1c1c; border-radius: .25rem;
  }
  .result { margin-top: 1.5rem; }
</style>
</head>
<body>
<h1>📰 Tech News Generator AI Agent</h1>
<p>Discover and write compelling articles on the latest tech trends with AI assistance.</p>
<form id="topic-form" method="post" action="/generate"
      onsubmit="this.classList.add('busy'); this.querySelector('button').disabled = true;">
  <label for="topic">Enter a technology topic:</label>
  <input type="text" id="topic" name="topic" value=""#;

const PAGE_FORM_END: &str = r#"">
  <button type="submit">Generate Article</button>
  <div id="spinner">Analyzing and generating content...</div>
</form>
"#;

const PAGE_TAIL: &str = r#"
</body>
</html>
"#;
