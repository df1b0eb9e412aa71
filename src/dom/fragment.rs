use scraper::{Html, Selector};
use std::fmt;

/// An HTML snippet that can be appended to a container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    html: String,
}

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }

    /// Number of elements in the fragment, nested ones included.
    pub fn element_count(&self) -> usize {
        let html = self.parse();
        let elements = html
            .root_element()
            .descendants()
            .filter(|node| node.value().is_element())
            .count();
        // the fragment parser always wraps content in an <html> root
        elements.saturating_sub(1)
    }

    /// Visible text, one line per non-blank text node.
    pub fn text_lines(&self) -> Vec<String> {
        self.parse()
            .root_element()
            .text()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Text content of every element matching `css`.
    ///
    /// An unparseable selector matches nothing.
    pub fn select_text(&self, css: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(css) else {
            return Vec::new();
        };
        self.parse()
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }

    /// Wrap the whole fragment in a `<tag class="...">` element.
    ///
    /// `class` is escaped as an attribute value; `tag` must be a plain tag name.
    pub fn wrap(self, tag: &str, class: &str) -> Self {
        let class = escape_attribute(class);
        Self::new(format!("<{tag} class=\"{class}\">{}</{tag}>", self.html))
    }

    fn parse(&self) -> Html {
        Html::parse_fragment(&self.html)
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl From<String> for Fragment {
    fn from(html: String) -> Self {
        Self::new(html)
    }
}

impl From<&str> for Fragment {
    fn from(html: &str) -> Self {
        Self::new(html)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
