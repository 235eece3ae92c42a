//! Element tree and HTML serialization.

use std::collections::BTreeMap;
use std::fmt::Write;

/// A detached element with attributes, inline style and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an inline style property, replacing any previous value.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.style.push((property, value)),
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for a descendant (or self) matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(predicate))
    }

    /// All text content of this element and its descendants, in order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !self.style.is_empty() {
            let style: Vec<String> = self
                .style
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&style.join("; ")));
        }
        out.push('>');

        if let Some(text) = &self.text {
            // Style sheets are raw text, everything else is escaped
            if self.tag == "style" {
                out.push_str(text);
            } else {
                out.push_str(&escape(text));
            }
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let el = Element::new("div")
            .with_id("box")
            .with_attr("class", "card")
            .with_style("color", "white")
            .with_child(Element::new("span").with_text("hi"));

        assert_eq!(
            el.to_html(),
            r#"<div id="box" class="card" style="color: white"><span>hi</span></div>"#
        );
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let el = Element::new("a")
            .with_attr("href", "https://x/?a=1&b=\"2\"")
            .with_text("<script>");

        let html = el.to_html();
        assert!(html.contains("href=\"https://x/?a=1&amp;b=&quot;2&quot;\""));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_style_text_is_raw() {
        let el = Element::new("style").with_text("a > b { color: red; }");
        assert_eq!(el.to_html(), "<style>a > b { color: red; }</style>");
    }

    #[test]
    fn test_set_style_replaces() {
        let mut el = Element::new("div").with_style("animation", "in");
        el.set_style("animation", "out");
        assert_eq!(el.style("animation"), Some("out"));
        assert_eq!(el.style.len(), 1);
    }

    #[test]
    fn test_find_and_text_content() {
        let el = Element::new("div")
            .with_child(Element::new("b").with_text("Title"))
            .with_child(Element::new("a").with_attr("data-action", "dismiss").with_text("x"));

        let close = el
            .find(&|e| e.attributes.get("data-action").map(String::as_str) == Some("dismiss"))
            .unwrap();
        assert_eq!(close.tag, "a");
        assert_eq!(el.text_content(), "Titlex");
    }
}
