//! Minimal markup tree produced by the structured-text renderer.
//!
//! Elements carry an optional identity key derived from their position in the
//! source tree. Keys are kept for callers that diff or test output and are
//! never serialised.

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "source"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
    Fragment(Vec<MarkupNode>),
}

impl MarkupNode {
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Text(value.into())
    }

    pub fn fragment(children: Vec<MarkupNode>) -> Self {
        MarkupNode::Fragment(children)
    }

    /// Serialise to an HTML string.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            MarkupNode::Element(element) => element.write_html(out),
            MarkupNode::Text(text) => push_escaped_text(out, text),
            MarkupNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub key: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Adds the attribute only when `value` is present.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = MarkupNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[cfg(test)]
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped_attribute(out, value);
            out.push('"');
        }
        out.push('>');

        if self.is_void() {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_escaped_text(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attribute(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_nested_elements_without_keys() {
        let markup: MarkupNode = Element::new("a")
            .key("t-0")
            .attr("href", "#intro")
            .child(Element::new("h2").attr("id", "intro").child(MarkupNode::text("Intro")))
            .into();

        assert_eq!(
            markup.to_html(),
            r##"<a href="#intro"><h2 id="intro">Intro</h2></a>"##
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let markup: MarkupNode = Element::new("a")
            .attr("title", "\"quoted\" & <b>")
            .child(MarkupNode::text("1 < 2 & 3 > 2"))
            .into();

        assert_eq!(
            markup.to_html(),
            "<a title=\"&quot;quoted&quot; &amp; &lt;b&gt;\">1 &lt; 2 &amp; 3 &gt; 2</a>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let markup = MarkupNode::fragment(vec![
            MarkupNode::text("a"),
            Element::new("br").into(),
            Element::new("img").attr("src", "/x.png").into(),
        ]);

        assert_eq!(markup.to_html(), "a<br><img src=\"/x.png\">");
    }

    #[test]
    fn optional_attributes_are_skipped() {
        let element = Element::new("img")
            .attr_opt("alt", Some("cat"))
            .attr_opt("title", None::<String>);

        assert_eq!(element.get_attr("alt"), Some("cat"));
        assert_eq!(element.get_attr("title"), None);
    }
}
