//! HTML serialization for owned fragments.

use super::{Element, Node};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Element {
    /// Serialize this element and its subtree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&self.tag.as_str());
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) if raw_text => out.push_str(t),
                Node::Text(t) => out.push_str(&html_escape(t)),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}
