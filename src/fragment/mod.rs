//! Owned document fragments.
//!
//! `scraper` parses into a tree that is neither mutable nor `Send`, so the
//! post container is copied out into this small element tree before any
//! assembly step touches it.

mod serialize;

pub use serialize::html_escape;

use scraper::{ElementRef, Html, Selector};

/// A node in a fragment: an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An HTML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Parse `html` as a fragment and copy out the first element matching `selector`.
pub fn select_first(html: &str, selector: &str) -> Option<Element> {
    let selector = Selector::parse(selector).ok()?;
    let document = Html::parse_fragment(html.trim());
    let found = document.select(&selector).next().map(Element::from_element_ref);
    found
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Copy a scraper element (and its element/text descendants) into an owned tree.
    pub fn from_element_ref(el: ElementRef<'_>) -> Self {
        let value = el.value();
        let mut element = Element::new(value.name());
        element.attrs = value
            .attrs()
            .map(|(name, val)| (name.to_string(), val.to_string()))
            .collect();

        for child in el.children() {
            match child.value() {
                scraper::Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        element
                            .children
                            .push(Node::Element(Self::from_element_ref(child_el)));
                    }
                }
                scraper::Node::Text(text) => {
                    let text: &str = text;
                    element.children.push(Node::Text(text.to_string()));
                }
                _ => {}
            }
        }
        element
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = kept.join(" ");
        self.set_attr("class", &joined);
    }

    /// Set one inline style property, replacing an earlier value for it.
    pub fn set_style(&mut self, property: &str, value: &str) {
        let mut declarations: Vec<(String, String)> = self
            .attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|decl| {
                let (k, v) = decl.split_once(':')?;
                Some((k.trim().to_string(), v.trim().to_string()))
            })
            .filter(|(k, _)| !k.is_empty())
            .collect();

        match declarations.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }

        let style = declarations
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr("style", &style);
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.attr("style")?
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(k, _)| k.trim() == property)
            .map(|(_, v)| v.trim())
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text()),
            }
        }
        out
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn prepend(&mut self, child: Element) {
        self.children.insert(0, Node::Element(child));
    }

    /// First descendant (document order) matching `pred`.
    pub fn find_first(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(e) = child {
                if pred(e) {
                    return Some(e);
                }
                if let Some(found) = e.find_first(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_first_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if pred(e) {
                    return Some(e);
                }
                if let Some(found) = e.find_first_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All descendants matching `pred`, in document order.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_matches(pred, &mut out);
        out
    }

    fn collect_matches<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(e) = child {
                if pred(e) {
                    out.push(e);
                }
                e.collect_matches(pred, out);
            }
        }
    }

    /// Detach and return the first descendant matching `pred`.
    pub fn remove_first(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<Element> {
        for i in 0..self.children.len() {
            if let Node::Element(e) = &mut self.children[i] {
                if pred(e) {
                    return match self.children.remove(i) {
                        Node::Element(removed) => Some(removed),
                        Node::Text(_) => None,
                    };
                }
                if let Some(found) = e.remove_first(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visit every descendant element in document order.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                f(e);
                e.walk_mut(f);
            }
        }
    }
}
