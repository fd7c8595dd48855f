// src/extractors/fragment.rs
//! Navigation helpers over the parsed document tree.
//!
//! The site lays label and value cells out as alternating siblings, so most
//! fields are read a fixed number of sibling links away from a located label.
//! Offsets count every sibling node in the tree's arena (text and comment
//! nodes included), which is what makes `PAIRED_VALUE_HOPS` equal 2 when the
//! cells are separated by whitespace.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Selector};

use super::text::clean_text;
use crate::utils::error::ExtractError;

/// Label cell to value cell: skip the separator node, land on the value.
pub const PAIRED_VALUE_HOPS: usize = 2;

static BOXER_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"r/(\d+)").expect("Failed to compile BOXER_ID_RE")
});

/// Which neighbour of an anchor to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Preceding siblings (the left column).
    Left,
    /// Following siblings (the right column).
    Right,
}

/// Cleaned text of an element and all its descendants.
pub fn text_of(element: ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Raw text of the sibling `hops` nodes away, whatever kind of node it is.
pub fn node_sibling_text(anchor: ElementRef, side: Side, hops: usize) -> Option<String> {
    let mut node = *anchor;
    for _ in 0..hops {
        node = match side {
            Side::Left => node.prev_sibling()?,
            Side::Right => node.next_sibling()?,
        };
    }
    match node.value() {
        Node::Text(text) => Some(String::from(&*text.text)),
        Node::Element(_) => ElementRef::wrap(node).map(|el| el.text().collect()),
        _ => Some(String::new()),
    }
}

/// Cleaned text of the value paired with a label cell on `side`.
pub fn paired_text(label: ElementRef, side: Side) -> Option<String> {
    node_sibling_text(label, side, PAIRED_VALUE_HOPS).map(|t| clean_text(&t))
}

/// The value cell paired with a label cell, when it is an element.
pub fn paired_element(label: ElementRef, side: Side) -> Option<ElementRef> {
    let mut node = *label;
    for _ in 0..PAIRED_VALUE_HOPS {
        node = match side {
            Side::Left => node.prev_sibling()?,
            Side::Right => node.next_sibling()?,
        };
    }
    ElementRef::wrap(node)
}

/// The element `hops` element-siblings away, ignoring text nodes.
pub fn element_sibling(anchor: ElementRef, side: Side, hops: usize) -> Option<ElementRef> {
    let mut current = anchor;
    for _ in 0..hops {
        let mut node = *current;
        current = loop {
            node = match side {
                Side::Left => node.prev_sibling()?,
                Side::Right => node.next_sibling()?,
            };
            if let Some(el) = ElementRef::wrap(node) {
                break el;
            }
        };
    }
    Some(current)
}

/// Nearest ancestor element.
pub fn parent_element(element: ElementRef) -> Option<ElementRef> {
    element.parent().and_then(ElementRef::wrap)
}

/// Direct element children, addressable by position.
pub fn child_elements(element: ElementRef) -> Vec<ElementRef> {
    element.children().filter_map(ElementRef::wrap).collect()
}

/// First element under `scope` matching `selector` whose cleaned text equals `label`.
pub fn find_by_text<'a>(scope: ElementRef<'a>, selector: &Selector, label: &str) -> Option<ElementRef<'a>> {
    scope.select(selector).find(|el| text_of(*el) == label)
}

/// First element matching `selector` whose `style` attribute is exactly `style`.
pub fn find_by_style<'a>(scope: ElementRef<'a>, selector: &Selector, style: &str) -> Option<ElementRef<'a>> {
    scope
        .select(selector)
        .find(|el| el.value().attr("style") == Some(style))
}

/// Numeric boxer id from an `/en/proboxer/<id>` style href.
pub fn id_from_href(href: &str) -> Option<u64> {
    BOXER_ID_RE
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Compiles a CSS selector.
pub fn try_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector(format!("'{}': {:?}", css, e)))
}

/// Compiles a selector that is a compile-time constant.
pub(crate) fn selector(css: &str) -> Selector {
    try_selector(css).unwrap_or_else(|e| panic!("{}", e))
}
