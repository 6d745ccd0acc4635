//! Narrow parsed-document interface
//!
//! Extractors never touch the concrete HTML parser type directly. This
//! module wraps `scraper::Html` behind a small query surface: CSS-selector
//! lookups, attribute/text access, and a document-order "header then next
//! row" scan used by the per-round statistics tables.

use scraper::{ElementRef, Html, Selector};

/// An owned, parsed HTML document.
///
/// Not `Send` (the underlying DOM uses non-atomic string sharing), so
/// documents are always parsed and consumed on the task that owns them;
/// parallel fetch workers hand back raw bodies instead.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML body into a queryable document.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Returns the first element matching the CSS selector, if any.
    pub fn select_first(&self, css: &str) -> Option<Node<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.html.select(&selector).next().map(Node::new)
    }

    /// Returns all elements matching the CSS selector, in document order.
    pub fn select_all(&self, css: &str) -> Vec<Node<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).map(Node::new).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// For every `<th>` whose text equals `header_text`, returns the first
    /// `<tr>` that follows it in document order.
    ///
    /// The statistics tables repeat a "Round N" header cell once in the
    /// totals table and once in the significant-strikes table; the data row
    /// for each lives in a sibling `<tbody>`, so plain child/sibling
    /// traversal cannot reach it. A pre-order scan of the whole tree can.
    pub fn header_then_row(&self, header_text: &str) -> Vec<Node<'_>> {
        let nodes: Vec<_> = self.html.root_element().descendants().collect();
        let mut rows = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            let Some(element) = ElementRef::wrap(*node) else {
                continue;
            };
            if element.value().name() != "th" || Node::new(element).text() != header_text {
                continue;
            }
            // First <tr> after this header in document order. The header's
            // own enclosing <tr> is an ancestor and was already passed.
            for later in &nodes[i + 1..] {
                if let Some(el) = ElementRef::wrap(*later) {
                    if el.value().name() == "tr" {
                        rows.push(Node::new(el));
                        break;
                    }
                }
            }
        }

        rows
    }
}

/// A single element within a parsed document.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        self.element.value().name()
    }

    /// An attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.element
            .value()
            .attr("class")
            .map(|attr| attr.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// All descendant text, with whitespace runs collapsed to single
    /// spaces and the ends trimmed.
    pub fn text(&self) -> String {
        let joined: String = self
            .element
            .text()
            .flat_map(|fragment| fragment.chars().chain(std::iter::once(' ')))
            .collect();
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// First matching descendant element.
    pub fn select_first(&self, css: &str) -> Option<Node<'a>> {
        let selector = Selector::parse(css).ok()?;
        self.element.select(&selector).next().map(Node::new)
    }

    /// All matching descendant elements, in document order.
    pub fn select_all(&self, css: &str) -> Vec<Node<'a>> {
        match Selector::parse(css) {
            Ok(selector) => self.element.select(&selector).map(Node::new).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// The nearest enclosing element, if any.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Node::new)
    }
}
