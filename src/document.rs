//! Queryable document handle over fetched markup
//!
//! Uses the scraper crate to parse HTML and select elements by CSS patterns.

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

/// Compiled structural pattern (tag + class + ancestry)
#[derive(Debug, Clone)]
pub struct Pattern {
    css: String,
    selector: Selector,
}

impl Pattern {
    pub fn parse(css: &str) -> Result<Self, ParseError> {
        let selector = Selector::parse(css).map_err(|e| ParseError::InvalidPattern {
            pattern: css.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }
}

/// Parsed page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup into a document. Empty input has no tree to query.
    pub fn load(markup: &str) -> Result<Self, ParseError> {
        if markup.trim().is_empty() {
            return Err(ParseError::EmptyMarkup);
        }

        Ok(Self {
            html: Html::parse_document(markup),
        })
    }

    /// All elements matching `pattern`, in document order
    pub fn select(&self, pattern: &Pattern) -> Vec<Node<'_>> {
        self.html.select(&pattern.selector).map(Node).collect()
    }
}

/// Element within a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Descendants of this element matching `pattern`
    pub fn select(&self, pattern: &Pattern) -> Vec<Node<'a>> {
        self.0.select(&pattern.selector).map(Node).collect()
    }

    /// First descendant matching `pattern`
    pub fn first(&self, pattern: &Pattern) -> Option<Node<'a>> {
        self.0.select(&pattern.selector).next().map(Node)
    }

    /// Trimmed text content
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(String::from)
    }
}
