//! Query interface over a loaded spec document.
//!
//! The extractor only needs selector queries, text content, link targets
//! and a couple of tree moves, so that is all `Document` and `Node` expose.
//! `HtmlDocument` satisfies them with `scraper`; no browser is involved.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ExtractError;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub trait Document {
    type Element<'a>: Node<'a>
    where
        Self: 'a;

    /// Origin + path of the document, without query or fragment.
    fn base_url(&self) -> &str;

    /// All matching elements in document order.
    fn select_all<'a>(&'a self, criterion: &str) -> Result<Vec<Self::Element<'a>>, ExtractError>;

    fn reference(&self, id: &str) -> String {
        format!("{}#{}", self.base_url(), id)
    }
}

pub trait Node<'a>: Copy + Sized {
    fn id(&self) -> Option<&'a str>;

    /// Text content, whitespace collapsed and trimmed.
    fn text(&self) -> String;

    /// `href` resolved against the document base, like the DOM property.
    fn href(&self) -> Option<String>;

    fn select_all(&self, criterion: &str) -> Result<Vec<Self>, ExtractError>;

    fn parent_element(&self) -> Option<Self>;

    fn next_element_sibling(&self) -> Option<Self>;

    fn select_first(&self, criterion: &str) -> Result<Option<Self>, ExtractError> {
        Ok(self.select_all(criterion)?.into_iter().next())
    }
}

pub struct HtmlDocument {
    html: Html,
    base: Url,
}

impl HtmlDocument {
    pub fn parse(markup: &str, base_url: &str) -> Result<Self> {
        let mut base =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        base.set_query(None);
        base.set_fragment(None);
        Ok(HtmlDocument {
            html: Html::parse_document(markup),
            base,
        })
    }
}

impl Document for HtmlDocument {
    type Element<'a> = HtmlNode<'a>;

    fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn select_all<'a>(&'a self, criterion: &str) -> Result<Vec<HtmlNode<'a>>, ExtractError> {
        let selector = compile(criterion)?;
        Ok(self
            .html
            .select(&selector)
            .map(|el| HtmlNode { el, base: &self.base })
            .collect())
    }
}

#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    el: ElementRef<'a>,
    base: &'a Url,
}

impl<'a> HtmlNode<'a> {
    fn wrap(&self, el: ElementRef<'a>) -> Self {
        HtmlNode { el, base: self.base }
    }
}

impl<'a> Node<'a> for HtmlNode<'a> {
    fn id(&self) -> Option<&'a str> {
        self.el.value().id()
    }

    fn text(&self) -> String {
        collapse_whitespace(&self.el.text().collect::<String>())
    }

    fn href(&self) -> Option<String> {
        let raw = self.el.value().attr("href")?;
        self.base.join(raw).ok().map(String::from)
    }

    fn select_all(&self, criterion: &str) -> Result<Vec<Self>, ExtractError> {
        let selector = compile(criterion)?;
        Ok(self.el.select(&selector).map(|el| self.wrap(el)).collect())
    }

    fn parent_element(&self) -> Option<Self> {
        self.el.parent().and_then(ElementRef::wrap).map(|el| self.wrap(el))
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.el
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|el| self.wrap(el))
    }
}

fn compile(criterion: &str) -> Result<Selector, ExtractError> {
    Selector::parse(criterion).map_err(|e| ExtractError::InvalidSelector {
        selector: criterion.to_string(),
        reason: e.to_string(),
    })
}

pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}
