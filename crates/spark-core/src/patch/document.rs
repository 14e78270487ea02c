//! A parsed XML document that keeps its raw text.
//!
//! The tree only answers questions; every edit is a byte splice on the raw
//! text, so formatting, comments and entity spelling outside the spliced
//! region come out byte-for-byte unchanged. A [`Document`] borrows the text it
//! was parsed from, and an [`Anchor`] borrows the document, so after a splice
//! the new text has to be parsed again before it can be queried.

use std::marker::PhantomData;
use std::ops::Range;

use roxmltree::Node;

use crate::patch::{
    error::PatchError,
    path::StructuralPath,
    query,
};

/// Which part of a matched node an anchor covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// The whole node, from `<` of its start tag to `>` of its end tag.
    Element,
    /// The element's `</name>` tag. Absent for self-closing elements.
    ClosingTag,
    /// The whole element, but only when it is written `<name/>`.
    SelfClosing,
}

/// Where a fragment goes relative to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
    Replace,
}

pub struct Document<'input> {
    raw: &'input str,
    tree: roxmltree::Document<'input>,
}

impl std::fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.raw.len())
            .finish_non_exhaustive()
    }
}

impl<'input> Document<'input> {
    pub fn parse(raw: &'input str) -> Result<Self, PatchError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let tree = roxmltree::Document::parse_with_options(raw, options).map_err(|e| {
            PatchError::MalformedDocument {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { raw, tree })
    }

    pub fn raw(&self) -> &'input str {
        self.raw
    }

    pub fn root_element(&self) -> Node<'_, 'input> {
        self.tree.root_element()
    }

    pub(crate) fn root(&self) -> Node<'_, 'input> {
        self.tree.root()
    }

    /// All nodes matching `path`, in document order without duplicates.
    pub fn resolve(&self, path: &StructuralPath) -> Vec<Match<'_, 'input>> {
        query::resolve(self, path)
    }

    pub fn exists(&self, path: &StructuralPath) -> bool {
        !self.resolve(path).is_empty()
    }

    pub fn first(&self, path: &StructuralPath) -> Option<Match<'_, 'input>> {
        self.resolve(path).into_iter().next()
    }

    pub fn last(&self, path: &StructuralPath) -> Option<Match<'_, 'input>> {
        self.resolve(path).pop()
    }

    /// Trimmed text of the first match, if any.
    pub fn text_of(&self, path: &StructuralPath) -> Option<String> {
        self.first(path).map(|m| m.text().trim().to_string())
    }

    /// Turn a match into an anchor on this document.
    pub fn anchor<'d>(&'d self, m: &Match<'d, 'input>, token: Token) -> Option<Anchor<'d>> {
        let range = m.node.range();
        let span = match token {
            Token::Element => range,
            Token::ClosingTag => {
                if self.is_self_closing(m.node) {
                    return None;
                }
                let body = &self.raw[range.clone()];
                let at = body.rfind("</")?;
                range.start + at..range.end
            }
            Token::SelfClosing => {
                if !self.is_self_closing(m.node) {
                    return None;
                }
                range
            }
        };
        Some(Anchor {
            span,
            owner: self.raw.as_ptr() as usize,
            _doc: PhantomData,
        })
    }

    /// Whitespace between the start of the anchor's line and the anchor, or
    /// `None` when other content precedes it on that line.
    pub fn line_prefix(&self, anchor: &Anchor<'_>) -> Option<&'input str> {
        let start = anchor.span.start;
        let line_start = self.raw[..start].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &self.raw[line_start..start];
        prefix
            .chars()
            .all(|c| c == ' ' || c == '\t')
            .then_some(prefix)
    }

    /// Produce new text with `text` placed at the anchor. The document itself
    /// is left untouched.
    pub fn splice(
        &self,
        anchor: &Anchor<'_>,
        placement: Placement,
        text: &str,
    ) -> Result<String, PatchError> {
        if anchor.owner != self.raw.as_ptr() as usize || anchor.span.end > self.raw.len() {
            return Err(PatchError::StaleAnchor);
        }
        let (cut_from, cut_to) = match placement {
            Placement::Before => (anchor.span.start, anchor.span.start),
            Placement::After => (anchor.span.end, anchor.span.end),
            Placement::Replace => (anchor.span.start, anchor.span.end),
        };
        let mut out = String::with_capacity(self.raw.len() + text.len());
        out.push_str(&self.raw[..cut_from]);
        out.push_str(text);
        out.push_str(&self.raw[cut_to..]);
        Ok(out)
    }

    fn is_self_closing(&self, node: Node<'_, 'input>) -> bool {
        node.is_element()
            && !node.has_children()
            && self.raw[node.range()].trim_end().ends_with("/>")
    }
}

/// One node picked by a structural path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'d, 'input> {
    node: Node<'d, 'input>,
}

impl<'d, 'input> Match<'d, 'input> {
    pub(crate) fn new(node: Node<'d, 'input>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node<'d, 'input> {
        self.node
    }

    /// Byte offset of the node's first character.
    pub fn offset(&self) -> usize {
        self.node.range().start
    }

    pub fn range(&self) -> Range<usize> {
        self.node.range()
    }

    /// Local element name; empty for comments.
    pub fn name(&self) -> &str {
        if self.node.is_element() {
            self.node.tag_name().name()
        } else {
            ""
        }
    }

    /// Direct text content, or the body of a comment.
    pub fn text(&self) -> String {
        text_content(self.node)
    }
}

pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    if node.is_comment() {
        return node.text().unwrap_or_default().to_string();
    }
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

/// A span in one specific document. It cannot outlive that document, and
/// [`Document::splice`] refuses an anchor taken from a different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'d> {
    span: Range<usize>,
    owner: usize,
    _doc: PhantomData<fn(&'d ()) -> &'d ()>,
}

impl Anchor<'_> {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
