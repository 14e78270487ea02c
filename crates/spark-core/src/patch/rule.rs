//! Declarative patch rules.
//!
//! A rule names a change, knows how to tell that the change is already in a
//! document, and lists one or more strategies for where to put it. The first
//! strategy whose locator resolves wins.

use std::fmt;

use crate::patch::{
    document::{Anchor, Document, Placement, Token},
    path::StructuralPath,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pick {
    #[default]
    First,
    Last,
}

/// Finds the anchor node for a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub path: StructuralPath,
    pub token: Token,
    pub pick: Pick,
}

impl Locator {
    pub fn element(path: StructuralPath) -> Self {
        Self {
            path,
            token: Token::Element,
            pick: Pick::First,
        }
    }

    pub fn closing_tag(path: StructuralPath) -> Self {
        Self {
            path,
            token: Token::ClosingTag,
            pick: Pick::First,
        }
    }

    pub fn self_closing(path: StructuralPath) -> Self {
        Self {
            path,
            token: Token::SelfClosing,
            pick: Pick::First,
        }
    }

    pub fn last(mut self) -> Self {
        self.pick = Pick::Last;
        self
    }

    pub fn locate<'d>(&self, doc: &'d Document<'_>) -> Option<Anchor<'d>> {
        let found = match self.pick {
            Pick::First => doc.first(&self.path),
            Pick::Last => doc.last(&self.path),
        }?;
        doc.anchor(&found, self.token)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self.token {
            Token::Element => "",
            Token::ClosingTag => " (closing tag)",
            Token::SelfClosing => " (self-closing)",
        };
        let pick = match self.pick {
            Pick::First => "",
            Pick::Last => " (last)",
        };
        write!(f, "{}{token}{pick}", self.path)
    }
}

type FragmentFn<C> = Box<dyn Fn(&C) -> String + Send + Sync>;
type AppliedFn = Box<dyn Fn(&Document<'_>) -> bool + Send + Sync>;

/// One way to place a rule's fragment.
pub struct Strategy<C> {
    pub locator: Locator,
    pub placement: Placement,
    /// Prepended to every fragment line, including the marker comments.
    pub indent: String,
    fragment: FragmentFn<C>,
}

impl<C> Strategy<C> {
    pub fn new(
        locator: Locator,
        placement: Placement,
        indent: &str,
        fragment: impl Fn(&C) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            locator,
            placement,
            indent: indent.to_string(),
            fragment: Box::new(fragment),
        }
    }

    pub fn before(
        locator: Locator,
        indent: &str,
        fragment: impl Fn(&C) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(locator, Placement::Before, indent, fragment)
    }

    pub fn after(
        locator: Locator,
        indent: &str,
        fragment: impl Fn(&C) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(locator, Placement::After, indent, fragment)
    }

    pub fn replace(
        locator: Locator,
        indent: &str,
        fragment: impl Fn(&C) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(locator, Placement::Replace, indent, fragment)
    }

    pub fn render(&self, ctx: &C) -> String {
        (self.fragment)(ctx)
    }
}

impl<C> fmt::Debug for Strategy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("locator", &self.locator)
            .field("placement", &self.placement)
            .field("indent", &self.indent)
            .finish_non_exhaustive()
    }
}

pub struct PatchRule<C> {
    name: String,
    already_applied: AppliedFn,
    strategies: Vec<Strategy<C>>,
}

impl<C> PatchRule<C> {
    /// A rule that never reports itself applied until a check is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            already_applied: Box::new(|_: &Document<'_>| false),
            strategies: Vec::new(),
        }
    }

    pub fn applied_when(
        mut self,
        check: impl Fn(&Document<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.already_applied = Box::new(check);
        self
    }

    /// Applied once anything matches `path`.
    pub fn applied_when_exists(self, path: StructuralPath) -> Self {
        self.applied_when(move |doc| doc.exists(&path))
    }

    pub fn strategy(mut self, strategy: Strategy<C>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategies(&self) -> &[Strategy<C>] {
        &self.strategies
    }

    pub fn is_applied(&self, doc: &Document<'_>) -> bool {
        (self.already_applied)(doc)
    }
}

impl<C> fmt::Debug for PatchRule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchRule")
            .field("name", &self.name)
            .field("strategies", &self.strategies)
            .finish_non_exhaustive()
    }
}
