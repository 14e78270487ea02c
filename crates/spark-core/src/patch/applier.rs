//! Applying a single rule to raw document text.

use tracing::{debug, trace};

use crate::patch::{
    document::{Document, Placement},
    error::PatchError,
    rule::PatchRule,
};

const MARKER: &str = "spark-scaffold";

pub fn begin_marker(rule: &str) -> String {
    format!("<!-- {MARKER}:begin {rule} -->")
}

pub fn end_marker(rule: &str) -> String {
    format!("<!-- {MARKER}:end {rule} -->")
}

/// What [`apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The rule's check reported the change as present.
    Skipped,
    /// The fragment went in using strategy `strategy` (0 is the primary).
    Applied { strategy: usize, offset: usize },
}

/// Apply `rule` to `raw`, returning the new text.
///
/// Parses `raw`, returns it unchanged when the rule is already applied,
/// otherwise splices the rendered fragment at the first strategy whose
/// anchor exists. Bytes outside the inserted block are preserved.
pub fn apply<C>(raw: &str, rule: &PatchRule<C>, ctx: &C) -> Result<(String, Outcome), PatchError> {
    let doc = Document::parse(raw)?;

    if rule.is_applied(&doc) {
        debug!(rule = rule.name(), "already applied");
        return Ok((raw.to_string(), Outcome::Skipped));
    }

    for (index, strategy) in rule.strategies().iter().enumerate() {
        let Some(anchor) = strategy.locator.locate(&doc) else {
            trace!(rule = rule.name(), locator = %strategy.locator, "anchor not found");
            continue;
        };

        let block = wrap(
            rule.name(),
            &strategy.render(ctx),
            &strategy.indent,
            strategy.placement,
            doc.line_prefix(&anchor),
        );
        let offset = match strategy.placement {
            Placement::After => anchor.span().end,
            Placement::Before | Placement::Replace => anchor.span().start,
        };
        let text = doc.splice(&anchor, strategy.placement, &block)?;

        debug!(rule = rule.name(), strategy = index, offset, "applied");
        return Ok((text, Outcome::Applied { strategy: index, offset }));
    }

    Err(PatchError::StructuralPrecondition {
        rule: rule.name().to_string(),
        tried: rule
            .strategies()
            .iter()
            .map(|s| s.locator.to_string())
            .collect(),
    })
}

/// Surround the fragment with marker comments and indent it.
///
/// `line_prefix` is the whitespace already sitting before the anchor on its
/// line; for `Before` and `Replace` the block starts there, so that much of
/// the first line's indent is dropped and restored after the block.
fn wrap(
    rule: &str,
    fragment: &str,
    indent: &str,
    placement: Placement,
    line_prefix: Option<&str>,
) -> String {
    let mut lines = vec![format!("{indent}{}", begin_marker(rule))];
    for line in fragment.trim_end_matches(['\n', '\r']).lines() {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{indent}{line}"));
        }
    }
    lines.push(format!("{indent}{}", end_marker(rule)));
    let block = lines.join("\n");

    match placement {
        Placement::After => format!("\n{block}"),
        Placement::Before => {
            let prefix = line_prefix.unwrap_or(indent);
            format!("{}\n{prefix}", strip_lead(&block, line_prefix))
        }
        Placement::Replace => strip_lead(&block, line_prefix).to_string(),
    }
}

fn strip_lead<'a>(block: &'a str, line_prefix: Option<&str>) -> &'a str {
    match line_prefix {
        Some(prefix) => block
            .strip_prefix(prefix)
            .unwrap_or_else(|| block.trim_start_matches([' ', '\t'])),
        None => block.trim_start_matches([' ', '\t']),
    }
}
