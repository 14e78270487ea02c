use tracing::info;

use crate::patch::{
    applier::{Outcome, apply},
    error::PatchError,
    rule::PatchRule,
};

/// Result of running every rule of a pipeline over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub text: String,
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

impl PipelineOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// An ordered rule list. Each rule sees the text produced by the previous one.
#[derive(Debug)]
pub struct Pipeline<C> {
    rules: Vec<PatchRule<C>>,
}

impl<C> Pipeline<C> {
    pub fn new(rules: Vec<PatchRule<C>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PatchRule<C>] {
        &self.rules
    }

    /// Fold the rules over `raw`. Stops at the first failing rule; no I/O.
    pub fn apply_all(&self, raw: &str, ctx: &C) -> Result<PipelineOutcome, PatchError> {
        let mut outcome = PipelineOutcome {
            text: raw.to_string(),
            applied: Vec::new(),
            skipped: Vec::new(),
        };

        for rule in &self.rules {
            let (text, result) = apply(&outcome.text, rule, ctx)?;
            match result {
                Outcome::Skipped => outcome.skipped.push(rule.name().to_string()),
                Outcome::Applied { .. } => {
                    info!(rule = rule.name(), "patched");
                    outcome.applied.push(rule.name().to_string());
                }
            }
            outcome.text = text;
        }

        Ok(outcome)
    }
}

impl<C> From<Vec<PatchRule<C>>> for Pipeline<C> {
    fn from(rules: Vec<PatchRule<C>>) -> Self {
        Self::new(rules)
    }
}
