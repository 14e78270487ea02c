//! Idempotent structural patching of XML descriptors.
//!
//! Edits are byte splices at nodes located by [`StructuralPath`]s, so
//! everything the rules do not touch keeps its original formatting. Each
//! [`PatchRule`] checks whether its change is already present before doing
//! anything, which makes a whole [`Pipeline`] safe to run repeatedly.
//!
//! ```
//! use spark_core::patch::{Locator, PatchRule, Pipeline, Strategy, StructuralPath};
//!
//! let list = StructuralPath::new().child("list");
//! let rule = PatchRule::new("item")
//!     .applied_when_exists(list.clone().child("item"))
//!     .strategy(Strategy::before(Locator::closing_tag(list), "  ", |_: &()| {
//!         "<item/>".to_string()
//!     }));
//!
//! let out = Pipeline::new(vec![rule]).apply_all("<list>\n</list>", &()).unwrap();
//! assert!(out.text.contains("  <item/>"));
//! ```

pub mod applier;
pub mod document;
pub mod error;
pub mod path;
pub mod pipeline;
pub mod query;
pub mod rule;

pub use applier::{Outcome, apply, begin_marker, end_marker};
pub use document::{Anchor, Document, Match, Placement, Token};
pub use error::PatchError;
pub use path::StructuralPath;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use rule::{Locator, PatchRule, Pick, Strategy};
