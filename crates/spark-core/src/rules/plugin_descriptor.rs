//! Patch rule for `atlassian-plugin.xml`.
//!
//! The module fragment is rendered from the bundle's `module.xml.tmpl` before
//! the pipeline runs, so this rule works on the rendered text. Every bundle
//! emits a `<web-resource key="<module key>-resources">`; a re-run recognises
//! its earlier work by that exact key.

use crate::domain::ModuleKey;
use crate::patch::{Locator, PatchRule, Strategy, StructuralPath};

pub const ROOT: &str = "atlassian-plugin";

/// Rendered module fragment for one module key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFragment {
    pub key: ModuleKey,
    pub xml: String,
}

pub fn rules(key: &ModuleKey) -> Vec<PatchRule<ModuleFragment>> {
    let resources = StructuralPath::new().child(ROOT).child("web-resource");
    let resource_key = resource_key(key);

    let rule = PatchRule::new("spark-module")
        .applied_when(move |doc| {
            doc.resolve(&resources)
                .iter()
                .any(|m| m.node().attribute("key") == Some(resource_key.as_str()))
        })
        .strategy(Strategy::before(
            Locator::closing_tag(StructuralPath::new().child(ROOT)),
            "    ",
            |fragment: &ModuleFragment| fragment.xml.clone(),
        ));

    vec![rule]
}

pub fn resource_key(key: &ModuleKey) -> String {
    format!("{}-resources", key.as_str())
}
