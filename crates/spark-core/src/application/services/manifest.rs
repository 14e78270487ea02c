//! Dependency manifest (`package.json`) merging.

use std::path::Path;

use serde_json::{Map, Value, json};

use crate::{application::ApplicationError, domain::RenderContext};

/// Starting point when the project has no manifest yet.
pub fn skeleton(context: &RenderContext) -> Value {
    json!({
        "name": context.artifact_id,
        "version": "1.0.0",
        "private": true,
        "scripts": {},
        "dependencies": {},
        "devDependencies": {}
    })
}

/// Merge `overlay` into `base`. Objects merge key by key, recursively; any
/// other value in `overlay` replaces the one in `base`. New keys keep the
/// overlay's order after the existing ones.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => merge_maps(base, overlay),
        (base, overlay) => *base = overlay,
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

/// Merge the rendered fragment into the existing manifest text (or the
/// skeleton) and return the new file contents: two-space indented JSON with a
/// trailing newline. `path` only names the manifest in errors.
pub fn merge_manifest(
    path: &Path,
    existing: Option<&str>,
    fragment: &str,
    context: &RenderContext,
) -> Result<String, ApplicationError> {
    let fail = |reason: String| ApplicationError::ManifestMerge {
        path: path.to_path_buf(),
        reason,
    };

    let mut manifest = match existing {
        Some(text) => serde_json::from_str(text)
            .map_err(|e| fail(format!("existing manifest: {e}")))?,
        None => skeleton(context),
    };
    if !manifest.is_object() {
        return Err(fail("existing manifest is not a JSON object".into()));
    }

    let fragment: Value = serde_json::from_str(fragment)
        .map_err(|e| fail(format!("rendered fragment: {e}")))?;
    if !fragment.is_object() {
        return Err(fail("rendered fragment is not a JSON object".into()));
    }

    deep_merge(&mut manifest, fragment);
    let mut text = serde_json::to_string_pretty(&manifest).map_err(|e| fail(e.to_string()))?;
    text.push('\n');
    Ok(text)
}
