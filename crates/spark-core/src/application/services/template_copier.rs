use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::ports::{Filesystem, TemplateRenderer},
    domain::{RenderContext, TemplateFile},
    error::SparkResult,
};

/// Materialize `files` under `destination`.
///
/// Files ending in `.tmpl` are rendered and written without the suffix;
/// everything else is copied byte for byte. Missing directories are created.
/// Returns the written paths in input order.
pub fn copy_tree(
    filesystem: &dyn Filesystem,
    renderer: &dyn TemplateRenderer,
    files: impl IntoIterator<Item = TemplateFile>,
    context: &RenderContext,
    destination: &Path,
) -> SparkResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for file in files {
        let target = destination.join(file.output_path().as_path());
        if let Some(parent) = target.parent() {
            if !filesystem.exists(parent) {
                filesystem.create_dir_all(parent)?;
            }
        }

        if file.is_template() {
            let name = file.path.as_str_lossy();
            let text = renderer.render(&name, file.as_text()?, context)?;
            filesystem.write_file(&target, text.as_bytes())?;
        } else {
            filesystem.write_file(&target, &file.contents)?;
        }

        debug!(path = %target.display(), rendered = file.is_template(), "wrote");
        written.push(target);
    }

    Ok(written)
}
