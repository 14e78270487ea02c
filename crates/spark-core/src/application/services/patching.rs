use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    error::{SparkError, SparkResult},
    patch::{Pipeline, PipelineOutcome},
};

/// Run a pipeline against one file: one read, all rules, at most one write.
///
/// The file is not written when no rule changed it.
#[instrument(skip_all, fields(path = %path.display(), rules = pipeline.rules().len()))]
pub fn run_pipeline<C>(
    filesystem: &dyn Filesystem,
    path: &Path,
    pipeline: &Pipeline<C>,
    context: &C,
) -> SparkResult<PipelineOutcome> {
    let raw = filesystem.read_to_string(path)?;
    let outcome = pipeline
        .apply_all(&raw, context)
        .map_err(|e| SparkError::patch(path, e))?;

    if outcome.changed() {
        filesystem.write_file(path, outcome.text.as_bytes())?;
    } else {
        debug!("unchanged, not writing");
    }
    Ok(outcome)
}
