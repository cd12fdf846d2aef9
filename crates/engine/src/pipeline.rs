//! The fixed, ordered suggestor pipeline.

use std::time::Instant;

use crate::chain::SelectorChain;
use crate::constructor::Constructor;
use crate::error::Result;
use crate::iferr::IfErr;
use crate::loader::{Contents, Loader};
use crate::types::Replacement;

/// A single context-matching transform.
///
/// Suggestors share one input contract and one two-outcome result: an empty
/// replacement means "does not apply here, try the next one"; a populated
/// replacement wins the pipeline. Hard errors abort the whole invocation.
pub trait Suggestor {
    fn name(&self) -> &'static str;

    fn suggest(&self, loader: &Loader) -> Result<Replacement>;
}

/// Run the suggestors in priority order against one file/offset pair.
///
/// The first non-empty replacement wins and the remaining suggestors are
/// never invoked. All suggestors share the loader, so the parse and the
/// semantic load each happen at most once no matter who asks first.
pub fn generate_replacement(contents: Contents, offset: usize) -> Result<Replacement> {
    let loader = Loader::new(contents, offset);

    let suggestors: [&dyn Suggestor; 3] = [&Constructor, &IfErr, &SelectorChain];
    for suggestor in suggestors {
        let started = Instant::now();
        let replacement = suggestor.suggest(&loader)?;
        tracing::debug!(
            suggestor = suggestor.name(),
            elapsed_us = started.elapsed().as_micros() as u64,
            applied = !replacement.is_empty(),
            "suggestor finished"
        );

        if !replacement.is_empty() {
            return Ok(replacement);
        }
    }

    Ok(Replacement::default())
}
