use crate::connectors::publisher::types::DeployedRevision;
use crate::models::{DeploymentBinding, RevisionBindingSet};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The platform reported a deployment entry without the devportal
    /// visibility flag. That is a source-side defect, so it is surfaced
    /// instead of being defaulted away.
    #[error("revision {revision_id}: deployment entry {index} ({name}) has no displayOnDevportal flag")]
    MissingDevportalFlag {
        revision_id: String,
        index: usize,
        name: String,
    },
}

/// Flatten the deployed revisions of one API into a per-revision binding
/// map. Every revision contributes a key (empty binding lists included),
/// entry order within a revision is kept, and nothing is deduplicated
/// across revisions.
pub fn extract_bindings(revisions: &[DeployedRevision]) -> Result<RevisionBindingSet, ExtractError> {
    let mut set = RevisionBindingSet::new();

    for revision in revisions {
        let mut bindings = Vec::with_capacity(revision.deployment_info.len());
        for (index, entry) in revision.deployment_info.iter().enumerate() {
            let display_on_devportal =
                entry
                    .display_on_devportal
                    .ok_or_else(|| ExtractError::MissingDevportalFlag {
                        revision_id: revision.id.clone(),
                        index,
                        name: entry.name.clone(),
                    })?;
            bindings.push(DeploymentBinding {
                name: entry.name.clone(),
                vhost: entry.vhost.clone(),
                display_on_devportal,
            });
        }
        set.insert(revision.id.clone(), bindings);
    }

    Ok(set)
}
