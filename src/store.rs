use std::collections::HashMap;

use uuid::Uuid;

use crate::model::Proposal;

/// Errors raised by a proposal store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("version conflict for project {project}: expected {expected}, got {got}")]
    VersionConflict {
        project: Uuid,
        expected: u32,
        got: u32,
    },

    #[error("no proposal stored for project {project}")]
    NotFound { project: Uuid },
}

/// Persistence seam for proposals.
///
/// The engine only defines the interface; storage technology is the
/// caller's choice. The version number doubles as an optimistic
/// concurrency token: a stale write fails with `VersionConflict` instead
/// of silently winning.
pub trait ProposalStore {
    /// The latest stored version for a project, if any.
    fn latest(&self, project_id: Uuid) -> Option<&Proposal>;

    /// A specific stored version.
    fn get(&self, project_id: Uuid, version: u32) -> Option<&Proposal>;

    /// Store a newly generated snapshot. Its version must be exactly one
    /// past the latest stored version (1 for the first).
    fn insert(&mut self, proposal: Proposal) -> Result<(), StoreError>;

    /// Replace the current version in place after a numeric
    /// recalculation. The proposal's version must match the latest stored
    /// one.
    fn replace(&mut self, proposal: Proposal) -> Result<(), StoreError>;
}

/// In-memory store; versions are held in insertion order per project.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    proposals: HashMap<Uuid, Vec<Proposal>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProposalStore for InMemoryStore {
    fn latest(&self, project_id: Uuid) -> Option<&Proposal> {
        self.proposals.get(&project_id).and_then(|v| v.last())
    }

    fn get(&self, project_id: Uuid, version: u32) -> Option<&Proposal> {
        self.proposals
            .get(&project_id)?
            .iter()
            .find(|p| p.version == version)
    }

    fn insert(&mut self, proposal: Proposal) -> Result<(), StoreError> {
        let versions = self.proposals.entry(proposal.project_id).or_default();
        let expected = versions.last().map_or(1, |p| p.version + 1);
        if proposal.version != expected {
            return Err(StoreError::VersionConflict {
                project: proposal.project_id,
                expected,
                got: proposal.version,
            });
        }
        versions.push(proposal);
        Ok(())
    }

    fn replace(&mut self, proposal: Proposal) -> Result<(), StoreError> {
        let project = proposal.project_id;
        let versions = self
            .proposals
            .get_mut(&project)
            .ok_or(StoreError::NotFound { project })?;
        match versions.last_mut() {
            Some(current) if current.version == proposal.version => {
                *current = proposal;
                Ok(())
            }
            Some(current) => Err(StoreError::VersionConflict {
                project,
                expected: current.version,
                got: proposal.version,
            }),
            None => Err(StoreError::NotFound { project }),
        }
    }
}
