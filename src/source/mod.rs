//! Where phase data comes from.
//!
//! Phase and hour estimates can arrive from more than one place: a
//! formally produced work-breakdown document, or phases the narrative
//! generator estimated as a byproduct of writing proposal text. Sources
//! are ranked; the first one that yields a valid breakdown wins. The
//! choice is made once, at generation time; recalculation never
//! re-selects.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::{Phase, PhaseTask, WorkBreakdown};

/// Which source supplied the phases of a generated proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseOrigin {
    /// A formally produced work-breakdown document.
    FormalBreakdown,
    /// Phases estimated by the content generator.
    GeneratorEstimate,
    /// The built-in default phase set.
    DefaultPhases,
}

/// A ranked source of phase data: yields a breakdown or declines.
pub trait PhaseSource {
    fn origin(&self) -> PhaseOrigin;
    fn phases(&self) -> Option<WorkBreakdown>;
}

/// A formal work breakdown, when one exists for the project. Always
/// preferred over estimated phases.
pub struct FormalBreakdown(pub WorkBreakdown);

impl PhaseSource for FormalBreakdown {
    fn origin(&self) -> PhaseOrigin {
        PhaseOrigin::FormalBreakdown
    }

    fn phases(&self) -> Option<WorkBreakdown> {
        if self.0.phases.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Phases the content generator guessed while writing the narrative.
pub struct GeneratorEstimate(pub Vec<Phase>);

impl PhaseSource for GeneratorEstimate {
    fn origin(&self) -> PhaseOrigin {
        PhaseOrigin::GeneratorEstimate
    }

    fn phases(&self) -> Option<WorkBreakdown> {
        if self.0.is_empty() {
            None
        } else {
            Some(WorkBreakdown::new(self.0.clone()))
        }
    }
}

/// Try sources in rank order and return the first valid breakdown along
/// with its origin. A source holding invalid data (negative hours, empty
/// names) is skipped with a warning rather than failing resolution. The
/// default phase set closes the chain, so resolution always succeeds.
pub fn resolve_phases(sources: &[&dyn PhaseSource]) -> (WorkBreakdown, PhaseOrigin) {
    for source in sources {
        if let Some(breakdown) = source.phases() {
            match breakdown.validate() {
                Ok(()) => {
                    debug!("phase source selected: {:?}", source.origin());
                    return (breakdown, source.origin());
                }
                Err(err) => {
                    warn!("skipping {:?} phase source: {}", source.origin(), err);
                }
            }
        }
    }
    debug!("no phase source available, using the default phase set");
    (
        WorkBreakdown::new(default_phases()),
        PhaseOrigin::DefaultPhases,
    )
}

/// The fallback phase set used when no source can supply phases.
///
/// Kept as a single named constructor so the fallback is independently
/// testable and never spelled inline at call sites.
pub fn default_phases() -> Vec<Phase> {
    let mut planejamento = Phase::new("Planejamento", 16.0);
    planejamento.description = Some("Levantamento de requisitos e definição de escopo".into());

    let mut desenvolvimento = Phase::new("Desenvolvimento", 60.0);
    desenvolvimento.description = Some("Implementação das funcionalidades do projeto".into());
    desenvolvimento.tasks = vec![
        PhaseTask::new("Estrutura inicial", 12.0),
        PhaseTask::new("Funcionalidades principais", 36.0),
        PhaseTask::new("Integrações", 12.0),
    ];

    let mut homologacao = Phase::new("Testes e Homologação", 24.0);
    homologacao.description = Some("Testes, correções e validação com o cliente".into());

    let mut entrega = Phase::new("Entrega e Implantação", 8.0);
    entrega.description = Some("Publicação e repasse de conhecimento".into());

    vec![planejamento, desenvolvimento, homologacao, entrega]
}
