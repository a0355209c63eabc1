mod configure;
mod deploy;
mod new;
mod scale;

use gantry_engine::Reconciliation;

pub use configure::configure;
pub use deploy::deploy;
pub use new::new_service;
pub use scale::scale;

/// Human description of a reconcile outcome for command output.
pub(crate) fn outcome_text(outcome: &Reconciliation) -> &'static str {
    match outcome {
        Reconciliation::Created { .. } => "created",
        Reconciliation::Started => "started",
        Reconciliation::AlreadyRunning => "already running",
    }
}
