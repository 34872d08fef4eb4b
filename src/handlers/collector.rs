// src/handlers/collector.rs

use crate::{
    error::AppError,
    models::{backend::Roster, round::LabeledAnswer},
    utils::openrouter::ModelBackend,
};

/// Queries every backend of the roster with the same prompt.
///
/// * Backends are asked one at a time, in roster order.
/// * Each reply is trimmed and paired with its backend label.
/// * The first failure aborts the whole collection with `BackendQueryFailed`;
///   no partial list is ever returned and nothing is retried.
pub async fn gather_responses(
    backend: &dyn ModelBackend,
    roster: &Roster,
    system: &str,
    prompt: &str,
) -> Result<Vec<LabeledAnswer>, AppError> {
    let mut answers = Vec::with_capacity(roster.len());

    for entry in roster.backends() {
        tracing::debug!("Querying {} ({})", entry.label, entry.model_id);

        let text = backend
            .complete(&entry.model_id, system, prompt)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query {}: {:?}", entry.label, e);
                AppError::BackendQueryFailed {
                    label: entry.label.clone(),
                    cause: format!("{:#}", e),
                }
            })?;

        answers.push(LabeledAnswer::new(entry.label.clone(), text.trim()));
    }

    Ok(answers)
}
