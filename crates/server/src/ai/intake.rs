//! Symptom intake orchestrator: drives one chat turn end to end.
//!
//! The error boundary runs through the turn commit. Anything that fails
//! before the turn is appended aborts the request; anything after — the
//! extraction call, the directory lookup, the analysis write, the rename —
//! is logged and swallowed, because the user has already seen the reply and
//! a flaky extraction must never erase it.

use serde::Serialize;
use triage_core::SymptomAnalysisResult;

use super::{CompletionModel, analysis, prompts};
use crate::error::AppError;
use crate::store::{ChatTurn, ConversationStore, DoctorDirectory};

/// Reply substituted when the model produced no usable output
pub const REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that. Could you please repeat?";

/// Window label used when the analysis identified no symptoms
const FALLBACK_WINDOW_LABEL: &str = "Symptom Chat";

/// Result of one processed chat turn
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub message: String,
    pub window_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SymptomAnalysisResult>,
}

/// Process one user chat turn.
///
/// Rebuilds the full transcript, asks the model for the next intake reply,
/// commits the turn, and — only when the reply starts with the summary
/// sentinel — runs the extraction pipeline and attaches its result to the
/// just-committed turn.
pub async fn process_turn(
    model: &dyn CompletionModel,
    store: &dyn ConversationStore,
    directory: &dyn DoctorDirectory,
    user_id: &str,
    window_id: &str,
    message: &str,
) -> Result<TurnOutcome, AppError> {
    if user_id.trim().is_empty() || window_id.trim().is_empty() || message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "userId, windowId and message are required".to_string(),
        ));
    }

    store
        .get_or_create_window(user_id, window_id)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open chat window: {e}")))?;

    let prior_turns = store
        .list_turns(window_id)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to load chat history: {e}")))?;

    // The model receives the entire history every turn. No windowing — this
    // grows linearly with conversation length.
    let transcript = render_transcript(&prior_turns, message);

    let bot_response = match model.complete(&prompts::intake_prompt(&transcript)).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!(window_id, "Model returned no usable output, using fallback reply");
            REPLY_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, window_id, "Completion failed, using fallback reply");
            REPLY_FALLBACK.to_string()
        }
    };

    let turn = store
        .append_turn(window_id, user_id, message, &bot_response)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to persist chat turn: {e}")))?;

    if !prompts::is_summary_ready(&bot_response) {
        return Ok(TurnOutcome {
            message: bot_response,
            window_id: window_id.to_string(),
            analysis: None,
        });
    }

    // The reply is committed. Everything below is best effort.
    tracing::info!(window_id, "Summary sentinel detected, running symptom analysis");

    let narrative = symptom_narrative(&prior_turns, message);

    let analysis = match analysis::analyze_symptoms(model, directory, &narrative).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(error = %e, window_id, "Symptom analysis failed; reply stands without it");
            return Ok(TurnOutcome {
                message: bot_response,
                window_id: window_id.to_string(),
                analysis: None,
            });
        }
    };

    if let Err(e) = store.set_turn_analysis(turn.id, &analysis).await {
        tracing::warn!(error = %e, window_id, "Failed to attach analysis to turn");
    }

    let label = analysis
        .identified_symptoms
        .first()
        .map(|symptom| format!("Chat: {symptom}"))
        .unwrap_or_else(|| FALLBACK_WINDOW_LABEL.to_string());
    if let Err(e) = store.rename_window(window_id, &label).await {
        tracing::warn!(error = %e, window_id, "Failed to rename chat window");
    }

    Ok(TurnOutcome {
        message: bot_response,
        window_id: window_id.to_string(),
        analysis: Some(analysis),
    })
}

/// Alternating "User:/Bot:" lines for every prior turn, then the new message
fn render_transcript(prior_turns: &[ChatTurn], message: &str) -> String {
    let mut transcript = String::new();
    for turn in prior_turns {
        transcript.push_str("User: ");
        transcript.push_str(&turn.user_message);
        transcript.push('\n');
        transcript.push_str("Bot: ");
        transcript.push_str(&turn.bot_response);
        transcript.push('\n');
    }
    transcript.push_str("User: ");
    transcript.push_str(message);
    transcript
}

/// Every prior user message plus the current one, period-joined: the full
/// symptom narrative fed to the extraction call
fn symptom_narrative(prior_turns: &[ChatTurn], message: &str) -> String {
    let mut parts: Vec<&str> = prior_turns
        .iter()
        .map(|turn| turn.user_message.as_str())
        .collect();
    parts.push(message);
    parts.join(". ")
}
