//! Conversational replies. The only task whose result is free text rather
//! than a JSON schema; an empty reply is treated like a parse failure.

use crate::context::PromptContext;

use super::TaskError;

pub fn instruction(context: &PromptContext, message: &str) -> String {
    let mood = context
        .user_mood
        .as_deref()
        .map(|mood| format!(" They mentioned feeling {mood}."))
        .unwrap_or_default();

    format!(
        "The traveler says: \"{message}\".{mood} Reply conversationally in a few \
         sentences, staying on travel planning topics."
    )
}

pub fn parse(text: &str) -> Result<String, TaskError> {
    let reply = text.trim();
    if reply.is_empty() {
        return Err(TaskError::Schema("conversational reply was empty".to_string()));
    }
    Ok(reply.to_string())
}

/// Canned apology; phrased differently for signed-in travelers so the UI can
/// still nudge anonymous visitors toward signing in.
pub fn fallback(signed_in: bool) -> String {
    if signed_in {
        "Sorry, I couldn't reach the planning assistant just now. Your profile and trips \
         are safe - please try that again in a moment."
            .to_string()
    } else {
        "Sorry, I couldn't reach the planning assistant just now. Please try again in a \
         moment, or sign in to get suggestions tailored to your trips."
            .to_string()
    }
}
