//! Advisor conversation log
//!
//! Ordered chat turns for the session. Turns are only removed in
//! user/assistant pairs so the transcript keeps alternating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::format::{format_amount, format_currency};
use crate::models::PlanSummary;

pub const GREETING: &str = "How can I help with your plan today?";
pub const CLEARED_GREETING: &str = "Chat history cleared. How can I help you?";

/// Who wrote a turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub turn_id: Uuid,
    pub role: TurnRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, text: String) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            role,
            text,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    /// Fresh log seeded with the assistant greeting
    pub fn new() -> Self {
        Self {
            turns: vec![ConversationTurn::new(TurnRole::Assistant, GREETING.to_string())],
        }
    }

    pub fn append(&mut self, role: TurnRole, text: String) {
        self.turns.push(ConversationTurn::new(role, text));
    }

    /// Remove a user turn together with the assistant reply that follows it.
    ///
    /// Does nothing unless `user_index` is a user turn immediately followed by
    /// an assistant turn. Returns whether the pair was removed.
    pub fn delete_pair(&mut self, user_index: usize) -> bool {
        let is_pair = matches!(
            (
                self.turns.get(user_index).map(|t| t.role),
                user_index
                    .checked_add(1)
                    .and_then(|next| self.turns.get(next))
                    .map(|t| t.role),
            ),
            (Some(TurnRole::User), Some(TurnRole::Assistant))
        );

        if !is_pair {
            debug!(user_index, "Ignoring delete: not a user/assistant pair");
            return false;
        }

        self.turns.drain(user_index..=user_index + 1);
        true
    }

    /// Reset to a single assistant turn
    pub fn clear(&mut self) {
        self.turns.clear();
        self.turns
            .push(ConversationTurn::new(TurnRole::Assistant, CLEARED_GREETING.to_string()));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the advisor prompt for one question.
///
/// Only the plan summary and the current question are sent; earlier turns
/// stay in the transcript but are not fed back to the model.
pub fn render_context(plan: &PlanSummary, question: &str) -> String {
    let (goal, target, years, _, final_value) = plan.fields();

    let plan_context = format!(
        "Context: User's goal is '{}' with a target of ₹{} over {} years. \
         Their projected final value is ₹{}.",
        goal,
        format_amount(target),
        years,
        format_currency(final_value)
    );

    format!(
        "You are a helpful AI Financial Advisor. {}. Answer the user's question: '{}'",
        plan_context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(log: &ConversationLog) -> Vec<TurnRole> {
        log.turns().iter().map(|t| t.role).collect()
    }

    fn sample_log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.append(TurnRole::User, "Should I invest more?".to_string());
        log.append(TurnRole::Assistant, "Consider raising SIPs.".to_string());
        log.append(TurnRole::User, "What about gold?".to_string());
        log.append(TurnRole::Assistant, "Keep it under 10%.".to_string());
        log
    }

    #[test]
    fn test_new_log_has_greeting() {
        let log = ConversationLog::new();
        assert_eq!(log.len(), 1);
        assert_eq!(log.turns()[0].role, TurnRole::Assistant);
        assert_eq!(log.turns()[0].text, GREETING);
    }

    #[test]
    fn test_delete_pair_removes_both_turns() {
        let mut log = sample_log();
        assert!(log.delete_pair(1));

        assert_eq!(log.len(), 3);
        assert_eq!(log.turns()[1].text, "What about gold?");
        assert_eq!(
            roles(&log),
            vec![TurnRole::Assistant, TurnRole::User, TurnRole::Assistant]
        );
    }

    #[test]
    fn test_delete_pair_rejects_invalid_indices() {
        let mut log = sample_log();
        let before: Vec<Uuid> = log.turns().iter().map(|t| t.turn_id).collect();

        // assistant turn at 0
        assert!(!log.delete_pair(0));
        // assistant turn at 2
        assert!(!log.delete_pair(2));
        // out of bounds
        assert!(!log.delete_pair(4));
        assert!(!log.delete_pair(usize::MAX));

        let after: Vec<Uuid> = log.turns().iter().map(|t| t.turn_id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_pair_needs_assistant_reply() {
        let mut log = ConversationLog::new();
        log.append(TurnRole::User, "Unanswered".to_string());
        assert!(!log.delete_pair(1));

        log.append(TurnRole::User, "Another".to_string());
        assert!(!log.delete_pair(1));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_clear_leaves_single_assistant_turn() {
        let mut log = sample_log();
        log.clear();
        assert_eq!(log.len(), 1);
        assert_eq!(log.turns()[0].role, TurnRole::Assistant);
        assert_eq!(log.turns()[0].text, CLEARED_GREETING);

        log.clear();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_render_context_with_plan() {
        let summary = PlanSummary::Ready {
            goal_name: "Retirement Fund".to_string(),
            target_amount: 10_000_000,
            timeline_years: 20,
            monthly_contribution: 15_000,
            final_value: 9_489_021.5,
        };

        let prompt = render_context(&summary, "Am I on track?");
        assert_eq!(
            prompt,
            "You are a helpful AI Financial Advisor. Context: User's goal is 'Retirement Fund' \
             with a target of ₹10,000,000 over 20 years. Their projected final value is \
             ₹9,489,021.50.. Answer the user's question: 'Am I on track?'"
        );
    }

    #[test]
    fn test_render_context_without_plan() {
        let prompt = render_context(&PlanSummary::Empty, "Hi");
        assert!(prompt.contains("User's goal is 'N/A' with a target of ₹0 over 0 years"));
        assert!(prompt.ends_with("'Hi'"));
    }
}
