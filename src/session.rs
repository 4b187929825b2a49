//! Session state and command handling
//!
//! Every user action is a discrete [`Command`]. Executing one mutates the
//! session and returns a fresh [`SessionView`]. A failed command reports its
//! error and leaves the session exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::conversation::{render_context, ConversationLog, ConversationTurn, TurnRole};
use crate::error::AdvisorError;
use crate::gemini::AdvisorGateway;
use crate::models::{GoalPlan, PlanInput, PlanSummary};
use crate::plan::{strategy_prompt, PlanState};
use crate::Result;

#[derive(Debug, Clone)]
pub enum Command {
    /// "Project My Wealth"
    ProjectWealth(PlanInput),
    /// "Generate AI Strategy"
    GenerateStrategy,
    Ask { question: String },
    DeleteTurnPair { user_index: usize },
    ClearChat,
}

/// Chart series for the projection plot with its target line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionChart {
    pub title: String,
    pub years: Vec<u32>,
    pub values: Vec<f64>,
    pub target_amount: u64,
}

impl ProjectionChart {
    pub fn from_plan(plan: &GoalPlan) -> Self {
        Self {
            title: format!("Projection for '{}'", plan.goal_name),
            years: plan.projection.iter().map(|p| p.year).collect(),
            values: plan.projection.iter().map(|p| p.value).collect(),
            target_amount: plan.target_amount,
        }
    }
}

/// Everything the presentation layer needs after a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub plan: Option<GoalPlan>,
    pub summary: PlanSummary,
    pub chart: Option<ProjectionChart>,
    pub turns: Vec<ConversationTurn>,
}

#[derive(Debug, Default)]
pub struct Session {
    plan: PlanState,
    conversation: ConversationLog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> &PlanState {
        &self.plan
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub fn view(&self) -> SessionView {
        let plan = self.plan.current();

        SessionView {
            plan: plan.cloned(),
            summary: self.plan.summary(),
            chart: plan.map(ProjectionChart::from_plan),
            turns: self.conversation.turns().to_vec(),
        }
    }

    pub async fn execute(
        &mut self,
        command: Command,
        gateway: &dyn AdvisorGateway,
    ) -> Result<SessionView> {
        let result = match command {
            Command::ProjectWealth(input) => self.plan.set_plan(input).map(|_| ()),
            Command::GenerateStrategy => self.generate_strategy(gateway).await,
            Command::Ask { question } => self.ask(&question, gateway).await,
            Command::DeleteTurnPair { user_index } => {
                if !self.conversation.delete_pair(user_index) {
                    info!(user_index, "Delete request did not match a turn pair");
                }
                Ok(())
            }
            Command::ClearChat => {
                self.conversation.clear();
                info!("Chat history cleared");
                Ok(())
            }
        };

        match &result {
            Err(e) if e.is_user_error() => info!("Command rejected: {}", e),
            Err(e) => warn!("Command failed: {}", e),
            Ok(()) => {}
        }

        result.map(|_| self.view())
    }

    async fn generate_strategy(&mut self, gateway: &dyn AdvisorGateway) -> Result<()> {
        let plan = self.plan.current().ok_or(AdvisorError::NoPlan)?;
        ensure_credential(gateway)?;

        let prompt = strategy_prompt(plan);
        info!(goal = %plan.goal_name, "Generating strategy");

        let insights = gateway.generate(&prompt).await?;
        self.plan.attach_commentary(insights);
        Ok(())
    }

    async fn ask(&mut self, question: &str, gateway: &dyn AdvisorGateway) -> Result<()> {
        if self.plan.current().is_none() {
            return Err(AdvisorError::NoPlan);
        }
        ensure_credential(gateway)?;

        let question = question.trim();
        if question.is_empty() {
            return Err(AdvisorError::Validation("Question must not be empty".to_string()));
        }

        let prompt = render_context(&self.plan.summary(), question);
        let answer = gateway.generate(&prompt).await?;

        // Both turns land together so a failed call leaves no orphan question
        self.conversation.append(TurnRole::User, question.to_string());
        self.conversation.append(TurnRole::Assistant, answer);
        Ok(())
    }
}

fn ensure_credential(gateway: &dyn AdvisorGateway) -> Result<()> {
    if gateway.has_credential() {
        Ok(())
    } else {
        Err(AdvisorError::MissingCredential)
    }
}
