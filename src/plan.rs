//! Plan state
//!
//! Holds the single active goal plan. A recompute replaces the plan wholesale
//! and drops any commentary generated for the previous one.

use chrono::Utc;
use tracing::{debug, info};

use crate::format::{format_amount, format_currency};
use crate::models::{GoalPlan, PlanInput, PlanSummary};
use crate::projection;
use crate::Result;

#[derive(Debug, Default)]
pub struct PlanState {
    current: Option<GoalPlan>,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, project and store a new plan.
    ///
    /// On validation failure the existing plan is left untouched.
    pub fn set_plan(&mut self, input: PlanInput) -> Result<&GoalPlan> {
        input.validate()?;

        let annual_rate = input.risk_profile.annual_rate();
        let series = projection::project(
            input.initial_investment as f64,
            input.monthly_contribution as f64,
            annual_rate,
            input.timeline_years,
        );
        let final_value = projection::final_value(&series);

        info!(
            goal = %input.goal_name,
            years = input.timeline_years,
            rate = annual_rate,
            final_value,
            "Projected wealth"
        );

        let plan = GoalPlan {
            goal_name: input.goal_name,
            target_amount: input.target_amount,
            timeline_years: input.timeline_years,
            initial_investment: input.initial_investment,
            monthly_contribution: input.monthly_contribution,
            risk_profile: input.risk_profile,
            annual_rate,
            projection: series,
            final_value,
            ai_commentary: None,
            created_at: Utc::now(),
        };

        Ok(self.current.insert(plan))
    }

    /// Attach AI commentary to the current plan; no-op without a plan
    pub fn attach_commentary(&mut self, text: String) {
        match self.current.as_mut() {
            Some(plan) => plan.ai_commentary = Some(text),
            None => debug!("Dropping commentary: no plan set"),
        }
    }

    pub fn summary(&self) -> PlanSummary {
        self.current
            .as_ref()
            .map(GoalPlan::summary)
            .unwrap_or(PlanSummary::Empty)
    }

    pub fn current(&self) -> Option<&GoalPlan> {
        self.current.as_ref()
    }
}

/// Prompt asking the model for a strategy on the given plan
pub fn strategy_prompt(plan: &GoalPlan) -> String {
    format!(
        "Analyze this financial plan: Goal='{}', Target=₹{}, Timeline={} years. \
         Projected value is ₹{}, resulting in a {} of ₹{}. \
         Provide: 1. AI Insights summary. 2. Budgeting Suggestions. \
         3. Investment Strategy. 4. Risk Analysis.",
        plan.goal_name,
        format_amount(plan.target_amount),
        plan.timeline_years,
        format_currency(plan.final_value),
        plan.outcome(),
        format_currency(plan.gap().abs()),
    )
}
