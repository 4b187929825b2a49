//! Core data models for the goal planner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisorError;
use crate::format::{format_amount, format_currency};

/// Smallest goal the planner accepts (₹1 lakh)
pub const MIN_TARGET_AMOUNT: u64 = 100_000;
pub const MIN_TIMELINE_YEARS: u32 = 1;
pub const MAX_TIMELINE_YEARS: u32 = 50;

//
// ================= Enums =================
//

/// Fixed annual-rate tier chosen by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    /// Expected annual return as a fraction
    pub fn annual_rate(self) -> f64 {
        match self {
            RiskProfile::Conservative => 0.06,
            RiskProfile::Moderate => 0.09,
            RiskProfile::Aggressive => 0.12,
        }
    }

    /// Label shown in the risk selector, e.g. `Moderate (9%)`
    pub fn label(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative (6%)",
            RiskProfile::Moderate => "Moderate (9%)",
            RiskProfile::Aggressive => "Aggressive (12%)",
        }
    }

    fn name(self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        }
    }
}

impl FromStr for RiskProfile {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();

        RiskProfile::ALL
            .into_iter()
            .find(|p| wanted == p.name() || wanted == p.label().to_lowercase())
            .ok_or_else(|| {
                AdvisorError::Validation(format!(
                    "Unknown risk profile '{}'. Expected one of: {}",
                    s,
                    RiskProfile::ALL.map(|p| p.label()).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for RiskProfile {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether the projection clears the target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Surplus,
    Shortfall,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Surplus => "surplus",
            Outcome::Shortfall => "shortfall",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Plan Input =================
//

/// Parameters collected by the goal planner form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanInput {
    pub goal_name: String,
    pub target_amount: u64,
    pub timeline_years: u32,
    pub initial_investment: u64,
    pub monthly_contribution: u64,
    pub risk_profile: RiskProfile,
}

impl Default for PlanInput {
    fn default() -> Self {
        Self {
            goal_name: "Retirement Fund".to_string(),
            target_amount: 10_000_000,
            timeline_years: 20,
            initial_investment: 50_000,
            monthly_contribution: 15_000,
            risk_profile: RiskProfile::Moderate,
        }
    }
}

impl PlanInput {
    /// Reject values outside the ranges the planner form allows.
    ///
    /// Amounts are unsigned, so the non-negative bounds hold by construction.
    pub fn validate(&self) -> crate::Result<()> {
        if self.target_amount < MIN_TARGET_AMOUNT {
            return Err(AdvisorError::Validation(format!(
                "Target amount must be at least ₹{}",
                format_amount(MIN_TARGET_AMOUNT)
            )));
        }

        if !(MIN_TIMELINE_YEARS..=MAX_TIMELINE_YEARS).contains(&self.timeline_years) {
            return Err(AdvisorError::Validation(format!(
                "Timeline must be between {} and {} years",
                MIN_TIMELINE_YEARS, MAX_TIMELINE_YEARS
            )));
        }

        Ok(())
    }
}

//
// ================= Projection =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: f64,
}

//
// ================= Goal Plan =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPlan {
    pub goal_name: String,
    pub target_amount: u64,
    pub timeline_years: u32,
    pub initial_investment: u64,
    pub monthly_contribution: u64,
    pub risk_profile: RiskProfile,
    pub annual_rate: f64,
    pub projection: Vec<ProjectionPoint>,
    pub final_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_commentary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GoalPlan {
    /// Projected value minus target; negative means a shortfall
    pub fn gap(&self) -> f64 {
        self.final_value - self.target_amount as f64
    }

    pub fn outcome(&self) -> Outcome {
        if self.gap() < 0.0 {
            Outcome::Shortfall
        } else {
            Outcome::Surplus
        }
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::Ready {
            goal_name: self.goal_name.clone(),
            target_amount: self.target_amount,
            timeline_years: self.timeline_years,
            monthly_contribution: self.monthly_contribution,
            final_value: self.final_value,
        }
    }
}

//
// ================= Summary =================
//

/// Read-only view of the current plan for display and prompt building
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PlanSummary {
    Empty,
    Ready {
        goal_name: String,
        target_amount: u64,
        timeline_years: u32,
        monthly_contribution: u64,
        final_value: f64,
    },
}

impl PlanSummary {
    pub fn is_empty(&self) -> bool {
        matches!(self, PlanSummary::Empty)
    }

    /// Bullet list shown above the advisor chat
    pub fn to_markdown(&self) -> String {
        let (goal, target, years, monthly, final_value) = self.fields();

        format!(
            "- **Goal:** {}\n\
             - **Target:** ₹{}\n\
             - **Timeline:** {} years\n\
             - **Monthly Contribution:** ₹{}\n\
             - **Projected Final Value:** ₹{}\n",
            goal,
            format_amount(target),
            years,
            format_amount(monthly),
            format_currency(final_value)
        )
    }

    /// Fields with the placeholders used when no plan exists
    pub(crate) fn fields(&self) -> (&str, u64, u32, u64, f64) {
        match self {
            PlanSummary::Empty => ("N/A", 0, 0, 0, 0.0),
            PlanSummary::Ready {
                goal_name,
                target_amount,
                timeline_years,
                monthly_contribution,
                final_value,
            } => (
                goal_name.as_str(),
                *target_amount,
                *timeline_years,
                *monthly_contribution,
                *final_value,
            ),
        }
    }
}
