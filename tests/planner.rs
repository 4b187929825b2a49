use wealthwise_advisor::gemini::MockGateway;
use wealthwise_advisor::projection::{final_value, project};
use wealthwise_advisor::{AdvisorError, Command, Outcome, PlanInput, RiskProfile, Session};

#[test]
fn test_projection_shape_over_inputs() {
    for initial in [0.0, 1.0, 50_000.0] {
        for monthly in [0.0, 500.0, 15_000.0] {
            for rate in RiskProfile::ALL.map(|p| p.annual_rate()).into_iter().chain([0.0]) {
                for years in [1, 2, 10, 50] {
                    let series = project(initial, monthly, rate, years);
                    assert_eq!(series.len(), years as usize + 1);
                    assert_eq!(series[0].value, initial);
                    assert!(series.windows(2).all(|w| w[1].value >= w[0].value));
                }
            }
        }
    }
}

#[test]
fn test_longer_timeline_never_projects_less() {
    let mut previous = 0.0;
    for years in 1..=50 {
        let value = final_value(&project(50_000.0, 15_000.0, 0.09, years));
        assert!(value >= previous);
        previous = value;
    }
}

#[tokio::test]
async fn test_reference_retirement_scenario() {
    let gateway = MockGateway::replying("Raise your monthly SIP.");
    let mut session = Session::new();

    let view = session
        .execute(
            Command::ProjectWealth(PlanInput {
                goal_name: "Retirement Fund".to_string(),
                target_amount: 10_000_000,
                timeline_years: 20,
                initial_investment: 50_000,
                monthly_contribution: 15_000,
                risk_profile: "Moderate (9%)".parse().unwrap(),
            }),
            &gateway,
        )
        .await
        .unwrap();

    let plan = view.plan.unwrap();
    let growth = 1.09_f64.powi(20);
    let expected = 50_000.0 * growth + 15_000.0 * 12.0 * ((growth - 1.0) / 0.09);
    assert!(((plan.final_value - expected) / expected).abs() < 1e-6);
    assert_eq!(plan.outcome(), Outcome::Shortfall);

    let view = session.execute(Command::GenerateStrategy, &gateway).await.unwrap();
    assert_eq!(
        view.plan.unwrap().ai_commentary.as_deref(),
        Some("Raise your monthly SIP.")
    );
}

#[tokio::test]
async fn test_failed_commands_keep_session_usable() {
    let failing = MockGateway::failing("network unreachable");
    let mut session = Session::new();

    session
        .execute(Command::ProjectWealth(PlanInput::default()), &failing)
        .await
        .unwrap();

    let err = session
        .execute(Command::Ask { question: "Is this enough?".into() }, &failing)
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::ServiceFailure(_)));
    assert_eq!(session.conversation().len(), 1);

    let working = MockGateway::replying("Yes, with a step-up SIP.");
    let view = session
        .execute(Command::Ask { question: "Is this enough?".into() }, &working)
        .await
        .unwrap();
    assert_eq!(view.turns.len(), 3);
}
