use tracing::{info, warn};
use wealthwise_advisor::{
    config::AdvisorConfig,
    format::format_currency,
    gemini::GeminiClient,
    models::PlanInput,
    session::{Command, Session},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("WealthWise planner starting");

    let config = AdvisorConfig::from_env()?;
    let gateway = GeminiClient::new(&config)?;
    let mut session = Session::new();

    // Sample goal with the planner's default inputs
    let input = PlanInput::default();
    info!(goal = %input.goal_name, profile = %input.risk_profile, "Projecting sample goal");

    let view = session
        .execute(Command::ProjectWealth(input), &gateway)
        .await?;

    let Some(plan) = view.plan else {
        return Ok(());
    };

    println!("\n=== {} ===", plan.goal_name);
    print!("{}", view.summary.to_markdown());
    println!("- **Risk Profile:** {}", plan.risk_profile);
    println!("\nYear  Projected Value");
    for point in &plan.projection {
        println!("{:>4}  ₹{}", point.year, format_currency(point.value));
    }
    println!(
        "\nResult: {} of ₹{}",
        plan.outcome(),
        format_currency(plan.gap().abs())
    );

    match session.execute(Command::GenerateStrategy, &gateway).await {
        Ok(view) => {
            if let Some(insights) = view.plan.and_then(|p| p.ai_commentary) {
                println!("\n=== AI-Powered Strategy & Insights ===\n{}", insights);
            }
        }
        Err(e) => warn!("Skipping AI strategy: {}", e),
    }

    Ok(())
}
