use crate::config::AppConfig;
use crate::news_crew::build_default_crew;
use anyhow::Result;
use newsdesk_agent::CrewOutput;
use newsdesk_core::Inputs;

/// Generate a single article for `topic`, print it and return the crew's output.
pub async fn run_once(config: &AppConfig, topic: &str) -> Result<CrewOutput> {
    let crew = build_default_crew(config)?;
    let inputs = Inputs::from([("topic".to_string(), topic.to_string())]);

    let output = crew.kickoff(&inputs).await?;
    tracing::info!(
        total_tokens = output.token_usage.total_tokens,
        prompt_tokens = output.token_usage.prompt_tokens,
        completion_tokens = output.token_usage.completion_tokens,
        successful_requests = output.token_usage.successful_requests,
        output = %config.output_file.display(),
        "Article generated"
    );

    println!("{}", output.raw);
    Ok(output)
}
