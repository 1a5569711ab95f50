//! The researcher/writer crew behind the tech news generator.

use crate::config::AppConfig;
use newsdesk_agent::{Agent, Crew, Task};
use newsdesk_core::{Llm, Result, Tool};
use newsdesk_model::GeminiModel;
use newsdesk_tool::SerperSearchTool;
use std::path::Path;
use std::sync::Arc;

pub const RESEARCHER_ROLE: &str = "Senior Researcher";
pub const RESEARCHER_GOAL: &str = "Uncover groundbreaking technologies in {topic}";
pub const RESEARCHER_BACKSTORY: &str = "Driven by curiosity, you're at the forefront of \
    innovation, eager to explore and share knowledge that could change the world.";

pub const WRITER_ROLE: &str = "Writer";
pub const WRITER_GOAL: &str = "Narrate compelling tech stories about {topic}";
pub const WRITER_BACKSTORY: &str = "With a flair for simplifying complex topics, you craft \
    engaging narratives that captivate and educate, bringing new discoveries to light in an \
    accessible manner.";

pub const RESEARCH_DESCRIPTION: &str = "Identify the next big trend in {topic}. Focus on \
    identifying pros and cons and the overall narrative. Your final report should clearly \
    articulate the key points, its market opportunities, and potential risks.";
pub const RESEARCH_EXPECTED_OUTPUT: &str =
    "A comprehensive 3-paragraph report on the latest trends in {topic}.";

pub const WRITE_DESCRIPTION: &str = "Compose an insightful article on {topic}. Focus on the latest \
    trends and how they're impacting the industry. This article should be easy to understand, \
    engaging, and positive.";
pub const WRITE_EXPECTED_OUTPUT: &str =
    "A 4-paragraph article on {topic} advancements formatted as markdown.";

/// Assemble the crew from a model and a search tool shared by both agents.
///
/// The researcher may delegate to the writer; the writer may not delegate.
/// The write task's output goes to `output_file`.
pub fn build_news_crew(
    llm: Arc<dyn Llm>,
    search: Arc<dyn Tool>,
    output_file: &Path,
    verbose: bool,
) -> Result<Crew> {
    let researcher = Arc::new(
        Agent::builder(RESEARCHER_ROLE)
            .goal(RESEARCHER_GOAL)
            .backstory(RESEARCHER_BACKSTORY)
            .llm(llm.clone())
            .tool(search.clone())
            .allow_delegation(true)
            .verbose(verbose)
            .build()?,
    );

    let writer = Arc::new(
        Agent::builder(WRITER_ROLE)
            .goal(WRITER_GOAL)
            .backstory(WRITER_BACKSTORY)
            .llm(llm)
            .tool(search.clone())
            .allow_delegation(false)
            .verbose(verbose)
            .build()?,
    );

    let research_task = Task::builder(RESEARCH_DESCRIPTION)
        .expected_output(RESEARCH_EXPECTED_OUTPUT)
        .tool(search.clone())
        .agent(researcher.clone())
        .build()?;

    let write_task = Task::builder(WRITE_DESCRIPTION)
        .expected_output(WRITE_EXPECTED_OUTPUT)
        .tool(search)
        .agent(writer.clone())
        .async_execution(false)
        .output_file(output_file)
        .build()?;

    Crew::builder()
        .agent(researcher)
        .agent(writer)
        .task(research_task)
        .task(write_task)
        .verbose(verbose)
        .build()
}

/// Build the crew against the real Gemini and Serper endpoints.
pub fn build_default_crew(config: &AppConfig) -> Result<Crew> {
    let llm = Arc::new(GeminiModel::new(config.gemini())?);
    let search = Arc::new(SerperSearchTool::new(config.serper()));
    build_news_crew(llm, search, &config.output_file, config.verbose)
}
