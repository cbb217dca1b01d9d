use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::client::{AiError, CompletionClient};
use super::lab_parser::{parse_marker_reply, MarkerReply};
use super::prompts::{
    LAB_PARSER_PROMPT, MASTER_CURATOR_PROMPT, META_SUPERVISOR_PROMPT, RED_TEAM_PROMPT,
    RESEARCH_STRATEGY_LEAD_PROMPT,
};
use crate::entities::{AnalysisResponse, AnalysisResults};

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// A stage of the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisRole {
    ResearchStrategyLead,
    MasterCurator,
    RedTeam,
    MetaSupervisor,
    LabParser,
}

/// Stages of a full review cycle, in execution order
pub const FULL_CYCLE_ROLES: [AnalysisRole; 4] = [
    AnalysisRole::ResearchStrategyLead,
    AnalysisRole::MasterCurator,
    AnalysisRole::RedTeam,
    AnalysisRole::MetaSupervisor,
];

impl AnalysisRole {
    /// Resolve a role name; anything unrecognised becomes the master curator
    pub fn from_str_lossy(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "research_strategy_lead" | "rsl" => AnalysisRole::ResearchStrategyLead,
            "red_team" => AnalysisRole::RedTeam,
            "meta_supervisor" => AnalysisRole::MetaSupervisor,
            "lab_parser" => AnalysisRole::LabParser,
            _ => AnalysisRole::MasterCurator,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisRole::ResearchStrategyLead => "research_strategy_lead",
            AnalysisRole::MasterCurator => "master_curator",
            AnalysisRole::RedTeam => "red_team",
            AnalysisRole::MetaSupervisor => "meta_supervisor",
            AnalysisRole::LabParser => "lab_parser",
        }
    }

    /// Heading used when this role's output is passed on as context
    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisRole::ResearchStrategyLead => "RESEARCH STRATEGY LEAD",
            AnalysisRole::MasterCurator => "MASTER CURATOR",
            AnalysisRole::RedTeam => "RED TEAM",
            AnalysisRole::MetaSupervisor => "META SUPERVISOR",
            AnalysisRole::LabParser => "LAB PARSER",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            AnalysisRole::ResearchStrategyLead => RESEARCH_STRATEGY_LEAD_PROMPT,
            AnalysisRole::MasterCurator => MASTER_CURATOR_PROMPT,
            AnalysisRole::RedTeam => RED_TEAM_PROMPT,
            AnalysisRole::MetaSupervisor => META_SUPERVISOR_PROMPT,
            AnalysisRole::LabParser => LAB_PARSER_PROMPT,
        }
    }

    fn input_heading(&self) -> &'static str {
        match self {
            AnalysisRole::LabParser => "## TEXT TO PARSE",
            _ => "## CURRENT CYCLE INPUT",
        }
    }
}

impl fmt::Display for AnalysisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble the full prompt for one stage
pub fn build_prompt(role: AnalysisRole, input: &str, context: Option<&str>) -> String {
    let mut prompt = String::with_capacity(
        role.system_prompt().len() + input.len() + context.map_or(0, str::len) + 128,
    );
    prompt.push_str(role.system_prompt());
    prompt.push_str(SECTION_SEPARATOR);

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("## PREVIOUS ANALYSES\n\n");
        prompt.push_str(context);
        prompt.push_str(SECTION_SEPARATOR);
    }

    prompt.push_str(role.input_heading());
    prompt.push_str("\n\n");
    prompt.push_str(input);
    prompt
}

fn stage_context(stages: &[(AnalysisRole, &AnalysisResponse)]) -> String {
    stages
        .iter()
        .map(|(role, response)| format!("### {} FINDINGS:\n\n{}", role.display_name(), response.content))
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Runs single stages and full review cycles against a completion client
#[derive(Clone)]
pub struct AnalysisPipeline {
    client: Arc<dyn CompletionClient>,
    max_tokens: u32,
}

impl fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl AnalysisPipeline {
    pub fn new(client: Arc<dyn CompletionClient>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    /// Run one role over the input, optionally with earlier stage outputs
    pub async fn analyze(
        &self,
        role: AnalysisRole,
        input: &str,
        context: Option<&str>,
    ) -> Result<AnalysisResponse, AiError> {
        let prompt = build_prompt(role, input, context);
        debug!("Running {} stage ({} prompt chars)", role, prompt.len());

        let completion = self.client.complete(&prompt, self.max_tokens).await?;

        Ok(AnalysisResponse {
            role: role.as_str().to_string(),
            content: completion.text,
            model: completion.model,
            tokens: completion.tokens,
        })
    }

    async fn run_stage(
        &self,
        role: AnalysisRole,
        input: &str,
        context: Option<&str>,
    ) -> Result<AnalysisResponse, AiError> {
        self.analyze(role, input, context)
            .await
            .map_err(|e| AiError::StageFailed {
                stage: role.as_str(),
                source: Box::new(e),
            })
    }

    /// Research lead, curator, red team, then meta supervisor; each later
    /// stage sees the outputs it argues with
    pub async fn run_full_cycle(&self, input: &str) -> Result<AnalysisResults, AiError> {
        info!("Starting full analysis cycle");

        let rsl = self
            .run_stage(AnalysisRole::ResearchStrategyLead, input, None)
            .await?;

        let curator_context = stage_context(&[(AnalysisRole::ResearchStrategyLead, &rsl)]);
        let curator = self
            .run_stage(AnalysisRole::MasterCurator, input, Some(&curator_context))
            .await?;

        let red_team_context = stage_context(&[
            (AnalysisRole::ResearchStrategyLead, &rsl),
            (AnalysisRole::MasterCurator, &curator),
        ]);
        let red_team = self
            .run_stage(AnalysisRole::RedTeam, input, Some(&red_team_context))
            .await?;

        let meta_context = stage_context(&[
            (AnalysisRole::MasterCurator, &curator),
            (AnalysisRole::RedTeam, &red_team),
        ]);
        let meta = self
            .run_stage(AnalysisRole::MetaSupervisor, input, Some(&meta_context))
            .await?;

        let total_tokens: u32 = [&rsl, &curator, &red_team, &meta].iter().map(|r| r.tokens).sum();
        info!("Full analysis cycle finished ({} tokens)", total_tokens);

        let mut results = AnalysisResults::with_capacity(FULL_CYCLE_ROLES.len());
        for response in [rsl, curator, red_team, meta] {
            results.insert(response.role.clone(), response);
        }
        Ok(results)
    }

    /// Ask the model to extract markers from lab report text
    pub async fn parse_lab_text(&self, text: &str) -> Result<MarkerReply, AiError> {
        let response = self.analyze(AnalysisRole::LabParser, text, None).await?;
        Ok(parse_marker_reply(&response.content))
    }
}
