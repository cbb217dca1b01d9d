use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use health_portal_data::models::StageOutputs;
use health_portal_data::repository::CycleRepositoryTrait;

use super::{ServiceError, ServiceResult};
use crate::ai::{AiError, AnalysisPipeline, AnalysisRole, FULL_CYCLE_ROLES};
use crate::entities::{AnalysisRequest, AnalysisResponse, AnalysisResults, AnalyzeResponse};

/// Runs the AI pipeline over cycle input and stores the stage outputs
#[derive(Clone)]
pub struct AnalysisService {
    cycles: Arc<dyn CycleRepositoryTrait>,
    pipeline: Option<AnalysisPipeline>,
}

/// Text sent to the model: strings verbatim, other JSON pretty-printed
fn input_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()).filter(|t| !t.trim().is_empty()),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

fn stage_outputs(results: &AnalysisResults) -> StageOutputs {
    let content = |role: AnalysisRole| results.get(role.as_str()).map(|r| r.content.clone());
    StageOutputs {
        rsl_output: content(AnalysisRole::ResearchStrategyLead),
        master_curator_output: content(AnalysisRole::MasterCurator),
        red_team_output: content(AnalysisRole::RedTeam),
        meta_supervisor_output: content(AnalysisRole::MetaSupervisor),
    }
}

impl AnalysisService {
    pub fn new(cycles: Arc<dyn CycleRepositoryTrait>, pipeline: Option<AnalysisPipeline>) -> Self {
        Self { cycles, pipeline }
    }

    /// Whether a model provider is configured
    pub fn is_configured(&self) -> bool {
        self.pipeline.is_some()
    }

    fn cycle_not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Cycle with ID {} not found", id))
    }

    /// Run one role or the full cycle. Input comes from the request or, when
    /// absent, from the referenced cycle; results are saved to that cycle.
    #[instrument(skip(self, request), fields(cycle_id = ?request.cycle_id, role = ?request.role))]
    pub async fn analyze(&self, request: AnalysisRequest) -> ServiceResult<AnalyzeResponse> {
        let cycle_id = request.cycle_id.filter(|id| *id > 0);

        let mut input = request.input_data.as_ref().and_then(input_text);
        if input.is_none() {
            if let Some(id) = cycle_id {
                let cycle = self
                    .cycles
                    .get(id)
                    .await?
                    .ok_or_else(|| Self::cycle_not_found(id))?;
                input = cycle.input_data.as_ref().and_then(input_text);
            }
        }
        let input = input
            .ok_or_else(|| ServiceError::Validation("Input data is required".to_string()))?;

        let pipeline = self.pipeline.as_ref().ok_or(AiError::NotConfigured)?;

        let results = if request.is_full_cycle() {
            pipeline.run_full_cycle(&input).await?
        } else {
            let role = AnalysisRole::from_str_lossy(request.role.as_deref().unwrap_or_default());
            let response = pipeline.analyze(role, &input, None).await?;
            let mut results = AnalysisResults::new();
            results.insert(role.as_str().to_string(), response);
            results
        };

        if let Some(id) = cycle_id {
            self.save_results(id, &results).await;
        }

        Ok(AnalyzeResponse {
            cycle_id,
            results,
            created_at: Utc::now(),
        })
    }

    /// Persisting is best effort: the caller still gets the results
    async fn save_results(&self, cycle_id: i64, results: &AnalysisResults) {
        let outputs = stage_outputs(results);
        if outputs.is_empty() {
            return;
        }

        match self.cycles.save_analysis(cycle_id, outputs).await {
            Ok(true) => info!("Saved analysis results to cycle {}", cycle_id),
            Ok(false) => warn!("Cycle {} disappeared before results were saved", cycle_id),
            Err(e) => error!("Failed to save analysis results to cycle {}: {}", cycle_id, e),
        }
    }

    /// Stored stage outputs of a cycle, in pipeline order
    pub async fn get_analysis(&self, cycle_id: i64) -> ServiceResult<AnalyzeResponse> {
        let cycle = self
            .cycles
            .get(cycle_id)
            .await?
            .ok_or_else(|| Self::cycle_not_found(cycle_id))?;

        let stored = [
            cycle.rsl_output,
            cycle.master_curator_output,
            cycle.red_team_output,
            cycle.meta_supervisor_output,
        ];

        let mut results = AnalysisResults::new();
        for (role, content) in FULL_CYCLE_ROLES.iter().zip(stored) {
            if let Some(content) = content {
                results.insert(
                    role.as_str().to_string(),
                    AnalysisResponse {
                        role: role.as_str().to_string(),
                        content,
                        model: String::new(),
                        tokens: 0,
                    },
                );
            }
        }

        Ok(AnalyzeResponse {
            cycle_id: Some(cycle_id),
            results,
            created_at: cycle.created_at,
        })
    }
}
