use std::sync::Arc;

use futures::try_join;
use tracing::debug;

use health_portal_data::models::{LabResult as LabResultRow, SupplementFilter};
use health_portal_data::repository::{
    CycleRepositoryTrait, GoalRepositoryTrait, InteractionRepositoryTrait,
    LabResultRepositoryTrait, ReminderRepositoryTrait, SupplementRepositoryTrait,
};

use super::reminder::today_iso_weekday;
use super::ServiceResult;
use crate::entities::conversions;
use crate::entities::{DashboardSummary, LabAlert, LabStatus};

/// Aggregates counts and alerts across every resource
#[derive(Clone)]
pub struct DashboardService {
    supplements: Arc<dyn SupplementRepositoryTrait>,
    goals: Arc<dyn GoalRepositoryTrait>,
    interactions: Arc<dyn InteractionRepositoryTrait>,
    reminders: Arc<dyn ReminderRepositoryTrait>,
    cycles: Arc<dyn CycleRepositoryTrait>,
    labs: Arc<dyn LabResultRepositoryTrait>,
}

/// Latest value of each marker, kept only when it falls outside its range.
///
/// `rows` must be ordered by marker name and then oldest first, as
/// `list_with_values` returns them.
pub fn lab_alerts(rows: Vec<LabResultRow>) -> Vec<LabAlert> {
    let mut latest: Vec<LabResultRow> = Vec::new();
    for row in rows {
        match latest.last_mut() {
            Some(last) if last.marker_name == row.marker_name => *last = row,
            _ => latest.push(row),
        }
    }

    latest
        .into_iter()
        .filter_map(|row| {
            let value = row.value?;
            let status = LabStatus::classify(value, row.reference_min, row.reference_max);
            (status != LabStatus::Normal).then(|| LabAlert {
                marker_name: row.marker_name,
                latest_value: value,
                latest_date: row.test_date,
                unit: row.unit,
                reference_min: row.reference_min,
                reference_max: row.reference_max,
                status,
            })
        })
        .collect()
}

impl DashboardService {
    pub fn new(
        supplements: Arc<dyn SupplementRepositoryTrait>,
        goals: Arc<dyn GoalRepositoryTrait>,
        interactions: Arc<dyn InteractionRepositoryTrait>,
        reminders: Arc<dyn ReminderRepositoryTrait>,
        cycles: Arc<dyn CycleRepositoryTrait>,
        labs: Arc<dyn LabResultRepositoryTrait>,
    ) -> Self {
        Self {
            supplements,
            goals,
            interactions,
            reminders,
            cycles,
            labs,
        }
    }

    pub async fn summary(&self) -> ServiceResult<DashboardSummary> {
        let (supplements, goals, critical, reminders, latest_cycle, lab_rows) = try_join!(
            self.supplements.list(SupplementFilter {
                status: Some("active".to_string()),
                category: None,
            }),
            self.goals.list(),
            self.interactions.list(Some("critical".to_string())),
            self.reminders.list(true),
            self.cycles.latest(),
            self.labs.list_with_values(),
        )?;

        let weekday = today_iso_weekday();
        let todays_reminders = reminders
            .into_iter()
            .map(conversions::convert_to_domain_reminder)
            .filter(|reminder| reminder.is_due_on(weekday))
            .collect();

        let summary = DashboardSummary {
            active_supplements: supplements.len(),
            active_goals: goals.iter().filter(|goal| goal.status == "active").count(),
            critical_interactions: critical.len(),
            todays_reminders,
            latest_cycle: latest_cycle.map(conversions::convert_to_domain_cycle),
            lab_alerts: lab_alerts(lab_rows),
        };

        debug!(
            "Dashboard: {} supplements, {} goals, {} alerts",
            summary.active_supplements,
            summary.active_goals,
            summary.lab_alerts.len()
        );
        Ok(summary)
    }
}
