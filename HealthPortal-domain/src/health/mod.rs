//! Domain layer health check functionality
//! Reports the database and AI components and derives an overall status.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use health_portal_data::database::DatabasePool;

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SystemHealth {
    pub status: SystemStatus,
    pub components: BTreeMap<String, HealthComponent>,
}

/// Check if the database answers a trivial query
pub async fn check_database_status(pool: &DatabasePool) -> HealthComponent {
    match pool.ping().await {
        Ok(()) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: Some(pool.get_connection_info()),
        },
        Err(e) => {
            warn!("Database health check failed: {}", e);
            HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(format!("Database connection error: {}", e)),
            }
        }
    }
}

fn ai_component(ai_configured: bool) -> HealthComponent {
    if ai_configured {
        HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        }
    } else {
        HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("CLAUDE_API_KEY is not set; analysis is disabled".to_string()),
        }
    }
}

/// Get overall system health.
///
/// The database decides between healthy and unhealthy; an unconfigured AI
/// provider only degrades the system.
pub async fn get_system_health(pool: &DatabasePool, ai_configured: bool) -> SystemHealth {
    let db_component = check_database_status(pool).await;
    let ai = ai_component(ai_configured);

    let overall_status = if db_component.status == ComponentStatus::Unhealthy {
        SystemStatus::Unhealthy
    } else if db_component.status == ComponentStatus::Degraded
        || ai.status != ComponentStatus::Healthy
    {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth {
        status: overall_status,
        components: [
            ("database".to_string(), db_component),
            ("ai".to_string(), ai),
        ]
        .into_iter()
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthy_with_database_and_ai() {
        let pool = DatabasePool::in_memory().unwrap();
        let health = get_system_health(&pool, true).await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert_eq!(health.components["database"].status, ComponentStatus::Healthy);
    }

    #[tokio::test]
    async fn test_degraded_without_ai() {
        let pool = DatabasePool::in_memory().unwrap();
        let health = get_system_health(&pool, false).await;
        assert_eq!(health.status, SystemStatus::Degraded);
        assert_eq!(health.components["ai"].status, ComponentStatus::Degraded);

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["components"]["database"]["status"], "healthy");
    }
}
