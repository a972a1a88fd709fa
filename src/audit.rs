// ==============================================================================
// audit.rs - Audit Logging for Interpretation Runs
// ==============================================================================
// Description: Structured audit trail for every genome interpretation
// Author: Matt Barham
// Created: 2026-09-24
// Modified: 2026-10-14
// Version: 1.1.0
// Compliance: HIPAA § 164.312(b), GDPR Article 30
// ==============================================================================
// Events carry identifiers, counts and digests only. Genotypes never leave
// the process through this channel.
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const AUDIT_TARGET: &str = "audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    // Input events
    InputValidated,
    InputRejected,

    // Processing events
    AnalysisStarted,
    AnalysisCompleted,
    AnalysisFailed,

    // Output events
    ResultWritten,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::InputValidated => "input_validated",
            AuditEventType::InputRejected => "input_rejected",
            AuditEventType::AnalysisStarted => "analysis_started",
            AuditEventType::AnalysisCompleted => "analysis_completed",
            AuditEventType::AnalysisFailed => "analysis_failed",
            AuditEventType::ResultWritten => "result_written",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    pub genome_id: Option<String>,
    pub resource: Option<String>,
    pub details: serde_json::Value,
    pub severity: LogSeverity,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        genome_id: Option<String>,
        resource: Option<String>,
        details: serde_json::Value,
    ) -> Self {
        let severity = match event_type {
            AuditEventType::InputRejected => LogSeverity::Warning,
            AuditEventType::AnalysisFailed => LogSeverity::Error,
            _ => LogSeverity::Info,
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            genome_id,
            resource,
            details,
            severity,
        }
    }

    /// Emit this event on the `audit` tracing target
    pub fn log(&self) {
        let event = self.event_type.as_str();
        let genome_id = self.genome_id.as_deref().unwrap_or("-");
        let resource = self.resource.as_deref().unwrap_or("-");

        match self.severity {
            LogSeverity::Info => info!(
                target: AUDIT_TARGET,
                audit_id = %self.id,
                event,
                genome_id,
                resource,
                details = %self.details,
                "audit event"
            ),
            LogSeverity::Warning => warn!(
                target: AUDIT_TARGET,
                audit_id = %self.id,
                event,
                genome_id,
                resource,
                details = %self.details,
                "audit event"
            ),
            LogSeverity::Error => error!(
                target: AUDIT_TARGET,
                audit_id = %self.id,
                event,
                genome_id,
                resource,
                details = %self.details,
                "audit event"
            ),
        }
    }
}

/// Convenience function to build and emit an audit event
pub fn log_event(
    event_type: AuditEventType,
    genome_id: Option<&str>,
    resource: Option<String>,
    details: serde_json::Value,
) -> AuditEvent {
    let event = AuditEvent::new(event_type, genome_id.map(str::to_string), resource, details);
    event.log();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_event_creation() {
        let event = AuditEvent::new(
            AuditEventType::InputValidated,
            Some("genome-42".to_string()),
            Some("match.json".to_string()),
            serde_json::json!({
                "size": 5242880,
                "hash": "abc123"
            }),
        );

        assert_eq!(event.genome_id, Some("genome-42".to_string()));
        assert_eq!(event.resource, Some("match.json".to_string()));
        assert_eq!(event.severity, LogSeverity::Info);
    }

    #[test]
    fn test_failure_event_severity() {
        let rejected = AuditEvent::new(AuditEventType::InputRejected, None, None, serde_json::json!({}));
        assert_eq!(rejected.severity, LogSeverity::Warning);

        let failed = AuditEvent::new(AuditEventType::AnalysisFailed, None, None, serde_json::json!({}));
        assert_eq!(failed.severity, LogSeverity::Error);
    }

    #[test]
    fn test_event_ids_are_unique() {
        let a = log_event(AuditEventType::AnalysisStarted, Some("g"), None, serde_json::json!({}));
        let b = log_event(AuditEventType::AnalysisStarted, Some("g"), None, serde_json::json!({}));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_names_match_serialization() {
        for event_type in [
            AuditEventType::InputValidated,
            AuditEventType::InputRejected,
            AuditEventType::AnalysisStarted,
            AuditEventType::AnalysisCompleted,
            AuditEventType::AnalysisFailed,
            AuditEventType::ResultWritten,
        ] {
            let serialized = serde_json::to_string(&event_type).unwrap();
            assert_eq!(serialized, format!("\"{}\"", event_type.as_str()));
            assert!(!event_type.as_str().contains('"'));
        }
    }

    #[test]
    fn test_event_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AuditEventType::AnalysisCompleted).unwrap(),
            "\"analysis_completed\""
        );
        assert_eq!(serde_json::to_string(&LogSeverity::Warning).unwrap(), "\"warning\"");
    }
}
