use super::Audit;
use crate::constants::TRIAL_COLLECTION;
use crate::entity::{require, Entity};
use crate::CoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// Recruitment status of a trial, as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialStatus {
    NotYetRecruiting,
    Recruiting,
    InProgress,
    Suspended,
    Terminated,
    Completed,
    Withdrawn,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialOutcome {
    Positive,
    Negative,
    Inconclusive,
    Unknown,
}

/// A clinical trial linked to a PubMed record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicalTrial {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    pub pub_med_id: String,
    pub trial_type: Option<String>,
    pub status: Option<TrialStatus>,
    pub keywords: BTreeSet<String>,
    pub lead_sponsors: BTreeSet<String>,
    pub citations: BTreeSet<String>,
    pub collaborators: BTreeSet<String>,
    pub stopped: bool,
    pub why_stopped: Option<String>,
    pub fda_regulated: bool,
    pub trial_started_on: Option<DateTime<Utc>>,
    pub outcome: Option<TrialOutcome>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for ClinicalTrial {
    const COLLECTION: &'static str = TRIAL_COLLECTION;
    const SINGULAR: &'static str = "trial";
    const PLURAL: &'static str = "trials";
    const SCHEMA: &'static str = "ClinicalTrial";

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    fn validate(&self) -> CoreResult<()> {
        require("pubMedId", &self.pub_med_id)
    }

    fn merge_from(&mut self, payload: Self) {
        let ClinicalTrial {
            id: _,
            pub_med_id,
            trial_type,
            status,
            keywords,
            lead_sponsors,
            citations,
            collaborators,
            stopped,
            why_stopped,
            fda_regulated,
            trial_started_on,
            outcome,
            audit: _,
        } = payload;

        self.pub_med_id = pub_med_id;
        self.trial_type = trial_type;
        self.status = status;
        self.keywords = keywords;
        self.lead_sponsors = lead_sponsors;
        self.citations = citations;
        self.collaborators = collaborators;
        self.stopped = stopped;
        self.why_stopped = why_stopped;
        self.fda_regulated = fda_regulated;
        self.trial_started_on = trial_started_on;
        self.outcome = outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_registry_spelling() {
        let trial: ClinicalTrial = serde_json::from_str(
            r#"{"pubMedId": "123", "status": "IN_PROGRESS", "fdaRegulated": true, "outcome": "POSITIVE"}"#,
        )
        .unwrap();

        assert_eq!(trial.status, Some(TrialStatus::InProgress));
        assert_eq!(trial.outcome, Some(TrialOutcome::Positive));
        assert!(trial.fda_regulated);
        assert!(!trial.stopped);

        let value = serde_json::to_value(&trial).unwrap();
        assert_eq!(value["status"], "IN_PROGRESS");
        assert_eq!(value["pubMedId"], "123");
    }

    #[test]
    fn test_rejects_unknown_status() {
        let result: Result<ClinicalTrial, _> =
            serde_json::from_str(r#"{"pubMedId": "123", "status": "PAUSED"}"#);
        assert!(result.is_err());
    }
}
