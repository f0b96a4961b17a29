use super::Audit;
use crate::constants::PATENT_COLLECTION;
use crate::entity::{require, Entity};
use crate::CoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// A drug patent and the parties holding it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Patent {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    pub drug_name: String,
    pub keywords: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    pub participants: BTreeSet<String>,
    pub patent: Option<String>,
    pub patent_number: Option<String>,
    pub active: bool,
    pub acquired_on: Option<DateTime<Utc>>,
    pub expires_on: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Patent {
    const COLLECTION: &'static str = PATENT_COLLECTION;
    const SINGULAR: &'static str = "patent";
    const PLURAL: &'static str = "patents";
    const SCHEMA: &'static str = "Patent";

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
        require("drugName", &self.drug_name)
    }

    fn merge_from(&mut self, payload: Self) {
        let Patent {
            id: _,
            drug_name,
            keywords,
            aliases,
            participants,
            patent,
            patent_number,
            active,
            acquired_on,
            expires_on,
            audit: _,
        } = payload;

        self.drug_name = drug_name;
        self.keywords = keywords;
        self.aliases = aliases;
        self.participants = participants;
        self.patent = patent;
        self.patent_number = patent_number;
        self.active = active;
        self.acquired_on = acquired_on;
        self.expires_on = expires_on;
    }
}
