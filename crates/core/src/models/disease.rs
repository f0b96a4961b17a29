use super::Audit;
use crate::constants::DISEASE_COLLECTION;
use crate::entity::{require, Entity};
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// A disease, its aliases and the drugs approved against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Disease {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    pub disease_name: String,
    pub keywords: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    pub approved_drugs: BTreeSet<String>,
    pub active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Disease {
    const COLLECTION: &'static str = DISEASE_COLLECTION;
    const SINGULAR: &'static str = "disease";
    const PLURAL: &'static str = "diseases";
    const SCHEMA: &'static str = "Disease";

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
        require("diseaseName", &self.disease_name)
    }

    fn merge_from(&mut self, payload: Self) {
        let Disease {
            id: _,
            disease_name,
            keywords,
            aliases,
            approved_drugs,
            active,
            audit: _,
        } = payload;

        self.disease_name = disease_name;
        self.keywords = keywords;
        self.aliases = aliases;
        self.approved_drugs = approved_drugs;
        self.active = active;
    }
}
