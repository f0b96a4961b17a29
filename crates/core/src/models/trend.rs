use super::{Audit, Disease};
use crate::constants::TREND_COLLECTION;
use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// An aggregated gene/disease association count.
///
/// `associated_diseases` holds copies of disease records taken when the trend was computed.
/// They are not kept in sync with the `disease` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Trend {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    pub keywords: BTreeSet<String>,
    pub gene_symbols: BTreeSet<String>,
    pub associated_diseases: Vec<Disease>,
    pub total_associations: u64,
    pub chromosomal_location: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Trend {
    const COLLECTION: &'static str = TREND_COLLECTION;
    const SINGULAR: &'static str = "trend";
    const PLURAL: &'static str = "trends";
    const SCHEMA: &'static str = "Trend";

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

    fn merge_from(&mut self, payload: Self) {
        let Trend {
            id: _,
            keywords,
            gene_symbols,
            associated_diseases,
            total_associations,
            chromosomal_location,
            audit: _,
        } = payload;

        self.keywords = keywords;
        self.gene_symbols = gene_symbols;
        self.associated_diseases = associated_diseases;
        self.total_associations = total_associations;
        self.chromosomal_location = chromosomal_location;
    }
}
