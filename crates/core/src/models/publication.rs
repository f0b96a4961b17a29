use super::Audit;
use crate::constants::PUBLICATION_COLLECTION;
use crate::entity::{require, Entity};
use crate::CoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// A PubMed article.
///
/// The id is the PubMed id and the keyword set holds the MeSH headings, so both use the field
/// names of the PubMed export rather than the generic ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    #[serde(rename = "pubmed_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    #[serde(rename = "title")]
    pub abstract_title: String,
    #[serde(rename = "mesh")]
    pub keywords: BTreeSet<String>,
    pub source_uri: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_content: String,
    pub chemicals: BTreeSet<String>,
    pub authors: BTreeSet<String>,
    pub date_accepted: Option<DateTime<Utc>>,
    pub date_completed: Option<DateTime<Utc>>,
    pub date_entered: Option<DateTime<Utc>>,
    pub date_received: Option<DateTime<Utc>>,
    pub date_revised: Option<DateTime<Utc>>,
    pub doi_id: Option<String>,
    pub language: Option<String>,
    pub pii_id: Option<String>,
    pub pmc_id: Option<String>,
    pub pmi_id: Option<String>,
    pub publish_status: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Publication {
    const COLLECTION: &'static str = PUBLICATION_COLLECTION;
    const SINGULAR: &'static str = "publication";
    const PLURAL: &'static str = "publications";
    const SCHEMA: &'static str = "Publication";

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
        require("title", &self.abstract_title)?;
        require("abstract", &self.abstract_content)
    }

    fn merge_from(&mut self, payload: Self) {
        let Publication {
            id: _,
            abstract_title,
            keywords,
            source_uri,
            abstract_content,
            chemicals,
            authors,
            date_accepted,
            date_completed,
            date_entered,
            date_received,
            date_revised,
            doi_id,
            language,
            pii_id,
            pmc_id,
            pmi_id,
            publish_status,
            audit: _,
        } = payload;

        self.abstract_title = abstract_title;
        self.keywords = keywords;
        self.source_uri = source_uri;
        self.abstract_content = abstract_content;
        self.chemicals = chemicals;
        self.authors = authors;
        self.date_accepted = date_accepted;
        self.date_completed = date_completed;
        self.date_entered = date_entered;
        self.date_received = date_received;
        self.date_revised = date_revised;
        self.doi_id = doi_id;
        self.language = language;
        self.pii_id = pii_id;
        self.pmc_id = pmc_id;
        self.pmi_id = pmi_id;
        self.publish_status = publish_status;
    }
}
