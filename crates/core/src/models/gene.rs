use super::Audit;
use crate::constants::GENE_COLLECTION;
use crate::entity::{require, Entity};
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;
use utoipa::ToSchema;

/// An HGNC-style gene record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Gene {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<DocumentId>,
    pub approved_gene_name: String,
    pub approved_symbols: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
    pub symbol_status: bool,
    pub chromosomal_location: Option<String>,
    pub gene_group: Option<String>,
    pub gene_id: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Entity for Gene {
    const COLLECTION: &'static str = GENE_COLLECTION;
    const SINGULAR: &'static str = "gene";
    const PLURAL: &'static str = "genes";
    const SCHEMA: &'static str = "Gene";

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
        require("approvedGeneName", &self.approved_gene_name)
    }

    fn merge_from(&mut self, payload: Self) {
        let Gene {
            id: _,
            approved_gene_name,
            approved_symbols,
            keywords,
            aliases,
            symbol_status,
            chromosomal_location,
            gene_group,
            gene_id,
            audit: _,
        } = payload;

        self.approved_gene_name = approved_gene_name;
        self.approved_symbols = approved_symbols;
        self.keywords = keywords;
        self.aliases = aliases;
        self.symbol_status = symbol_status;
        self.chromosomal_location = chromosomal_location;
        self.gene_group = gene_group;
        self.gene_id = gene_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_payload() {
        let gene: Gene = serde_json::from_str(
            r#"{
                "approvedGeneName": "BRCA1 DNA repair associated",
                "approvedSymbols": ["BRCA1"],
                "keywords": ["breast cancer", "BRCA1"],
                "symbolStatus": true,
                "chromosomalLocation": "17q21.31",
                "version": 3
            }"#,
        )
        .unwrap();

        assert_eq!(gene.id, None);
        assert_eq!(gene.approved_gene_name, "BRCA1 DNA repair associated");
        assert!(gene.keywords.contains("breast cancer"));
        assert!(gene.aliases.is_empty());
        assert_eq!(gene.chromosomal_location.as_deref(), Some("17q21.31"));
        assert_eq!(gene.audit.version, Some(3));
    }

    #[test]
    fn test_validate_requires_gene_name() {
        let gene = Gene {
            approved_gene_name: "   ".into(),
            ..Default::default()
        };

        let err = gene.validate().unwrap_err();
        assert!(err.to_string().contains("approvedGeneName"));
    }

    #[test]
    fn test_merge_from_keeps_identity_and_audit() {
        let id = DocumentId::parse("g1").unwrap();
        let mut stored = Gene {
            id: Some(id.clone()),
            approved_gene_name: "old".into(),
            gene_group: Some("group".into()),
            audit: Audit {
                version: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let payload = Gene {
            id: Some(DocumentId::parse("other").unwrap()),
            approved_gene_name: "new".into(),
            audit: Audit {
                version: Some(99),
                ..Default::default()
            },
            ..Default::default()
        };

        stored.merge_from(payload);

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.approved_gene_name, "new");
        assert_eq!(stored.gene_group, None);
        assert_eq!(stored.audit.version, Some(2));
    }
}
