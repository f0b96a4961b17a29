//! Document records stored by the trends service.
//!
//! Wire format is camelCase JSON. Publications keep the field names used by the PubMed loader
//! (`pubmed_id`, `title`, `mesh`, `abstract`).

mod audit;
mod clinical_trial;
mod disease;
mod gene;
mod patent;
mod publication;
mod trend;

pub use audit::Audit;
pub use clinical_trial::{ClinicalTrial, TrialOutcome, TrialStatus};
pub use disease::Disease;
pub use gene::Gene;
pub use patent::Patent;
pub use publication::Publication;
pub use trend::Trend;
