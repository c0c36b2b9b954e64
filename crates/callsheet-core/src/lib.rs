//! # callsheet-core — Analyst Question Attribution
//!
//! Earnings-call transcripts → attributed, identity-consolidated analyst questions and
//! executive prepared remarks. Pure and synchronous: transcripts arrive already fetched,
//! nothing here does I/O, and a malformed transcript only ever costs its own turns.
//!
//! ```text
//! Transcript[] ─▶ segment ─▶ roles + question ─▶ candidate records
//!                    │                                  │
//!                    └─▶ attribution (operator turns) ─▶ consolidate ─▶ AnalystQuestionRecord[]
//!                    └─▶ prepared (pre-Q&A executives)              ─▶ PreparedStatementRecord[]
//! ```

pub mod attribution;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod prepared;
pub mod question;
pub mod records;
pub mod roles;
pub mod segment;
pub mod transcript;

pub use attribution::{extract_attributions, merge_attribution_maps, AttributionMap, AttributionPattern};
pub use config::{AttributionPolicy, ExtractionConfig};
pub use consolidate::{
    apply_operator_attributions, attribute_within_transcript, consolidate, group_by_identity,
    merge_identities, merge_identities_within_symbol, IdentityGroup,
};
pub use error::{CallsheetError, CallsheetResult};
pub use normalize::{company_from_title, normalize_company, normalize_person, PersonName, UNKNOWN_COMPANY};
pub use pipeline::{extract, question_records, ExtractionOutput, ExtractionSummary};
pub use prepared::{extract_prepared_statements, qa_boundary};
pub use question::has_question;
pub use records::{AnalystQuestionRecord, CompanySource, PreparedStatementRecord, Provenance};
pub use roles::SpeakerRole;
pub use segment::parse_turns;
pub use transcript::{Quarter, Transcript, Turn};
