//! Two-phase consolidation of analyst question records.
//!
//! 1. Transcript-local attribution: operator introductions overwrite whatever company the
//!    title suggested.
//! 2. Identity merge within each ticker symbol: records are grouped by normalised person
//!    name, names are rewritten to the canonical form and a known institution propagates
//!    to every appearance of that person. An operator-sourced company outranks one read
//!    from a speaker title, whichever transcript it came from.
//!
//! Each phase is a pure function over records and preserves input order. Running
//! [`consolidate`] on its own output changes nothing.

use crate::attribution::AttributionMap;
use crate::normalize::{normalize_company, normalize_person};
use crate::records::{AnalystQuestionRecord, CompanySource};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Same person, as seen within one symbol. Only lives for the duration of a merge.
#[derive(Debug, Clone, Default)]
pub struct IdentityGroup {
    pub canonical_name: String,
    /// Raw display-name spellings observed.
    pub spellings: BTreeSet<String>,
    /// First operator-sourced company among members in record order, else the first
    /// non-Unknown title-derived one.
    pub institution: Option<String>,
    pub institution_source: CompanySource,
    /// Indices into the slice the group was built from.
    pub members: Vec<usize>,
}

/// Group indices of `items` by `key`, keeping groups in first-appearance order.
fn group_indices<T, K, F>(items: &[T], key: F) -> Vec<(K, Vec<usize>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut order: Vec<(K, Vec<usize>)> = Vec::new();
    let mut slot: HashMap<K, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        match slot.get(&k) {
            Some(&pos) => order[pos].1.push(i),
            None => {
                slot.insert(k.clone(), order.len());
                order.push((k, vec![i]));
            }
        }
    }
    order
}

/// Phase 1 for one transcript: records named in `map` take the map's normalised institution.
///
/// Names compare by normalised person name, so "Mike Ng" in a speaker label matches an
/// operator's "Michael Ng", and an already-canonicalised record still finds its entry.
pub fn attribute_within_transcript(
    records: &[AnalystQuestionRecord],
    map: &AttributionMap,
) -> Vec<AnalystQuestionRecord> {
    let by_person: HashMap<String, &String> = map
        .iter()
        .map(|(name, institution)| (normalize_person(name), institution))
        .collect();
    records
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if let Some(institution) = by_person.get(&normalize_person(&r.analyst_name)) {
                let company = normalize_company(institution);
                if company != r.analyst_company {
                    debug!(analyst = %r.analyst_name, from = %r.analyst_company, to = %company, "operator attribution applied");
                }
                r.analyst_company = company;
                r.company_source = CompanySource::Operator;
            }
            r
        })
        .collect()
}

/// Phase 1 across a request: each record is matched against its own transcript's map only.
pub fn apply_operator_attributions(
    records: &[AnalystQuestionRecord],
    maps_by_transcript: &HashMap<String, AttributionMap>,
) -> Vec<AnalystQuestionRecord> {
    let mut out = records.to_vec();
    for (transcript_id, indices) in group_indices(records, |r| r.provenance.transcript_id.clone()) {
        let Some(map) = maps_by_transcript.get(&transcript_id) else {
            continue;
        };
        let group: Vec<AnalystQuestionRecord> =
            indices.iter().map(|&i| records[i].clone()).collect();
        for (i, updated) in indices.into_iter().zip(attribute_within_transcript(&group, map)) {
            out[i] = updated;
        }
    }
    out
}

/// Build identity groups for records that all share one symbol.
pub fn identity_groups(records: &[AnalystQuestionRecord]) -> Vec<IdentityGroup> {
    group_indices(records, |r| normalize_person(&r.analyst_name))
        .into_iter()
        .map(|(canonical_name, members)| {
            let spellings = members
                .iter()
                .map(|&i| records[i].analyst_name.clone())
                .collect();
            let known: Vec<&AnalystQuestionRecord> = members
                .iter()
                .map(|&i| &records[i])
                .filter(|r| r.has_known_company())
                .collect();
            let chosen = known
                .iter()
                .find(|r| r.company_source == CompanySource::Operator)
                .or_else(|| known.first())
                .copied();
            IdentityGroup {
                canonical_name,
                spellings,
                institution: chosen.map(|r| r.analyst_company.clone()),
                institution_source: chosen.map(|r| r.company_source).unwrap_or_default(),
                members,
            }
        })
        .collect()
}

/// Phase 2 for one symbol: canonical names everywhere, known institution propagated.
pub fn merge_identities_within_symbol(
    records: &[AnalystQuestionRecord],
) -> Vec<AnalystQuestionRecord> {
    let mut out = records.to_vec();
    for group in identity_groups(records) {
        if group.spellings.len() > 1 {
            debug!(canonical = %group.canonical_name, spellings = ?group.spellings, "merging name variants");
        }
        for &i in &group.members {
            out[i].analyst_name = group.canonical_name.clone();
            if let Some(institution) = &group.institution {
                out[i].analyst_company = institution.clone();
                out[i].company_source = group.institution_source;
            }
        }
    }
    out
}

/// Phase 2 across a request. Identities never merge across symbols.
pub fn merge_identities(records: &[AnalystQuestionRecord]) -> Vec<AnalystQuestionRecord> {
    let mut out = records.to_vec();
    for (_symbol, indices) in group_indices(records, |r| r.provenance.symbol.clone()) {
        let group: Vec<AnalystQuestionRecord> =
            indices.iter().map(|&i| records[i].clone()).collect();
        for (i, merged) in indices.into_iter().zip(merge_identities_within_symbol(&group)) {
            out[i] = merged;
        }
    }
    out
}

/// Both phases, in order.
pub fn consolidate(
    records: &[AnalystQuestionRecord],
    maps_by_transcript: &HashMap<String, AttributionMap>,
) -> Vec<AnalystQuestionRecord> {
    merge_identities(&apply_operator_attributions(records, maps_by_transcript))
}

/// Records batched by [`AnalystQuestionRecord::mapped_identity`], in first-appearance order.
pub fn group_by_identity(
    records: &[AnalystQuestionRecord],
) -> Vec<(String, Vec<AnalystQuestionRecord>)> {
    group_indices(records, AnalystQuestionRecord::mapped_identity)
        .into_iter()
        .map(|(key, indices)| (key, indices.into_iter().map(|i| records[i].clone()).collect()))
        .collect()
}
