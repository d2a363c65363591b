// =============================================================================
// dedup.rs — THE DEDUPLICATION GATE
// =============================================================================
//
// Four directories, one state, the same dentists. Cross-source duplication
// isn't an edge case for this pipeline, it's the expected steady state:
// any business worth listing is listed everywhere.
//
// The gate is a single ordered pass over the accumulated leads with a seen
// set keyed on (lowercased business name, raw phone). First occurrence
// wins and keeps its position; later sightings of the same key are dropped
// no matter which source they came from. Leads whose name is the "N/A"
// sentinel are dropped unconditionally — a lead you can't name is not a
// lead, it's a rumor.
//
// Could this be probabilistic, bloom-filtered, LRU-backed and lock-free?
// Sure. But dedup here must be EXACT — the export depends on it — and the
// input tops out in the hundreds. A HashSet is not a compromise; it's the
// correct amount of engineering, which around here counts as restraint.
// =============================================================================

use portable_atomic::{AtomicU64, Ordering};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::{Lead, NOT_AVAILABLE};

/// The dedup gate. Owns the seen set for one run.
pub struct DedupEngine {
    seen: HashSet<(String, String)>,
    stats: DedupStats,
}

/// Counters for the gate. Atomic, so the snapshot stays honest if the
/// parallel-adapters future ever arrives.
pub struct DedupStats {
    pub checks: AtomicU64,
    pub unique: AtomicU64,
    pub duplicates: AtomicU64,
    pub nameless_dropped: AtomicU64,
}

/// A serializable point-in-time view of the gate's counters, for the
/// end-of-run summary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DedupSnapshot {
    pub checks: u64,
    pub unique: u64,
    pub duplicates: u64,
    pub nameless_dropped: u64,
}

impl Default for DedupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupEngine {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            stats: DedupStats {
                checks: AtomicU64::new(0),
                unique: AtomicU64::new(0),
                duplicates: AtomicU64::new(0),
                nameless_dropped: AtomicU64::new(0),
            },
        }
    }

    /// Decide whether a lead passes the gate, recording its identity key
    /// if it does. Returns true exactly when the lead should be kept.
    pub fn check_and_insert(&mut self, lead: &Lead) -> bool {
        self.stats.checks.fetch_add(1, Ordering::Relaxed);

        if lead.business_name == NOT_AVAILABLE {
            self.stats.nameless_dropped.fetch_add(1, Ordering::Relaxed);
            debug!(phone = lead.phone.as_str(), "nameless lead dropped at the gate");
            return false;
        }

        let key = lead.identity_key();
        if self.seen.contains(&key) {
            self.stats.duplicates.fetch_add(1, Ordering::Relaxed);
            debug!(
                name = lead.business_name.as_str(),
                source = %lead.source,
                "duplicate lead dropped — first sighting already kept"
            );
            return false;
        }

        self.seen.insert(key);
        self.stats.unique.fetch_add(1, Ordering::Relaxed);
        true
    }

    pub fn snapshot(&self) -> DedupSnapshot {
        DedupSnapshot {
            checks: self.stats.checks.load(Ordering::Relaxed),
            unique: self.stats.unique.load(Ordering::Relaxed),
            duplicates: self.stats.duplicates.load(Ordering::Relaxed),
            nameless_dropped: self.stats.nameless_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Run the full accumulated sequence through the gate once.
///
/// Output preserves first-occurrence order, and running the output back
/// through a fresh gate is a no-op: the pass is a fixed point.
pub fn dedupe(leads: Vec<Lead>) -> (Vec<Lead>, DedupSnapshot) {
    let mut engine = DedupEngine::new();
    let before = leads.len();
    let unique: Vec<Lead> = leads
        .into_iter()
        .filter(|lead| engine.check_and_insert(lead))
        .collect();

    info!(
        before = before,
        kept = unique.len(),
        "deduplication pass complete"
    );
    (unique, engine.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Source, WebsitePresence};

    fn lead(name: &str, phone: &str, source: Source) -> Lead {
        Lead {
            source,
            business_name: name.to_string(),
            phone: phone.to_string(),
            address: NOT_AVAILABLE.to_string(),
            has_website: WebsitePresence::No,
            website: NOT_AVAILABLE.to_string(),
            category: "dental offices".to_string(),
            state: "Illinois".to_string(),
        }
    }

    #[test]
    fn first_occurrence_wins_across_sources_case_insensitively() {
        let input = vec![
            lead("Acme Dental", "217-555-0100", Source::YellowPages),
            lead("acme dental", "217-555-0100", Source::Manta),
        ];
        let (unique, snap) = dedupe(input);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].source, Source::YellowPages);
        assert_eq!(unique[0].business_name, "Acme Dental");
        assert_eq!(snap.duplicates, 1);
    }

    #[test]
    fn output_preserves_first_occurrence_order() {
        let input = vec![
            lead("Charlie Co", "3", Source::Superpages),
            lead("Alpha Co", "1", Source::YellowPages),
            lead("Charlie Co", "3", Source::Manta),
            lead("Bravo Co", "2", Source::Yelp),
        ];
        let (unique, _) = dedupe(input);
        let names: Vec<&str> = unique.iter().map(|l| l.business_name.as_str()).collect();
        assert_eq!(names, vec!["Charlie Co", "Alpha Co", "Bravo Co"]);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = vec![
            lead("Acme Dental", "217-555-0100", Source::YellowPages),
            lead("Bravo Books", "312-555-0101", Source::Manta),
            lead("ACME DENTAL", "217-555-0100", Source::Superpages),
        ];
        let (once, _) = dedupe(input);
        let (twice, snap) = dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
        assert_eq!(snap.duplicates, 0);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.identity_key(), b.identity_key());
        }
    }

    #[test]
    fn nameless_leads_never_survive_even_on_first_sighting() {
        let input = vec![
            lead(NOT_AVAILABLE, "217-555-0100", Source::YellowPages),
            lead("Named Co", "217-555-0199", Source::Manta),
        ];
        let (unique, snap) = dedupe(input);
        assert_eq!(unique.len(), 1);
        assert!(unique.iter().all(|l| l.business_name != NOT_AVAILABLE));
        assert_eq!(snap.nameless_dropped, 1);
    }

    #[test]
    fn surviving_identity_keys_are_pairwise_distinct() {
        let input = vec![
            lead("Acme Dental", "217-555-0100", Source::YellowPages),
            lead("Acme Dental", "217-555-0199", Source::YellowPages),
            lead("acme dental", "217-555-0100", Source::Yelp),
            lead("Bravo Books", "312-555-0101", Source::Manta),
        ];
        let (unique, _) = dedupe(input);
        let keys: HashSet<_> = unique.iter().map(|l| l.identity_key()).collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn a_default_gate_starts_empty_and_open() {
        let mut gate = DedupEngine::default();
        assert!(gate.check_and_insert(&lead("Acme Dental", "217-555-0100", Source::Manta)));
        let snap = gate.snapshot();
        assert_eq!(snap.checks, 1);
        assert_eq!(snap.unique, 1);
    }

    #[test]
    fn same_name_different_phone_is_a_different_business() {
        let input = vec![
            lead("Acme Dental", "217-555-0100", Source::YellowPages),
            lead("Acme Dental", "217-555-0199", Source::Manta),
        ];
        let (unique, _) = dedupe(input);
        assert_eq!(unique.len(), 2);
    }
}
