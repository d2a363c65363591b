// =============================================================================
// collector.rs — THE LEAD COLLECTOR
// =============================================================================
//
// One append-only accumulator for the whole run. Every producer — four
// directory adapters across however many categories, or one human at a
// keyboard — gets a clone of the same channel Sender, and nobody gets
// anything else. No hidden global list, no shared mutable Vec being passed
// around on good faith.
//
// The channel is overkill for a strictly sequential pipeline, and that is
// exactly why we keep it: the day somebody parallelizes the adapters, the
// append path is already safe and the only new work is a join before the
// dedup pass. Until then it costs us nothing but this comment.
// =============================================================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use tracing::info;

use crate::models::Lead;

/// The receiving half of the run's single accumulation channel.
pub struct LeadCollector {
    rx: Receiver<Lead>,
}

impl LeadCollector {
    /// Create the collector and the Sender that every producer is handed.
    ///
    /// The channel is unbounded on purpose: producers and the drain share
    /// one thread, so any capacity bound is a deadlock with a fuse on it —
    /// the send that hits the bound blocks with nobody left to receive.
    /// Accumulation is append-only and tops out in the hundreds; memory is
    /// not the risk here, a silent mid-sweep hang is.
    pub fn new() -> (Sender<Lead>, LeadCollector) {
        let (tx, rx) = unbounded();
        (tx, LeadCollector { rx })
    }

    /// Drain every accumulated lead, in send order.
    ///
    /// Call this after dropping the last Sender; with producers still
    /// alive it would block waiting for their hangup, which in a
    /// sequential run means forever.
    pub fn drain(self) -> Vec<Lead> {
        let leads: Vec<Lead> = self.rx.into_iter().collect();

        let mut per_source: HashMap<String, usize> = HashMap::new();
        for lead in &leads {
            *per_source.entry(lead.source.to_string()).or_default() += 1;
        }
        info!(
            total = leads.len(),
            breakdown = ?per_source,
            "lead collector drained"
        );
        leads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Source, WebsitePresence, NOT_AVAILABLE};

    fn lead(name: &str, source: Source) -> Lead {
        Lead {
            source,
            business_name: name.to_string(),
            phone: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            has_website: WebsitePresence::No,
            website: NOT_AVAILABLE.to_string(),
            category: "law firms".to_string(),
            state: "Illinois".to_string(),
        }
    }

    #[test]
    fn drain_preserves_send_order_across_producers() {
        let (tx, collector) = LeadCollector::new();
        let tx2 = tx.clone();
        tx.send(lead("First", Source::YellowPages)).unwrap();
        tx2.send(lead("Second", Source::Manta)).unwrap();
        tx.send(lead("Third", Source::ManualEntry)).unwrap();
        drop(tx);
        drop(tx2);

        let names: Vec<String> =
            collector.drain().into_iter().map(|l| l.business_name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn drain_on_a_silent_run_is_empty() {
        let (tx, collector) = LeadCollector::new();
        drop(tx);
        assert!(collector.drain().is_empty());
    }

    #[test]
    fn a_lone_producer_never_blocks_no_matter_how_good_the_run() {
        // Producers and the drain share one thread in a real run, so every
        // send must complete with nobody receiving yet. A bounded channel
        // would hang this test at capacity + 1.
        let (tx, collector) = LeadCollector::new();
        let bumper_crop = 10_001;
        for i in 0..bumper_crop {
            tx.send(lead(&format!("Prolific Biz {}", i), Source::YellowPages))
                .unwrap();
        }
        drop(tx);
        assert_eq!(collector.drain().len(), bumper_crop);
    }
}
