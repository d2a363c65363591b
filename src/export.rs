// =============================================================================
// export.rs — THE CSV DELIVERABLE
// =============================================================================
//
// Everything upstream exists so this module can write one comma-delimited,
// UTF-8 file with exactly eight columns:
//
//   source, business_name, phone, address, has_website, website,
//   category, state
//
// plus a header row. The column set is a contract with whatever spreadsheet
// ritual happens after us; do not add columns, do not reorder columns, do
// not get clever.
//
// The exporter also computes the run's summary statistics — total leads,
// how many lack a website (count and percentage), how many have one. Those
// are reported, never persisted in the file.
//
// An empty input is not an error and produces no file. An empty CSV with a
// lonely header row helps nobody; the caller reports the condition instead.
// =============================================================================

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::models::{Lead, WebsitePresence};

/// Summary statistics for one export. "Without a website" counts only an
/// explicit No; Unknown gets the benefit of the doubt, same as the original
/// tally this replaces.
#[derive(Debug, Clone, Serialize)]
pub struct ExportStats {
    pub total: usize,
    pub without_website: usize,
    pub with_website: usize,
    pub percent_without: f64,
}

pub fn compute_stats(leads: &[Lead]) -> ExportStats {
    let total = leads.len();
    let without_website = leads
        .iter()
        .filter(|l| l.has_website == WebsitePresence::No)
        .count();
    let percent_without = if total > 0 {
        without_website as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    ExportStats {
        total,
        without_website,
        with_website: total - without_website,
        percent_without,
    }
}

/// What happened when we tried to export.
#[derive(Debug)]
pub enum ExportOutcome {
    /// Leads on disk, stats in hand.
    Written { path: PathBuf, stats: ExportStats },
    /// Zero leads came through the pipeline. No file was written; this is
    /// a user-visible condition, not a failure.
    NothingToExport,
}

/// The default filename: `<jurisdiction>_leads_<timestamp>.csv`, lowercased
/// so shell completion stays pleasant.
pub fn default_filename(jurisdiction: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!(
        "{}_leads_{}.csv",
        jurisdiction.to_lowercase(),
        timestamp
    ))
}

/// Serialize the deduplicated leads to CSV.
///
/// `filename` overrides the default timestamped name when supplied.
pub fn export_leads(
    leads: &[Lead],
    jurisdiction: &str,
    filename: Option<PathBuf>,
) -> Result<ExportOutcome> {
    if leads.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let path = filename.unwrap_or_else(|| default_filename(jurisdiction));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating export file {}", path.display()))?;

    for lead in leads {
        writer
            .serialize(lead)
            .with_context(|| format!("serializing lead '{}'", lead.business_name))?;
    }
    writer.flush().context("flushing export file")?;

    let stats = compute_stats(leads);
    info!(
        path = %path.display(),
        total = stats.total,
        without_website = stats.without_website,
        percent_without = format!("{:.1}%", stats.percent_without),
        with_website = stats.with_website,
        "export complete"
    );

    Ok(ExportOutcome::Written { path, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Source, NOT_AVAILABLE};
    use std::fs;
    use uuid::Uuid;

    fn lead(name: &str, source: Source, has_website: WebsitePresence) -> Lead {
        Lead {
            source,
            business_name: name.to_string(),
            phone: "217-555-0100".to_string(),
            address: "12 Main St, Springfield, IL".to_string(),
            has_website,
            website: match has_website {
                WebsitePresence::Yes => "https://example.test".to_string(),
                _ => NOT_AVAILABLE.to_string(),
            },
            category: "dental offices".to_string(),
            state: "Illinois".to_string(),
        }
    }

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("prairie_lead_test_{}.csv", Uuid::new_v4()))
    }

    #[test]
    fn empty_input_writes_no_file() {
        let path = scratch_path();
        let outcome = export_leads(&[], "Illinois", Some(path.clone())).unwrap();
        assert!(matches!(outcome, ExportOutcome::NothingToExport));
        assert!(!path.exists());
    }

    #[test]
    fn stats_match_the_one_in_three_scenario() {
        let leads = vec![
            lead("No Site Dental", Source::YellowPages, WebsitePresence::No),
            lead("Sited Law", Source::Manta, WebsitePresence::Yes),
            lead("Also Sited CPA", Source::Superpages, WebsitePresence::Yes),
        ];
        let stats = compute_stats(&leads);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.without_website, 1);
        assert_eq!(stats.with_website, 2);
        assert_eq!((stats.percent_without * 10.0).round() / 10.0, 33.3);
    }

    #[test]
    fn header_row_is_the_eight_column_contract() {
        let path = scratch_path();
        let leads = vec![lead("Acme Dental", Source::YellowPages, WebsitePresence::No)];
        export_leads(&leads, "Illinois", Some(path.clone())).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "source,business_name,phone,address,has_website,website,category,state"
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rows_render_enums_as_their_spreadsheet_names() {
        let path = scratch_path();
        let leads = vec![
            lead("Typed-In Tavern", Source::ManualEntry, WebsitePresence::Yes),
            lead("Mystery Bistro", Source::Yelp, WebsitePresence::Unknown),
        ];
        export_leads(&leads, "Illinois", Some(path.clone())).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = contents.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Manual Entry,Typed-In Tavern,"));
        assert!(rows[0].contains(",Yes,"));
        assert!(rows[1].starts_with("Yelp,Mystery Bistro,"));
        assert!(rows[1].contains(",Unknown,"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn default_filename_carries_jurisdiction_and_extension() {
        let name = default_filename("Illinois");
        let name = name.to_string_lossy();
        assert!(name.starts_with("illinois_leads_"));
        assert!(name.ends_with(".csv"));
    }
}
