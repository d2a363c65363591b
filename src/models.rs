// =============================================================================
// models.rs — THE SACRED DATA STRUCTURES OF SMALL-BUSINESS COMMERCE
// =============================================================================
//
// These structs represent the fundamental building blocks of our lead
// harvesting system. A Lead is one normalized business record: who they are,
// how to call them, where they sit, and — crucially — whether they have a
// website. Businesses without websites are our entire reason for existing.
//
// Every field is a String and absent data is the literal sentinel "N/A",
// never a None and never an omitted column. The CSV people downstream have
// spreadsheets to fill and blank cells make them nervous.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// The placeholder for any field whose data could not be found.
/// Chosen by our forebears; preserved for spreadsheet compatibility.
pub const NOT_AVAILABLE: &str = "N/A";

/// The directory (or non-directory) that produced a lead.
/// Each network source has its own adapter profile, its own selector
/// cascade, and its own opinion about what HTML should look like.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Source {
    /// The yellow pages. Yes, those yellow pages. They have a website now,
    /// and that website has search results, and those results have leads.
    YellowPages,

    /// Manta — a small-business directory that marks up its listings in
    /// cards and helpfully puts phone numbers behind tel: links.
    Manta,

    /// Superpages — spiritually a yellow pages, structurally its own thing.
    Superpages,

    /// Yelp — excellent at telling you a business exists, deliberately
    /// terrible at telling you its phone number from the search page.
    Yelp,

    /// A human typed this one in. The most reliable scraper ever built.
    #[serde(rename = "Manual Entry")]
    ManualEntry,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::YellowPages => write!(f, "YellowPages"),
            Source::Manta => write!(f, "Manta"),
            Source::Superpages => write!(f, "Superpages"),
            Source::Yelp => write!(f, "Yelp"),
            Source::ManualEntry => write!(f, "Manual Entry"),
        }
    }
}

/// Whether a business has a website. Tri-state, because some directories
/// would make us fetch a second page to find out, and we are far too
/// polite (and far too rate-limited) for that.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum WebsitePresence {
    /// A website link was found in the listing. They're doing fine.
    Yes,
    /// No website link anywhere in the listing. A prospect is born.
    No,
    /// This source can't cheaply tell. Only Yelp produces this.
    Unknown,
}

impl fmt::Display for WebsitePresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebsitePresence::Yes => write!(f, "Yes"),
            WebsitePresence::No => write!(f, "No"),
            WebsitePresence::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The central entity. One business, one row in the final CSV.
///
/// Leads are immutable once created — the pipeline accumulates and filters,
/// it never edits. If an adapter got a field wrong, the fix is a better
/// selector cascade, not a post-hoc patch pass.
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    /// Which adapter (or human) produced this record.
    pub source: Source,

    /// The business name. Required: a fragment that yields no name never
    /// becomes a Lead in the first place.
    pub business_name: String,

    /// Phone number, raw text as found on the page. We do not normalize
    /// phone formats. "(217) 555-0100" and "217-555-0100" are, as far as
    /// this engine is concerned, two perfectly good strings.
    pub phone: String,

    /// Street address, with ", <locality>" appended when the listing
    /// exposes both. Otherwise whatever subset we found.
    pub address: String,

    /// The headline metric. See WebsitePresence.
    pub has_website: WebsitePresence,

    /// The website URL when one was found, sentinel otherwise.
    pub website: String,

    /// The search term that surfaced this business.
    pub category: String,

    /// Fixed to the target jurisdiction for the whole run. This is an
    /// Illinois tool. The field exists so the CSV says so out loud.
    pub state: String,
}

impl Lead {
    /// The identity key used to detect the same business across sources.
    ///
    /// Two leads with the same lowercased name and the same raw phone are
    /// the same business, no matter which directory coughed them up.
    /// Name matching is case-insensitive because "Acme Dental" and
    /// "ACME DENTAL" are one office with one receptionist.
    pub fn identity_key(&self) -> (String, String) {
        (self.business_name.to_lowercase(), self.phone.clone())
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) — phone: {} — website: {} [{}]",
            self.business_name, self.source, self.phone, self.has_website, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, phone: &str) -> Lead {
        Lead {
            source: Source::YellowPages,
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
    fn identity_key_is_case_insensitive_on_name() {
        let a = lead("Acme Dental", "217-555-0100");
        let b = lead("ACME DENTAL", "217-555-0100");
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn identity_key_distinguishes_phones() {
        let a = lead("Acme Dental", "217-555-0100");
        let b = lead("Acme Dental", "217-555-0199");
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn website_presence_displays_the_three_states() {
        assert_eq!(WebsitePresence::Yes.to_string(), "Yes");
        assert_eq!(WebsitePresence::No.to_string(), "No");
        assert_eq!(WebsitePresence::Unknown.to_string(), "Unknown");
    }
}
