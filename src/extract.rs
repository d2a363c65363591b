// =============================================================================
// extract.rs — THE FIELD EXTRACTION GAUNTLET
// =============================================================================
//
// Given one listing fragment (the HTML subtree for a single business on a
// results page), produce a best-effort partial record. The central idea is
// the selector cascade: an explicit, ordered list of pure strategies
// `fragment -> Option<String>`, applied with first-success-wins semantics.
// Directory websites redesign their markup on a whim; the cascade is how we
// lose gracefully instead of all at once.
//
// Exactly one field is load-bearing: the business name. If no name strategy
// matches, the fragment is not a lead and we skip it entirely. Every other
// field degrades independently to the "N/A" sentinel — a failed phone
// lookup must never cost us an address we could have had.
// =============================================================================

use scraper::{ElementRef, Selector};
use tracing::trace;

use crate::models::{WebsitePresence, NOT_AVAILABLE};

/// One selector strategy in a cascade. Each variant is a pure function of
/// the fragment; `apply` returns the first non-empty value it finds, or
/// None so the cascade can move on to the next idea.
#[derive(Debug, Clone, Copy)]
pub enum Pick {
    /// Text content of the first element matching a CSS selector.
    Css(&'static str),
    /// An attribute value of the first element matching a CSS selector.
    CssAttr(&'static str, &'static str),
    /// An attribute on the listing container itself. YellowPages sometimes
    /// stamps the business name straight onto the result div.
    SelfAttr(&'static str),
    /// A tel:-scheme anchor. Prefers the link text; falls back to the href
    /// with the scheme prefix stripped, because "tel:2175550100" is a URL,
    /// not a phone number.
    TelLink,
}

impl Pick {
    pub fn apply(&self, fragment: &ElementRef) -> Option<String> {
        match *self {
            Pick::Css(css) => {
                let sel = Selector::parse(css).ok()?;
                fragment
                    .select(&sel)
                    .next()
                    .map(|el| element_text(&el))
                    .filter(|t| !t.is_empty())
            }
            Pick::CssAttr(css, attr) => {
                let sel = Selector::parse(css).ok()?;
                fragment
                    .select(&sel)
                    .next()
                    .and_then(|el| el.value().attr(attr))
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            }
            Pick::SelfAttr(attr) => fragment
                .value()
                .attr(attr)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            Pick::TelLink => {
                let sel = Selector::parse("a[href^='tel:']").ok()?;
                let el = fragment.select(&sel).next()?;
                let text = element_text(&el);
                if !text.is_empty() {
                    return Some(text);
                }
                el.value()
                    .attr("href")
                    .map(|href| href.trim_start_matches("tel:").trim().to_string())
                    .filter(|v| !v.is_empty())
            }
        }
    }
}

/// Run a cascade: first strategy yielding a non-empty value wins.
pub fn first_pick(fragment: &ElementRef, cascade: &[Pick]) -> Option<String> {
    cascade.iter().find_map(|pick| pick.apply(fragment))
}

/// How to assemble an address from a listing. Street first; if the site
/// also marks up a locality, it gets appended with ", ".
#[derive(Debug, Clone, Copy)]
pub struct AddressPlan {
    pub street: &'static [Pick],
    pub locality: &'static [Pick],
}

/// The website-presence heuristic for one source. The original tooling was
/// inconsistent here by accident; we are inconsistent here on purpose, one
/// documented rule per directory.
#[derive(Debug, Clone, Copy)]
pub enum WebsiteRule {
    /// An anchor with a specific class (YellowPages' "track-visit-website"),
    /// with an optional fallback on anchor text.
    AnchorClass {
        class: &'static str,
        text_fallback: Option<&'static str>,
    },
    /// Any anchor whose href contains one of these substrings (Manta).
    HrefContains(&'static [&'static str]),
    /// Any anchor whose visible text contains this word, case-insensitive
    /// (Superpages).
    TextContains(&'static str),
    /// This source cannot cheaply tell without a secondary fetch (Yelp).
    CannotTell,
}

/// The complete per-site extraction recipe.
#[derive(Debug, Clone, Copy)]
pub struct FieldPlan {
    pub name: &'static [Pick],
    pub phone: &'static [Pick],
    /// What to record when no phone strategy matches. Usually the sentinel;
    /// Yelp says "Check Yelp" because the number exists, just not here.
    pub phone_missing: &'static str,
    pub address: AddressPlan,
    pub website: WebsiteRule,
}

/// A best-effort partial record, before source/category/state metadata is
/// attached. Present iff a name was found.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub business_name: String,
    pub phone: String,
    pub address: String,
    pub has_website: WebsitePresence,
    pub website: String,
}

/// Extract whatever we can from one listing fragment.
///
/// Returns None only when the name cascade comes up empty — the single
/// hard-fail condition in this module. Misses on any other field are
/// expected, common, and resolved by sentinel substitution.
pub fn extract_fields(fragment: &ElementRef, plan: &FieldPlan) -> Option<ExtractedFields> {
    let business_name = first_pick(fragment, plan.name)?;

    let phone =
        first_pick(fragment, plan.phone).unwrap_or_else(|| plan.phone_missing.to_string());

    let address = match first_pick(fragment, plan.address.street) {
        Some(street) => match first_pick(fragment, plan.address.locality) {
            Some(locality) => format!("{}, {}", street, locality),
            None => street,
        },
        None => NOT_AVAILABLE.to_string(),
    };

    let (has_website, website) = detect_website(fragment, &plan.website);

    trace!(
        name = business_name.as_str(),
        website = %has_website,
        "fragment extracted"
    );

    Some(ExtractedFields {
        business_name,
        phone,
        address,
        has_website,
        website,
    })
}

/// Apply a source's website heuristic to a fragment.
fn detect_website(fragment: &ElementRef, rule: &WebsiteRule) -> (WebsitePresence, String) {
    let found = match *rule {
        WebsiteRule::AnchorClass { class, text_fallback } => {
            let by_class = Selector::parse(&format!("a.{}", class))
                .ok()
                .and_then(|sel| fragment.select(&sel).next().map(anchor_href));
            match (by_class, text_fallback) {
                (Some(href), _) => Some(href),
                (None, Some(word)) => anchor_with_text(fragment, word),
                (None, None) => None,
            }
        }
        WebsiteRule::HrefContains(needles) => anchors(fragment).find_map(|el| {
            let href = el.value().attr("href")?;
            needles
                .iter()
                .any(|needle| href.contains(needle))
                .then(|| href.trim().to_string())
        }),
        WebsiteRule::TextContains(word) => anchor_with_text(fragment, word),
        WebsiteRule::CannotTell => {
            return (WebsitePresence::Unknown, NOT_AVAILABLE.to_string());
        }
    };

    match found {
        Some(href) => (WebsitePresence::Yes, href),
        None => (WebsitePresence::No, NOT_AVAILABLE.to_string()),
    }
}

/// First anchor whose visible text contains `word` (case-insensitive).
fn anchor_with_text(fragment: &ElementRef, word: &str) -> Option<String> {
    let needle = word.to_lowercase();
    anchors(fragment)
        .find(|el| element_text(el).to_lowercase().contains(&needle))
        .map(|el| anchor_href(el))
}

fn anchors<'a>(fragment: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    // "a" always parses; the else branch exists so nothing here can panic.
    let Ok(sel) = Selector::parse("a") else {
        return Vec::new().into_iter();
    };
    fragment.select(&sel).collect::<Vec<_>>().into_iter()
}

/// An anchor's href, or the sentinel when the anchor somehow has none.
/// Matching the original behavior: a website link without an href still
/// counts as "has a website", we just can't say where it is.
fn anchor_href(el: ElementRef) -> String {
    el.value()
        .attr("href")
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Collapse an element's text nodes into one whitespace-normalized string.
fn element_text(el: &ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}
