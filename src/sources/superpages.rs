// =============================================================================
// superpages.rs — THE OTHER YELLOW BOOK
// =============================================================================
//
// Superpages takes the same search-parameter names as YellowPages (they are
// corporate cousins) but marks everything up in spans inside a "listing"
// div. Same data, different wrapping paper.
//
// Website heuristic (the documented one for this source): an anchor whose
// visible text contains the word "website", case-insensitive. Superpages
// listings say "Website" right on the button, so we take them at their word.
// =============================================================================

use crate::extract::{AddressPlan, FieldPlan, Pick, WebsiteRule};
use crate::models::{Source, NOT_AVAILABLE};
use crate::sources::{Locus, QueryShape, SiteProfile};

pub fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Superpages,
        containers: &["div.listing"],
        max_listings: 20,
        query: QueryShape {
            term_param: "search_terms",
            location_param: "geo_location_terms",
            locus: Locus::StateName,
        },
        plan: FieldPlan {
            name: &[Pick::Css("a.business-name")],
            phone: &[Pick::Css("span.phone"), Pick::TelLink],
            phone_missing: NOT_AVAILABLE,
            address: AddressPlan {
                street: &[Pick::Css("span.street-address")],
                locality: &[Pick::Css("span.locality")],
            },
            website: WebsiteRule::TextContains("website"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::WebsitePresence;
    use crate::sources::harvest_document;

    #[test]
    fn parses_a_superpages_listing() {
        let html = r#"<html><body>
            <div class="listing">
                <a class="business-name">Galena Legal Group</a>
                <span class="phone">(815) 555-0160</span>
                <span class="street-address">9 Bench St</span>
                <span class="locality">Galena, IL</span>
                <a href="https://galenalegal.example">Website</a>
            </div>
            <div class="listing">
                <a class="business-name">Walk-ins Welcome Law</a>
                <span class="phone">(815) 555-0161</span>
            </div>
        </body></html>"#;

        let cfg = Config::from_env();
        let (tx, rx) = crossbeam_channel::unbounded();
        assert_eq!(harvest_document(html, &profile(), &cfg, "law firms", &tx), 2);
        drop(tx);

        let first = rx.recv().unwrap();
        assert_eq!(first.source, Source::Superpages);
        assert_eq!(first.address, "9 Bench St, Galena, IL");
        assert_eq!(first.has_website, WebsitePresence::Yes);
        assert_eq!(first.website, "https://galenalegal.example");

        let second = rx.recv().unwrap();
        assert_eq!(second.business_name, "Walk-ins Welcome Law");
        assert_eq!(second.has_website, WebsitePresence::No);
        assert_eq!(second.website, NOT_AVAILABLE);
    }
}
