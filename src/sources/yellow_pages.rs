// =============================================================================
// yellow_pages.rs — THE BIG YELLOW BOOK, NOW WITH DIVS
// =============================================================================
//
// YellowPages.com is the most generous of our four directories: name, phone,
// street address, locality, and an honest-to-goodness "visit website" link,
// all in one listing card. It is also the directory that has redesigned its
// result markup the most times, which is why every cascade below is three
// or four strategies deep. Each fallback selector is a scar from a previous
// redesign.
//
// Website heuristic (the documented one for this source): an anchor with
// the "track-visit-website" class means the business has a website; if the
// class ever disappears, any anchor whose text mentions "website" counts.
// =============================================================================

use crate::extract::{AddressPlan, FieldPlan, Pick, WebsiteRule};
use crate::models::{Source, NOT_AVAILABLE};
use crate::sources::{Locus, QueryShape, SiteProfile};

pub fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::YellowPages,
        containers: &[
            "div.result",
            "div.search-results",
            "div.organic",
            // Last resort: any div that stamps the business name on itself.
            "div[data-business-name]",
        ],
        max_listings: 20,
        query: QueryShape {
            term_param: "search_terms",
            location_param: "geo_location_terms",
            locus: Locus::StateName,
        },
        plan: FieldPlan {
            name: &[
                Pick::Css("a.business-name"),
                Pick::Css("h2.n"),
                Pick::Css("a.listing-title"),
                Pick::SelfAttr("data-business-name"),
            ],
            phone: &[
                Pick::Css("div.phones"),
                Pick::Css("div.phone"),
                Pick::TelLink,
            ],
            phone_missing: NOT_AVAILABLE,
            address: AddressPlan {
                street: &[
                    Pick::Css("div.street-address"),
                    Pick::Css("span.street-address"),
                    Pick::Css("div.adr"),
                ],
                locality: &[Pick::Css("div.locality")],
            },
            website: WebsiteRule::AnchorClass {
                class: "track-visit-website",
                text_fallback: Some("website"),
            },
        },
    }
}
