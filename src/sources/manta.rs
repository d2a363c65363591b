// =============================================================================
// manta.rs — THE CARD-BODY DIRECTORY
// =============================================================================
//
// Manta wraps each listing in a Bootstrap-flavored "card-body" div, labels
// its headings with whatever heading tag was nearest, and — bless them —
// puts phone numbers behind tel: links like a directory that wants to be
// scraped. Addresses come as an <address> element when they come at all.
//
// Website heuristic (the documented one for this source): any anchor whose
// href contains "http" or "www" counts as the business's website. Broad?
// Yes. But Manta cards don't carry much besides the business's own links,
// so in practice the first external-looking link is the website.
// =============================================================================

use crate::extract::{AddressPlan, FieldPlan, Pick, WebsiteRule};
use crate::models::{Source, NOT_AVAILABLE};
use crate::sources::{Locus, QueryShape, SiteProfile};

pub fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Manta,
        containers: &["div.card-body"],
        max_listings: 20,
        query: QueryShape {
            term_param: "search",
            location_param: "state",
            // Manta thinks in postal codes: state=IL.
            locus: Locus::StateCode,
        },
        plan: FieldPlan {
            name: &[Pick::Css("h3"), Pick::Css("h2")],
            phone: &[Pick::TelLink],
            phone_missing: NOT_AVAILABLE,
            address: AddressPlan {
                street: &[Pick::Css("address"), Pick::Css("p.address")],
                locality: &[],
            },
            website: WebsiteRule::HrefContains(&["http", "www"]),
        },
    }
}
