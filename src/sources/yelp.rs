// =============================================================================
// yelp.rs — THE DIRECTORY THAT PLAYS HARD TO GET
// =============================================================================
//
// Yelp's search results will happily tell you a business exists and roughly
// where it is. Phone numbers and website links live one click deeper, on the
// business page, and fetching fifteen extra pages per category would blow
// our courtesy budget for the afternoon. So Yelp leads come back honest but
// thin: phone is a "Check Yelp" pointer, and website presence is the one
// place in the whole engine that reports Unknown.
//
// Yelp also generates its CSS class names, so the cascades here lean on
// attribute-substring selectors and plain heading tags rather than any
// class we'd have to re-learn every deploy.
// =============================================================================

use crate::extract::{AddressPlan, FieldPlan, Pick, WebsiteRule};
use crate::models::Source;
use crate::sources::{Locus, QueryShape, SiteProfile};

/// Where to send the operator for the fields Yelp won't show us.
const CHECK_YELP: &str = "Check Yelp";

pub fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Yelp,
        containers: &[
            "div[data-testid='serp-ia-card']",
            "li[class*='lemon']",
        ],
        max_listings: 15,
        query: QueryShape {
            term_param: "find_desc",
            location_param: "find_loc",
            locus: Locus::StateName,
        },
        plan: FieldPlan {
            name: &[
                Pick::Css("a[class*='businessName']"),
                Pick::Css("h3"),
                Pick::Css("h2"),
            ],
            // No phone strategies at all: the search page doesn't carry one.
            phone: &[],
            phone_missing: CHECK_YELP,
            address: AddressPlan {
                street: &[Pick::Css("p[class*='address']"), Pick::Css("address")],
                locality: &[],
            },
            website: WebsiteRule::CannotTell,
        },
    }
}
