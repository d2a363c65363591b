// =============================================================================
// sources/mod.rs — THE DIRECTORY EXPEDITION COMMAND
// =============================================================================
//
// One generic adapter engine, four site profiles. The ancestors of this code
// copy-pasted the same fetch-parse-extract loop once per directory and let
// the copies drift apart; we keep exactly one control-flow skeleton here and
// push everything site-specific — query parameter names, container selector
// cascades, field cascades, listing caps — into a per-site SiteProfile.
//
// The skeleton, for every (site, category) pair:
//   1. Build the search URL (urlencoded category + location).
//   2. Observe the courtesy delay. We are guests.
//   3. GET with a bounded timeout. A non-success status is a recoverable,
//      per-call failure: log it, contribute zero leads, move on.
//   4. Find listing containers via the profile's cascade, cap the count.
//   5. Run the field extractor on each container; attach source/category/
//      state metadata; send the lead into the collector channel.
//
// A bad container never aborts its siblings, and a bad site never aborts
// the run. Everything degrades to "fewer leads than expected."
// =============================================================================

pub mod manta;
pub mod superpages;
pub mod yellow_pages;
pub mod yelp;

use crossbeam_channel::Sender;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::config::Config;
use crate::extract::{extract_fields, FieldPlan};
use crate::models::{Lead, Source};
use crate::throttle;

/// Everything that varies between directories. The control flow above
/// never changes; this record is the only thing that does.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    pub source: Source,
    /// Ordered container-selector cascade. First selector with a non-empty
    /// match set wins; the rest are markup-drift insurance.
    pub containers: &'static [&'static str],
    /// Upper bound on listings processed per results page. Keeps the cost
    /// per category bounded even when a directory gets generous.
    pub max_listings: usize,
    pub query: QueryShape,
    pub plan: FieldPlan,
}

/// The names a directory gives its search-query parameters, and which
/// flavor of jurisdiction it expects in the location slot.
#[derive(Debug, Clone, Copy)]
pub struct QueryShape {
    pub term_param: &'static str,
    pub location_param: &'static str,
    pub locus: Locus,
}

/// Some directories want "Illinois", some want "IL". Nobody asks why.
#[derive(Debug, Clone, Copy)]
pub enum Locus {
    StateName,
    StateCode,
}

/// Recoverable per-(site, category) failures. None of these are fatal to
/// the run; the orchestrator logs them and moves to the next call.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    BadStatus(StatusCode),

    #[error("invalid search URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The full profile roster, in invocation order.
pub fn all_profiles() -> Vec<SiteProfile> {
    vec![
        yellow_pages::profile(),
        manta::profile(),
        superpages::profile(),
        yelp::profile(),
    ]
}

/// Build the search URL for one (site, category) pair.
pub fn search_url(profile: &SiteProfile, config: &Config, category: &str) -> String {
    let location = match profile.query.locus {
        Locus::StateName => config.state_name.as_str(),
        Locus::StateCode => config.state_code.as_str(),
    };
    format!(
        "{}?{}={}&{}={}",
        base_url(config, profile.source),
        profile.query.term_param,
        urlencoding::encode(category),
        profile.query.location_param,
        urlencoding::encode(location),
    )
}

fn base_url<'a>(config: &'a Config, source: Source) -> &'a str {
    match source {
        Source::YellowPages => &config.yellow_pages_base_url,
        Source::Manta => &config.manta_base_url,
        Source::Superpages => &config.superpages_base_url,
        Source::Yelp => &config.yelp_base_url,
        // Manual entry has no search endpoint; it has a keyboard.
        Source::ManualEntry => "",
    }
}

/// Reject non-2xx responses as a recoverable adapter failure.
pub fn ensure_success(status: StatusCode) -> Result<(), SourceError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SourceError::BadStatus(status))
    }
}

/// Run one (site, category) harvest end to end: delay, fetch, parse, send.
///
/// Returns the number of leads contributed. An Err means this call
/// contributed nothing; the run carries on regardless.
pub async fn harvest(
    client: &reqwest::Client,
    config: &Config,
    profile: &SiteProfile,
    category: &str,
    tx: &Sender<Lead>,
) -> Result<u64, SourceError> {
    // Parse eagerly so a mangled base URL in config surfaces as its own
    // error instead of a confusing reqwest failure three layers down.
    let url = Url::parse(&search_url(profile, config, category))?;
    info!(
        source = %profile.source,
        category = category,
        url = %url,
        "searching directory"
    );

    // Courtesy first, commerce second.
    throttle::courtesy_pause(config).await;

    let response = client.get(url).send().await?;
    ensure_success(response.status())?;
    let body = response.text().await?;

    let found = harvest_document(&body, profile, config, category, tx);
    info!(
        source = %profile.source,
        category = category,
        leads = found,
        "directory search complete"
    );
    Ok(found)
}

/// The pure half of the adapter: given a results page already in hand,
/// extract every listing and stream leads into the collector.
///
/// Separated from `harvest` so the whole parse path is testable without a
/// network, which is also how we found out our own selectors were wrong
/// twice during development.
pub fn harvest_document(
    html: &str,
    profile: &SiteProfile,
    config: &Config,
    category: &str,
    tx: &Sender<Lead>,
) -> u64 {
    let document = Html::parse_document(html);
    let containers = locate_containers(&document, profile.containers);

    debug!(
        source = %profile.source,
        containers = containers.len(),
        cap = profile.max_listings,
        "listing containers located"
    );

    let mut found = 0u64;
    for (index, fragment) in containers.into_iter().take(profile.max_listings).enumerate() {
        match extract_fields(&fragment, &profile.plan) {
            Some(fields) => {
                let lead = Lead {
                    source: profile.source,
                    business_name: fields.business_name,
                    phone: fields.phone,
                    address: fields.address,
                    has_website: fields.has_website,
                    website: fields.website,
                    category: category.to_string(),
                    state: config.state_name.clone(),
                };
                info!(
                    source = %profile.source,
                    name = lead.business_name.as_str(),
                    website = %lead.has_website,
                    "lead found"
                );
                if let Err(e) = tx.send(lead) {
                    // Only possible if the collector hung up, which means
                    // the run is already over. Nothing left to salvage here.
                    error!(source = %profile.source, error = %e, "collector channel closed");
                    break;
                }
                found += 1;
            }
            None => {
                debug!(
                    source = %profile.source,
                    index = index,
                    "listing skipped — no business name in fragment"
                );
            }
        }
    }
    found
}

/// Apply the container cascade: first selector producing a non-empty match
/// set wins. A selector that fails to parse simply doesn't match, same as
/// any other miss.
fn locate_containers<'a>(
    document: &'a Html,
    cascade: &[&'static str],
) -> Vec<ElementRef<'a>> {
    for css in cascade {
        let Ok(selector) = Selector::parse(css) else {
            debug!(selector = *css, "container selector failed to parse");
            continue;
        };
        let matches: Vec<ElementRef<'a>> = document.select(&selector).collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    fn test_config() -> Config {
        Config::from_env()
    }

    #[test]
    fn search_urls_encode_category_and_location() {
        let cfg = test_config();
        let url = search_url(&yellow_pages::profile(), &cfg, "dental offices");
        assert!(url.starts_with("https://www.yellowpages.com/search?"));
        assert!(url.contains("search_terms=dental%20offices"));
        assert!(url.contains("geo_location_terms=Illinois"));

        let url = search_url(&manta::profile(), &cfg, "law firms");
        assert!(url.contains("search=law%20firms"));
        assert!(url.contains("state=IL"));

        let url = search_url(&yelp::profile(), &cfg, "law firms");
        assert!(url.contains("find_desc=law%20firms"));
        assert!(url.contains("find_loc=Illinois"));
    }

    #[test]
    fn non_success_status_is_a_recoverable_error() {
        assert!(ensure_success(StatusCode::OK).is_ok());
        let err = ensure_success(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert!(matches!(err, SourceError::BadStatus(s) if s.as_u16() == 503));
    }

    #[tokio::test]
    async fn harvest_turns_a_live_503_into_zero_leads() {
        use std::io::{Read as _, Write as _};
        use std::net::TcpListener;

        // The smallest directory in Illinois: one socket, one answer, and
        // the answer is no.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request);
            socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\n\
                      Content-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .unwrap();
        });

        let mut cfg = test_config();
        cfg.yellow_pages_base_url = format!("http://{}/search", addr);
        cfg.delay_min = std::time::Duration::ZERO;
        cfg.delay_max = std::time::Duration::ZERO;

        let client = reqwest::Client::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        let err = harvest(&client, &cfg, &yellow_pages::profile(), "dental offices", &tx)
            .await
            .unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, SourceError::BadStatus(s) if s.as_u16() == 503));
        drop(tx);
        assert!(rx.try_recv().is_err(), "a refused search must contribute nothing");
    }

    #[test]
    fn listing_cap_bounds_work_per_category() {
        let cfg = test_config();
        let mut html = String::from("<html><body>");
        for i in 0..40 {
            html.push_str(&format!(
                r#"<div class="result"><a class="business-name">Biz {}</a></div>"#,
                i
            ));
        }
        html.push_str("</body></html>");

        let (tx, rx) = crossbeam_channel::unbounded();
        let found = harvest_document(&html, &yellow_pages::profile(), &cfg, "retail stores", &tx);
        drop(tx);
        assert_eq!(found, 20);
        assert_eq!(rx.iter().count(), 20);
    }

    #[test]
    fn nameless_containers_are_skipped_without_aborting_the_page() {
        let cfg = test_config();
        let html = r#"<html><body>
            <div class="result"><div class="phones">555-0100</div></div>
            <div class="result"><a class="business-name">Survivor Co</a></div>
        </body></html>"#;

        let (tx, rx) = crossbeam_channel::unbounded();
        let found = harvest_document(html, &yellow_pages::profile(), &cfg, "retail stores", &tx);
        drop(tx);
        assert_eq!(found, 1);
        let lead: Lead = rx.recv().unwrap();
        assert_eq!(lead.business_name, "Survivor Co");
        assert_eq!(lead.phone, NOT_AVAILABLE);
        assert_eq!(lead.category, "retail stores");
        assert_eq!(lead.state, cfg.state_name);
    }

    #[test]
    fn container_cascade_falls_back_when_primary_misses() {
        let cfg = test_config();
        // No div.result anywhere; the YellowPages profile should fall back
        // to its secondary container selector.
        let html = r#"<html><body>
            <div class="organic"><a class="business-name">Fallback Finds LLC</a></div>
        </body></html>"#;

        let (tx, rx) = crossbeam_channel::unbounded();
        let found = harvest_document(html, &yellow_pages::profile(), &cfg, "law firms", &tx);
        drop(tx);
        assert_eq!(found, 1);
        assert_eq!(rx.recv().unwrap().business_name, "Fallback Finds LLC");
    }

    #[test]
    fn empty_page_contributes_zero_leads() {
        let cfg = test_config();
        let (tx, rx) = crossbeam_channel::unbounded();
        let found = harvest_document(
            "<html><body><p>no results</p></body></html>",
            &superpages::profile(),
            &cfg,
            "restaurants",
            &tx,
        );
        drop(tx);
        assert_eq!(found, 0);
        assert!(rx.try_recv().is_err());
    }
}
