// =============================================================================
// manual.rs — THE HUMAN-POWERED SOURCE ADAPTER
// =============================================================================
//
// When every directory has redesigned its markup in the same week, there is
// one scraper that never breaks: a person who already knows the business
// and can type. Manual entry produces Leads through the exact same channel
// as the network adapters — same struct, same collector, same dedup gate,
// same CSV. The pipeline neither knows nor cares that a human was the
// parser.
//
// Protocol: prompt for fields one at a time; an empty business name ends
// the session. Every optional field defaults to the sentinel, and
// has_website is derived from whether a website was actually supplied.
// =============================================================================

use crossbeam_channel::Sender;
use std::io::{BufRead, Write};
use tracing::info;

use crate::models::{Lead, Source, WebsitePresence, NOT_AVAILABLE};

/// Run the manual entry session. Reads from `input`, prompts on `output`,
/// sends completed leads to the collector. Returns how many were entered.
///
/// Generic over the streams so tests can be the human.
pub fn run_session<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    tx: &Sender<Lead>,
    state: &str,
) -> std::io::Result<u64> {
    writeln!(output, "\n{}", "=".repeat(60))?;
    writeln!(output, "Manual Lead Entry")?;
    writeln!(output, "{}", "=".repeat(60))?;
    writeln!(output, "Add leads by hand (press Enter on business name to finish)")?;

    let mut entered = 0u64;
    loop {
        writeln!(output)?;
        let name = prompt(&mut input, &mut output, "Business Name (or press Enter to finish): ")?;
        if name.is_empty() {
            break;
        }

        let phone = prompt_or_sentinel(&mut input, &mut output, "Phone (optional): ")?;
        let address = prompt_or_sentinel(&mut input, &mut output, "Address (optional): ")?;
        let website = prompt_or_sentinel(&mut input, &mut output, "Website (optional): ")?;
        let category = prompt_or_sentinel(&mut input, &mut output, "Category/Industry: ")?;

        // A human either gave us a website or told us there isn't one.
        // Unknown is for directories that can't check; people can.
        let has_website = if website == NOT_AVAILABLE {
            WebsitePresence::No
        } else {
            WebsitePresence::Yes
        };

        let lead = Lead {
            source: Source::ManualEntry,
            business_name: name.clone(),
            phone,
            address,
            has_website,
            website,
            category,
            state: state.to_string(),
        };

        info!(name = name.as_str(), "manual lead entered");
        writeln!(output, "✓ Added: {}", name)?;

        if tx.send(lead).is_err() {
            // Collector hung up; nothing more to enter into.
            break;
        }
        entered += 1;
    }

    Ok(entered)
}

/// Print a prompt, read one line, trim it.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Like `prompt`, but an empty answer becomes the sentinel.
fn prompt_or_sentinel<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> std::io::Result<String> {
    let answer = prompt(input, output, label)?;
    if answer.is_empty() {
        Ok(NOT_AVAILABLE.to_string())
    } else {
        Ok(answer)
    }
}
