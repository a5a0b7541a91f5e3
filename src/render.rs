// Terminal rendering of a scouted profile: the card front, the scout report,
// the attribute breakdown, and the career history sections.
//
// Rendering is purely a consumer of `PlayerProfile`. Absent values arrive as
// zeros or empty collections from the model layer and are shown as-is or as
// placeholder lines; nothing here can fail.

use std::fmt::Write;

use crate::profile::{AttributeCategory, PlayerProfile};

const BAR_WIDTH: usize = 20;

/// Render the complete profile view.
pub fn render_profile(profile: &PlayerProfile) -> String {
    let mut out = String::with_capacity(4096);

    render_card(&mut out, profile);
    render_scout_report(&mut out, profile);
    render_attributes(&mut out, profile);
    render_transfers(&mut out, profile);
    render_international(&mut out, profile);
    render_youth(&mut out, profile);
    render_sources(&mut out, profile);

    out
}

/// Card tier from the overall rating, mirroring the classic card art bands.
pub(crate) fn rating_tier(rating: u8) -> &'static str {
    match rating {
        90.. => "Special",
        80..=89 => "Gold",
        75..=79 => "Silver",
        _ => "Bronze",
    }
}

fn render_card(out: &mut String, profile: &PlayerProfile) {
    let tier = rating_tier(profile.overall_rating);
    let _ = writeln!(out, "==============================================");
    let _ = writeln!(
        out,
        "  {:>2}  {}  [{}]",
        profile.overall_rating, profile.name, profile.position
    );
    let _ = writeln!(out, "  {} card", tier);
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        profile.club, profile.league, profile.nation
    );
    if let Some(image) = &profile.image {
        if !image.is_empty() {
            let _ = writeln!(out, "  image: {image}");
        }
    }
    let _ = writeln!(out, "----------------------------------------------");

    // Face stats use the position-appropriate axis set.
    let axes = profile.face_stats.axes(&profile.position);
    for pair in axes.chunks(3) {
        let line: Vec<String> = pair
            .iter()
            .map(|a| format!("{} {:>3}", a.label, a.value))
            .collect();
        let _ = writeln!(out, "  {}", line.join("   "));
    }
    let _ = writeln!(out, "==============================================");
}

fn render_scout_report(out: &mut String, profile: &PlayerProfile) {
    if profile.description.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nScout Report");
    let _ = writeln!(out, "  \"{}\"", profile.description);
}

fn render_attributes(out: &mut String, profile: &PlayerProfile) {
    let _ = writeln!(out, "\nDetailed Attributes");
    for category in AttributeCategory::ALL {
        let avg = profile.attributes.category_average(category);
        let _ = writeln!(out, "  {:<12} {:>3}", category.label(), avg);
        for &key in category.keys() {
            let value = profile.attributes.get(key);
            let _ = writeln!(
                out,
                "    {:<18} {:>3} {}",
                key.label(),
                value,
                bar(value)
            );
        }
    }
}

fn render_transfers(out: &mut String, profile: &PlayerProfile) {
    let _ = writeln!(out, "\nTransfer History");
    if profile.transfer_history.is_empty() {
        let _ = writeln!(out, "  No major transfers found.");
        return;
    }
    for transfer in &profile.transfer_history {
        let _ = writeln!(
            out,
            "  {:<9}  {:<24} {}",
            transfer.season, transfer.club, transfer.fee
        );
    }
}

fn render_international(out: &mut String, profile: &PlayerProfile) {
    let _ = writeln!(out, "\nInternational");
    match &profile.international_history {
        Some(record) => {
            let _ = writeln!(out, "  Nation       {}", record.nation);
            let _ = writeln!(out, "  Caps / Goals {} / {}", record.caps, record.goals);
            let _ = writeln!(out, "  Active       {}", record.years);
        }
        None => {
            let _ = writeln!(out, "  No international data available.");
        }
    }
}

fn render_youth(out: &mut String, profile: &PlayerProfile) {
    let _ = writeln!(out, "\nYouth Academy");
    if profile.youth_career.is_empty() {
        let _ = writeln!(out, "  No youth data available.");
        return;
    }
    let _ = writeln!(out, "  {}", profile.youth_career.join(", "));
}

fn render_sources(out: &mut String, profile: &PlayerProfile) {
    if profile.sources.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nVerified Sources");
    for (idx, source) in profile.sources.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {} <{}>", idx + 1, source.title, source.uri);
    }
}

/// A fixed-width value bar on the 0-99 scale. Values past 99 fill the bar.
fn bar(value: u8) -> String {
    let filled = ((value.min(99) as usize) * BAR_WIDTH).div_ceil(99);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
