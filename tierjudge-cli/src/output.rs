/// Output formatting: terminal table and JSON.
use anyhow::Result;
use serde::Serialize;
use tierjudge_core::{Item, TierList};

#[derive(Serialize)]
struct JsonTier<'a> {
    label: &'a str,
    /// Best first.
    items: &'a [Item],
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    name: &'a str,
    complete: bool,
    tiers: Vec<JsonTier<'a>>,
}

/// Render the tier list as one row per tier: `S | Pizza > Sushi > Tacos`.
pub fn render_table(list: &TierList) -> String {
    let label_width = list
        .tiers
        .iter()
        .map(|t| t.label.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Tier"

    let mut out = String::new();
    out.push_str(&format!("{}\n", list.name));
    out.push_str(&format!("{:<label_width$} | Items (best first)\n", "Tier"));
    out.push_str(&format!("{}-|-{}\n", "-".repeat(label_width), "-".repeat(18)));

    for tier in &list.tiers {
        let row = if tier.items.is_empty() {
            "(empty)".to_string()
        } else {
            tier.items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>().join(" > ")
        };
        out.push_str(&format!("{:<label_width$} | {}\n", tier.label, row));
    }
    out
}

/// Render the tier list as JSON.
pub fn render_json(list: &TierList, complete: bool) -> Result<String> {
    let output = JsonOutput {
        name: &list.name,
        complete,
        tiers: list
            .tiers
            .iter()
            .map(|t| JsonTier {
                label: &t.label,
                items: &t.items,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
