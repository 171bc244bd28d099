/// Prompt text for one comparison.
use tierjudge_core::RankingSession;

use crate::input::KeyBindings;

pub const DEFAULT_PROGRESS_WIDTH: usize = 30;

/// Render a progress fraction as a fixed-width bar, e.g. `[######----]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Build the prompt for the session's current comparison. Empty once the
/// session is complete.
pub fn build_prompt(tier_label: &str, session: &RankingSession, width: usize, keys: &KeyBindings) -> String {
    let Some(cmp) = session.current() else {
        return String::new();
    };
    let done = session.total_comparisons() - session.remaining_comparisons();
    format!(
        "\nCompare items in {tier_label} tier  {} {done}/{}\n  [{}] {}   vs   [{}] {}\n> ",
        progress_bar(session.progress(), width),
        session.total_comparisons(),
        keys.first_label(),
        cmp.item1.name,
        keys.second_label(),
        cmp.item2.name,
    )
}

pub fn tier_complete_message(tier_label: &str) -> String {
    format!("Sorting of {tier_label} tier complete!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierjudge_core::{Item, Pick};

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(1.5, 4), "[####]");
        assert_eq!(progress_bar(0.3, 0), "[]");
    }

    #[test]
    fn test_build_prompt_contains_all_parts() {
        let items = vec![Item::new("1", "Pizza"), Item::new("2", "Sushi"), Item::new("3", "Tacos")];
        let session = RankingSession::start(&items).unwrap();
        let session = session.pick(Pick::First).unwrap();

        let prompt = build_prompt("S", &session, 3, &KeyBindings::default());
        assert!(prompt.contains("Compare items in S tier"));
        assert!(prompt.contains("[#--] 1/3"));
        assert!(prompt.contains("[1] Pizza"));
        assert!(prompt.contains("[2] Tacos"));
        assert!(prompt.ends_with("> "));
    }

    #[test]
    fn test_build_prompt_empty_when_complete() {
        let session = RankingSession::start(&[Item::new("1", "Solo")]).unwrap();
        assert!(build_prompt("S", &session, 10, &KeyBindings::default()).is_empty());
    }
}
