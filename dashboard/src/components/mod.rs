// Text panels for the dashboard. Every renderer is a pure function of the
// state it is given and returns the lines to print.
pub mod chart;
pub mod intel;
pub mod sidebar;
pub mod signal;
pub mod strategy;

pub use chart::render_chart;
pub use intel::{render_intel, render_summary};
pub use sidebar::render_sidebar;
pub use signal::render_signal;
pub use strategy::render_strategy;

const RULE_WIDTH: usize = 72;

/// Section header followed by a horizontal rule.
pub(crate) fn heading(title: &str) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH.saturating_sub(title.len() + 4));
    vec![format!("== {} {}", title, rule), String::new()]
}

/// Left label, right-aligned value on one line.
pub(crate) fn field(label: &str, value: &str) -> String {
    let width = RULE_WIDTH.saturating_sub(label.len()).max(1);
    format!("{}{:>width$}", label, value, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_fills_the_rule() {
        let lines = heading("INTEL");
        assert_eq!(lines[0].len(), RULE_WIDTH);
        assert!(lines[0].starts_with("== INTEL "));
    }

    #[test]
    fn field_right_aligns_value() {
        let line = field("SECTOR", "Tech");
        assert_eq!(line.len(), RULE_WIDTH);
        assert!(line.ends_with("Tech"));
    }
}
