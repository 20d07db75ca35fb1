// Top-level layout: sidebar, tab bar, then the active tab's panels
use crate::components::{render_chart, render_intel, render_sidebar, render_signal, render_strategy, render_summary};
use crate::state::{AppState, Tab};

pub const LOADING_BANNER: &str = "DECRYPTING MARKET DATA...";

fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_app(state: &AppState, chart_rows: usize) -> String {
    let mut lines = render_sidebar(state);
    lines.push(String::new());
    lines.push(tab_bar(state.active_tab));
    lines.push(String::new());

    if state.loading_data {
        lines.push(LOADING_BANNER.to_string());
        lines.push(String::new());
    }

    let snapshot = state.snapshot.as_deref();
    let latest = snapshot.and_then(|s| s.latest());
    match state.active_tab {
        Tab::Surveillance => {
            lines.extend(render_chart(snapshot, chart_rows));
            lines.push(String::new());
            lines.extend(render_summary(&state.summary, &state.ticker));
            lines.push(String::new());
            lines.extend(render_signal(state.signal.as_ref(), state.analyzing, None));
        }
        Tab::Signals => lines.extend(render_signal(state.signal.as_ref(), state.analyzing, latest)),
        Tab::Strategy => lines.extend(render_strategy(snapshot)),
        Tab::Intel => lines.extend(render_intel(&state.news, state.loading_data, &state.ticker)),
    }

    lines.join("\n")
}
