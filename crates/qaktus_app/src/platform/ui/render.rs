use std::fmt::Write;

use qaktus_core::{AppViewModel, DestinationRowView, PhaseView, WaitlistOutcome};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    match view.phase {
        PhaseView::Idle | PhaseView::Generating => render_composer(&mut out, view),
        PhaseView::Generated => {
            let short_url = view.short_url.as_deref().unwrap_or_default();
            let badge = if view.copied { "Copied" } else { "Copy" };
            let _ = writeln!(out, "Short link: {short_url}  [{badge}]");
            let _ = writeln!(out, "  `copy` to copy it, `reset` to generate a new link");
        }
    }

    let _ = writeln!(out, "{}", waitlist_line(view));
    out
}

fn render_composer(out: &mut String, view: &AppViewModel) {
    let mode = if view.custom_weights { "on" } else { "off" };
    let _ = writeln!(out, "Destinations (custom weights: {mode})");
    for row in &view.destinations {
        let _ = writeln!(out, "{}", destination_line(row, view.custom_weights));
    }

    let status = match view.phase {
        PhaseView::Generating => "generating...",
        _ if view.can_generate => "ready, type `generate`",
        _ => "every destination needs a valid URL",
    };
    let _ = writeln!(out, "Generate: {status}");
    if let Some(error) = &view.generation_error {
        let _ = writeln!(out, "  last attempt failed: {error}");
    }
}

fn destination_line(row: &DestinationRowView, custom_weights: bool) -> String {
    let url = if row.url.is_empty() {
        "<enter URL>"
    } else {
        row.url.as_str()
    };
    let mut line = format!("  {}. {}", row.position + 1, url);
    if custom_weights {
        let _ = write!(line, "  weight {}  {}%", row.weight, row.percentage);
    }
    if row.show_error {
        line.push_str("  (please enter a valid URL)");
    }
    line
}

fn waitlist_line(view: &AppViewModel) -> String {
    let waitlist = &view.waitlist;
    match waitlist.outcome {
        WaitlistOutcome::Success => {
            "Waitlist: you're on the list. We'll be in touch soon.".to_string()
        }
        WaitlistOutcome::Submitting => format!("Waitlist: submitting {}...", waitlist.email),
        WaitlistOutcome::Idle | WaitlistOutcome::Error => {
            let mut line = if waitlist.email.is_empty() {
                "Waitlist: `email <address>` then `join`".to_string()
            } else {
                format!("Waitlist: {}", waitlist.email)
            };
            if let Some(error) = &waitlist.client_error {
                let _ = write!(line, "  ({error})");
            } else if waitlist.outcome == WaitlistOutcome::Error {
                line.push_str("  (something went wrong, please try again)");
            }
            line
        }
    }
}
