use qaktus_logging::{qaktus_debug, qaktus_info, qaktus_warn};

use crate::destinations::DestinationError;
use crate::state::{Draft, LinkPhase};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged { position, text } => {
            edit_draft(&mut state, |draft| {
                draft.destinations.set_url(position, text)?;
                Ok(true)
            });
            Vec::new()
        }
        Msg::DestinationAdded => {
            edit_draft(&mut state, |draft| {
                draft.destinations.add();
                Ok(true)
            });
            Vec::new()
        }
        Msg::DestinationRemoved { position } => {
            edit_draft(&mut state, |draft| match draft.destinations.remove(position)? {
                Some(id) => {
                    draft.weights.forget(id);
                    Ok(true)
                }
                None => {
                    qaktus_debug!("Refusing to remove the last destination");
                    Ok(false)
                }
            });
            Vec::new()
        }
        Msg::CustomWeightsToggled(enabled) => {
            edit_draft(&mut state, |draft| {
                let changed = draft.weights.is_custom() != enabled;
                draft.weights.set_custom(enabled);
                Ok(changed)
            });
            Vec::new()
        }
        Msg::WeightChanged { position, value } => {
            edit_draft(&mut state, |draft| {
                draft
                    .weights
                    .set_weight(&draft.destinations, position, value)?;
                Ok(true)
            });
            Vec::new()
        }
        Msg::GenerateClicked => start_generation(&mut state),
        Msg::GenerationCompleted { result } => {
            finish_generation(&mut state, result);
            Vec::new()
        }
        Msg::CopyClicked => match &state.link {
            LinkPhase::Generated { short_url, .. } => vec![Effect::CopyToClipboard {
                text: short_url.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::ClipboardWritten => {
            if let LinkPhase::Generated { copied, .. } = &mut state.link {
                if !*copied {
                    *copied = true;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if matches!(state.link, LinkPhase::Generated { .. }) {
                state.link = LinkPhase::default();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::WaitlistEmailChanged(text) => {
            if state.waitlist.set_email(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::WaitlistSubmitted => match state.waitlist.submit() {
            Ok(Some(email)) => {
                state.mark_dirty();
                vec![Effect::JoinWaitlist { email }]
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                qaktus_debug!("Waitlist submission rejected locally: {}", err);
                state.mark_dirty();
                Vec::new()
            }
        },
        Msg::WaitlistCompleted { result } => {
            if state.waitlist.complete(&result) {
                match &result {
                    Ok(receipt) => qaktus_info!("Waitlist signup confirmed: {:?}", receipt),
                    Err(message) => qaktus_warn!("Waitlist signup failed: {}", message),
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Applies `edit` to the draft while inputs are editable. The closure returns
/// whether anything visible changed.
fn edit_draft<F>(state: &mut AppState, edit: F)
where
    F: FnOnce(&mut Draft) -> Result<bool, DestinationError>,
{
    let LinkPhase::Idle { draft, .. } = &mut state.link else {
        qaktus_debug!("Ignoring edit: inputs are not editable");
        return;
    };
    match edit(draft) {
        Ok(true) => state.mark_dirty(),
        Ok(false) => {}
        Err(err) => qaktus_debug!("Ignoring edit: {}", err),
    }
}

fn start_generation(state: &mut AppState) -> Vec<Effect> {
    match std::mem::take(&mut state.link) {
        LinkPhase::Idle { draft, error } if !draft.destinations.all_valid() => {
            qaktus_debug!("Generate ignored: not every destination is a valid URL");
            state.link = LinkPhase::Idle { draft, error };
            Vec::new()
        }
        LinkPhase::Idle { draft, .. } => {
            let targets = draft.payload();
            qaktus_info!("Requesting short link for {} destination(s)", targets.len());
            state.link = LinkPhase::Generating { draft };
            state.mark_dirty();
            vec![Effect::GenerateLink { targets }]
        }
        other => {
            qaktus_debug!("Generate ignored: a link is already in flight or generated");
            state.link = other;
            Vec::new()
        }
    }
}

fn finish_generation(state: &mut AppState, result: Result<String, String>) {
    let draft = match std::mem::take(&mut state.link) {
        LinkPhase::Generating { draft } => draft,
        other => {
            qaktus_debug!("Ignoring generation result outside of Generating");
            state.link = other;
            return;
        }
    };

    state.link = match result {
        Ok(code) => {
            let short_url = state.short_url_for(&code);
            qaktus_info!("Short link ready: {}", short_url);
            LinkPhase::Generated {
                short_url,
                copied: false,
            }
        }
        Err(message) => {
            qaktus_warn!("Short link generation failed: {}", message);
            LinkPhase::Idle {
                draft,
                error: Some(message),
            }
        }
    };
    state.mark_dirty();
}
