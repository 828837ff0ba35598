use crate::destinations::DestinationList;
use crate::view_model::{AppViewModel, DestinationRowView, PhaseView, WaitlistView};
use crate::waitlist::WaitlistForm;
use crate::weights::{LinkTarget, WeightModel};

pub const DEFAULT_PUBLIC_BASE: &str = "https://qaktus.com";

/// Editable inputs of a link being composed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub destinations: DestinationList,
    pub weights: WeightModel,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Vec<LinkTarget> {
        self.weights.serialize(&self.destinations)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkPhase {
    /// Inputs are editable. `error` holds the last failed generation attempt.
    Idle { draft: Draft, error: Option<String> },
    /// Inputs are frozen until the collaborator answers.
    Generating { draft: Draft },
    Generated { short_url: String, copied: bool },
}

impl Default for LinkPhase {
    fn default() -> Self {
        LinkPhase::Idle {
            draft: Draft::new(),
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) link: LinkPhase,
    pub(crate) waitlist: WaitlistForm,
    public_base: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_public_base(DEFAULT_PUBLIC_BASE)
    }

    /// `base` is the address short codes are served from, e.g. `https://qaktus.com`.
    pub fn with_public_base(base: impl Into<String>) -> Self {
        Self {
            link: LinkPhase::default(),
            waitlist: WaitlistForm::new(),
            public_base: base.into(),
            dirty: false,
        }
    }

    pub fn link_phase(&self) -> &LinkPhase {
        &self.link
    }

    pub fn waitlist(&self) -> &WaitlistForm {
        &self.waitlist
    }

    pub fn short_url_for(&self, code: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), code)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let (phase, rows, custom_weights, can_generate, generation_error, short_url, copied) =
            match &self.link {
                LinkPhase::Idle { draft, error } => (
                    PhaseView::Idle,
                    draft_rows(draft),
                    draft.weights.is_custom(),
                    draft.destinations.all_valid(),
                    error.clone(),
                    None,
                    false,
                ),
                LinkPhase::Generating { draft } => (
                    PhaseView::Generating,
                    draft_rows(draft),
                    draft.weights.is_custom(),
                    false,
                    None,
                    None,
                    false,
                ),
                LinkPhase::Generated { short_url, copied } => (
                    PhaseView::Generated,
                    Vec::new(),
                    false,
                    false,
                    None,
                    Some(short_url.clone()),
                    *copied,
                ),
            };

        AppViewModel {
            phase,
            destinations: rows,
            custom_weights,
            can_generate,
            generation_error,
            short_url,
            copied,
            waitlist: WaitlistView {
                email: self.waitlist.email().to_string(),
                outcome: self.waitlist.outcome(),
                client_error: self.waitlist.client_error().map(|err| err.to_string()),
            },
            dirty: self.dirty,
        }
    }
}

fn draft_rows(draft: &Draft) -> Vec<DestinationRowView> {
    let list = &draft.destinations;
    let removable = list.len() > 1;
    list.entries()
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let valid = entry.is_valid();
            DestinationRowView {
                position,
                url: entry.url().to_string(),
                valid,
                show_error: entry.touched() && !valid,
                removable,
                weight: draft.weights.effective_weight_of(list, position),
                percentage: draft.weights.percentage_of(list, position),
            }
        })
        .collect()
}
