use crate::waitlist::WaitlistOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseView {
    #[default]
    Idle,
    Generating,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: PhaseView,
    pub destinations: Vec<DestinationRowView>,
    pub custom_weights: bool,
    pub can_generate: bool,
    pub generation_error: Option<String>,
    pub short_url: Option<String>,
    pub copied: bool,
    pub waitlist: WaitlistView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationRowView {
    pub position: usize,
    pub url: String,
    pub valid: bool,
    /// Invalid and edited at least once.
    pub show_error: bool,
    pub removable: bool,
    pub weight: f64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaitlistView {
    pub email: String,
    pub outcome: WaitlistOutcome,
    pub client_error: Option<String>,
}
