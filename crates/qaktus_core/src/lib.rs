//! Qaktus core: pure state machine for composing multi-destination short
//! links and joining the waitlist.
mod destinations;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;
mod waitlist;
mod weights;

pub use destinations::{
    is_valid_destination_url, DestinationEntry, DestinationError, DestinationList, EntryId,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Draft, LinkPhase, DEFAULT_PUBLIC_BASE};
pub use update::update;
pub use view_model::{AppViewModel, DestinationRowView, PhaseView, WaitlistView};
pub use waitlist::{is_valid_email, SignupReceipt, WaitlistError, WaitlistForm, WaitlistOutcome};
pub use weights::{parse_weight, LinkTarget, WeightModel, DEFAULT_WEIGHT};
