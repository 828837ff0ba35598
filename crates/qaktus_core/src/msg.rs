use crate::waitlist::SignupReceipt;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL of a destination row.
    UrlChanged { position: usize, text: String },
    /// User asked for another destination row.
    DestinationAdded,
    /// User removed a destination row.
    DestinationRemoved { position: usize },
    /// User switched custom weighting on or off.
    CustomWeightsToggled(bool),
    /// User edited the weight of a destination row.
    WeightChanged { position: usize, value: f64 },
    /// User asked for a short link.
    GenerateClicked,
    /// Generation collaborator answered with a short code or a failure message.
    GenerationCompleted { result: Result<String, String> },
    /// User asked to copy the short link.
    CopyClicked,
    /// The clipboard accepted the short link.
    ClipboardWritten,
    /// User asked to start over with a new link.
    ResetClicked,
    /// User edited the waitlist email field.
    WaitlistEmailChanged(String),
    /// User submitted the waitlist form.
    WaitlistSubmitted,
    /// Waitlist collaborator answered.
    WaitlistCompleted {
        result: Result<SignupReceipt, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
