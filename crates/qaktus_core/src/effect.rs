use crate::weights::LinkTarget;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    GenerateLink { targets: Vec<LinkTarget> },
    CopyToClipboard { text: String },
    JoinWaitlist { email: String },
}
