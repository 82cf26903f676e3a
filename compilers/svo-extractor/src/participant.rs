use svo_protocol::{ParticipantRecord, TokenId};

/// An actor found before SVO extraction, identified by the token that names it.
pub trait Participant {
    fn anchor_token(&self) -> TokenId;
}

impl Participant for ParticipantRecord {
    fn anchor_token(&self) -> TokenId {
        self.anchor
    }
}

impl<P: Participant + ?Sized> Participant for &P {
    fn anchor_token(&self) -> TokenId {
        (**self).anchor_token()
    }
}
