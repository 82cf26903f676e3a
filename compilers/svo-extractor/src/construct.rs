use serde::Serialize;
use svo_protocol::TokenId;

/// One subject-verb-object assertion extracted from a sentence.
///
/// Tokens are referenced by id into the sentence's
/// [`DependencyTree`](svo_tree::DependencyTree). The participant type is
/// whatever the caller passed to the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SvoConstruct<P> {
    subject: Option<TokenId>,
    verb: Option<TokenId>,
    object: Option<TokenId>,
    participant: Option<P>,
    /// Position of the verb; orders constructs within a sentence.
    position: usize,
    gateway_keyword: Option<String>,
}

impl<P> SvoConstruct<P> {
    pub fn new(
        subject: Option<TokenId>,
        verb: Option<TokenId>,
        object: Option<TokenId>,
        position: usize,
    ) -> Self {
        Self {
            subject,
            verb,
            object,
            participant: None,
            position,
            gateway_keyword: None,
        }
    }

    pub fn subject(&self) -> Option<TokenId> {
        self.subject
    }

    pub fn set_subject(&mut self, subject: Option<TokenId>) {
        self.subject = subject;
    }

    pub fn verb(&self) -> Option<TokenId> {
        self.verb
    }

    pub fn set_verb(&mut self, verb: Option<TokenId>) {
        self.verb = verb;
    }

    pub fn object(&self) -> Option<TokenId> {
        self.object
    }

    pub fn set_object(&mut self, object: Option<TokenId>) {
        self.object = object;
    }

    pub fn participant(&self) -> Option<&P> {
        self.participant.as_ref()
    }

    pub fn set_participant(&mut self, participant: P) {
        self.participant = Some(participant);
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn gateway_keyword(&self) -> Option<&str> {
        self.gateway_keyword.as_deref()
    }

    /// Filled in by gateway detection once constructs have been extracted.
    pub fn set_gateway_keyword(&mut self, keyword: impl Into<String>) {
        self.gateway_keyword = Some(keyword.into());
    }

    /// Both subject and verb are known.
    pub fn is_complete(&self) -> bool {
        self.subject.is_some() && self.verb.is_some()
    }

    /// Same verb and same object; subjects are not compared.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.verb == other.verb && self.object == other.object
    }
}
