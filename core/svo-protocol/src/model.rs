use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{ParticipantId, SentenceId, TokenId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One token as produced by the external dependency parser.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TokenRecord {
    pub id: TokenId,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lemma: String,
    /// Coarse part-of-speech tag (`VERB`, `NOUN`, ...).
    pub pos: String,
    /// Dependency label relative to `head`.
    pub dep: String,
    /// `None` (or the token's own id) marks a root.
    #[cfg_attr(feature = "serde", serde(default))]
    pub head: Option<TokenId>,
}

impl TokenRecord {
    pub fn is_root(&self) -> bool {
        self.head.map_or(true, |head| head == self.id)
    }
}

/// An actor identified by the participant stage, anchored to one token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    pub name: String,
    pub anchor: TokenId,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SentenceRecord {
    pub id: SentenceId,
    /// Identifier given by the source document, kept verbatim.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,
    pub tokens: Vec<TokenRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub participants: Vec<ParticipantRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Corpus {
    pub version: u32,
    pub sentences: Vec<SentenceRecord>,
}

impl Corpus {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(sentences: Vec<SentenceRecord>) -> Self {
        Self { version: Self::CURRENT_VERSION, sentences }
    }
}
