//! Dependency label taxonomy.
//!
//! Static catalogue of the clear-style dependency labels the extractor reads,
//! grouped by the role they play during extraction, plus the gateway keyword
//! vocabulary consumed by later stages.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

pub mod labels {
    pub const ROOT: &str = "ROOT";
    pub const NSUBJ: &str = "nsubj";
    pub const NSUBJPASS: &str = "nsubjpass";
    pub const DOBJ: &str = "dobj";
    pub const IOBJ: &str = "iobj";
    pub const POBJ: &str = "pobj";
    pub const ATTR: &str = "attr";
    pub const XCOMP: &str = "xcomp";
    pub const CCOMP: &str = "ccomp";
    pub const CONJ: &str = "conj";
    pub const CC: &str = "cc";
    pub const COMPOUND: &str = "compound";
    pub const AMOD: &str = "amod";
    pub const ACOMP: &str = "acomp";
    pub const AUX: &str = "aux";
    pub const AUXPASS: &str = "auxpass";
    pub const NEG: &str = "neg";
    pub const PREP: &str = "prep";
    pub const DET: &str = "det";
    pub const POSS: &str = "poss";
    pub const AGENT: &str = "agent";
    pub const DATIVE: &str = "dative";
    pub const PRT: &str = "prt";
    pub const ADVCL: &str = "advcl";
}

/// Coarse part-of-speech tag of verbs.
pub const POS_VERB: &str = "VERB";

/// Labels that describe a verb (used for modifier attachment on constructs).
pub const SVO_DESCRIPTORS: &[&str] = &[
    labels::AMOD, labels::ACOMP, labels::AUX, labels::AUXPASS, labels::NEG, labels::PREP,
];

/// Labels that describe a participant's noun.
pub const PARTICIPANT_DESCRIPTORS: &[&str] = &[
    labels::AMOD, labels::ACOMP, labels::AUX, labels::AUXPASS,
    labels::COMPOUND, labels::DET, labels::NEG, labels::POSS,
];

pub const CONDITIONAL_KEYWORDS: &[&str] = &["if", "whether", "whenever"];
pub const DEFAULT_FLOW_KEYWORDS: &[&str] = &["otherwise"];
pub const PARALLEL_KEYWORDS: &[&str] = &["while"];

/// Labels an object search may descend through when the verb has no direct object.
pub const DEFAULT_SKIPPABLE: &[&str] = &[
    labels::PREP, labels::AGENT, labels::DATIVE, labels::PRT,
    labels::ACOMP, labels::ADVCL, labels::XCOMP, labels::CCOMP,
];

// Label sets of the extraction passes.

pub const ACTIVE_SUBJECT: &[&str] = &[labels::NSUBJ];
pub const PASSIVE_SUBJECT: &[&str] = &[labels::NSUBJPASS];
/// Direct-children stage of the active-subject object search.
pub const OBJECT_CHILDREN: &[&str] = &[labels::DOBJ, labels::ATTR];
/// Descending stage of the active-subject object search.
pub const OBJECT_DESCENDANTS: &[&str] = &[
    labels::DOBJ, labels::IOBJ, labels::POBJ, labels::ATTR, labels::XCOMP,
];
pub const CONJUNCT_OBJECT_CHILDREN: &[&str] = &[labels::DOBJ, labels::ATTR, labels::CCOMP];
pub const CONJUNCT_OBJECT_DESCENDANTS: &[&str] = &[
    labels::DOBJ, labels::IOBJ, labels::POBJ, labels::ATTR, labels::CCOMP, labels::XCOMP,
];
/// Where a coordinated verb looks for the subject it inherits from its head.
pub const CONJUNCT_SUBJECT: &[&str] = &[labels::NSUBJ, labels::NSUBJPASS, labels::COMPOUND];

/// Every keyword that marks a gateway.
pub fn gateway_keywords() -> impl Iterator<Item = &'static str> {
    CONDITIONAL_KEYWORDS
        .iter()
        .chain(DEFAULT_FLOW_KEYWORDS)
        .chain(PARALLEL_KEYWORDS)
        .copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum GatewayKind {
    Conditional,
    DefaultFlow,
    Parallel,
}

impl GatewayKind {
    /// Looks up the gateway kind of a keyword (case-insensitive).
    pub fn of(word: &str) -> Option<Self> {
        let matches = |set: &[&str]| set.iter().any(|k| k.eq_ignore_ascii_case(word));
        if matches(CONDITIONAL_KEYWORDS) {
            Some(Self::Conditional)
        } else if matches(DEFAULT_FLOW_KEYWORDS) {
            Some(Self::DefaultFlow)
        } else if matches(PARALLEL_KEYWORDS) {
            Some(Self::Parallel)
        } else {
            None
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct LabelClass: u8 {
        const SUBJECT = 1;
        const OBJECT = 2;
        const SVO_DESCRIPTOR = 4;
        const PARTICIPANT_DESCRIPTOR = 8;
        const COORDINATION = 16;
    }
}

impl LabelClass {
    /// Classifies a dependency label. A label can belong to several groups.
    pub fn of(label: &str) -> Self {
        let mut class = Self::empty();
        if ACTIVE_SUBJECT.contains(&label) || PASSIVE_SUBJECT.contains(&label) {
            class |= Self::SUBJECT;
        }
        if CONJUNCT_OBJECT_DESCENDANTS.contains(&label) {
            class |= Self::OBJECT;
        }
        if SVO_DESCRIPTORS.contains(&label) {
            class |= Self::SVO_DESCRIPTOR;
        }
        if PARTICIPANT_DESCRIPTORS.contains(&label) {
            class |= Self::PARTICIPANT_DESCRIPTOR;
        }
        if label == labels::CONJ || label == labels::CC {
            class |= Self::COORDINATION;
        }
        class
    }
}

/// Maps Universal Dependencies v2 labels onto the clear-style labels above.
/// Labels without a counterpart are returned unchanged.
pub fn normalize_label(label: &str) -> &str {
    match label {
        "root" => labels::ROOT,
        "obj" => labels::DOBJ,
        "nsubj:pass" => labels::NSUBJPASS,
        "aux:pass" => labels::AUXPASS,
        "obl" | "obl:arg" => labels::POBJ,
        "obl:agent" => labels::AGENT,
        "compound:prt" => labels::PRT,
        "nmod:poss" => labels::POSS,
        other => other,
    }
}
