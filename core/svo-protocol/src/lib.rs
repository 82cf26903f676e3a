#![no_std] // Keeps the protocol usable from WASM builds

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod taxonomy;

pub use ids::{ParticipantId, SentenceId, TokenId};
pub use taxonomy::{GatewayKind, LabelClass};

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn token(id: u32, text: &str, pos: &str, dep: &str, head: Option<u32>) -> TokenRecord {
        TokenRecord {
            id: TokenId(id),
            text: text.to_string(),
            lemma: text.to_string(),
            pos: pos.to_string(),
            dep: dep.to_string(),
            head: head.map(TokenId),
        }
    }

    #[test]
    fn test_corpus_archive_round_trip() {
        // "The manager approves the request."
        let original = Corpus::new(vec![SentenceRecord {
            id: SentenceId(7),
            label: Some("train-s7".to_string()),
            text: Some("The manager approves the request.".to_string()),
            tokens: vec![
                token(0, "The", "DET", "det", Some(1)),
                token(1, "manager", "NOUN", "nsubj", Some(2)),
                token(2, "approves", "VERB", "ROOT", None),
                token(3, "the", "DET", "det", Some(4)),
                token(4, "request", "NOUN", "dobj", Some(2)),
                token(5, ".", "PUNCT", "punct", Some(2)),
            ],
            participants: vec![ParticipantRecord {
                id: ParticipantId(1),
                name: "manager".to_string(),
                anchor: TokenId(1),
            }],
        }]);

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize Corpus");
        let restored: Corpus = from_bytes(&bytes).expect("Failed to deserialize Corpus");

        assert_eq!(original, restored);
        assert_eq!(restored.version, Corpus::CURRENT_VERSION);
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
        assert_eq!(TokenId(3).index(), 3);
    }

    #[test]
    fn test_root_detection() {
        assert!(token(2, "approves", "VERB", "ROOT", None).is_root());
        assert!(token(2, "approves", "VERB", "ROOT", Some(2)).is_root());
        assert!(!token(1, "manager", "NOUN", "nsubj", Some(2)).is_root());
    }

    #[test]
    fn test_label_classes() {
        assert_eq!(LabelClass::of("nsubj"), LabelClass::SUBJECT);
        let both = LabelClass::SVO_DESCRIPTOR | LabelClass::PARTICIPANT_DESCRIPTOR;
        assert!(LabelClass::of("amod").contains(both));
        assert!(LabelClass::of("ccomp").contains(LabelClass::OBJECT));
        assert!(LabelClass::of("punct").is_empty());
    }

    #[test]
    fn test_gateway_keywords() {
        assert_eq!(taxonomy::gateway_keywords().count(), 5);
        assert_eq!(GatewayKind::of("If"), Some(GatewayKind::Conditional));
        assert_eq!(GatewayKind::of("otherwise"), Some(GatewayKind::DefaultFlow));
        assert_eq!(GatewayKind::of("while"), Some(GatewayKind::Parallel));
        assert_eq!(GatewayKind::of("and"), None);
    }

    #[test]
    fn test_ud_labels_normalize() {
        assert_eq!(taxonomy::normalize_label("obj"), "dobj");
        assert_eq!(taxonomy::normalize_label("nsubj:pass"), "nsubjpass");
        assert_eq!(taxonomy::normalize_label("nsubj"), "nsubj");
    }
}
