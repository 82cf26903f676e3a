use serde::Serialize;
use svo_protocol::{ParticipantId, ParticipantRecord, SentenceId, SentenceRecord, TokenId};
use svo_tree::{DependencyTree, TreeError};

use crate::construct::SvoConstruct;
use crate::describe::render_phrase;
use crate::extract::SvoExtractor;

/// A token reference with its text resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub id: TokenId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub name: String,
}

/// Serialisable form of one [`SvoConstruct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructView {
    pub subject: Option<TokenView>,
    pub verb: Option<TokenView>,
    pub object: Option<TokenView>,
    pub participant: Option<ParticipantView>,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_keyword: Option<String>,
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceReport {
    pub sentence: SentenceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub constructs: Vec<ConstructView>,
}

impl ConstructView {
    pub fn new(sentence: &DependencyTree, construct: &SvoConstruct<ParticipantRecord>) -> Self {
        let view = |id: Option<TokenId>| {
            id.and_then(|id| sentence.token(id)).map(|t| TokenView {
                id: t.id(),
                text: t.text().to_string(),
            })
        };

        Self {
            subject: view(construct.subject()),
            verb: view(construct.verb()),
            object: view(construct.object()),
            participant: construct.participant().map(|p| ParticipantView {
                id: p.id,
                name: p.name.clone(),
            }),
            position: construct.position(),
            gateway_keyword: construct.gateway_keyword().map(str::to_string),
            phrase: render_phrase(sentence, construct),
        }
    }
}

impl SvoExtractor {
    /// Builds the tree for `record`, extracts against its participants and
    /// resolves the result for display.
    pub fn analyze(&self, record: &SentenceRecord) -> Result<SentenceReport, TreeError> {
        let tree = DependencyTree::from_record(record)?;
        let constructs = self.extract(&tree, &record.participants);

        Ok(SentenceReport {
            sentence: tree.id(),
            label: record.label.clone(),
            text: tree.text().map(str::to_string),
            constructs: constructs.iter().map(|c| ConstructView::new(&tree, c)).collect(),
        })
    }
}
