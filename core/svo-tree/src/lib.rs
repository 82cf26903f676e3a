pub mod components;
pub mod token;
mod validate;

use components::{Node, Syntax, TokenData};
use svo_protocol::taxonomy::labels;
use svo_protocol::{SentenceId, SentenceRecord, TokenId};
use thiserror::Error;

pub use token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("sentence has no tokens")]
    Empty,
    #[error("token at position {expected} is numbered {found}")]
    Misnumbered { expected: TokenId, found: TokenId },
    #[error("token {token} points at head {head}, which is outside the sentence")]
    HeadOutOfRange { token: TokenId, head: TokenId },
    #[error("head references of token {token} form a cycle")]
    Cycle { token: TokenId },
}

/// An immutable, validated dependency parse of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    id: SentenceId,
    text: Option<String>,
    nodes: Vec<Node>,
    root: TokenId,
}

impl DependencyTree {
    pub fn builder() -> TreeBuilder {
        TreeBuilder::new()
    }

    /// Ingest a parser record. Token ids must match their positions.
    pub fn from_record(record: &SentenceRecord) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::new().with_id(record.id);
        if let Some(text) = &record.text {
            builder = builder.with_text(text.clone());
        }

        for (position, token) in record.tokens.iter().enumerate() {
            let expected = TokenId(position as u32);
            if token.id != expected {
                return Err(TreeError::Misnumbered { expected, found: token.id });
            }
            builder.add_token(&token.text, &token.lemma, &token.pos);
        }
        for token in &record.tokens {
            let head = token.head.unwrap_or(token.id);
            builder.set_dependency(token.id, head, &token.dep);
        }

        builder.build()
    }

    pub fn id(&self) -> SentenceId {
        self.id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The designated root: the first token in sentence order that is its own head.
    pub fn root(&self) -> Token<'_> {
        Token::new(self, self.root)
    }

    pub fn token(&self, id: TokenId) -> Option<Token<'_>> {
        (id.index() < self.nodes.len()).then(|| Token::new(self, id))
    }

    /// All tokens in sentence order, including those outside the root's subtree.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| Token::new(self, TokenId(i as u32)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: TokenId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Incremental construction of a [`DependencyTree`].
///
/// Tokens without an explicit dependency become roots labelled `ROOT`.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    id: SentenceId,
    text: Option<String>,
    tokens: Vec<TokenData>,
    heads: Vec<TokenId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: SentenceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a word to the sentence, returning its position.
    pub fn add_token(&mut self, text: &str, lemma: &str, pos: &str) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(TokenData {
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            dep: labels::ROOT.to_string(),
        });
        self.heads.push(id);
        id
    }

    /// Attach `child` under `head` with dependency label `dep`.
    /// Passing the child's own id as `head` keeps it a root with the given label.
    pub fn set_dependency(&mut self, child: TokenId, head: TokenId, dep: &str) {
        if let Some(data) = self.tokens.get_mut(child.index()) {
            data.dep = dep.to_string();
            self.heads[child.index()] = head;
        }
    }

    pub fn build(self) -> Result<DependencyTree, TreeError> {
        validate::check_heads(&self.heads)?;

        let mut children: Vec<Vec<TokenId>> = vec![Vec::new(); self.tokens.len()];
        for (position, head) in self.heads.iter().enumerate() {
            if head.index() != position {
                // Positions ascend, so children end up sorted
                children[head.index()].push(TokenId(position as u32));
            }
        }

        let root = self
            .heads
            .iter()
            .enumerate()
            .find(|(position, head)| head.index() == *position)
            .map(|(position, _)| TokenId(position as u32))
            .ok_or(TreeError::Empty)?;

        let nodes = self
            .tokens
            .into_iter()
            .zip(self.heads)
            .zip(children)
            .map(|((data, head), children)| Node { data, syntax: Syntax { head, children } })
            .collect();

        Ok(DependencyTree { id: self.id, text: self.text, nodes, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svo_protocol::TokenRecord;

    /// "The clerk reviews the form and forwards it."
    fn coordinated() -> DependencyTree {
        let mut b =
            DependencyTree::builder().with_text("The clerk reviews the form and forwards it.");
        let the = b.add_token("The", "the", "DET");
        let clerk = b.add_token("clerk", "clerk", "NOUN");
        let reviews = b.add_token("reviews", "review", "VERB");
        let the2 = b.add_token("the", "the", "DET");
        let form = b.add_token("form", "form", "NOUN");
        let and = b.add_token("and", "and", "CCONJ");
        let forwards = b.add_token("forwards", "forward", "VERB");
        let it = b.add_token("it", "it", "PRON");
        let dot = b.add_token(".", ".", "PUNCT");

        b.set_dependency(the, clerk, "det");
        b.set_dependency(clerk, reviews, "nsubj");
        b.set_dependency(the2, form, "det");
        b.set_dependency(form, reviews, "dobj");
        b.set_dependency(and, reviews, "cc");
        b.set_dependency(forwards, reviews, "conj");
        b.set_dependency(it, forwards, "dobj");
        b.set_dependency(dot, reviews, "punct");
        b.build().expect("valid tree")
    }

    #[test]
    fn test_root_and_children() {
        let tree = coordinated();
        let root = tree.root();

        assert_eq!(root.text(), "reviews");
        assert!(root.is_root());
        assert_eq!(root.head(), root);

        let children: Vec<&str> = root.children().map(|c| c.text()).collect();
        assert_eq!(children, vec!["clerk", "form", "and", "forwards", "."]);
    }

    #[test]
    fn test_subtree_is_in_sentence_order() {
        let tree = coordinated();
        let forwards = tree.token(TokenId(6)).unwrap();

        let positions: Vec<usize> = forwards.subtree().iter().map(|t| t.position()).collect();
        assert_eq!(positions, vec![6, 7]);
        assert_eq!(tree.root().subtree().len(), tree.len());
    }

    #[test]
    fn test_token_identity_is_positional() {
        let tree = coordinated();
        let clerk = tree.token(TokenId(1)).unwrap();

        assert_eq!(clerk, tree.root().children().next().unwrap());
        assert_ne!(clerk, tree.root());
        // Same position in an equal but distinct tree is a different token
        let other = coordinated();
        assert_ne!(clerk, other.token(TokenId(1)).unwrap());
        assert!(tree.token(TokenId(42)).is_none());
    }

    #[test]
    fn test_first_self_headed_token_is_root() {
        let mut b = TreeBuilder::new();
        let a = b.add_token("Yes", "yes", "INTJ");
        let go = b.add_token("go", "go", "VERB");
        let now = b.add_token("now", "now", "ADV");
        b.set_dependency(now, go, "advmod");
        let tree = b.build().unwrap();

        assert_eq!(tree.root().id(), a);
        assert_eq!(tree.root().dep(), "ROOT");
        assert!(tree.token(go).unwrap().is_root());
        assert_eq!(tree.tokens().count(), 3);
    }

    #[test]
    fn test_from_record_validates_numbering() {
        let record = SentenceRecord {
            id: SentenceId(1),
            label: None,
            text: None,
            tokens: vec![TokenRecord {
                id: TokenId(3),
                text: "Go".into(),
                lemma: "go".into(),
                pos: "VERB".into(),
                dep: "ROOT".into(),
                head: None,
            }],
            participants: vec![],
        };

        assert_eq!(
            DependencyTree::from_record(&record),
            Err(TreeError::Misnumbered { expected: TokenId(0), found: TokenId(3) })
        );
    }

    #[test]
    fn test_empty_sentence_is_rejected() {
        assert_eq!(TreeBuilder::new().build(), Err(TreeError::Empty));
    }
}
