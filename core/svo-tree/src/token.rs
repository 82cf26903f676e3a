use std::fmt;

use svo_protocol::TokenId;

use crate::DependencyTree;

/// A handle to one token of a [`DependencyTree`].
///
/// Handles are `Copy` and compare equal iff they refer to the same position of
/// the same tree.
#[derive(Clone, Copy)]
pub struct Token<'t> {
    tree: &'t DependencyTree,
    id: TokenId,
}

impl<'t> Token<'t> {
    pub(crate) fn new(tree: &'t DependencyTree, id: TokenId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn position(&self) -> usize {
        self.id.index()
    }

    pub fn text(&self) -> &'t str {
        &self.tree.node(self.id).data.text
    }

    pub fn lemma(&self) -> &'t str {
        &self.tree.node(self.id).data.lemma
    }

    /// Coarse part-of-speech tag.
    pub fn pos(&self) -> &'t str {
        &self.tree.node(self.id).data.pos
    }

    /// Dependency label.
    pub fn dep(&self) -> &'t str {
        &self.tree.node(self.id).data.dep
    }

    /// The token this one depends on. Roots are their own head.
    pub fn head(&self) -> Token<'t> {
        Token::new(self.tree, self.tree.node(self.id).syntax.head)
    }

    pub fn is_root(&self) -> bool {
        self.tree.node(self.id).syntax.head == self.id
    }

    /// Direct dependents in sentence order.
    pub fn children(&self) -> impl Iterator<Item = Token<'t>> + 't {
        let tree = self.tree;
        tree.node(self.id)
            .syntax
            .children
            .iter()
            .map(move |child| Token::new(tree, *child))
    }

    /// This token and all of its descendants, in sentence order.
    pub fn subtree(&self) -> Vec<Token<'t>> {
        let mut stack = vec![self.id];
        let mut found = Vec::new();

        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend(self.tree.node(current).syntax.children.iter().copied());
        }

        found.sort_unstable();
        found.into_iter().map(|id| Token::new(self.tree, id)).collect()
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Token<'_> {}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}({})", self.text(), self.id, self.dep())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
