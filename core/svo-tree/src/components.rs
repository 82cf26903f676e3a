use svo_protocol::TokenId;

/// Everything the tree knows about one token (Source of Truth)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub dep: String,
}

/// The token's place in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// Parent node; equal to the token's own id for roots.
    pub head: TokenId,
    /// Sorted by position.
    pub children: Vec<TokenId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub data: TokenData,
    pub syntax: Syntax,
}
