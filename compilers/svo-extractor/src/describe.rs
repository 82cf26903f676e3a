//! Descriptor lookup and phrase rendering for extracted constructs.

use svo_protocol::taxonomy::{PARTICIPANT_DESCRIPTORS, SVO_DESCRIPTORS};
use svo_protocol::TokenId;
use svo_tree::{DependencyTree, Token};

use crate::construct::SvoConstruct;

/// Children of the construct's verb that modify it (auxiliaries, negation,
/// prepositions, adjectival complements).
pub fn svo_descriptors<'t, P>(
    sentence: &'t DependencyTree,
    construct: &SvoConstruct<P>,
) -> Vec<Token<'t>> {
    construct
        .verb()
        .and_then(|verb| sentence.token(verb))
        .map(|verb| verb.children().filter(|c| SVO_DESCRIPTORS.contains(&c.dep())).collect())
        .unwrap_or_default()
}

/// Children of a nominal that describe it (determiners, adjectives, compounds).
pub fn participant_descriptors(token: Token<'_>) -> Vec<Token<'_>> {
    token
        .children()
        .filter(|c| PARTICIPANT_DESCRIPTORS.contains(&c.dep()))
        .collect()
}

/// Renders "subject verb object" with each part's descriptors, in sentence order.
///
/// A prepositional descriptor contributes only the preposition itself.
pub fn render_phrase<P>(sentence: &DependencyTree, construct: &SvoConstruct<P>) -> String {
    let mut ids: Vec<TokenId> = Vec::new();
    let nominal = |id: Option<TokenId>, ids: &mut Vec<TokenId>| {
        if let Some(token) = id.and_then(|id| sentence.token(id)) {
            ids.push(token.id());
            ids.extend(participant_descriptors(token).iter().map(|t| t.id()));
        }
    };

    nominal(construct.subject(), &mut ids);
    nominal(construct.object(), &mut ids);
    if let Some(verb) = construct.verb() {
        ids.push(verb);
    }
    ids.extend(svo_descriptors(sentence, construct).iter().map(|t| t.id()));

    ids.sort_unstable();
    ids.dedup();
    ids.iter()
        .filter_map(|id| sentence.token(*id))
        .map(|t| t.text())
        .collect::<Vec<_>>()
        .join(" ")
}
