use svo_tree::Token;

/// First direct child of `anchor` carrying one of `targets`.
pub fn find_in_children<'t>(anchor: Token<'t>, targets: &[&str]) -> Option<Token<'t>> {
    anchor.children().find(|child| targets.contains(&child.dep()))
}

/// Depth-first search below `anchor`, descending only through children whose
/// label satisfies `skippable`.
///
/// `anchor` itself is returned if it carries a target label. Otherwise each
/// child is checked in sentence order: a target child wins immediately, a
/// skippable child is searched recursively. At most `max_depth` skippable
/// levels are descended; deeper branches are abandoned.
pub fn find_in_descendants<'t, F>(
    anchor: Token<'t>,
    targets: &[&str],
    skippable: F,
    max_depth: usize,
) -> Option<Token<'t>>
where
    F: Fn(&str) -> bool,
{
    descend(anchor, targets, &skippable, max_depth)
}

fn descend<'t, F>(
    token: Token<'t>,
    targets: &[&str],
    skippable: &F,
    depth_left: usize,
) -> Option<Token<'t>>
where
    F: Fn(&str) -> bool,
{
    if targets.contains(&token.dep()) {
        return Some(token);
    }

    for child in token.children() {
        if targets.contains(&child.dep()) {
            return Some(child);
        }
        if skippable(child.dep()) {
            if depth_left == 0 {
                tracing::warn!(token = ?child, "object search depth exhausted");
                continue;
            }
            tracing::trace!(through = ?child, "descending");
            if let Some(found) = descend(child, targets, skippable, depth_left - 1) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use svo_protocol::TokenId;
    use svo_tree::{DependencyTree, TreeBuilder};

    /// "The request was sent to the manager"
    fn prepositional() -> DependencyTree {
        let mut b = TreeBuilder::new();
        let the = b.add_token("The", "the", "DET");
        let request = b.add_token("request", "request", "NOUN");
        let was = b.add_token("was", "be", "AUX");
        let sent = b.add_token("sent", "send", "VERB");
        let to = b.add_token("to", "to", "ADP");
        let the2 = b.add_token("the", "the", "DET");
        let manager = b.add_token("manager", "manager", "NOUN");

        b.set_dependency(the, request, "det");
        b.set_dependency(request, sent, "nsubjpass");
        b.set_dependency(was, sent, "auxpass");
        b.set_dependency(to, sent, "prep");
        b.set_dependency(the2, manager, "det");
        b.set_dependency(manager, to, "pobj");
        b.build().unwrap()
    }

    #[test]
    fn test_children_only_looks_one_level_down() {
        let tree = prepositional();
        assert_eq!(find_in_children(tree.root(), &["pobj"]), None);
        assert_eq!(find_in_children(tree.root(), &["prep"]).map(|t| t.text()), Some("to"));
    }

    #[test]
    fn test_descends_through_skippable_labels() {
        let tree = prepositional();
        let found = find_in_descendants(tree.root(), &["pobj"], |l| l == "prep", 8);
        assert_eq!(found.map(|t| t.id()), Some(TokenId(6)));
    }

    #[test]
    fn test_stops_at_non_skippable_labels() {
        let tree = prepositional();
        assert_eq!(find_in_descendants(tree.root(), &["pobj"], |_| false, 8), None);
    }

    #[test]
    fn test_anchor_matching_target_is_returned() {
        let tree = prepositional();
        let to = tree.token(TokenId(4)).unwrap();
        assert_eq!(find_in_descendants(to, &["prep"], |_| true, 8), Some(to));
    }

    #[test]
    fn test_depth_cap_abandons_branch() {
        let tree = prepositional();
        assert_eq!(find_in_descendants(tree.root(), &["pobj"], |l| l == "prep", 0), None);
        // One level is enough to look at the preposition's children
        assert!(find_in_descendants(tree.root(), &["pobj"], |l| l == "prep", 1).is_some());
    }
}
