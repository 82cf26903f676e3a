use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use svo_protocol::TokenId;

use crate::TreeError;

/// Checks the head assignment of `heads` (indexed by position) forms a forest.
/// Roots are tokens whose head is themselves.
pub fn check_heads(heads: &[TokenId]) -> Result<(), TreeError> {
    if heads.is_empty() {
        return Err(TreeError::Empty);
    }

    let mut graph = DiGraph::<(), ()>::with_capacity(heads.len(), heads.len());
    let nodes: Vec<NodeIndex> = heads.iter().map(|_| graph.add_node(())).collect();

    for (position, head) in heads.iter().enumerate() {
        let head_index = head.index();
        if head_index >= heads.len() {
            return Err(TreeError::HeadOutOfRange {
                token: TokenId(position as u32),
                head: *head,
            });
        }
        if head_index != position {
            graph.add_edge(nodes[head_index], nodes[position], ());
        }
    }

    toposort(&graph, None).map_err(|cycle| TreeError::Cycle {
        token: TokenId(cycle.node_id().index() as u32),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads(raw: &[u32]) -> Vec<TokenId> {
        raw.iter().copied().map(TokenId).collect()
    }

    #[test]
    fn test_accepts_forest() {
        assert!(check_heads(&heads(&[1, 1, 1])).is_ok());
        // Two fragments, each rooted at itself
        assert!(check_heads(&heads(&[0, 0, 2, 2])).is_ok());
    }

    #[test]
    fn test_rejects_cycle() {
        let err = check_heads(&heads(&[1, 2, 0])).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn test_rejects_dangling_head() {
        let err = check_heads(&heads(&[0, 9])).unwrap_err();
        assert_eq!(err, TreeError::HeadOutOfRange { token: TokenId(1), head: TokenId(9) });
    }
}
