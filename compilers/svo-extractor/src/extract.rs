use svo_protocol::taxonomy::{self, POS_VERB};
use svo_tree::{DependencyTree, Token};
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::construct::SvoConstruct;
use crate::participant::Participant;
use crate::search::{find_in_children, find_in_descendants};

/// Finds subject-verb-object constructs in parsed sentences.
#[derive(Debug, Clone, Default)]
pub struct SvoExtractor {
    config: ExtractorConfig,
}

impl SvoExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the constructs of one sentence and binds them to `participants`.
    ///
    /// Constructs come out in discovery order: active subjects, then passive
    /// subjects, then coordinated verbs, each pass in sentence order. A
    /// construct whose verb and object both repeat an earlier one is dropped.
    /// When several participants share a subject token the last one wins.
    pub fn extract<P>(
        &self,
        sentence: &DependencyTree,
        participants: &[P],
    ) -> Vec<SvoConstruct<P>>
    where
        P: Participant + Clone,
    {
        let mut constructs = Vec::new();
        let subtree = sentence.root().subtree();

        // Active subjects
        let active = subtree.iter().filter(|t| taxonomy::ACTIVE_SUBJECT.contains(&t.dep()));
        for subject in active {
            let verb = subject.head();
            let object =
                self.find_object(verb, taxonomy::OBJECT_CHILDREN, taxonomy::OBJECT_DESCENDANTS);
            accept(&mut constructs, Some(*subject), Some(verb), object);
        }

        // Passive subjects are recorded without an object
        let passive = subtree.iter().filter(|t| taxonomy::PASSIVE_SUBJECT.contains(&t.dep()));
        for subject in passive {
            accept(&mut constructs, Some(*subject), Some(subject.head()), None);
        }

        // Coordinated verbs inherit their subject from the coordinating head
        for verb in sentence
            .tokens()
            .filter(|t| t.dep() == taxonomy::labels::CONJ && t.pos() == POS_VERB)
        {
            let object = self.find_object(
                verb,
                taxonomy::CONJUNCT_OBJECT_CHILDREN,
                taxonomy::CONJUNCT_OBJECT_DESCENDANTS,
            );
            let subject = find_in_children(verb.head(), taxonomy::CONJUNCT_SUBJECT);
            accept(&mut constructs, subject, Some(verb), object);
        }

        assign_participants(&mut constructs, participants);
        constructs
    }

    fn find_object<'t>(
        &self,
        verb: Token<'t>,
        children: &[&str],
        descendants: &[&str],
    ) -> Option<Token<'t>> {
        find_in_children(verb, children).or_else(|| {
            find_in_descendants(
                verb,
                descendants,
                |label| self.config.is_skippable(label),
                self.config.max_search_depth,
            )
        })
    }
}

/// Appends a construct unless it lacks a subject or verb, or repeats the verb
/// and object of one already accepted.
fn accept<P>(
    constructs: &mut Vec<SvoConstruct<P>>,
    subject: Option<Token<'_>>,
    verb: Option<Token<'_>>,
    object: Option<Token<'_>>,
) {
    let candidate = SvoConstruct::new(
        subject.map(|s| s.id()),
        verb.map(|v| v.id()),
        object.map(|o| o.id()),
        verb.map_or(0, |v| v.position()),
    );

    if !candidate.is_complete() {
        debug!(?subject, ?verb, "skipping construct without subject or verb");
        return;
    }

    if constructs.iter().any(|existing| existing.conflicts_with(&candidate)) {
        debug!(?subject, ?verb, ?object, "discarding duplicate construct");
        return;
    }

    debug!(?subject, ?verb, ?object, "accepted construct");
    constructs.push(candidate);
}

fn assign_participants<P>(constructs: &mut [SvoConstruct<P>], participants: &[P])
where
    P: Participant + Clone,
{
    for construct in constructs.iter_mut() {
        for participant in participants {
            if construct.subject() == Some(participant.anchor_token()) {
                debug!(subject = ?construct.subject(), "bound participant");
                construct.set_participant(participant.clone());
            }
        }
    }
}

/// Extracts with the default configuration.
pub fn extract_svo_constructs<P>(
    sentence: &DependencyTree,
    participants: &[P],
) -> Vec<SvoConstruct<P>>
where
    P: Participant + Clone,
{
    SvoExtractor::default().extract(sentence, participants)
}
