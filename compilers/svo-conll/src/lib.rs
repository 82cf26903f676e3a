//! Reader for CoNLL-style dependency parses.
//!
//! Sentences are separated by blank lines. Comment lines start with `#`; the
//! reader understands `# sent_id = <n>`, `# text = <sentence>` and
//! `# participant = <word-number> <name>`.

pub mod parser;

use parser::{parse_row, RowError, RowId};
use svo_protocol::taxonomy::normalize_label;
use svo_protocol::{
    ParticipantId, ParticipantRecord, SentenceId, SentenceRecord, TokenId, TokenRecord,
};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConllError {
    #[error(
        "line {line}: expected at least {} tab-separated columns, found {found}",
        parser::MIN_COLUMNS
    )]
    Columns { line: usize, found: usize },
    #[error("line {line}: malformed {column} field '{value}'")]
    Field { line: usize, column: &'static str, value: String },
    #[error("line {line}: word {found} out of sequence, expected {expected}")]
    Sequence { line: usize, expected: u32, found: u32 },
    #[error("line {line}: word {word} has no head")]
    MissingHead { line: usize, word: u32 },
    #[error("line {line}: participant comment must read '<word-number> <name>'")]
    Participant { line: usize },
}

/// Which dependency label inventory the input uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelScheme {
    /// Clear-style labels (`nsubj`, `nsubjpass`, `dobj`), kept as-is.
    #[default]
    Clear,
    /// Universal Dependencies v2 labels, mapped onto the clear style.
    UniversalV2,
}

#[derive(Debug, Clone, Default)]
pub struct ConllReader {
    scheme: LabelScheme,
}

impl ConllReader {
    pub fn new(scheme: LabelScheme) -> Self {
        Self { scheme }
    }

    pub fn read(&self, input: &str) -> Result<Vec<SentenceRecord>, ConllError> {
        let mut sentences = Vec::new();
        let mut current = Pending::default();

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim_end_matches(['\r', '\n']);

            if line.trim().is_empty() {
                if let Some(sentence) = current.finish() {
                    sentences.push(sentence);
                }
                current = Pending::default();
                continue;
            }

            if let Some(comment) = line.strip_prefix('#') {
                current.comment(comment, line_no)?;
                continue;
            }

            let row = parse_row(line).map_err(|err| match err {
                RowError::Columns(found) => ConllError::Columns { line: line_no, found },
                RowError::Field { column, value } => ConllError::Field {
                    line: line_no,
                    column,
                    value: value.to_string(),
                },
            })?;

            let word = match row.id {
                RowId::Word(word) => word,
                RowId::Range(..) | RowId::Empty(..) => {
                    tracing::trace!(line = line_no, "skipping non-word row");
                    continue;
                }
            };

            let expected = current.tokens.len() as u32 + 1;
            if word != expected {
                return Err(ConllError::Sequence { line: line_no, expected, found: word });
            }
            let head = row.head.ok_or(ConllError::MissingHead { line: line_no, word })?;

            let dep = match self.scheme {
                LabelScheme::Clear => row.deprel,
                LabelScheme::UniversalV2 => normalize_label(row.deprel),
            };
            let pos = if row.upos == "_" { row.xpos } else { row.upos };

            current.tokens.push(TokenRecord {
                id: TokenId(word - 1),
                text: row.form.to_string(),
                lemma: row.lemma.to_string(),
                pos: pos.to_string(),
                dep: dep.to_string(),
                head: head.checked_sub(1).map(TokenId),
            });
        }

        if let Some(sentence) = current.finish() {
            sentences.push(sentence);
        }

        tracing::debug!(sentences = sentences.len(), "read conll document");
        Ok(assign_ids(sentences))
    }
}

/// Reads a document using clear-style labels.
pub fn read_document(input: &str) -> Result<Vec<SentenceRecord>, ConllError> {
    ConllReader::default().read(input)
}

/// Numbers sentences. A numeric `sent_id` keeps its value the first time it
/// is seen; every other sentence takes the lowest number not yet in use.
fn assign_ids(sentences: Vec<Pending>) -> Vec<SentenceRecord> {
    let mut used = BTreeSet::new();
    let claimed: Vec<Option<u32>> = sentences
        .iter()
        .map(|sentence| {
            let number = sentence.label.as_deref()?.parse::<u32>().ok()?;
            if used.insert(number) {
                Some(number)
            } else {
                tracing::warn!(sent_id = number, "duplicate sent_id, renumbering sentence");
                None
            }
        })
        .collect();

    let mut next = 0u32;
    sentences
        .into_iter()
        .zip(claimed)
        .map(|(sentence, claimed)| {
            let id = claimed.unwrap_or_else(|| {
                while used.contains(&next) {
                    next += 1;
                }
                used.insert(next);
                next
            });
            SentenceRecord {
                id: SentenceId(id),
                label: sentence.label,
                text: sentence.text,
                tokens: sentence.tokens,
                participants: sentence.participants,
            }
        })
        .collect()
}

#[derive(Default)]
struct Pending {
    label: Option<String>,
    text: Option<String>,
    tokens: Vec<TokenRecord>,
    participants: Vec<ParticipantRecord>,
}

impl Pending {
    fn comment(&mut self, comment: &str, line: usize) -> Result<(), ConllError> {
        let Some((key, value)) = comment.split_once('=') else {
            return Ok(());
        };
        let value = value.trim();

        match key.trim() {
            "sent_id" => self.label = Some(value.to_string()),
            "text" => self.text = Some(value.to_string()),
            "participant" => {
                let (word, name) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
                let anchor = match word.parse::<u32>() {
                    Ok(word) if word > 0 => TokenId(word - 1),
                    _ => return Err(ConllError::Participant { line }),
                };
                let name = name.trim();
                self.participants.push(ParticipantRecord {
                    id: ParticipantId(self.participants.len() as u32),
                    name: if name.is_empty() { word.to_string() } else { name.to_string() },
                    anchor,
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Option<Self> {
        (!self.tokens.is_empty()).then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "\
# sent_id = 4
# text = The manager approves the request.
# participant = 2 the manager
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tmanager\tmanager\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tapproves\tapprove\tVERB\tVBZ\t_\t0\tROOT\t_\t_
4\tthe\tthe\tDET\tDT\t_\t5\tdet\t_\t_
5\trequest\trequest\tNOUN\tNN\t_\t3\tdobj\t_\t_
6\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_

1\tGo\tgo\tVERB\tVB\t_\t0\tROOT
";

    #[test]
    fn test_reads_sentences_and_comments() {
        let sentences = read_document(SCENARIO).unwrap();
        assert_eq!(sentences.len(), 2);

        let first = &sentences[0];
        assert_eq!(first.id, SentenceId(4));
        assert_eq!(first.label.as_deref(), Some("4"));
        assert_eq!(first.text.as_deref(), Some("The manager approves the request."));
        assert_eq!(first.tokens.len(), 6);
        assert_eq!(first.tokens[1].head, Some(TokenId(2)));
        assert_eq!(first.tokens[2].head, None);
        assert_eq!(first.participants.len(), 1);
        assert_eq!(first.participants[0].anchor, TokenId(1));
        assert_eq!(first.participants[0].name, "the manager");

        // No sent_id: takes the lowest free number
        assert_eq!(sentences[1].id, SentenceId(0));
        assert_eq!(sentences[1].label, None);
    }

    #[test]
    fn test_sentence_ids_stay_unique() {
        let row = "1\tGo\tgo\tVERB\t_\t_\t0\tROOT\n";
        let input = [Some("1"), Some("s-2"), None, Some("0"), Some("1")]
            .iter()
            .map(|id| match id {
                Some(id) => format!("# sent_id = {id}\n{row}"),
                None => row.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        let sentences = read_document(&input).unwrap();

        let ids: Vec<u32> = sentences.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 0, 4]);

        let labels: Vec<Option<&str>> = sentences.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("1"), Some("s-2"), None, Some("0"), Some("1")]);
    }

    #[test]
    fn test_universal_labels_are_normalized() {
        let input = "1\tform\tform\tNOUN\t_\t_\t2\tnsubj:pass\n\
                     2\tsigned\tsign\tVERB\t_\t_\t0\troot\n";
        let sentences = ConllReader::new(LabelScheme::UniversalV2).read(input).unwrap();

        assert_eq!(sentences[0].tokens[0].dep, "nsubjpass");
        assert_eq!(sentences[0].tokens[1].dep, "ROOT");
    }

    #[test]
    fn test_multiword_rows_are_skipped() {
        let input = "1-2\tcannot\t_\t_\t_\t_\t_\t_\t_\t_\n\
                     1\tcan\tcan\tAUX\t_\t_\t3\taux\t_\t_\n\
                     2\tnot\tnot\tPART\t_\t_\t3\tneg\t_\t_\n\
                     3\tgo\tgo\tVERB\t_\t_\t0\tROOT\t_\t_\n";
        let sentences = read_document(input).unwrap();
        assert_eq!(sentences[0].tokens.len(), 3);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let gap = "1\tGo\tgo\tVERB\t_\t_\t0\tROOT\n3\tnow\tnow\tADV\t_\t_\t1\tadvmod\n";
        assert_eq!(
            read_document(gap),
            Err(ConllError::Sequence { line: 2, expected: 2, found: 3 })
        );

        let headless = "1\tGo\tgo\tVERB\t_\t_\t_\tROOT\n";
        assert_eq!(read_document(headless), Err(ConllError::MissingHead { line: 1, word: 1 }));

        let participant = "# participant = manager\n1\tGo\tgo\tVERB\t_\t_\t0\tROOT\n";
        assert_eq!(read_document(participant), Err(ConllError::Participant { line: 1 }));
    }
}
