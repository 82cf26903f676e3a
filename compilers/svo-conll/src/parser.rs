use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, u32 as number},
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

/// Number of leading columns every row must carry (ID .. DEPREL).
pub const MIN_COLUMNS: usize = 8;

const COLUMN_NAMES: [&str; MIN_COLUMNS] =
    ["ID", "FORM", "LEMMA", "UPOS", "XPOS", "FEATS", "HEAD", "DEPREL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowId {
    /// A syntactic word, numbered from 1.
    Word(u32),
    /// Multiword token span such as `3-4`.
    Range(u32, u32),
    /// Enhanced-dependency empty node such as `5.1`.
    Empty(u32, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub id: RowId,
    pub form: &'a str,
    pub lemma: &'a str,
    pub upos: &'a str,
    pub xpos: &'a str,
    /// `Some(0)` marks the root.
    pub head: Option<u32>,
    pub deprel: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError<'a> {
    Columns(usize),
    Field { column: &'static str, value: &'a str },
}

fn row_id(input: &str) -> IResult<&str, RowId> {
    alt((
        map(separated_pair(number, char('-'), number), |(a, b)| RowId::Range(a, b)),
        map(separated_pair(number, char('.'), number), |(a, b)| RowId::Empty(a, b)),
        map(number, RowId::Word),
    ))(input)
}

fn head(input: &str) -> IResult<&str, Option<u32>> {
    alt((map(char('_'), |_| None), map(number, Some)))(input)
}

fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

/// Splits one tab-separated row into its fields.
pub fn parse_row(line: &str) -> Result<Row<'_>, RowError<'_>> {
    let cols = match all_consuming(columns)(line) {
        Ok((_, cols)) => cols,
        Err(_) => return Err(RowError::Columns(line.split('\t').count())),
    };
    if cols.len() < MIN_COLUMNS {
        return Err(RowError::Columns(cols.len()));
    }
    // Columns past DEPREL are ignored, so a trailing tab is harmless
    let empty = COLUMN_NAMES
        .iter()
        .zip(&cols)
        .find_map(|(name, value)| value.is_empty().then_some(*name));
    if let Some(column) = empty {
        return Err(RowError::Field { column, value: "" });
    }

    let (_, id) = all_consuming(row_id)(cols[0])
        .map_err(|_| RowError::Field { column: "ID", value: cols[0] })?;
    let (_, head) = all_consuming(head)(cols[6])
        .map_err(|_| RowError::Field { column: "HEAD", value: cols[6] })?;

    Ok(Row {
        id,
        form: cols[1],
        lemma: cols[2],
        upos: cols[3],
        xpos: cols[4],
        head,
        deprel: cols[7],
    })
}
