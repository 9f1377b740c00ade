use std::io;

use super::{LoadOptions, MappingEntry, TableError, TableHeader};

const BOM: char = '\u{FEFF}';

pub(super) struct ParsedLines {
    pub entries: Vec<MappingEntry>,
    pub header: Option<TableHeader>,
    pub line_count: usize,
}

/// Split lines into entries. Stops at the first structural error, so no
/// caller ever sees a partially read table.
pub(super) fn parse_lines<I>(lines: I, options: &LoadOptions) -> Result<ParsedLines, TableError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut entries = Vec::new();
    let mut header = None;
    let mut line_count = 0;

    for (i, line) in lines.enumerate() {
        let line_no = i + 1;
        line_count = line_no;
        let mut line = line?;
        if line_no == 1 && options.strip_bom && line.starts_with(BOM) {
            line.drain(..BOM.len_utf8());
        }

        let (source, target) = split_record(&line, line_no)?;
        if line_no == 1 && options.header {
            header = Some(TableHeader {
                source_tag: source.trim().to_string(),
                target_tag: target.trim().to_string(),
            });
            continue;
        }
        entries.push(MappingEntry {
            source: source.to_string(),
            target: target.to_string(),
            line: line_no,
        });
    }

    if options.header && header.is_none() {
        return Err(TableError::MissingHeader);
    }
    Ok(ParsedLines {
        entries,
        header,
        line_count,
    })
}

fn split_record(line: &str, line_no: usize) -> Result<(&str, &str), TableError> {
    let fields = line.split('\t').count();
    match line.split_once('\t') {
        Some((source, target)) if fields == 2 => Ok((source, target)),
        _ => Err(TableError::Malformed {
            line: line_no,
            fields,
        }),
    }
}
