// crates/ecoglobe-core/src/loader/dsv.rs

//! Delimiter-separated text: delimiter sniffing and a quoting-aware parser.

use std::collections::HashMap;

/// Field delimiter of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }

    /// Picks the delimiter from the header line only.
    ///
    /// Semicolon when line 1 has a `;` and no `,`; comma otherwise,
    /// including for an empty text or a single-column header.
    pub fn detect(text: &str) -> Self {
        let first = strip_bom(text).split('\n').next().unwrap_or("");
        let first = first.strip_suffix('\r').unwrap_or(first);
        if first.contains(';') && !first.contains(',') {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }
}

/// One data row, keyed by header name.
#[derive(Debug, Clone)]
pub struct Row<'h> {
    columns: &'h HashMap<String, usize>,
    cells: Vec<String>,
}

impl Row<'_> {
    /// Cell under `column`. `None` when the header has no such column or
    /// the row is shorter than the header.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = *self.columns.get(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    /// Whether the header declares `column`, regardless of the cell value.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// First of `columns` the header declares, with its (possibly missing) cell.
    pub fn first_present<'c>(&self, columns: &[&'c str]) -> Option<(&'c str, Option<&str>)> {
        columns
            .iter()
            .find(|c| self.has_column(c))
            .map(|c| (*c, self.get(c)))
    }
}

/// Parses `text` into records, guessing the delimiter from line 1, and
/// applies `mapper` to every data row in file order.
///
/// An empty text or a header without data rows yields an empty vector.
pub fn parse_table<T, F>(text: &str, mapper: F) -> Vec<T>
where
    F: FnMut(&Row<'_>) -> T,
{
    parse_table_with(text, Delimiter::detect(text), mapper)
}

/// [`parse_table`] with a delimiter the caller already picked.
pub fn parse_table_with<T, F>(text: &str, delim: Delimiter, mut mapper: F) -> Vec<T>
where
    F: FnMut(&Row<'_>) -> T,
{
    let mut records = parse_records(strip_bom(text), delim).into_iter();

    let Some(header) = records.next() else {
        return Vec::new();
    };
    let mut columns = HashMap::with_capacity(header.len());
    for (i, name) in header.into_iter().enumerate() {
        // Duplicate header names: the first column wins.
        columns.entry(name).or_insert(i);
    }

    records
        .map(|cells| {
            let row = Row {
                columns: &columns,
                cells,
            };
            mapper(&row)
        })
        .collect()
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Splits `text` into records of fields.
///
/// Supports `"quoted"` fields with `""` escapes and embedded delimiters or
/// newlines, `\n`, `\r\n` and bare `\r` line ends. Blank lines are skipped.
pub fn parse_records(text: &str, delim: Delimiter) -> Vec<Vec<String>> {
    let delim = delim.as_char();
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    // A quoted field makes an otherwise empty line a real record.
    let mut saw_quote = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if field.is_empty() => {
                saw_quote = true;
                while let Some(q) = chars.next() {
                    if q == '"' {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            break;
                        }
                    } else {
                        field.push(q);
                    }
                }
            }
            c if c == delim => record.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_record(&mut records, &mut record, &mut field, &mut saw_quote);
            }
            c => field.push(c),
        }
    }
    end_record(&mut records, &mut record, &mut field, &mut saw_quote);
    records
}

fn end_record(
    records: &mut Vec<Vec<String>>,
    record: &mut Vec<String>,
    field: &mut String,
    saw_quote: &mut bool,
) {
    let blank = record.is_empty() && field.is_empty() && !*saw_quote;
    if blank {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
    *saw_quote = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_semicolon_only_without_commas() {
        assert_eq!(Delimiter::detect("a;b;c\n1;2;3"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("a,b,c\n1,2,3"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("a;b,c\n"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("name\nx;y"), Delimiter::Comma);
        assert_eq!(Delimiter::detect(""), Delimiter::Comma);
    }

    #[test]
    fn detection_only_looks_at_line_one() {
        assert_eq!(Delimiter::detect("a,b\n1;2;3;4"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("a;b\r\n1,5;2,5"), Delimiter::Semicolon);
    }

    #[test]
    fn parses_semicolon_table_with_decimal_commas() {
        let rows = parse_table("iso;val\r\nESP;1,5\r\nFRA;2,25\r\n", |r| {
            (r.get("iso").unwrap().to_string(), r.get("val").unwrap().to_string())
        });
        assert_eq!(
            rows,
            vec![("ESP".into(), "1,5".into()), ("FRA".into(), "2,25".into())]
        );
    }

    #[test]
    fn explicit_delimiter_overrides_detection() {
        // Line 1 has no `;`, so detection would pick the comma.
        let text = "name\nSpain;ESP\n";
        let rows = parse_table_with(text, Delimiter::Semicolon, |r| r.get("name").map(str::to_owned));
        assert_eq!(rows, vec![Some("Spain".to_string())]);
        let rows = parse_table(text, |r| r.get("name").map(str::to_owned));
        assert_eq!(rows, vec![Some("Spain;ESP".to_string())]);
    }

    #[test]
    fn empty_and_header_only_inputs_yield_nothing() {
        assert!(parse_table("", |_| ()).is_empty());
        assert!(parse_table("name,isoA3", |_| ()).is_empty());
        assert!(parse_table("name,isoA3\n", |_| ()).is_empty());
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_escapes() {
        let text = "name,isoA3\n\"Korea, Republic of\",KOR\n\"The \"\"Gambia\"\"\",GMB\n";
        let names = parse_table(text, |r| r.get("name").unwrap().to_string());
        assert_eq!(names, vec!["Korea, Republic of", "The \"Gambia\""]);
    }

    #[test]
    fn short_rows_and_unknown_columns_read_as_missing() {
        let rows = parse_table("a,b,c\n1,2\n", |r| {
            (r.get("c").is_none(), r.get("zzz").is_none(), r.get("a").map(str::to_owned))
        });
        assert_eq!(rows, vec![(true, true, Some("1".to_string()))]);
    }

    #[test]
    fn blank_lines_and_bom_are_ignored() {
        let text = "\u{feff}a;b\n\n1;2\n\n";
        assert_eq!(Delimiter::detect(text), Delimiter::Semicolon);
        let rows = parse_table(text, |r| r.get("a").map(str::to_owned));
        assert_eq!(rows, vec![Some("1".to_string())]);
    }

    #[test]
    fn first_present_respects_header_not_cell_content() {
        let out = parse_table("iso3A,code\n,ESP\n", |r| {
            r.first_present(&["isoA3", "iso3A", "code"]).map(|(c, v)| (c, v.map(str::to_owned)))
        });
        assert_eq!(out, vec![Some(("iso3A", Some(String::new())))]);
    }
}
