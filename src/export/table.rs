//! Fixed-schema delimited tables.
//!
//! Quoting is decided by cell type, not by content: text cells (ids,
//! addresses, hashes, symbols) are always quoted, numeric cells never are.
//! Header names are text and quoted like any other text cell.

use std::fmt::Write as _;

/// One field of an output row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    UInt(u64),
    /// A decimal literal kept verbatim from upstream.
    Decimal(String),
    Text(String),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn decimal(value: impl Into<String>) -> Self {
        Cell::Decimal(value.into())
    }

    pub fn opt_decimal(value: Option<&str>) -> Self {
        match value {
            Some(v) => Cell::Decimal(v.to_string()),
            None => Cell::Empty,
        }
    }

    pub fn opt_float(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Cell::Decimal(v.to_string()),
            _ => Cell::Empty,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Cell::Int(v) => {
                let _ = write!(out, "{}", v);
            },
            Cell::UInt(v) => {
                let _ = write!(out, "{}", v);
            },
            // Anything upstream sends that is not a plain number is quoted
            // so it can never break the row structure.
            Cell::Decimal(v) if is_numeric_literal(v) => out.push_str(v),
            Cell::Decimal(v) if v.is_empty() => {},
            Cell::Decimal(v) | Cell::Text(v) => write_quoted(out, v),
            Cell::Empty => {},
        }
    }
}

/// A named table with a fixed column list.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(name: &'static str, columns: &'static [&'static str], rows: usize) -> Self {
        Self {
            name,
            columns,
            rows: Vec::with_capacity(rows),
        }
    }

    /// Append a row. Row width must match the column list.
    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(
            row.len(),
            self.columns.len(),
            "row width does not match {} columns",
            self.name
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File name of the table inside an archive.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    /// Render header plus rows, one record per `\n`-terminated line.
    /// An empty table still renders its header.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 * (self.rows.len() + 1));

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_quoted(&mut out, column);
        }
        out.push('\n');

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                cell.write_to(&mut out);
            }
            out.push('\n');
        }

        out
    }
}

fn write_quoted(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

/// `-?digits(.digits)?([eE][+-]?digits)?`
fn is_numeric_literal(value: &str) -> bool {
    let body = value.strip_prefix('-').unwrap_or(value);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let mantissa_ok = match frac_part {
        Some(f) => (int_part.is_empty() || digits(int_part)) && digits(f),
        None => digits(int_part),
    };

    let exponent_ok = match exponent {
        Some(e) => digits(e.strip_prefix(['+', '-']).unwrap_or(e)),
        None => true,
    };

    mantissa_ok && exponent_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["id", "amount", "tick", "note"];

    #[test]
    fn test_empty_table_renders_header_only() {
        let table = Table::new("sample", COLUMNS);
        assert_eq!(table.render(), "\"id\",\"amount\",\"tick\",\"note\"\n");
        assert_eq!(table.file_name(), "sample.csv");
    }

    #[test]
    fn test_quoting_follows_cell_type() {
        let mut table = Table::new("sample", COLUMNS);
        table.push(vec![
            Cell::text("123"),
            Cell::decimal("-0.5"),
            Cell::Int(-887220),
            Cell::text("say \"hi\", ok"),
        ]);
        table.push(vec![
            Cell::text("0xabc#1"),
            Cell::opt_decimal(None),
            Cell::UInt(7),
            Cell::Empty,
        ]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"123\",-0.5,-887220,\"say \"\"hi\"\", ok\"");
        assert_eq!(lines[2], "\"0xabc#1\",,7,");
    }

    #[test]
    fn test_non_numeric_decimal_is_quoted() {
        let mut table = Table::new("sample", &["value"]);
        table.push(vec![Cell::decimal("1,000")]);
        table.push(vec![Cell::decimal("1e-7")]);
        table.push(vec![Cell::opt_float(Some(f64::NAN))]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "\"1,000\"");
        assert_eq!(lines[2], "1e-7");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_numeric_literal_recognition() {
        for ok in ["0", "-12", "3.14", ".5", "1E+10", "2.5e-3"] {
            assert!(is_numeric_literal(ok), "{} should be numeric", ok);
        }
        for bad in ["", "-", "1.", "abc", "0x10", "1e", "1.2.3", "NaN"] {
            assert!(!is_numeric_literal(bad), "{} should not be numeric", bad);
        }
    }
}
