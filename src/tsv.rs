//! Tab-separated snapshot table parsing
//!
//! All reference tables arrive as TSV snapshots: first line is the header,
//! every following non-blank line is one record. Parsing is deliberately
//! permissive (short rows still yield records with empty-string fields),
//! but every irregularity is reported on a distinct warning channel so the
//! lenient behavior stays visible and testable.

use crate::error::DepbriefError;
use std::collections::HashMap;
use std::path::Path;

/// A non-fatal irregularity found while parsing a snapshot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWarning {
    /// Table the row came from
    pub table: String,
    /// 1-based line number in the source text
    pub line: usize,
    /// What was wrong with the row
    pub message: String,
}

/// A parsed snapshot table: header-indexed string cells.
#[derive(Debug, Clone)]
pub struct SnapshotTable {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
    warnings: Vec<TableWarning>,
}

impl SnapshotTable {
    /// Parse a snapshot table from raw text.
    ///
    /// Fails only when the text has no header line; everything below the
    /// header degrades to warnings.
    pub fn parse(name: &str, text: &str) -> Result<Self, DepbriefError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end()))
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| DepbriefError::load(name, "snapshot is empty (no header line)"))?;

        let columns: Vec<String> = header.split('\t').map(|c| c.trim().to_string()).collect();
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.to_uppercase(), i))
            .collect();

        let mut rows = Vec::new();
        let mut warnings = Vec::new();

        for (line, raw) in lines {
            let cells: Vec<String> = raw.split('\t').map(|c| c.trim().to_string()).collect();
            if cells.len() < columns.len() {
                warnings.push(TableWarning {
                    table: name.to_string(),
                    line,
                    message: format!(
                        "row has {} of {} columns; missing fields read as empty",
                        cells.len(),
                        columns.len()
                    ),
                });
            }
            // Extra cells beyond the declared header are carried but never read.
            rows.push(cells);
        }

        Ok(Self {
            name: name.to_string(),
            columns,
            column_index,
            rows,
            warnings,
        })
    }

    /// Parse a snapshot table from a file on disk.
    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, DepbriefError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DepbriefError::load(name, e.to_string()))?;
        Self::parse(name, &text)
    }

    /// Table name as given at parse time
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared header columns, in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate over all parsed records
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record { table: self, cells })
    }

    /// Warnings accumulated during parsing
    #[must_use]
    pub fn warnings(&self) -> &[TableWarning] {
        &self.warnings
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One record of a snapshot table, with header-keyed field access.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a SnapshotTable,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Field value by column name (case-insensitive). Unknown columns and
    /// missing cells both read as the empty string.
    #[must_use]
    pub fn field(&self, column: &str) -> &'a str {
        self.table
            .column_index
            .get(&column.to_uppercase())
            .and_then(|&i| self.cells.get(i))
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "IDENT\tNAME\tFREQ\nLGA\tLa Guardia\t113100\n\nBDR\tBridgeport\t108800\n";

    #[test]
    fn test_parse_basic_table() {
        let table = SnapshotTable::parse("navaids", SAMPLE).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.warnings().is_empty());

        let first = table.records().next().unwrap();
        assert_eq!(first.field("IDENT"), "LGA");
        assert_eq!(first.field("name"), "La Guardia");
    }

    #[test]
    fn test_blank_lines_dropped() {
        let table = SnapshotTable::parse("navaids", SAMPLE).unwrap();
        let idents: Vec<&str> = table.records().map(|r| r.field("IDENT")).collect();
        assert_eq!(idents, vec!["LGA", "BDR"]);
    }

    #[test]
    fn test_short_row_warns_but_parses() {
        let text = "A\tB\tC\nx\ty\n";
        let table = SnapshotTable::parse("gates", text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.warnings().len(), 1);
        assert_eq!(table.warnings()[0].line, 2);

        let rec = table.records().next().unwrap();
        assert_eq!(rec.field("A"), "x");
        assert_eq!(rec.field("C"), "");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let text = "A\tB\nx\ty\tz\textra\n";
        let table = SnapshotTable::parse("rules", text).unwrap();
        let rec = table.records().next().unwrap();
        assert_eq!(rec.field("A"), "x");
        assert_eq!(rec.field("B"), "y");
        assert!(table.warnings().is_empty());
    }

    #[test]
    fn test_unknown_column_reads_empty() {
        let table = SnapshotTable::parse("navaids", SAMPLE).unwrap();
        let rec = table.records().next().unwrap();
        assert_eq!(rec.field("NOPE"), "");
    }

    #[test]
    fn test_empty_snapshot_is_load_error() {
        let err = SnapshotTable::parse("routes", "\n\n").unwrap_err();
        assert!(matches!(err, DepbriefError::Load { .. }));
    }

    #[test]
    fn test_cells_are_trimmed() {
        let text = "A\tB\n  x  \t y\t\n";
        let table = SnapshotTable::parse("cfg", text).unwrap();
        let rec = table.records().next().unwrap();
        assert_eq!(rec.field("A"), "x");
        assert_eq!(rec.field("B"), "y");
    }
}
