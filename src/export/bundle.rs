use std::{
    fs::{self, File},
    io::{Cursor, Seek, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{info, warn};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use super::{aggregator::Bundle, normalizer, table::Table};
use crate::error::Result;

/// `{SYMBOL}_{days}d_{YYYYMMDD_HHMMSS}.zip`, symbol reduced to
/// alphanumerics, `-` and `_`.
pub fn archive_name(symbol: &str, days: u32, generated_at: DateTime<Utc>) -> String {
    let mut clean: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if clean.is_empty() {
        clean.push_str("POOL");
    }

    format!(
        "{}_{}d_{}.zip",
        clean,
        days,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

#[derive(Debug, Clone)]
struct RenderedTable {
    file_name: String,
    rows: usize,
    text: String,
}

impl From<&Table> for RenderedTable {
    fn from(table: &Table) -> Self {
        Self {
            file_name: table.file_name(),
            rows: table.len(),
            text: table.render(),
        }
    }
}

/// The six normalized tables of one export, fully rendered and ready to be
/// written into a zip archive.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    file_name: String,
    tables: Vec<RenderedTable>,
}

impl ExportArchive {
    pub fn build(bundle: &Bundle, generated_at: DateTime<Utc>) -> Self {
        let pool = &bundle.resolved.pool;

        let tables = [
            normalizer::swaps_table(&bundle.swaps, pool),
            normalizer::liquidity_table(&bundle.mints, &bundle.burns),
            normalizer::pool_states_table(&bundle.pool_states),
            normalizer::positions_table(&bundle.positions),
            normalizer::collects_table(&bundle.collects),
            normalizer::ticks_table(&bundle.ticks),
        ];

        Self {
            file_name: archive_name(&bundle.resolved.token().symbol, bundle.window_days, generated_at),
            tables: tables.iter().map(RenderedTable::from).collect(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Table file names with their row counts, in archive order.
    pub fn entries(&self) -> Vec<(&str, usize)> {
        self.tables
            .iter()
            .map(|t| (t.file_name.as_str(), t.rows))
            .collect()
    }

    /// Stream every table into a deflated zip archive over `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(writer);

        for table in &self.tables {
            zip.start_file(table.file_name.as_str(), options)?;
            zip.write_all(table.text.as_bytes())?;
        }

        Ok(zip.finish()?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Write the archive into `dir` under its generated name and return the
    /// full path. A partially written file is removed on failure.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(&self.file_name);
        let file = File::create(&path)?;

        if let Err(e) = self.write_to(file) {
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!("Failed to remove partial archive {}: {}", path.display(), cleanup);
            }
            return Err(e);
        }

        info!(
            "Wrote {} ({})",
            path.display(),
            self.entries()
                .iter()
                .map(|(name, rows)| format!("{}={}", name, rows))
                .collect::<Vec<_>>()
                .join(" ")
        );

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;

    use crate::{export::resolver::ResolvedPool, subgraph::testing};

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    fn empty_bundle() -> Bundle {
        Bundle {
            resolved: ResolvedPool {
                pool: serde_json::from_value(testing::pool("0xpool", "0xaaa", "0xbbb")).unwrap(),
                requested_token: "0xbbb".to_string(),
            },
            window_days: 7,
            min_timestamp: 0,
            swaps: vec![],
            mints: vec![],
            burns: vec![],
            pool_states: vec![],
            collects: vec![],
            positions: vec![],
            ticks: vec![],
        }
    }

    fn read_entries(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut text = String::new();
                file.read_to_string(&mut text).unwrap();
                (file.name().to_string(), text)
            })
            .collect()
    }

    #[test]
    fn test_archive_name_format() {
        assert_eq!(archive_name("UNI", 7, generated_at()), "UNI_7d_20240309_070501.zip");
        assert_eq!(
            archive_name("USDC.e/old", 30, generated_at()),
            "USDCeold_30d_20240309_070501.zip"
        );
        assert_eq!(archive_name("../", 1, generated_at()), "POOL_1d_20240309_070501.zip");
    }

    #[test]
    fn test_archive_is_named_after_requested_token() {
        let archive = ExportArchive::build(&empty_bundle(), generated_at());
        assert_eq!(archive.file_name(), "BBB_7d_20240309_070501.zip");
    }

    #[test]
    fn test_archive_holds_six_tables_in_order() {
        let archive = ExportArchive::build(&empty_bundle(), generated_at());
        let entries = read_entries(archive.to_bytes().unwrap());

        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "swaps.csv",
                "liquidity_actions.csv",
                "pool_states.csv",
                "positions.csv",
                "collects.csv",
                "ticks.csv",
            ]
        );

        for (name, text) in &entries {
            assert_eq!(text.lines().count(), 1, "{} should be header only", name);
            assert!(text.ends_with('\n'));
        }
        assert!(entries[0].1.starts_with("\"id\",\"block_number\",\"timestamp\""));
    }

    #[test]
    fn test_write_to_dir_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");

        let archive = ExportArchive::build(&empty_bundle(), generated_at());
        let path = archive.write_to_dir(&target).unwrap();

        assert_eq!(path, target.join("BBB_7d_20240309_070501.zip"));
        let entries = read_entries(fs::read(&path).unwrap());
        assert_eq!(entries.len(), 6);
    }
}
