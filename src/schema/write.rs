use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use super::Table;
use crate::snapshot::RankingSnapshot;

/// Serialise `table` as tab-separated text: header row, then one line per
/// row, empty cells for missing values.
pub fn write_tsv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut w = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    w.write_record(table.columns()).context("writing TSV header")?;
    for row in table.rows() {
        w.write_record(row).context("writing TSV row")?;
    }
    w.flush().context("flushing TSV")?;
    Ok(())
}

/// Write `snapshot` to `<save_dir>/<year>/<year>-<MM>.tsv`
///
/// - creates the year directory when missing
/// - replaces any file already written for the same period
pub fn write_snapshot<P: AsRef<Path>>(snapshot: &RankingSnapshot, save_dir: P) -> Result<PathBuf> {
    let path = save_dir.as_ref().join(snapshot.period.relative_path());
    info!("Save to {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            debug!(dir = %parent.display(), "creating directory");
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {:?}", parent))?;
        }
    }

    let file = fs::File::create(&path).with_context(|| format!("creating {:?}", path))?;
    write_tsv(&snapshot.table, file).with_context(|| format!("writing {:?}", path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ReportingPeriod;
    use csv::ReaderBuilder;
    use tempfile::tempdir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> RankingSnapshot {
        let mut table = Table::new();
        table.stack(
            &strings(&["Programming Language", "Oct 2025", "Ratings"]),
            vec![
                strings(&["Python", "1", "24.45%"]),
                strings(&["C", "2"]),
            ],
        )
        .unwrap();
        RankingSnapshot {
            period: ReportingPeriod {
                year: 2025,
                month: 10,
            },
            table,
        }
    }

    #[test]
    fn tsv_has_header_and_empty_cells() {
        let mut buf = Vec::new();
        write_tsv(&sample().table, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Programming Language\tOct 2025\tRatings\nPython\t1\t24.45%\nC\t2\t\n"
        );
    }

    #[test]
    fn values_with_tabs_are_quoted() {
        let mut table = Table::new();
        table
            .stack(&strings(&["a", "b"]), vec![strings(&["x\ty", "plain"])])
            .unwrap();
        let mut buf = Vec::new();
        write_tsv(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a\tb\n\"x\ty\"\tplain\n");
    }

    #[test]
    fn writes_under_year_directory_and_reads_back() {
        let tmp = tempdir().unwrap();
        let path = write_snapshot(&sample(), tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("2025").join("2025-10.tsv"));

        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(&path)
            .unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "Programming Language");
        let records: Vec<_> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][2], "");
    }

    #[test]
    fn rewrite_overwrites_and_is_byte_identical() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("2025")).unwrap();
        let path = tmp.path().join("2025").join("2025-10.tsv");
        fs::write(&path, "stale contents that are longer than the real output\n".repeat(10))
            .unwrap();

        write_snapshot(&sample(), tmp.path()).unwrap();
        let first = fs::read(&path).unwrap();
        write_snapshot(&sample(), tmp.path()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(b"Programming Language\t"));
    }
}
