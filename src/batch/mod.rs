// src/batch/mod.rs
//! Runs a [`DocumentExtractor`] over an archive, one document at a time.

use serde::Serialize;

use crate::archive::ArchivedDocument;
use crate::extractors::DocumentExtractor;
use crate::records::{RatingPage, RatingRow};

/// A document the batch could not extract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDocument {
    pub key: String,
    pub reason: String,
}

/// Extracted records in archive order, plus the documents that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedDocument>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<Vec<T>> {
    /// One list across all pages, e.g. every career snippet.
    pub fn flatten(self) -> BatchOutcome<T> {
        BatchOutcome {
            records: self.records.into_iter().flatten().collect(),
            skipped: self.skipped,
        }
    }
}

impl BatchOutcome<RatingPage> {
    /// Splits ratings pages into their good rows and the diverted ones.
    pub fn into_rows(self) -> (BatchOutcome<RatingRow>, Vec<Vec<String>>) {
        let mut rows = Vec::new();
        let mut error_rows = Vec::new();
        for page in self.records {
            rows.extend(page.rows);
            error_rows.extend(page.error_rows);
        }
        let outcome = BatchOutcome {
            records: rows,
            skipped: self.skipped,
        };
        (outcome, error_rows)
    }
}

/// Sequential, failure-tolerant driver for one page kind.
#[derive(Debug, Clone)]
pub struct BatchParser<E> {
    extractor: E,
    max_documents: Option<usize>,
}

impl<E: DocumentExtractor> BatchParser<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            max_documents: None,
        }
    }

    /// Stops after `limit` documents when set.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.max_documents = limit;
        self
    }

    /// Extracts every document, skipping (and logging) the ones that fail.
    pub fn parse(&self, documents: &[ArchivedDocument]) -> BatchOutcome<E::Output> {
        let kind = self.extractor.kind();
        let total = self
            .max_documents
            .map_or(documents.len(), |limit| limit.min(documents.len()));
        let mut outcome = BatchOutcome::default();

        for (count, doc) in documents.iter().take(total).enumerate() {
            match self.extractor.extract(&doc.key, &doc.body) {
                Ok(record) => {
                    outcome.records.push(record);
                    tracing::info!("extracted {} {}/{} key={}", kind, count + 1, total, doc.key);
                }
                Err(e) => {
                    tracing::warn!("skipping document: {} {}/{} key={}: {}", kind, count + 1, total, doc.key, e);
                    outcome.skipped.push(SkippedDocument {
                        key: doc.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "{} batch finished: {} extracted, {} skipped",
            kind,
            outcome.records.len(),
            outcome.skipped.len()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::fight::tests::{fight_page, TWO_JUDGES};
    use crate::extractors::{CareerExtractor, FightExtractor, RatingsExtractor};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    fn five_fights_third_broken() -> Vec<ArchivedDocument> {
        (1..=5)
            .map(|n| {
                let mut html = fight_page(TWO_JUDGES, n % 2 == 0, "UD");
                if n == 3 {
                    // no left boxer cell
                    html = html.replace("text-align:right;", "text-align:center;");
                }
                ArchivedDocument::new(format!("1000/{}", n), html)
            })
            .collect()
    }

    #[test]
    fn failing_document_is_skipped_and_logged_once() {
        let docs = five_fights_third_broken();
        let parser = BatchParser::new(FightExtractor::new());

        let (outcome, logs) = with_captured_logs(|| parser.parse(&docs));

        assert_eq!(outcome.records.len(), 4);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].key, "1000/3");

        let skip_lines: Vec<&str> = logs.lines().filter(|l| l.contains("skipping document")).collect();
        assert_eq!(skip_lines.len(), 1);
        assert!(skip_lines[0].contains("key=1000/3"));
    }

    #[test]
    fn records_keep_archive_order() {
        let docs = five_fights_third_broken();
        let outcome = BatchParser::new(FightExtractor::new()).parse(&docs);
        let fight_ids: Vec<u64> = outcome.records.iter().map(|f| f.fight_id).collect();
        assert_eq!(fight_ids, [1, 2, 4, 5]);
    }

    #[test]
    fn limit_stops_early() {
        let docs = five_fights_third_broken();
        let outcome = BatchParser::new(FightExtractor::new()).with_limit(Some(2)).parse(&docs);
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.skipped.is_empty());

        let outcome = BatchParser::new(FightExtractor::new()).with_limit(Some(50)).parse(&docs);
        assert_eq!(outcome.records.len(), 4);
    }

    #[test]
    fn career_pages_flatten() {
        let page = |name: &str, rows: usize| {
            let rows: String = (0..rows)
                .map(|i| format!(r#"<tr class="drawRowBorder" id="{}"><td>x</td></tr>"#, i + 1))
                .collect();
            format!(
                r#"<h1 style="display:inline-block;margin-right:10px;line-height:30px;">{}</h1><table>{}</table>"#,
                name, rows
            )
        };
        let docs = vec![
            ArchivedDocument::new("1", page("A", 2)),
            ArchivedDocument::new("1-1", page("A", 1)),
            ArchivedDocument::new("2", page("", 3)),
        ];
        let outcome = BatchParser::new(CareerExtractor::new()).parse(&docs).flatten();
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].key, "2");
    }

    #[test]
    fn ratings_pages_split_into_rows_and_errors() {
        let page = |rank: &str| {
            format!(
                r#"<html><head><title>BoxRec: Ratings</title></head><body><table class="dataTable"><tbody>
<tr><td>{}</td><td><a href="/en/proboxer/7">B</a></td><td>10</td><td>1 0 0</td><td>heavy</td><td>2020-2021</td></tr>
</tbody></table></body></html>"#,
                rank
            )
        };
        let docs = vec![
            ArchivedDocument::new("1", page("1")),
            ArchivedDocument::new("2", page("NR")),
        ];
        let (rows, errors) = BatchParser::new(RatingsExtractor::new()).parse(&docs).into_rows();
        assert_eq!(rows.records.len(), 1);
        assert_eq!(rows.records[0].br_boxer_id, 7);
        assert_eq!(errors.len(), 1);
        assert!(rows.skipped.is_empty());
    }
}
