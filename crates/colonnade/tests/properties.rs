//! Property-based tests for encodings using proptest.

use colonnade::{Adapter, Encoding};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct Record {
    name: String,
    score: i64,
    active: bool,
}

fn record_strategy() -> impl Strategy<Value = Record> {
    ("[a-zA-Z ,\"]{0,12}", any::<i64>(), any::<bool>()).prop_map(|(name, score, active)| Record {
        name,
        score,
        active,
    })
}

fn name() -> Encoding<Record, String> {
    Encoding::headed("name", |r: &Record| r.name.clone())
}

fn score() -> Encoding<Record, String> {
    Encoding::headed("score", |r: &Record| r.score.to_string())
}

fn active() -> Encoding<Record, String> {
    Encoding::headed("active", |r: &Record| r.active.to_string())
}

/// An encoding with `width` columns, each tagging the record name with its index.
fn wide(width: usize) -> Encoding<Record, String> {
    Encoding::from_basis(
        0..width,
        |i| format!("c{}", i),
        |i, r: &Record| format!("{}:{}", i, r.name),
    )
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Concatenation is associative and matches rendering each part in turn.
    #[test]
    fn concat_is_associative(record in record_strategy()) {
        let left = name().concat(score()).concat(active());
        let right = name().concat(score().concat(active()));

        let mut parts = name().render_row(&record);
        parts.extend(score().render_row(&record));
        parts.extend(active().render_row(&record));

        prop_assert_eq!(left.render_row(&record), right.render_row(&record));
        prop_assert_eq!(left.render_row(&record), parts);
        prop_assert_eq!(left.render_header(), right.render_header());
    }

    /// The empty encoding is a left and right identity.
    #[test]
    fn empty_is_identity(record in record_strategy()) {
        let plain = name().concat(score());
        let left = Encoding::empty().concat(name().concat(score()));
        let right = name().concat(score()).concat(Encoding::empty());

        prop_assert_eq!(left.render_row(&record), plain.render_row(&record));
        prop_assert_eq!(right.render_row(&record), plain.render_row(&record));
    }

    /// Every rendered row has exactly one cell per column.
    #[test]
    fn row_length_is_column_count(record in record_strategy(), width in 0usize..12) {
        let encoding = wide(width).replace_when("x".to_string(), |r| r.active);
        prop_assert_eq!(encoding.render_row(&record).len(), encoding.column_count());
        prop_assert_eq!(encoding.column_count(), width);
    }

    /// Mapping headers never changes row output.
    #[test]
    fn map_headers_only_touches_headers(record in record_strategy()) {
        let plain = name().concat(score()).concat(active());
        let mapped = name()
            .concat(score())
            .concat(active())
            .map_headers(|h| format!("<{}>", h));

        prop_assert_eq!(mapped.render_row(&record), plain.render_row(&record));
        prop_assert_eq!(mapped.render_header(), vec!["<name>", "<score>", "<active>"]);
    }

    /// replace_when replaces whole rows exactly when the predicate holds.
    #[test]
    fn replace_when_matches_predicate(record in record_strategy()) {
        let plain = name().concat(score());
        let replaced = name().concat(score()).replace_when("--".to_string(), |r| r.score < 0);
        let cells = replaced.render_row(&record);

        if record.score < 0 {
            prop_assert!(cells.iter().all(|c| c == "--"));
        } else {
            prop_assert_eq!(cells, plain.render_row(&record));
        }
    }

    /// CSV lines parse back into the rendered cells.
    #[test]
    fn csv_line_round_trips_through_csv_reader(record in record_strategy()) {
        let encoding = name().concat(score());
        let line = Adapter::csv().row(&encoding, &record);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.as_bytes());
        let parsed: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();

        let score = record.score.to_string();
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0][0], record.name.as_str());
        prop_assert_eq!(&parsed[0][1], score.as_str());
    }
}
