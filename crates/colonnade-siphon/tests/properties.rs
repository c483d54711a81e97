use colonnade::{headed_pipe, Adapter, Encoding};
use colonnade_siphon::{csv_grid, decode_headed, decode_headless, Decoder, RowError};
use proptest::prelude::*;

type Row = (String, i64);

fn encoding() -> Encoding<Row, String> {
    Encoding::headed("text", |r: &Row| r.0.clone())
        .concat(Encoding::headed("number", |r: &Row| r.1.to_string()))
}

fn decoder() -> Decoder<String, Row> {
    Decoder::column("text", |c: &String| Some(c.clone())).and(Decoder::parsed("number"))
}

proptest! {
    #[test]
    fn csv_text_round_trip(
        rows in prop::collection::vec(("[a-zA-Z0-9 ,\"\n]{0,12}", any::<i64>()), 0..20)
    ) {
        let adapter = Adapter::csv();
        let encoding = encoding();
        let text: String = headed_pipe(&adapter, &encoding, &rows)
            .map(|line| line + "\n")
            .collect();
        let decoder = decoder();
        let decoded = decode_headed(&decoder, csv_grid(text.as_bytes())).collect_all().unwrap();
        prop_assert_eq!(decoded, rows);
    }

    #[test]
    fn every_failing_cell_is_reported(
        cells in prop::collection::vec(prop_oneof!["[0-9]{1,5}", "[a-z]{1,5}"], 1..8)
    ) {
        let decoder = cells
            .iter()
            .skip(1)
            .fold(
                Decoder::<String, u32>::positional(|c: &String| c.parse().ok()).map(|n| vec![n]),
                |acc, _| {
                    acc.and(Decoder::<String, u32>::positional(|c: &String| c.parse().ok()))
                        .map(|(mut ns, n)| {
                            ns.push(n);
                            ns
                        })
                },
            );
        let expected: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parse::<u32>().is_err())
            .map(|(i, _)| i)
            .collect();

        let result = decode_headless(&decoder, vec![Ok::<_, RowError<String>>(cells.clone())])
            .next()
            .unwrap();
        match result {
            Ok(values) => {
                prop_assert!(expected.is_empty());
                prop_assert_eq!(values.len(), cells.len());
            }
            Err(err) => {
                prop_assert_eq!(err.row, 1);
                let RowError::Decode(failed) = err.cause else {
                    return Err(TestCaseError::fail("expected decode errors"));
                };
                let columns: Vec<usize> = failed.iter().map(|cell| cell.column).collect();
                prop_assert_eq!(columns, expected);
            }
        }
    }

    #[test]
    fn header_order_is_irrelevant(swap in any::<bool>(), n in any::<i64>()) {
        let mut header = vec!["text".to_string(), "number".to_string()];
        let mut cells = vec!["x".to_string(), n.to_string()];
        if swap {
            header.reverse();
            cells.reverse();
        }
        let decoder = decoder();
        let decoded = decode_headed(&decoder, vec![Ok(header), Ok(cells)]).collect_all().unwrap();
        prop_assert_eq!(decoded, vec![("x".to_string(), n)]);
    }
}
