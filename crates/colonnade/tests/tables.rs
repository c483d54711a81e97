//! End-to-end rendering scenarios.

use colonnade::{
    ascii, ascii_capped, headed_pipe, pipe, Adapter, AsciiTable, BorderStyle, Cornice, Encoding,
    TableConfig,
};

struct Person {
    name: &'static str,
    age: u32,
}

fn people() -> Vec<Person> {
    vec![
        Person { name: "David", age: 63 },
        Person { name: "Ava", age: 34 },
        Person { name: "Sonia", age: 12 },
    ]
}

fn encoding() -> Encoding<Person, String> {
    Encoding::headed("Name", |p: &Person| p.name.to_string())
        .concat(Encoding::headed("Age", |p: &Person| p.age.to_string()))
}

#[test]
fn csv_header_and_rows() {
    let encoding = encoding();
    let csv = Adapter::csv();
    let lines: Vec<String> = headed_pipe(&csv, &encoding, &people()).collect();
    assert_eq!(lines, vec!["Name,Age", "David,63", "Ava,34", "Sonia,12"]);
}

#[test]
fn ascii_table_pads_to_widest_cell() {
    let table = ascii(&encoding(), &people());
    assert_eq!(
        table,
        [
            "+-------+-----+",
            "| Name  | Age |",
            "+-------+-----+",
            "| David | 63  |",
            "| Ava   | 34  |",
            "| Sonia | 12  |",
            "+-------+-----+",
        ]
        .join("\n")
    );
}

#[test]
fn optional_rows_render_placeholders() {
    let encoding = encoding().lift_optional("?".to_string());
    let rows = vec![Some(Person { name: "Ava", age: 34 }), None];
    let lines: Vec<String> = pipe(&Adapter::plain("|"), &encoding, &rows).collect();
    assert_eq!(lines, vec!["Ava|34", "?|?"]);
}

#[derive(Clone, Copy)]
enum Quarter {
    Q1,
    Q2,
}

impl Quarter {
    fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
        }
    }
}

struct Sales {
    region: &'static str,
    by_quarter: [u32; 2],
}

#[test]
fn enum_basis_with_grouped_header() {
    let region: Encoding<Sales, String> =
        Encoding::headed("Region", |s: &Sales| s.region.to_string());
    let quarters: Encoding<Sales, String> = Encoding::from_basis(
        [Quarter::Q1, Quarter::Q2],
        |q| q.label().to_string(),
        |q, s: &Sales| s.by_quarter[*q as usize].to_string(),
    );
    let cornice = Cornice::cap("Where", region)
        .concat(Cornice::cap("Sales", quarters))
        .unwrap();

    let rows = vec![
        Sales {
            region: "North",
            by_quarter: [10, 200],
        },
        Sales {
            region: "South",
            by_quarter: [7, 3],
        },
    ];
    let table = ascii_capped(&cornice, &rows);
    assert_eq!(
        table,
        [
            "+--------+----------+",
            "| Where  | Sales    |",
            "+--------+----+-----+",
            "| Region | Q1 | Q2  |",
            "+--------+----+-----+",
            "| North  | 10 | 200 |",
            "| South  | 7  | 3   |",
            "+--------+----+-----+",
        ]
        .join("\n")
    );
}

#[test]
fn yaml_config_drives_table() {
    let config = TableConfig::from_yaml("border: rounded").unwrap();
    assert_eq!(config.border, BorderStyle::Rounded);
    let encoding = encoding();
    let table = AsciiTable::new(&encoding).config(config).render(&people());
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "╭───────┬─────╮");
    assert_eq!(lines[6], "╰───────┴─────╯");
}
