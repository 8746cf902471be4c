use cipherforge::cipher::Cipher;
use cipherforge::scorer::ScoreDetails;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::collections::BTreeSet;

/// Key row over value row, 13 letters per band.
pub fn print_cipher_grid(name: &str, cipher: &Cipher) {
    println!("\nCipher: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let pairs: Vec<(&str, &str)> = cipher.iter().collect();
    for chunk in pairs.chunks(13) {
        let keys: Vec<Cell> = chunk
            .iter()
            .map(|(k, _)| Cell::new(k).set_alignment(CellAlignment::Center))
            .collect();
        let values: Vec<Cell> = chunk
            .iter()
            .map(|(_, v)| {
                Cell::new(v)
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold)
            })
            .collect();
        table.add_row(keys);
        table.add_row(values);
    }
    println!("{}", table);
}

pub fn print_scoring_report(results: &[(String, ScoreDetails)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Cipher").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Exact").fg(Color::Green),
        Cell::new("Pattern"),
        Cell::new("Exact #").fg(Color::Green),
        Cell::new("Pattern #"),
        Cell::new("Avg EPC"),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, d) in results {
        let epc_sum: i64 = d
            .epc_histogram
            .iter()
            .map(|(epc, n)| *epc as i64 * *n as i64)
            .sum();
        let avg_epc = if d.pattern_words > 0 {
            epc_sum as f64 / d.pattern_words as f64
        } else {
            0.0
        };

        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", d.total)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", d.exact_score)).fg(Color::Green),
            Cell::new(format!("{:.2}", d.pattern_score)),
            Cell::new(d.exact_matches).fg(Color::Green),
            Cell::new(d.pattern_words),
            Cell::new(format!("{:.2}", avg_epc)),
        ]);
    }
    println!("\n{}", table);
}

/// How many non-dictionary encodings landed on each EPC value.
pub fn print_epc_report(results: &[(String, ScoreDetails)]) {
    let columns: BTreeSet<i32> = results
        .iter()
        .flat_map(|(_, d)| d.epc_histogram.keys().copied())
        .collect();
    if columns.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("EPC").add_attribute(Attribute::Bold)];
    header.extend(columns.iter().map(|epc| {
        let cell = Cell::new(epc);
        if *epc > 4 {
            cell.fg(Color::Green)
        } else {
            cell
        }
    }));
    table.add_row(header);

    for i in 1..=columns.len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, d) in results {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        row.extend(
            columns
                .iter()
                .map(|epc| Cell::new(d.epc_histogram.get(epc).copied().unwrap_or(0))),
        );
        table.add_row(row);
    }
    println!("\n{}", table);
}

pub fn print_translations(name: &str, details: &ScoreDetails) {
    if details.translations.is_empty() {
        return;
    }
    println!("\nTop translations: {}", name);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Word").add_attribute(Attribute::Bold),
        Cell::new("Encoded").add_attribute(Attribute::Bold),
        Cell::new("EPC"),
        Cell::new("Score"),
    ]);

    for t in &details.translations {
        let epc = match t.epc {
            Some(epc) => Cell::new(epc),
            None => Cell::new("word").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(&t.word),
            Cell::new(&t.encoded),
            epc.set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", t.contribution)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}
