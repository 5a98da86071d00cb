use eframe::egui::{Ui, RichText};
use echem_viewer::data::units::split_unit;
use echem_viewer::data::ParsedData;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw data table (central panel)
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view data  (File → Open…)");
        });
        return;
    };

    let table = &dataset.data;
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Monospace) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(48.0))
        .columns(Column::auto().at_least(80.0), table.n_columns())
        .header(36.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in &table.columns {
                header.col(|ui| {
                    let label = match column_unit(dataset, name) {
                        Some(unit) => format!("{name}\n({unit})"),
                        None => name.clone(),
                    };
                    ui.strong(label);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.n_rows(), |mut row| {
                let index = row.index();
                row.col(|ui| {
                    ui.label(RichText::new(index.to_string()).weak());
                });
                for cell in &table.rows[index] {
                    row.col(|ui| {
                        ui.monospace(cell.to_string());
                    });
                }
            });
        });
}

/// Gamry units are keyed by the full column name, header-derived units by
/// the name with its unit suffix removed.
fn column_unit<'a>(dataset: &'a ParsedData, column: &str) -> Option<&'a str> {
    if let Some(unit) = dataset.units.get(column) {
        return Some(unit);
    }
    let (base, _) = split_unit(column)?;
    dataset.units.get(&base).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use echem_viewer::data::{parse_file, RawFile};

    #[test]
    fn units_found_for_suffixed_headers() {
        let raw = RawFile::new("scan.csv", b"Ewe/V,Time (s),label\n0.1,1,a\n".to_vec());
        let parsed = parse_file(&raw).unwrap();
        assert_eq!(column_unit(&parsed, "Ewe/V"), Some("V"));
        assert_eq!(column_unit(&parsed, "Time (s)"), Some("s"));
        assert_eq!(column_unit(&parsed, "label"), None);
    }
}
