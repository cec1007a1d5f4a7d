use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use hiring_dashboard::data::HiringRecord;
use hiring_dashboard::data::aggregate::{DetailView, FunctionCount};

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Plain text grid with a header row.
fn text_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0), headers.len().saturating_sub(1))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Function counts per department.
pub fn functions_table(ui: &mut Ui, rows: &[FunctionCount]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.department.clone(), r.function.clone(), r.count.to_string()])
        .collect();
    text_table(
        ui,
        "functions_by_department",
        &["SUPERINTENDENCIA", "FUNCAO", "Quantidade"],
        &cells,
    );
}

/// Tab strip plus the selected detail table.
pub fn detail_tables(ui: &mut Ui, current: &mut DetailView, records: &[&HiringRecord]) {
    ui.horizontal(|ui: &mut Ui| {
        for view in DetailView::ALL {
            ui.selectable_value(current, view, view.title());
        }
    });
    ui.separator();

    let rows = current.rows(records);
    ui.label(format!("{} registros", rows.len()));
    text_table(ui, current.title(), current.columns(), &rows);
}
