use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use hiring_dashboard::data::HiringType;
use hiring_dashboard::data::aggregate::Kpis;

use crate::color::type_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filtros");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("Nenhum dado carregado.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year ----
            let header = format!(
                "Ano  ({}/{})",
                state.filters.years.len(),
                dataset.years.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("filter_years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("Todos").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("Nenhum").clicked() {
                            state.select_no_years();
                        }
                    });
                    for &year in &dataset.years {
                        let mut checked = state.filters.years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            // ---- Hiring type ----
            let header = format!(
                "Tipo de Contratação  ({}/{})",
                state.filters.hiring_types.len(),
                dataset.hiring_types.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("filter_types")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("Todos").clicked() {
                            state.select_all_types();
                        }
                        if ui.small_button("Nenhum").clicked() {
                            state.select_no_types();
                        }
                    });
                    for &t in &dataset.hiring_types {
                        let mut checked = state.filters.hiring_types.contains(&t);
                        let text = RichText::new(t.label()).color(type_color(t));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_type(t);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Recarregar").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.source_path.display().to_string());

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} registros carregados, {} visíveis",
                ds.len(),
                state.visible_indices.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI tiles
// ---------------------------------------------------------------------------

/// Four counters: total, then one per hiring type.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    let tiles = [
        ("Total", kpis.total, ui.visuals().strong_text_color()),
        (
            "Vagas Novas",
            kpis.new_positions,
            type_color(HiringType::NewPosition),
        ),
        (
            "Promoções",
            kpis.promotions,
            type_color(HiringType::Promotion),
        ),
        (
            "Substituições",
            kpis.replacements,
            type_color(HiringType::Replacement),
        ),
    ];

    ui.columns(tiles.len(), |cols: &mut [Ui]| {
        for (col, (label, value, color)) in cols.iter_mut().zip(tiles) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(label);
                    ui.label(RichText::new(value.to_string()).size(28.0).strong().color(color));
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Error panel
// ---------------------------------------------------------------------------

/// Shown instead of the whole report when preparation failed.
pub fn error_panel(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new(format!("Erro ao carregar dados: {message}"))
                .color(Color32::RED)
                .strong(),
        );
        ui.add_space(8.0);
        ui.label("Verifique o arquivo e os nomes das colunas.");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir planilha de contratações")
        .add_filter(
            "Planilhas",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
