use eframe::egui::{self, RichText, ScrollArea, Ui};

use hiring_dashboard::data::HiringType;
use hiring_dashboard::data::aggregate::{
    count_by_department, count_by_type, count_by_year_and_type, functions_by_department, kpis,
    monthly_timeline, top_functions,
};
use hiring_dashboard::settings::Settings;

use crate::color::type_color;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

const TOP_FUNCTIONS: usize = 10;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HiringDashboardApp {
    pub state: AppState,
}

impl HiringDashboardApp {
    /// Build the app and load the configured spreadsheet.
    pub fn new(settings: &Settings) -> Self {
        let mut state = AppState::new(settings);
        state.load(&settings.source_path);
        Self { state }
    }
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(8.0);
    ui.separator();
    ui.heading(title);
}

impl eframe::App for HiringDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if let Some(message) = self.state.error_message.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_panel(ui, &message);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| report(ui, &mut self.state));
        });
    }
}

/// The whole report over the currently visible records.
fn report(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("📊 Dashboard de Contratações - Corporativo 2024/2025").strong());

    if state.dataset.is_none() {
        ui.label("Abra uma planilha para ver o relatório  (Arquivo → Abrir…)");
        return;
    }
    let mut detail_view = state.detail_view;
    let records = state.visible_records();

    ui.separator();
    panels::kpi_row(ui, &kpis(&records));

    section(ui, "Distribuição por Tipo");
    ui.columns(2, |cols: &mut [Ui]| {
        plot::type_donut(&mut cols[0], &count_by_type(&records));
        plot::year_type_bars(&mut cols[1], &count_by_year_and_type(&records));
    });

    section(ui, "🏢 Vagas por Superintendência");
    plot::ranked_bars(ui, "department_bars", &count_by_department(&records), None);

    section(ui, "📋 Funções por Superintendência");
    tables::functions_table(ui, &functions_by_department(&records));

    section(ui, "📅 Timeline de Contratações por Mês");
    plot::timeline(ui, &monthly_timeline(&records));

    section(ui, "🎯 Top 10 Cargos - Vagas Novas");
    plot::ranked_bars(
        ui,
        "top_functions",
        &top_functions(&records, HiringType::NewPosition, TOP_FUNCTIONS),
        Some(type_color(HiringType::NewPosition)),
    );

    section(ui, "📋 Detalhamento das Contratações");
    tables::detail_tables(ui, &mut detail_view, &records);
    state.detail_view = detail_view;
}
