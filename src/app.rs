use eframe::egui;

use crate::config::ViewerOptions;
use crate::data::model::PairTable;
use crate::error::AppError;
use crate::ui::chart;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PairChartApp {
    pub table: PairTable,
    pub options: ViewerOptions,
    /// File name shown in the top bar.
    pub source: String,
}

impl PairChartApp {
    pub fn new(table: PairTable, options: ViewerOptions, source: String) -> Self {
        Self {
            table,
            options,
            source,
        }
    }
}

impl eframe::App for PairChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: source summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&self.source);
                ui.separator();
                ui.label(format!("{} pairs", self.table.len()));
            });
        });

        // ---- Central panel: bar chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            chart::bar_chart(ui, &self.table, &self.options);
        });
    }
}

/// Open the chart window and block until the user closes it.
pub fn show(table: PairTable, options: ViewerOptions, source: String) -> Result<(), AppError> {
    let native = options.native_options();
    let title = options.title.clone();
    log::info!("Opening chart window for {} rows", table.len());

    eframe::run_native(
        &title,
        native,
        Box::new(move |_cc| Ok(Box::new(PairChartApp::new(table, options, source)))),
    )
    .map_err(|e| AppError::Display(e.to_string()))
}
