use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, uniform_grid_spacer};

use crate::config::ViewerOptions;
use crate::data::model::PairTable;

// ---------------------------------------------------------------------------
// Pair bar chart (central panel)
// ---------------------------------------------------------------------------

/// One bar per row at x = row index. Rows with a non-finite score get no bar
/// but still occupy their slot on the axis.
pub fn bars(table: &PairTable, opts: &ViewerOptions) -> Vec<Bar> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.jac.is_finite())
        .map(|(idx, row)| {
            Bar::new(idx as f64, row.jac)
                .name(row.pair.to_string())
                .width(opts.bar_width)
                .fill(opts.bar_color)
        })
        .collect()
}

/// Axis text for a grid mark: the pair label at integer positions, blank
/// everywhere else.
pub fn tick_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Render the bar chart filling the available space.
pub fn bar_chart(ui: &mut Ui, table: &PairTable, opts: &ViewerOptions) {
    if table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows to plot");
        });
        return;
    }

    let labels = table.labels();
    let series = opts.series_name.clone();
    let chart = BarChart::new(bars(table, opts))
        .name(&opts.series_name)
        .color(opts.bar_color)
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            format!("{}\n{series} = {}", bar.name, bar.value)
        }));

    Plot::new("pair_chart")
        .legend(Legend::default())
        .x_axis_label("pair")
        .y_axis_label(opts.series_name.clone())
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| tick_label(&labels, mark.value))
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
