use eframe::egui::{self, Color32};

// ---------------------------------------------------------------------------
// Viewer options
// ---------------------------------------------------------------------------

/// Window and chart settings for the bar-chart viewer.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Bar width in x-axis units; bars sit one unit apart.
    pub bar_width: f64,
    pub bar_color: Color32,
    /// Name shown in the legend and on the y axis.
    pub series_name: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "pairplot".to_string(),
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
            bar_width: 0.5,
            bar_color: Color32::from_rgb(31, 119, 180),
            series_name: "jac".to_string(),
        }
    }
}

impl ViewerOptions {
    /// Title the window after the file being shown.
    pub fn with_source(mut self, source: &str) -> Self {
        self.title = format!("{} – {source}", self.title);
        self
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.inner_size)
                .with_min_inner_size(self.min_inner_size),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_appended_to_title() {
        let opts = ViewerOptions::default().with_source("scores.csv");
        assert_eq!(opts.title, "pairplot – scores.csv");
    }

    #[test]
    fn bars_do_not_overlap() {
        let opts = ViewerOptions::default();
        assert!(opts.bar_width > 0.0 && opts.bar_width < 1.0);
    }
}
