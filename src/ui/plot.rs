use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::data::model::MovieDataset;
use crate::data::stats;

// ---------------------------------------------------------------------------
// Analytics charts (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 220.0;
/// How many genre bars to show at most.
const GENRE_BAR_LIMIT: usize = 20;

/// Render all charts over the current filtered view.
pub fn charts_section(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    ui.heading("Genre distribution");
    genre_chart(ui, dataset, visible);
    ui.separator();

    ui.heading("Rating histogram");
    rating_histogram(ui, dataset, visible);
    ui.separator();

    ui.heading("Votes vs rating");
    votes_scatter(ui, dataset, visible);
}

fn genre_chart(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    let counts = stats::genre_counts(dataset, visible, GENRE_BAR_LIMIT);
    if counts.is_empty() {
        ui.label("No genres in the current view.");
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .width(0.7)
                .fill(Color32::from_rgb(0x4c, 0x8b, 0xc4))
        })
        .collect();

    Plot::new("genre_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn rating_histogram(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    let bins = stats::rating_histogram(dataset, visible);
    if bins.iter().all(|&b| b == 0) {
        ui.label("No rated movies in the current view.");
        return;
    }

    // Bin i covers [i/2, i/2 + 0.5); bars sit on the bin centers.
    let bars: Vec<Bar> = bins
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(i as f64 * 0.5 + 0.25, count as f64)
                .width(0.5)
                .fill(Color32::from_rgb(0xd9, 0x8e, 0x3a))
        })
        .collect();

    Plot::new("rating_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Rating")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn votes_scatter(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    let points = stats::scatter_points(dataset, visible);
    if points.is_empty() {
        ui.label("No rated movies in the current view.");
        return;
    }

    Plot::new("votes_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label("Votes")
        .y_axis_label("Rating")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(2.5)
                    .color(Color32::from_rgb(0x6a, 0xb0, 0x6e)),
            );
        });
}
