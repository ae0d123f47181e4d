use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{DurationBucket, MovieDataset, MovieRecord};
use crate::data::query::ResultTable;
use crate::data::stats;
use crate::state::AppState;

/// Cap on rows shown in the filtered table.
const TABLE_ROW_LIMIT: usize = 200;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: reload, counts, data origin, status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Reload data").clicked() {
            state.reload();
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} movies loaded, {} after filtering",
                ds.len(),
                state.visible_indices.len()
            ));
            if let Some(origin) = state.origin {
                ui.separator();
                ui.label(format!("Source: {origin}"));
            }
        }

        if let Some(msg) = &state.load_error {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel. Refilters only when a widget actually changed,
/// so the persisted spec is not rewritten every frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let genre_labels: Vec<String> = dataset.genres.iter().cloned().collect();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre multi-select ----
            let n_selected = state.filter.genres.len();
            let header = if n_selected == 0 {
                format!("Genre  (any of {})", genre_labels.len())
            } else {
                format!("Genre  ({n_selected} selected)")
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("genre_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    // toggle_genre / clear_genres refilter on their own.
                    if ui.small_button("Clear").clicked() {
                        state.clear_genres();
                    }
                    for label in &genre_labels {
                        let mut selected = state.filter.genres.contains(label);
                        if ui.checkbox(&mut selected, label).changed() {
                            state.toggle_genre(label);
                        }
                    }
                });
            ui.separator();

            // ---- Minimum rating ----
            ui.strong("Minimum rating");
            if ui
                .add(egui::Slider::new(&mut state.filter.min_rating, 0.0..=10.0).step_by(0.1))
                .changed()
            {
                changed = true;
            }
            ui.separator();

            // ---- Minimum votes ----
            ui.strong("Minimum votes");
            if ui
                .add(egui::DragValue::new(&mut state.filter.min_votes).speed(100))
                .changed()
            {
                changed = true;
            }
            ui.separator();

            // ---- Duration bucket ----
            ui.strong("Duration");
            egui::ComboBox::from_id_salt("duration_bucket")
                .selected_text(state.filter.duration.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for bucket in DurationBucket::ALL_BUCKETS {
                        if ui
                            .selectable_value(&mut state.filter.duration, bucket, bucket.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the central panel: query box, filtered table, top-10, charts.
///
/// A fatal load failure blocks everything: no filter or chart code runs
/// against missing data.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(err).color(Color32::RED));
        });
        return;
    }
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Loading…");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            query_section(ui, state);
            ui.separator();

            // Immutable view of the dataset for the rest of the panel.
            let Some(dataset) = &state.dataset else { return };
            let visible = &state.visible_indices;

            ui.heading("Filtered movies");
            ui.label(format!("Showing {} movies after filtering.", visible.len()));
            filtered_table(ui, dataset, visible);
            ui.separator();

            ui.heading("Top 10 by rating");
            top_rated_table(ui, dataset, visible);
            ui.separator();

            crate::ui::plot::charts_section(ui, dataset, visible);
        });
}

// ---- Ad-hoc query ----

fn query_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Run SQL query");
    ui.label("Executed verbatim against the configured store; results bypass the filters.");
    ui.add(
        egui::TextEdit::multiline(&mut state.query_text)
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .code_editor(),
    );
    if ui.button("Execute query").clicked() {
        state.run_query();
    }

    if let Some(err) = &state.query_error {
        ui.label(RichText::new(err).color(Color32::RED));
    }
    if let Some(result) = &state.query_result {
        if result.is_empty() {
            ui.label("Query returned 0 rows.");
        } else {
            ui.label(format!("Query returned {} rows.", result.rows.len()));
            result_table(ui, result);
        }
    }
}

fn result_table(ui: &mut Ui, result: &ResultTable) {
    let n_cols = result.columns.len().max(1);
    ui.push_id("query_result_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().resizable(true), n_cols)
            .header(20.0, |mut header| {
                for name in &result.columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, result.rows.len(), |mut row| {
                    let cells = &result.rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

// ---- Dataset tables ----

fn movie_table(ui: &mut Ui, id: &str, rows: &[&MovieRecord]) {
    ui.push_id(id.to_string(), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().resizable(true))
            .columns(Column::auto().resizable(true), 4)
            .header(20.0, |mut header| {
                for name in ["Title", "Genre", "Rating", "Votes", "Duration"] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut table_row| {
                    let rec = rows[table_row.index()];
                    for cell in [
                        rec.title.as_str(),
                        rec.genre.as_str(),
                        rec.rating.as_str(),
                        rec.votes.as_str(),
                        rec.duration.as_str(),
                    ] {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

fn filtered_table(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    let rows: Vec<&MovieRecord> = visible
        .iter()
        .take(TABLE_ROW_LIMIT)
        .map(|&i| &dataset.records[i])
        .collect();
    movie_table(ui, "filtered_table", &rows);
}

fn top_rated_table(ui: &mut Ui, dataset: &MovieDataset, visible: &[usize]) {
    let rows = stats::top_rated(dataset, visible, 10);
    if rows.is_empty() {
        ui.label("No rated movies in the current view.");
        return;
    }
    movie_table(ui, "top_rated_table", &rows);
}
