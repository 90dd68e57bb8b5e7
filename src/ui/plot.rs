use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use income_eda::charts::spec::{BarMode, ChartKind, ChartSpec, Series, TextInfo};

use super::bins::Bins;
use crate::color::{translucent, ColorMap};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Render one chart specification. `id` keeps plot state apart.
pub fn chart(ui: &mut Ui, spec: &ChartSpec, id: usize) {
    if spec.series.iter().all(Series::is_empty) {
        ui.label("No data to plot.");
        return;
    }
    match spec.kind {
        ChartKind::Histogram => histogram(ui, spec, id),
        ChartKind::Bar => category_bars(ui, spec, id),
        ChartKind::Pie => pie(ui, spec, id),
    }
}

fn base_plot(spec: &ChartSpec, id: usize) -> Plot<'static> {
    let mut plot = Plot::new(("chart", id))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);
    if let Some(x) = &spec.layout.x_title {
        plot = plot.x_axis_label(x.clone());
    }
    if let Some(y) = &spec.layout.y_title {
        plot = plot.y_axis_label(y.clone());
    }
    plot
}

// ---------------------------------------------------------------------------
// Histograms (binned here, from raw samples)
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, spec: &ChartSpec, id: usize) {
    let samples: Vec<(String, &[f64])> = spec
        .series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| match s {
            Series::Samples { name, values } => Some((
                name.clone().unwrap_or_else(|| format!("series {i}")),
                values.as_slice(),
            )),
            Series::Categories { .. } => None,
        })
        .collect();

    let Some(bins) = Bins::covering(samples.iter().map(|(_, v)| *v)) else {
        ui.label("No numeric values to bin.");
        return;
    };

    let names: Vec<String> = samples.iter().map(|(n, _)| n.clone()).collect();
    let colors = ColorMap::new(&names);
    let overlay = spec.layout.bar_mode == Some(BarMode::Overlay) && samples.len() > 1;

    base_plot(spec, id).show(ui, |plot_ui| {
        for (name, values) in &samples {
            let bars: Vec<Bar> = bins
                .counts(values)
                .into_iter()
                .enumerate()
                .filter(|(_, count)| *count > 0)
                .map(|(i, count)| Bar::new(bins.center(i), count as f64).width(bins.width))
                .collect();

            let mut color = colors.color_for(name);
            if overlay {
                color = translucent(color, 110);
            }
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
        }
    });
}

// ---------------------------------------------------------------------------
// Category bars
// ---------------------------------------------------------------------------

fn category_bars(ui: &mut Ui, spec: &ChartSpec, id: usize) {
    let Some(Series::Categories { name, labels, values }) = spec.series.first() else {
        ui.label("Expected a category series.");
        return;
    };

    let bars: Vec<Bar> = labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, &count))| Bar::new(i as f64, count as f64).width(0.7).name(label))
        .collect();

    let tick_labels = labels.clone();
    let plot = base_plot(spec, id).x_axis_formatter(move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        tick_labels.get(idx as usize).cloned().unwrap_or_default()
    });

    plot.show(ui, |plot_ui| {
        let chart = BarChart::new(bars)
            .color(Color32::LIGHT_BLUE)
            .name(name.as_deref().unwrap_or("count"));
        plot_ui.bar_chart(chart);
    });
}

// ---------------------------------------------------------------------------
// Pie (polygons on an equal-aspect plot)
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, spec: &ChartSpec, id: usize) {
    let Some(Series::Categories { labels, values, .. }) = spec.series.first() else {
        ui.label("Expected a category series.");
        return;
    };
    let total: u64 = values.iter().sum();
    if total == 0 {
        ui.label("No data to plot.");
        return;
    }

    let colors = ColorMap::new(labels);
    let show_percent = spec.layout.text_info == Some(TextInfo::LabelPercent);

    Plot::new(("chart", id))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock, like most pie renderers.
            let mut start = TAU / 4.0;
            for (label, &count) in labels.iter().zip(values) {
                let share = count as f64 / total as f64;
                let sweep = share * TAU;
                let end = start - sweep;

                let color = colors.color_for(label);
                let legend = format!("{label} ({:.1}%)", share * 100.0);
                plot_ui.polygon(
                    Polygon::new(slice_points(start, end))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(legend),
                );

                if show_percent && share >= 0.03 {
                    let mid = (start + end) / 2.0;
                    let text = format!("{label}\n{:.1}%", share * 100.0);
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(text).color(Color32::BLACK),
                    ));
                }
                start = end;
            }
        });
}

/// Outline of a unit-circle slice from angle `start` down to `end`.
fn slice_points(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = (((start - end).abs() / TAU) * 128.0).ceil().max(2.0) as usize;
    let mut points = vec![[0.0, 0.0]];
    points.extend((0..=steps).map(|i| {
        let a = start + (end - start) * i as f64 / steps as f64;
        [a.cos(), a.sin()]
    }));
    PlotPoints::from(points)
}
