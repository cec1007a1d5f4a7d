use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use hiring_dashboard::data::HiringType;
use hiring_dashboard::data::aggregate::TimelinePoint;

use crate::color::{generate_palette, type_color};

const CHART_HEIGHT: f32 = 280.0;

/// Label lookup for a categorical axis laid out at integer positions.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Donut: share of each hiring type
// ---------------------------------------------------------------------------

pub fn type_donut(ui: &mut Ui, counts: &BTreeMap<HiringType, usize>) {
    let total: usize = counts.values().sum();
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT - 40.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());

    let center = response.rect.center();
    let outer = (size.x.min(size.y) / 2.0 - 8.0).max(10.0);
    let inner = outer * 0.4;

    if total == 0 {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "Sem dados",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let point = |radius: f32, angle: f32| -> Pos2 {
        center + radius * egui::vec2(angle.cos(), angle.sin())
    };

    let mut start = -TAU / 4.0;
    for (&t, &n) in counts {
        let sweep = TAU * n as f32 / total as f32;
        // Convex quads, a few degrees each.
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![point(outer, a0), point(outer, a1), point(inner, a1), point(inner, a0)],
                type_color(t),
                Stroke::NONE,
            ));
        }
        let mid = start + sweep / 2.0;
        let pct = 100.0 * n as f32 / total as f32;
        painter.text(
            point((outer + inner) / 2.0, mid),
            Align2::CENTER_CENTER,
            format!("{pct:.1}%"),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (&t, &n) in counts {
            ui.label(RichText::new(format!("■ {} ({n})", t.label())).color(type_color(t)));
        }
    });
}

// ---------------------------------------------------------------------------
// Grouped bars: year × hiring type
// ---------------------------------------------------------------------------

pub fn year_type_bars(ui: &mut Ui, counts: &BTreeMap<(i32, HiringType), usize>) {
    const WIDTH: f64 = 0.25;

    let charts: Vec<BarChart> = HiringType::ALL
        .iter()
        .enumerate()
        .filter_map(|(slot, &t)| {
            let bars: Vec<Bar> = counts
                .iter()
                .filter(|((_, bt), _)| *bt == t)
                .map(|((year, _), &n)| {
                    let x = *year as f64 + (slot as f64 - 1.0) * WIDTH;
                    Bar::new(x, n as f64).width(WIDTH).name(format!("{year}"))
                })
                .collect();
            (!bars.is_empty()).then(|| BarChart::new(bars).name(t.label()).color(type_color(t)))
        })
        .collect();

    Plot::new("year_type_bars")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Ano")
        .y_axis_label("Quantidade")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal bars: ranked categories
// ---------------------------------------------------------------------------

/// Ranked (label, count) pairs as horizontal bars, first entry on top.
pub fn ranked_bars(ui: &mut Ui, id: &str, ranked: &[(String, usize)], color: Option<Color32>) {
    if ranked.is_empty() {
        ui.label(RichText::new("Sem dados").weak());
        return;
    }

    let n = ranked.len();
    // Position 0 is the bottom of the chart.
    let labels: Vec<String> = ranked.iter().rev().map(|(l, _)| l.clone()).collect();
    let palette = generate_palette(n);

    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(rank, (label, count))| {
            let fill = color.unwrap_or(palette[rank]);
            Bar::new((n - 1 - rank) as f64, *count as f64)
                .name(label)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let height = (n as f32 * 26.0 + 60.0).clamp(120.0, 600.0);
    Plot::new(id)
        .height(height)
        .x_axis_label("Quantidade")
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Monthly timeline
// ---------------------------------------------------------------------------

pub fn timeline(ui: &mut Ui, points: &[TimelinePoint]) {
    let periods: Vec<String> = {
        let mut p: Vec<String> = points.iter().map(|tp| tp.period.clone()).collect();
        p.dedup();
        p
    };
    let position = |period: &str| periods.iter().position(|p| p == period).unwrap_or(0) as f64;

    let mut series: BTreeMap<HiringType, Vec<[f64; 2]>> = BTreeMap::new();
    for tp in points {
        series
            .entry(tp.hiring_type)
            .or_default()
            .push([position(&tp.period), tp.count as f64]);
    }

    let labels = periods.clone();
    Plot::new("monthly_timeline")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Mês")
        .y_axis_label("Quantidade")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (t, mut pts) in series {
                pts.sort_by(|a, b| a[0].total_cmp(&b[0]));
                let color = type_color(t);
                plot_ui.line(
                    Line::new(PlotPoints::from(pts.clone()))
                        .name(t.label())
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(t.label())
                        .color(color)
                        .radius(3.5),
                );
            }
        });
}
