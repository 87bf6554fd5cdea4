use crate::primitives::{
    draw_legend, draw_time_axis, draw_title, draw_value_axis, scale_time, scale_value, svg_footer,
    svg_header, LegendEntry, HEIGHT, PADDING, WIDTH,
};
use analytics::{TimelinePoint, VolumeGuides};
use rust_decimal::prelude::ToPrimitive;

const SERIES_COLOR: &str = "#348dc1";
const MEDIAN_GUIDE_COLOR: &str = "#d16666";
const MEAN_GUIDE_COLOR: &str = "#348dc1";

/// Renders the intraday trade-size timeline for one session.
pub fn timeline_chart(title: &str, points: &[TimelinePoint]) -> String {
    render_series(title, points, |p| p.size as f64, None)
}

/// Renders the cumulative-volume curve for one session, with dashed guide
/// lines at the sample mean and median of per-day total volume.
pub fn cumulative_chart(title: &str, points: &[TimelinePoint], guides: &VolumeGuides) -> String {
    render_series(title, points, |p| p.cumulative_volume as f64, Some(guides))
}

fn render_series(
    title: &str,
    points: &[TimelinePoint],
    value_of: impl Fn(&TimelinePoint) -> f64,
    guides: Option<&VolumeGuides>,
) -> String {
    if points.is_empty() {
        return String::new();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let start = points.first().map(|p| p.time).unwrap_or_default();
    let end = points.last().map(|p| p.time).unwrap_or_default();

    let guide_values: Vec<f64> = guides
        .map(|g| {
            vec![
                g.daily_median.to_f64().unwrap_or(0.0),
                g.daily_mean.to_f64().unwrap_or(0.0),
            ]
        })
        .unwrap_or_default();

    let min_v = 0.0f64;
    let mut max_v = f64::MIN;
    for point in points {
        max_v = max_v.max(value_of(point));
    }
    for value in &guide_values {
        max_v = max_v.max(*value);
    }
    if max_v <= min_v {
        // Widen flat ranges so the polyline stays visible.
        max_v = min_v + 1.0;
    }

    let mut svg = svg_header(WIDTH, HEIGHT);
    draw_title(&mut svg, title, width);

    let mut legend_entries = Vec::new();
    if let Some(g) = guides {
        for (value, color, label) in [
            (
                g.daily_median.to_f64().unwrap_or(0.0),
                MEDIAN_GUIDE_COLOR,
                "Sample median",
            ),
            (
                g.daily_mean.to_f64().unwrap_or(0.0),
                MEAN_GUIDE_COLOR,
                "Sample mean",
            ),
        ] {
            let y = scale_value(value, min_v, max_v, height);
            svg.push_str(&format!(
                r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="4 3" />"#,
                x1 = PADDING,
                x2 = width - PADDING,
                y = y,
                color = color
            ));
            legend_entries.push(LegendEntry {
                label: label.to_string(),
                color,
                dash: true,
            });
        }
    }

    let points_attr = points
        .iter()
        .map(|p| {
            format!(
                "{x:.2},{y:.2}",
                x = scale_time(p.time, start, end, width),
                y = scale_value(value_of(p), min_v, max_v, height)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points="{points}" />"#,
        color = SERIES_COLOR,
        points = points_attr
    ));

    draw_time_axis(&mut svg, start, end, width, height);
    draw_value_axis(&mut svg, min_v, max_v, height);
    draw_legend(&mut svg, &legend_entries);

    svg.push_str(svg_footer());
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn points() -> Vec<TimelinePoint> {
        ["09:30:00", "10:00:00", "15:59:00"]
            .iter()
            .enumerate()
            .map(|(i, t)| TimelinePoint {
                time: t.parse::<NaiveTime>().unwrap(),
                size: 10 * (i as u64 + 1),
                cumulative_volume: 10 * ((i as u64 + 1) * (i as u64 + 2)) / 2,
            })
            .collect()
    }

    #[test]
    fn timeline_chart_draws_one_polyline() {
        let svg = timeline_chart("Trading Throughout 2022-01-18", &points());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("09:30:00"));
        assert!(svg.contains("15:59:00"));
    }

    #[test]
    fn cumulative_chart_draws_both_guides() {
        let guides = VolumeGuides {
            daily_mean: dec!(45),
            daily_median: dec!(40),
        };
        let svg = cumulative_chart("Cumulative Trading Volume", &points(), &guides);
        assert!(svg.contains("Sample mean"));
        assert!(svg.contains("Sample median"));
        assert_eq!(svg.matches("stroke-dasharray=\"4 3\"").count(), 4); // 2 guides + 2 legend keys
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(timeline_chart("empty", &[]).is_empty());
    }
}
