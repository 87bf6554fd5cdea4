use crate::primitives::{
    draw_legend, draw_title, scale_value, svg_footer, svg_header, LegendEntry, HEIGHT, PADDING,
    WIDTH,
};
use crate::{POSITION_COLORS, POSITION_LABELS};
use analytics::{PositionBreakdown, ProductPosition};
use std::f64::consts::PI;

/// Renders the four position buckets of one product+expiration as a pie
/// chart, each slice labelled with its share and contract count.
pub fn position_pie(title: &str, breakdown: &PositionBreakdown) -> String {
    let total = breakdown.total();
    if total == 0 {
        return String::new();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let cx = width / 2.0;
    let cy = height / 2.0 + 8.0;
    let radius = (height / 2.0) - PADDING - 4.0;

    let mut svg = svg_header(WIDTH, HEIGHT);
    draw_title(&mut svg, title, width);

    let values = bucket_values(breakdown);
    let mut legend_entries = Vec::new();
    // Start at 12 o'clock and sweep clockwise.
    let mut angle = -PI / 2.0;
    for (idx, value) in values.iter().enumerate() {
        if *value == 0 {
            continue;
        }
        let fraction = *value as f64 / total as f64;
        let sweep = fraction * 2.0 * PI;

        if fraction >= 1.0 {
            // A single non-empty bucket: an arc path degenerates, draw the
            // full disc directly.
            svg.push_str(&format!(
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{color}" />"#,
                cx = cx,
                cy = cy,
                r = radius,
                color = POSITION_COLORS[idx]
            ));
        } else {
            let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = if sweep > PI { 1 } else { 0 };
            svg.push_str(&format!(
                r#"<path d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large} 1 {x2:.2} {y2:.2} Z" fill="{color}" />"#,
                cx = cx,
                cy = cy,
                x1 = x1,
                y1 = y1,
                r = radius,
                large = large_arc,
                x2 = x2,
                y2 = y2,
                color = POSITION_COLORS[idx]
            ));
        }

        // Share and contract count at the middle of the slice.
        let mid = angle + sweep / 2.0;
        let label_r = radius * 0.6;
        let (lx, ly) = (cx + label_r * mid.cos(), cy + label_r * mid.sin());
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#333">{pct:.2}%</text>"##,
            x = lx,
            y = ly,
            pct = fraction * 100.0
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#333">({count})</text>"##,
            x = lx,
            y = ly + 11.0,
            count = value
        ));

        legend_entries.push(LegendEntry {
            label: POSITION_LABELS[idx].to_string(),
            color: POSITION_COLORS[idx],
            dash: false,
        });
        angle += sweep;
    }

    draw_legend(&mut svg, &legend_entries);
    svg.push_str(svg_footer());
    svg
}

/// Renders per-product position breakdowns for one expiration as stacked
/// bars, one bar per product, segments in bucket order from the baseline up.
pub fn position_bars(title: &str, positions: &[ProductPosition]) -> String {
    let max_total = positions
        .iter()
        .map(|p| p.breakdown.total())
        .max()
        .unwrap_or(0);
    if positions.is_empty() || max_total == 0 {
        return String::new();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let inner_width = width - 2.0 * PADDING;
    let slot = inner_width / positions.len() as f64;
    let bar_width = slot * 0.35;
    let baseline = height - PADDING;

    let mut svg = svg_header(WIDTH, HEIGHT);
    draw_title(&mut svg, title, width);

    for (i, position) in positions.iter().enumerate() {
        let x = PADDING + slot * (i as f64 + 0.5) - bar_width / 2.0;
        let mut stacked = 0u64;
        for (idx, value) in bucket_values(&position.breakdown).iter().enumerate() {
            if *value == 0 {
                continue;
            }
            let y_bottom = scale_value(stacked as f64, 0.0, max_total as f64, height);
            let y_top = scale_value((stacked + value) as f64, 0.0, max_total as f64, height);
            svg.push_str(&format!(
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{color}" />"#,
                x = x,
                y = y_top,
                w = bar_width,
                h = y_bottom - y_top,
                color = POSITION_COLORS[idx]
            ));
            stacked += value;
        }

        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            x = x + bar_width / 2.0,
            y = baseline + 14.0,
            label = position.product
        ));
    }

    // Axis line along the baseline.
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = width - PADDING,
        y = baseline
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{max}</text>"#,
        x = PADDING - 4.0,
        y = scale_value(max_total as f64, 0.0, max_total as f64, height) + 3.0,
        max = max_total
    ));

    let legend: Vec<LegendEntry> = POSITION_LABELS
        .iter()
        .zip(POSITION_COLORS.iter())
        .map(|(label, color)| LegendEntry {
            label: (*label).to_string(),
            color,
            dash: false,
        })
        .collect();
    draw_legend(&mut svg, &legend);

    svg.push_str(svg_footer());
    svg
}

/// The four buckets in their fixed display order.
fn bucket_values(breakdown: &PositionBreakdown) -> [u64; 4] {
    [
        breakdown.bought_calls,
        breakdown.sold_calls,
        breakdown.bought_puts,
        breakdown.sold_puts,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_draws_a_slice_per_non_empty_bucket() {
        let breakdown = PositionBreakdown {
            bought_calls: 50,
            sold_calls: 25,
            bought_puts: 25,
            sold_puts: 0,
        };
        let svg = position_pie("Overall Position for AAPL", &breakdown);
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("50.00%"));
        assert!(svg.contains("(50)"));
        assert!(!svg.contains("Sold puts"));
    }

    #[test]
    fn pie_with_single_bucket_draws_full_disc() {
        let breakdown = PositionBreakdown {
            bought_calls: 0,
            sold_calls: 0,
            bought_puts: 80,
            sold_puts: 0,
        };
        let svg = position_pie("puts only", &breakdown);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains("100.00%"));
    }

    #[test]
    fn pie_with_no_volume_renders_nothing() {
        assert!(position_pie("flat", &PositionBreakdown::default()).is_empty());
    }

    #[test]
    fn bars_stack_each_product() {
        let positions = vec![
            ProductPosition {
                product: "AAPL".to_string(),
                breakdown: PositionBreakdown {
                    bought_calls: 10,
                    sold_calls: 5,
                    bought_puts: 0,
                    sold_puts: 5,
                },
            },
            ProductPosition {
                product: "TSLA".to_string(),
                breakdown: PositionBreakdown {
                    bought_calls: 0,
                    sold_calls: 0,
                    bought_puts: 40,
                    sold_puts: 0,
                },
            },
        ];
        let svg = position_bars("Position by Product", &positions);
        // AAPL contributes three non-empty segments, TSLA one.
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains(">AAPL<"));
        assert!(svg.contains(">TSLA<"));
        assert!(svg.contains(">40<"));
    }
}
