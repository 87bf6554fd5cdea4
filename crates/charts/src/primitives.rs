use chrono::{NaiveTime, Timelike};

// Aspect ratio and padding shared by every chart.
pub const WIDTH: i32 = 576;
pub const HEIGHT: i32 = 288;
pub const PADDING: f64 = 36.0;

pub fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#,
        w = width,
        h = height
    )
}

pub fn svg_footer() -> &'static str {
    "</svg>"
}

pub fn draw_title(svg: &mut String, title: &str, width: f64) {
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#333" font-size="12">{title}</text>"##,
        x = width / 2.0,
        y = PADDING / 2.0,
        title = title
    ));
}

/// Maps a value into chart-space y, top-padded and inverted.
pub fn scale_value(value: f64, min_v: f64, max_v: f64, height: f64) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return height / 2.0;
    }
    let inner_height = height - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

/// Maps a time of day into chart-space x over the `[start, end]` session.
pub fn scale_time(time: NaiveTime, start: NaiveTime, end: NaiveTime, width: f64) -> f64 {
    let span = (end.num_seconds_from_midnight() - start.num_seconds_from_midnight()) as f64;
    if span < f64::EPSILON {
        return width / 2.0;
    }
    let offset = (time.num_seconds_from_midnight() - start.num_seconds_from_midnight()) as f64;
    let inner_width = width - 2.0 * PADDING;
    PADDING + (offset / span) * inner_width
}

/// Draws the bottom axis line with the session bounds as labels.
pub fn draw_time_axis(svg: &mut String, start: NaiveTime, end: NaiveTime, width: f64, height: f64) {
    let axis_y = height - PADDING + 5.0;
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = width - PADDING,
        y = axis_y
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="start">{label}</text>"#,
        x = PADDING,
        y = axis_y + 12.0,
        label = start.format("%H:%M:%S")
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
        x = width - PADDING,
        y = axis_y + 12.0,
        label = end.format("%H:%M:%S")
    ));
}

/// Draws min/max labels on the value axis.
pub fn draw_value_axis(svg: &mut String, min_v: f64, max_v: f64, height: f64) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label:.0}</text>"#,
        x = PADDING - 4.0,
        y = scale_value(max_v, min_v, max_v, height) + 3.0,
        label = max_v
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label:.0}</text>"#,
        x = PADDING - 4.0,
        y = scale_value(min_v, min_v, max_v, height) + 3.0,
        label = min_v
    ));
}

pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
    pub dash: bool,
}

pub fn draw_legend(svg: &mut String, entries: &[LegendEntry]) {
    if entries.is_empty() {
        return;
    }
    let mut y = PADDING + 14.0;
    let x = PADDING + 10.0;
    for entry in entries {
        let dash = if entry.dash { "4 3" } else { "0" };
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1.5" stroke-dasharray="{dash}" />"##,
            x1 = x,
            x2 = x + 20.0,
            y = y - 4.0,
            color = entry.color,
            dash = dash
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            x = x + 26.0,
            y = y,
            label = entry.label.as_str()
        ));
        y += 16.0;
    }
}
