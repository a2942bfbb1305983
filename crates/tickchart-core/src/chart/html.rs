use serde_json::{json, Value};

use super::figure::{
    Axis, AxisKind, ChartLayout, ClickPolicy, Figure, FontStyle, Glyph, GlyphKind, LegendLocation,
    SizingMode, TextAlign, Tool,
};

/// Plotly.js bundle used to display exported charts.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

impl ChartLayout {
    /// Standalone HTML page displaying every figure of the layout.
    pub fn to_html(&self) -> String {
        let title = self
            .figure()
            .map(|figure| figure.title.text.as_str())
            .unwrap_or("chart");

        let container_style = match self.sizing_mode {
            SizingMode::ScaleWidth => format!("width:100%;max-width:{}px;", self.max_width),
            SizingMode::Fixed => String::new(),
        };

        let mut body = String::new();
        for (index, figure) in self.children.iter().enumerate() {
            let id = format!("tickchart-figure-{index}");
            let (data, layout, config) = plotly_figure(figure, self.sizing_mode);
            body.push_str(&format!(
                "<div id=\"{id}\" style=\"{container_style}height:{}px;\"></div>\n\
                 <script>Plotly.newPlot(\"{id}\", {}, {}, {});</script>\n",
                figure.height,
                script_json(&data),
                script_json(&layout),
                script_json(&config),
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<script src=\"{PLOTLY_CDN_URL}\"></script>\n</head>\n\
             <body>\n{body}</body>\n</html>\n",
            escape_html(title),
        )
    }
}

/// Plotly `(data, layout, config)` triple for one figure.
pub(crate) fn plotly_figure(figure: &Figure, sizing_mode: SizingMode) -> (Value, Value, Value) {
    let traces: Vec<Value> = figure
        .renderers
        .iter()
        .enumerate()
        .map(|(index, glyph)| {
            // Only the first glyph of a field gets a legend entry; toggling it
            // hides the whole group, like a hide click policy.
            let first_of_field = figure.renderers[..index]
                .iter()
                .all(|earlier| earlier.field != glyph.field);
            plotly_trace(glyph, first_of_field)
        })
        .collect();

    let (legend_x, legend_xanchor, legend_y, legend_yanchor) = match figure.legend.location {
        LegendLocation::TopLeft => (0.0, "left", 1.0, "top"),
        LegendLocation::TopRight => (1.0, "right", 1.0, "top"),
        LegendLocation::BottomLeft => (0.0, "left", 0.0, "bottom"),
        LegendLocation::BottomRight => (1.0, "right", 0.0, "bottom"),
    };
    let title_x = match figure.title.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => 0.5,
        TextAlign::Right => 1.0,
    };

    let mut layout = json!({
        "title": {
            "text": figure.title.text,
            "x": title_x,
            "font": { "size": figure.title.font_size_px, "color": figure.title.color },
        },
        "height": figure.height,
        "dragmode": if figure.tools.contains(&Tool::Pan) { "pan" } else { "zoom" },
        "xaxis": plotly_axis(&figure.x_axis),
        "yaxis": plotly_axis(&figure.y_axis),
        "showlegend": true,
        "legend": {
            "x": legend_x,
            "xanchor": legend_xanchor,
            "y": legend_y,
            "yanchor": legend_yanchor,
            "itemclick": match figure.legend.click_policy {
                ClickPolicy::Hide => Value::from("toggle"),
                ClickPolicy::None => Value::Bool(false),
            },
            "font": {
                "size": figure.legend.label_font_size_px,
                "family": figure.legend.label_font,
                "color": figure.legend.label_color,
            },
            "borderwidth": 0,
            "tracegroupgap": figure.legend.padding,
        },
    });
    if sizing_mode == SizingMode::Fixed {
        layout["width"] = Value::from(figure.width);
    }

    let buttons: Vec<&str> = figure
        .tools
        .iter()
        .map(|tool| match tool {
            Tool::Pan => "pan2d",
            Tool::BoxZoom => "zoom2d",
            Tool::Reset => "resetScale2d",
            Tool::Save => "toImage",
        })
        .collect();
    let config = json!({
        "responsive": sizing_mode == SizingMode::ScaleWidth,
        "displaylogo": false,
        "modeBarButtons": [buttons],
    });

    (Value::Array(traces), layout, config)
}

fn plotly_trace(glyph: &Glyph, show_legend: bool) -> Value {
    let mut trace = json!({
        "type": "scatter",
        "name": glyph.legend_label,
        "legendgroup": glyph.legend_label,
        "showlegend": show_legend,
        "x": glyph.x,
        "y": glyph.y,
    });
    match glyph.kind {
        GlyphKind::Circle { size, fill_alpha } => {
            trace["mode"] = Value::from("markers");
            trace["marker"] = json!({
                "symbol": "circle",
                "size": size,
                "color": glyph.color,
                "opacity": fill_alpha,
                "line": { "color": glyph.color, "width": 1 },
            });
        }
        GlyphKind::Line { line_width } => {
            trace["mode"] = Value::from("lines");
            trace["line"] = json!({ "color": glyph.color, "width": line_width });
        }
    }
    trace
}

fn plotly_axis(axis: &Axis) -> Value {
    let font_style = match axis.label_font_style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
        FontStyle::Bold => "bold",
    };
    json!({
        "type": match axis.kind {
            AxisKind::Datetime => "date",
            AxisKind::Linear => "linear",
        },
        "title": {
            "text": axis.label,
            "standoff": axis.label_standoff,
            "font": {
                "size": axis.label_font_size_px,
                "family": axis.label_font,
                "color": axis.label_color,
                "style": font_style,
            },
        },
        "tickfont": { "size": axis.major_label_font_size_px },
    })
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
