use serde::Serialize;
use time::Date;

use crate::{PriceField, PriceSeries};

/// Colour-blind safe four colour palette, cycled across requested fields.
pub const COLORBLIND4: [&str; 4] = ["#0072B2", "#E69F00", "#F0E442", "#009E73"];

pub const FIGURE_WIDTH: u32 = 800;
pub const FIGURE_HEIGHT: u32 = 600;
pub const MAX_LAYOUT_WIDTH: u32 = 800;

const TITLE_FONT_SIZE_PX: u16 = 40;
const TITLE_COLOR: &str = "green";
const AXIS_LABEL_FONT_SIZE_PX: u16 = 30;
const TICK_LABEL_FONT_SIZE_PX: u16 = 18;
const LABEL_FONT: &str = "helvetica";
const LABEL_COLOR: &str = "black";
const AXIS_LABEL_STANDOFF: u16 = 20;
const LEGEND_PADDING: u16 = 10;
const MARKER_SIZE: u16 = 10;
const MARKER_FILL_ALPHA: f64 = 0.4;
const LINE_WIDTH: u16 = 2;

/// Interactive tools enabled on the figure toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pan,
    BoxZoom,
    Reset,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub text: String,
    pub align: TextAlign,
    pub font_size_px: u16,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Datetime,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Normal,
    Italic,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub kind: AxisKind,
    pub label: &'static str,
    pub label_font_size_px: u16,
    pub major_label_font_size_px: u16,
    pub label_font: &'static str,
    pub label_color: &'static str,
    pub label_font_style: FontStyle,
    pub label_standoff: u16,
}

impl Axis {
    fn styled(kind: AxisKind, label: &'static str) -> Self {
        Self {
            kind,
            label,
            label_font_size_px: AXIS_LABEL_FONT_SIZE_PX,
            major_label_font_size_px: TICK_LABEL_FONT_SIZE_PX,
            label_font: LABEL_FONT,
            label_color: LABEL_COLOR,
            label_font_style: FontStyle::Normal,
            label_standoff: AXIS_LABEL_STANDOFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLocation {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// What clicking a legend entry does to its glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPolicy {
    None,
    Hide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub location: LegendLocation,
    pub click_policy: ClickPolicy,
    pub label_font_size_px: u16,
    pub label_font: &'static str,
    pub label_color: &'static str,
    pub padding: u16,
}

/// Marker or line drawing of one price column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlyphKind {
    Circle { size: u16, fill_alpha: f64 },
    Line { line_width: u16 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glyph {
    pub kind: GlyphKind,
    pub field: PriceField,
    pub color: &'static str,
    pub legend_label: &'static str,
    pub x: Vec<Date>,
    pub y: Vec<f64>,
}

/// A single date/price plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: Title,
    pub tools: Vec<Tool>,
    pub width: u32,
    pub height: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub renderers: Vec<Glyph>,
    pub legend: Legend,
}

impl Figure {
    /// Fields drawn on this figure, in request order.
    pub fn fields(&self) -> Vec<PriceField> {
        let mut fields = Vec::new();
        for glyph in &self.renderers {
            if !fields.contains(&glyph.field) {
                fields.push(glyph.field);
            }
        }
        fields
    }

    pub fn glyphs_for(&self, field: PriceField) -> impl Iterator<Item = &Glyph> + '_ {
        self.renderers
            .iter()
            .filter(move |glyph| glyph.field == field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    Fixed,
    ScaleWidth,
}

/// Top-level chart container handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub sizing_mode: SizingMode,
    pub max_width: u32,
    pub children: Vec<Figure>,
}

impl ChartLayout {
    /// The main figure. Layouts built by [`render`] always hold exactly one.
    pub fn figure(&self) -> Option<&Figure> {
        self.children.first()
    }
}

/// Inputs of a single rendering call.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub series: &'a PriceSeries,
    pub label: &'a str,
    pub fields: &'a [PriceField],
}

impl<'a> ChartSpec<'a> {
    pub fn new(series: &'a PriceSeries, label: &'a str, fields: &'a [PriceField]) -> Self {
        Self {
            series,
            label,
            fields,
        }
    }

    /// Requested fields, or `[Close]` when none were requested.
    pub fn effective_fields(&self) -> &'a [PriceField] {
        if self.fields.is_empty() {
            &[PriceField::Close]
        } else {
            self.fields
        }
    }

    pub fn build(&self) -> ChartLayout {
        let dates = self.series.dates();
        let mut renderers = Vec::with_capacity(self.effective_fields().len() * 2);

        for (index, &field) in self.effective_fields().iter().enumerate() {
            let color = COLORBLIND4[index % COLORBLIND4.len()];
            let values = self.series.values(field);
            let glyph = |kind| Glyph {
                kind,
                field,
                color,
                legend_label: field.label(),
                x: dates.clone(),
                y: values.clone(),
            };
            renderers.push(glyph(GlyphKind::Circle {
                size: MARKER_SIZE,
                fill_alpha: MARKER_FILL_ALPHA,
            }));
            renderers.push(glyph(GlyphKind::Line {
                line_width: LINE_WIDTH,
            }));
        }

        let figure = Figure {
            title: Title {
                text: self.label.to_uppercase(),
                align: TextAlign::Center,
                font_size_px: TITLE_FONT_SIZE_PX,
                color: TITLE_COLOR,
            },
            tools: vec![Tool::Pan, Tool::BoxZoom, Tool::Reset, Tool::Save],
            width: FIGURE_WIDTH,
            height: FIGURE_HEIGHT,
            x_axis: Axis::styled(AxisKind::Datetime, "date"),
            y_axis: Axis::styled(AxisKind::Linear, "price"),
            renderers,
            legend: Legend {
                location: LegendLocation::TopRight,
                click_policy: ClickPolicy::Hide,
                label_font_size_px: TICK_LABEL_FONT_SIZE_PX,
                label_font: LABEL_FONT,
                label_color: LABEL_COLOR,
                padding: LEGEND_PADDING,
            },
        };

        ChartLayout {
            sizing_mode: SizingMode::ScaleWidth,
            max_width: MAX_LAYOUT_WIDTH,
            children: vec![figure],
        }
    }
}

/// Build the price chart for `series`, one marker and one line per field.
pub fn render(series: &PriceSeries, label: &str, fields: &[PriceField]) -> ChartLayout {
    ChartSpec::new(series, label, fields).build()
}
