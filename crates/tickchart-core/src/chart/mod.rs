//! Price chart construction and display.
//!
//! [`render`] turns a [`PriceSeries`](crate::PriceSeries) into a
//! [`ChartLayout`]: a declarative description of one date/price figure with
//! a marker glyph and a line glyph per requested field. The layout
//! serializes to JSON, and [`ChartLayout::to_html`] wraps it in a standalone
//! page that Plotly.js renders with pan, box zoom, reset, save and
//! click-to-hide legend entries.

mod figure;
mod html;

pub use figure::{
    render, Axis, AxisKind, ChartLayout, ChartSpec, ClickPolicy, Figure, FontStyle, Glyph,
    GlyphKind, Legend, LegendLocation, SizingMode, TextAlign, Title, Tool, COLORBLIND4,
    FIGURE_HEIGHT, FIGURE_WIDTH, MAX_LAYOUT_WIDTH,
};
pub use html::PLOTLY_CDN_URL;
