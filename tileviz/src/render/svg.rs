use super::{Position, Rect, Renderer};
use crate::color::ColorTable;
use std::io::Write;

/// Size of an SVG document, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Document width
    pub width: i64,
    /// Document height
    pub height: i64,
}

impl Page {
    /// Builds a new page size
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

/// Renderer that writes a flat SVG document
///
/// Every marker becomes a `<circle>` filled with an `rgb(...)` color; labels
/// become centered `<text>` elements and highlight regions become `<rect>`
/// elements.
pub struct SvgRenderer<'a, W> {
    out: W,
    colors: &'a ColorTable,
    page: Page,
    radius: u32,
}

impl<'a, W: Write> SvgRenderer<'a, W> {
    /// Builds a new SVG renderer writing to the given stream
    pub fn new(out: W, colors: &'a ColorTable, page: Page, radius: u32) -> Self {
        Self {
            out,
            colors,
            page,
            radius,
        }
    }

    /// Unwraps the renderer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for SvgRenderer<'_, W> {
    fn header(&mut self) -> std::io::Result<()> {
        writeln!(self.out, r#"<?xml version="1.0" standalone="no"?>"#)?;
        writeln!(self.out, r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN""#)?;
        writeln!(
            self.out,
            r#""http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#
        )?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" height="{}px" width="{}px">"#,
            self.page.height, self.page.width
        )
    }

    fn footer(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "</svg>")
    }

    fn marker(
        &mut self,
        pos: &Position,
        stroke: &str,
        fill: &str,
    ) -> std::io::Result<()> {
        let rgb = self.colors.rgb(fill);
        writeln!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}" stroke="{}" fill="rgb({}, {}, {})" />"#,
            pos.px,
            pos.py,
            self.radius,
            self.colors.hex(stroke),
            rgb.r,
            rgb.g,
            rgb.b
        )
    }

    fn label(&mut self, pos: &Position, text: &str) -> std::io::Result<()> {
        writeln!(
            self.out,
            r#"<text x="{}" y="{}" alignment-baseline="central" text-anchor="middle">"#,
            pos.px, pos.py
        )?;
        writeln!(self.out, "{text}")?;
        writeln!(self.out, "</text>")
    }

    fn rectangle(
        &mut self,
        rect: &Rect,
        stroke: &str,
        fill: &str,
    ) -> std::io::Result<()> {
        writeln!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" />"#,
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            self.colors.hex(fill),
            self.colors.hex(stroke),
        )
    }
}
