use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use printpdf::path::{PaintMode, WindingOrder};

use super::metrics;
use crate::core::{ColumnAlign, DocumentError, DocumentResult, Margin, PdfConfig, TableData};

const CELL_PADDING: f32 = 2.0;
/// Fraction of the line height above the baseline, used to place cell text.
const ASCENT_RATIO: f32 = 0.75;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
/// Table header fill, the company green.
const HEADER_FILL: (f32, f32, f32) = (8.0 / 255.0, 83.0 / 255.0, 13.0 / 255.0);
/// Alternate body row fill for the striped table theme.
const STRIPE_FILL: (f32, f32, f32) = (245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0);

#[derive(Debug, Clone, Copy)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Page canvas with a top-left origin and a vertical cursor.
///
/// All coordinates are in mm measured from the top-left corner of the page;
/// text positions refer to the baseline, like the underlying PDF operators.
/// The cursor tracks the vertical extent of flowing sections so later
/// sections can offset themselves from measured positions instead of
/// hard-coding every constant.
pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    width: f32,
    height: f32,
    margin: Margin,
    line_height: f32,
    body_font_size: f32,
    cursor: f32,
}

impl Canvas {
    pub fn new(config: &PdfConfig, title: &str) -> DocumentResult<Self> {
        let (width, height) = config.page_dimensions();
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::Render(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocumentError::Render(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);
        let margin = config.margin.clone();
        let cursor = margin.top;

        Ok(Canvas {
            doc,
            layer,
            font,
            font_bold,
            width,
            height,
            margin,
            line_height: config.line_height,
            body_font_size: config.font_size,
            cursor,
        })
    }

    pub fn page_width(&self) -> f32 {
        self.width
    }

    pub fn left_edge(&self) -> f32 {
        self.margin.left
    }

    pub fn right_edge(&self) -> f32 {
        self.width - self.margin.right
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Starts a fresh page and resets the cursor to the top margin.
    pub fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(self.width), Mm(self.height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.margin.top;
    }

    /// Breaks the page when `needed` mm would not fit above the bottom margin.
    pub fn ensure_space(&mut self, needed: f32) {
        if self.cursor + needed > self.height - self.margin.bottom {
            self.new_page();
        }
    }

    fn fill_color(&self, (r, g, b): (f32, f32, f32)) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn font_for(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.font,
            FontStyle::Bold => &self.font_bold,
        }
    }

    /// Places a single line of text with its baseline at `y`. For `Center`
    /// and `Right`, `x` is the anchor the text is centered on or ends at.
    pub fn text(&self, text: &str, size: f32, x: f32, y: f32, style: FontStyle, align: Align) {
        self.text_colored(text, size, x, y, style, align, BLACK);
    }

    fn text_colored(
        &self,
        text: &str,
        size: f32,
        x: f32,
        y: f32,
        style: FontStyle,
        align: Align,
        color: (f32, f32, f32),
    ) {
        let start_x = match align {
            Align::Left => x,
            Align::Center => x - metrics::text_width_mm(text, size) / 2.0,
            Align::Right => x - metrics::text_width_mm(text, size),
        };
        self.fill_color(color);
        self.layer.use_text(
            text,
            size,
            Mm(start_x),
            Mm(self.height - y),
            self.font_for(style),
        );
    }

    /// Word-wraps `text` to `max_width` and draws it starting at baseline
    /// `y`, one `line_height` per line. Returns the number of lines drawn.
    pub fn draw_wrapped(&self, text: &str, size: f32, x: f32, y: f32, max_width: f32) -> usize {
        let lines = metrics::wrap_text(text, size, max_width);
        for (i, line) in lines.iter().enumerate() {
            self.text(
                line,
                size,
                x,
                y + i as f32 * self.line_height,
                FontStyle::Regular,
                Align::Left,
            );
        }
        lines.len()
    }

    /// Filled rectangle with its top edge at `y`.
    pub fn rect(&self, x: f32, y: f32, w: f32, h: f32, color: (f32, f32, f32)) {
        let top = self.height - y;
        let bottom = self.height - (y + h);
        let shape = Polygon {
            rings: vec![vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + w), Mm(top)), false),
                (Point::new(Mm(x + w), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        self.fill_color(color);
        self.layer.add_polygon(shape);
    }

    /// Embeds a decoded image with its top-left corner at (`x`, `y`),
    /// scaled to `w` × `h` mm.
    pub fn image(&self, image: printpdf::Image, x: f32, y: f32, w: f32, h: f32) {
        const DPI: f32 = 300.0;
        const MM_PER_INCH: f32 = 25.4;

        let px_w = image.image.width.0 as f32;
        let px_h = image.image.height.0 as f32;
        let natural_w = px_w * MM_PER_INCH / DPI;
        let natural_h = px_h * MM_PER_INCH / DPI;

        image.add_to_layer(
            self.layer.clone(),
            printpdf::ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(self.height - (y + h))),
                scale_x: Some(w / natural_w),
                scale_y: Some(h / natural_h),
                dpi: Some(DPI),
                ..Default::default()
            },
        );
    }

    /// Draws a striped table with its top edge at `start_y`, paginating when
    /// a row would cross the bottom margin (the header repeats on each new
    /// page). Returns the final vertical extent and leaves the cursor there.
    pub fn draw_table(&mut self, table: &TableData, x: f32, start_y: f32) -> f32 {
        let widths = self.resolve_widths(table, x);
        let total_width: f32 = widths.iter().sum();

        let mut y = self.draw_table_header(table, x, &widths, start_y);

        for (index, row) in table.rows.iter().enumerate() {
            let wrapped: Vec<Vec<String>> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    metrics::wrap_text(cell, self.body_font_size, w - 2.0 * CELL_PADDING)
                })
                .collect();
            let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
            let row_height = line_count as f32 * self.line_height + 2.0 * CELL_PADDING;

            if y + row_height > self.height - self.margin.bottom {
                self.new_page();
                y = self.draw_table_header(table, x, &widths, self.margin.top);
            }

            if index % 2 == 1 {
                self.rect(x, y, total_width, row_height, STRIPE_FILL);
            }

            let mut cell_x = x;
            for (col, lines) in wrapped.iter().enumerate() {
                let width = widths[col];
                let (anchor, align) = match table.column_align(col) {
                    ColumnAlign::Left => (cell_x + CELL_PADDING, Align::Left),
                    ColumnAlign::Center => (cell_x + width / 2.0, Align::Center),
                    ColumnAlign::Right => (cell_x + width - CELL_PADDING, Align::Right),
                };
                for (i, line) in lines.iter().enumerate() {
                    let baseline =
                        y + CELL_PADDING + (i as f32 + ASCENT_RATIO) * self.line_height;
                    self.text(line, self.body_font_size, anchor, baseline, FontStyle::Regular, align);
                }
                cell_x += width;
            }

            y += row_height;
        }

        self.cursor = y;
        y
    }

    fn draw_table_header(&mut self, table: &TableData, x: f32, widths: &[f32], y: f32) -> f32 {
        let total_width: f32 = widths.iter().sum();
        let header_height = self.line_height + 2.0 * CELL_PADDING;

        self.rect(x, y, total_width, header_height, HEADER_FILL);

        let mut cell_x = x;
        for (col, header) in table.headers.iter().enumerate() {
            let width = widths[col];
            let baseline = y + CELL_PADDING + ASCENT_RATIO * self.line_height;
            self.text_colored(
                header,
                self.body_font_size,
                cell_x + width / 2.0,
                baseline,
                FontStyle::Bold,
                Align::Center,
                WHITE,
            );
            cell_x += width;
        }

        y + header_height
    }

    fn resolve_widths(&self, table: &TableData, x: f32) -> Vec<f32> {
        match &table.column_widths {
            Some(widths) if widths.len() == table.column_count() => widths.clone(),
            _ => {
                let available = self.right_edge() - x;
                let count = table.column_count().max(1);
                vec![available / count as f32; count]
            }
        }
    }

    /// Finishes the document and returns the PDF bytes.
    pub fn save(self) -> DocumentResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| DocumentError::Render(e.to_string()))
    }
}
