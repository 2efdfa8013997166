use crate::config::{PdfOrientation, Styles};
use crate::utils::colors::{hex_or, rgb_components};
use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.55;
const CELL_PAD: f32 = 4.0;

type Rgb = (f32, f32, f32);

struct Palette {
    header_fill: Rgb,
    header_text: Rgb,
    band1: Rgb,
    band2: Rgb,
    grid: Rgb,
}

impl Palette {
    fn from_styles(styles: &Styles) -> Self {
        Self {
            header_fill: rgb_components(hex_or(&styles.header_background, 0x2F75B5)),
            header_text: rgb_components(hex_or(&styles.header_text_color, 0xFFFFFF)),
            band1: rgb_components(hex_or(&styles.row_background, 0xFFFFFF)),
            band2: rgb_components(hex_or(&styles.row_alternate_background, 0xEAF3FB)),
            grid: rgb_components(hex_or(&styles.grid_color, 0xA6A6A6)),
        }
    }
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,

    palette: Palette,
}

impl PdfManager {
    pub fn new(orientation: PdfOrientation, styles: &Styles) -> Self {
        let mut pdf = Pdf::new();

        // ID gestiti a mano
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id).base_font(Name(b"Helvetica-Bold"));

        // A4
        let (page_w, page_h) = match orientation {
            PdfOrientation::Landscape => (842.0, 595.0),
            PdfOrientation::Portrait => (595.0, 842.0),
        };

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w,
            page_h,
            margin: 40.0,
            row_h: 18.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 9.0,
            header_font_size: 9.5,
            title_font_size: 14.0,

            palette: Palette::from_styles(styles),
        }
    }

    /// Genera un nuovo Ref univoco
    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Crea una nuova pagina e relativo oggetto di contenuto
    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    /// Scrive lo stream della pagina corrente
    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, font: &[u8], text: &str) {
        let safe = pdf_safe(text);
        content.begin_text();
        content.set_font(Name(font), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(safe.as_bytes()));
        content.end_text();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, rgb: Rgb) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        style: RowStyle,
    ) {
        let total: f32 = col_widths.iter().sum();
        self.fill_rect(content, self.margin, y, total, self.row_h, style.fill);

        let mut x = self.margin;
        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            let cell = fit_to_width(text, w, style.font_size);

            content.save_state();
            content.set_fill_rgb(style.text.0, style.text.1, style.text.2);
            self.draw_text(content, x + CELL_PAD, y + 5.5, style.font_size, style.font, &cell);
            content.restore_state();

            content.save_state();
            content.set_stroke_rgb(self.palette.grid.0, self.palette.grid.1, self.palette.grid.2);
            content.set_line_width(0.5);
            content.rect(x, y, w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Natural column widths, then narrowed to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let text_w = |s: &str, size: f32| s.chars().count() as f32 * size * AVG_GLYPH_EM + 2.0 * CELL_PAD;

        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| text_w(h, self.header_font_size))
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(text_w(cell, self.font_size));
            }
        }

        fit_widths(&mut widths, self.page_w - 2.0 * self.margin);
        widths
    }

    fn draw_page_header_footer(
        &self,
        content: &mut Content,
        title: &str,
        subtitle: Option<&str>,
        page: usize,
    ) -> f32 {
        let mut y = self.page_h - self.margin;
        self.draw_text(content, self.margin, y, self.title_font_size, b"F2", title);

        if let Some(sub) = subtitle {
            y -= self.title_font_size + 2.0;
            self.draw_text(content, self.margin, y, self.font_size + 1.0, b"F1", sub);
        }

        let pg = format!("Page {page}");
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin / 2.0,
            self.font_size,
            b"F1",
            &pg,
        );

        // top of the table
        y - self.row_h - 10.0
    }

    /// Tabella multipagina con titolo; the header row repeats on every page.
    /// Returns the number of data rows drawn.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> usize {
        let col_widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let header_style = RowStyle {
            fill: self.palette.header_fill,
            text: self.palette.header_text,
            font: b"F2",
            font_size: self.header_font_size,
        };

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;
        let mut drawn = 0;

        loop {
            let mut content = self.new_page();
            let mut y = self.draw_page_header_footer(&mut content, title, subtitle, page_idx);

            self.draw_row(&mut content, y, &col_widths, &header_row, header_style);
            y -= self.row_h;

            let mut consumed = 0;
            for row in remaining {
                if y < self.margin {
                    break;
                }

                // zebra stripe, continuous across pages
                let band = if (drawn + consumed) % 2 == 0 {
                    self.palette.band1
                } else {
                    self.palette.band2
                };
                let style = RowStyle {
                    fill: band,
                    text: (0.0, 0.0, 0.0),
                    font: b"F1",
                    font_size: self.font_size,
                };

                self.draw_row(&mut content, y, &col_widths, row, style);
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            drawn += consumed;
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }

        drawn
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct RowStyle {
    fill: Rgb,
    text: Rgb,
    font: &'static [u8],
    font_size: f32,
}

/// The standard Type1 fonts only cover ASCII reliably.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Truncate `text` with "..." so that it fits in a cell `width` points wide.
fn fit_to_width(text: &str, width: f32, font_size: f32) -> String {
    let max_chars = ((width - 2.0 * CELL_PAD) / (font_size * AVG_GLYPH_EM)).floor().max(1.0) as usize;
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut s: String = text.chars().take(max_chars - 3).collect();
    s.push_str("...");
    s
}

/// Shrink the widest columns first until the table fits in `max`.
/// Narrow columns (ids, timestamps, durations) keep their natural width.
fn fit_widths(widths: &mut [f32], max: f32) {
    let total: f32 = widths.iter().sum();
    if total <= max || widths.is_empty() {
        return;
    }

    let mut sorted: Vec<f32> = widths.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    // find the cap c with sum(min(w, c)) == max
    let mut budget = max;
    let mut cap = 0.0;
    for (i, w) in sorted.iter().enumerate() {
        let left = (sorted.len() - i) as f32;
        if w * left >= budget {
            cap = budget / left;
            break;
        }
        budget -= w;
    }

    for w in widths.iter_mut() {
        *w = w.min(cap);
    }
}
