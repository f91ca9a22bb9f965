//! Generación del PDF de cotización
//!
//! Plantilla fija en tamaño carta: título, datos de la cotización,
//! configuración del vehículo, resumen de precios y pie de página.
//! Solo da formato a campos ya calculados.

use chrono::{DateTime, Utc};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};
use rust_decimal::Decimal;

use crate::models::body::BODY_PRICE_NOTE;
use crate::models::{BodyConfig, ChassisSpec, Quote};
use crate::utils::errors::{AppError, AppResult};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
// 72pt = 1 pulgada
const MARGIN: f32 = 25.4;
const BOTTOM_MARGIN: f32 = 6.35;
const LABEL_WIDTH: f32 = 50.8;
const PRICE_COLUMN_WIDTH: f32 = 50.8;
const ROW_HEIGHT: f32 = 6.5;
const PT_TO_MM: f32 = 0.3528;

const ACCENT: (f32, f32, f32) = (0.486, 0.227, 0.929);

pub const DOCUMENT_TITLE: &str = "ENDERA VEHICLE QUOTE";
pub const NOT_AVAILABLE: &str = "N/A";
pub const FOOTER_PRICING: &str = "* Final pricing includes body configuration and options. Contact Endera Motors for complete pricing details.";
pub const FOOTER_CONTACT: &str = "Contact: 1-800-ENDERA-1 | info@enderamotors.com | www.enderamotors.com";

/// Datos necesarios para renderizar una cotización
pub struct QuoteDocument<'a> {
    pub quote: &'a Quote,
    /// La sesión tenía un chassis seleccionado (aunque ya no exista en catálogo)
    pub chassis_selected: bool,
    pub chassis: Option<&'a ChassisSpec>,
    pub body_selected: bool,
    pub body: Option<&'a BodyConfig>,
    pub generated_at: DateTime<Utc>,
}

impl QuoteDocument<'_> {
    pub fn file_name(&self) -> String {
        format!("Endera_Quote_{}.pdf", self.quote.quote_number)
    }

    pub fn metadata_rows(&self) -> Vec<(String, String)> {
        let quote = self.quote;
        vec![
            ("Quote Number:".into(), quote.quote_number.clone()),
            ("Date:".into(), format_long_date(self.generated_at)),
            ("Valid Until:".into(), format_long_date(quote.valid_until)),
            ("Customer:".into(), quote.customer_name.clone()),
            ("Email:".into(), quote.customer_email.clone()),
            ("Company:".into(), or_na(quote.customer_company.as_deref())),
        ]
    }

    pub fn chassis_rows(&self) -> Vec<(String, String)> {
        let c = self.chassis;
        vec![
            (
                "Chassis:".into(),
                format!(
                    "{} {}\" Wheelbase",
                    c.map(|c| c.series.clone()).unwrap_or_else(|| NOT_AVAILABLE.into()),
                    c.map(|c| c.wheelbase_inches.to_string()).unwrap_or_else(|| NOT_AVAILABLE.into())
                ),
            ),
            (
                "Model Year:".into(),
                c.map(|c| c.model_year.to_string()).unwrap_or_else(|| NOT_AVAILABLE.into()),
            ),
            (
                "GVWR:".into(),
                format!(
                    "{} lbs",
                    c.and_then(|c| c.gvwr_lbs).map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.into())
                ),
            ),
            ("Engine:".into(), or_na(c.and_then(|c| c.engine_type.as_deref()))),
            ("Fuel Type:".into(), or_na(c.and_then(|c| c.fuel_type.as_deref()))),
        ]
    }

    pub fn body_rows(&self) -> Vec<(String, String)> {
        let b = self.body;
        let mut rows = vec![
            ("Body Configuration:".into(), or_na(b.map(|b| b.configuration_name.as_str()))),
            (
                "Length:".into(),
                format!(
                    "{} ft",
                    b.and_then(|b| b.length_ft).map(|v| v.normalize().to_string()).unwrap_or_else(|| NOT_AVAILABLE.into())
                ),
            ),
            (
                "Passenger Capacity:".into(),
                b.and_then(|b| b.passenger_capacity).map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.into()),
            ),
            (
                "Wheelchair Positions:".into(),
                b.and_then(|b| b.wheelchair_positions).map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.into()),
            ),
            ("Fuel Type:".into(), or_na(b.and_then(|b| b.fuel_type.as_deref()))),
        ];
        if let Some(range) = b.and_then(|b| b.electric_range_miles) {
            rows.push(("Electric Range:".into(), format!("{} miles", range)));
        }
        rows
    }

    pub fn pricing_rows(&self) -> Vec<(String, String)> {
        vec![
            ("Chassis (MSRP)".into(), format_money(self.quote.base_price)),
            ("Destination Charge".into(), format_money(self.quote.destination_charge)),
            ("Body Configuration".into(), BODY_PRICE_NOTE.into()),
        ]
    }

    pub fn total_row(&self) -> (String, String) {
        ("TOTAL ESTIMATE".into(), format!("{}+", format_money(self.quote.total_price)))
    }
}

/// Renderizar la cotización a bytes PDF
pub fn render_quote_pdf(document: &QuoteDocument<'_>) -> AppResult<Vec<u8>> {
    let mut writer = PdfWriter::new(&format!("Quote {}", document.quote.quote_number))?;

    writer.title(DOCUMENT_TITLE);
    writer.key_value_table(&document.metadata_rows());
    writer.space(7.0);

    writer.heading("VEHICLE CONFIGURATION");
    if document.chassis_selected {
        writer.key_value_table(&document.chassis_rows());
        writer.space(4.0);
    }
    if document.body_selected {
        writer.key_value_table(&document.body_rows());
        writer.space(7.0);
    }

    writer.heading("PRICING SUMMARY");
    writer.pricing_table(&document.pricing_rows(), &document.total_row());
    writer.space(7.0);

    writer.paragraph(FOOTER_PRICING);
    writer.space(4.0);
    writer.paragraph(FOOTER_CONTACT);

    writer.finish()
}

/// Cursor de escritura con salto de página automático
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < BOTTOM_MARGIN + MARGIN / 2.0 {
            self.pages += 1;
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", self.pages));
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn space(&mut self, height: f32) {
        self.y -= height;
    }

    fn set_fill(&self, (r, g, b): (f32, f32, f32)) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_right(&self, text: &str, size: f32, right_edge: f32, bold: bool) {
        let x = right_edge - estimate_width(text, size);
        self.text(text, size, x, bold);
    }

    fn title(&mut self, text: &str) {
        self.ensure_space(18.0);
        self.y -= 8.5;
        self.set_fill(ACCENT);
        self.text(text, 24.0, MARGIN, true);
        self.set_fill((0.0, 0.0, 0.0));
        self.y -= 14.0;
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(12.0);
        self.y -= 5.0;
        self.text(text, 14.0, MARGIN, true);
        self.y -= 7.0;
    }

    fn key_value_table(&mut self, rows: &[(String, String)]) {
        for (label, value) in rows {
            self.ensure_space(ROW_HEIGHT);
            self.y -= ROW_HEIGHT;
            self.text(label, 10.0, MARGIN, true);
            self.text(value, 10.0, MARGIN + LABEL_WIDTH, false);
        }
    }

    fn pricing_table(&mut self, rows: &[(String, String)], total: &(String, String)) {
        let right = PAGE_WIDTH - MARGIN;
        let price_left = right - PRICE_COLUMN_WIDTH;

        // Encabezado resaltado
        self.ensure_space(ROW_HEIGHT * (rows.len() as f32 + 3.0));
        let top = self.y;
        self.set_fill(ACCENT);
        self.layer
            .add_rect(Rect::new(Mm(MARGIN), Mm(top - ROW_HEIGHT), Mm(right), Mm(top)));
        self.y -= ROW_HEIGHT - 1.8;
        self.set_fill((0.96, 0.96, 0.96));
        self.text("Item", 10.0, MARGIN + 2.0, true);
        self.text_right("Price", 10.0, right - 2.0, true);
        self.set_fill((0.0, 0.0, 0.0));
        self.y = top - ROW_HEIGHT;

        for (label, value) in rows {
            self.y -= ROW_HEIGHT - 1.8;
            self.text(label, 10.0, MARGIN + 2.0, false);
            self.text_right(value, 10.0, right - 2.0, false);
            self.y -= 1.8;
        }
        let grid_bottom = self.y;

        self.layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(1.0);
        let mut row_y = top;
        while row_y >= grid_bottom - 0.01 {
            self.line((MARGIN, row_y), (right, row_y));
            row_y -= ROW_HEIGHT;
        }
        for x in [MARGIN, price_left, right] {
            self.line((x, top), (x, grid_bottom));
        }

        // Fila vacía y total
        self.y -= ROW_HEIGHT * 2.0 - 1.8;
        self.text(&total.0, 10.0, MARGIN + 2.0, true);
        self.text_right(&total.1, 10.0, right - 2.0, true);
        self.y -= 1.8;

        self.layer.set_outline_color(Color::Rgb(Rgb::new(ACCENT.0, ACCENT.1, ACCENT.2, None)));
        self.layer.set_outline_thickness(2.0);
        self.line((MARGIN, self.y), (right, self.y));
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap_text(text, 95) {
            self.ensure_space(5.0);
            self.y -= 5.0;
            self.text(&line, 10.0, MARGIN, false);
        }
    }

    fn line(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ],
            is_closed: false,
        });
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Ancho aproximado de Helvetica: media eme por carácter
fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

/// `August 14, 2025`
pub fn format_long_date(date: DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}

/// `$43,680.00`
pub fn format_money(amount: Decimal) -> String {
    let formatted = format!("{:.2}", amount.round_dp(2).abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
