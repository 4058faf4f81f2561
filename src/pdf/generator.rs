use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use chrono::Local;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::Image;

use super::canvas::{Align, Canvas, FontStyle};
use crate::core::{ColumnAlign, DocumentError, DocumentResult, PdfConfig, TableData};
use crate::formatters::{format_currency, mask_cnpj, mask_cpf};
use crate::models::{LineItem, QuoteRequest};

/// Nome fixo do logo dentro do diretório de assets.
const LOGO_ASSET: &str = "LM_Manutencoes.png";

const DOCUMENT_TITLE: &str = "Orçamento Comercial";
const FOOTER_TEXT: &str = "LM Manutenções - Orçamento Comercial";

const PAYMENT_HEADER: &str = "Pagamento:";
const PAYMENT_BANK: &str = "Deposito banco Nubank: 260 - Agência: 0001 - Conta: 56310862-1";
const PAYMENT_PIX: &str = "Pix CNPJ: 40080991000184";

const TERMS_HEADER: &str = "Observações:";
const TERMS: [&str; 3] = [
    "Garantia: 90 dias",
    "Execução: até 3 dias úteis após depósito inicial",
    "Este orçamento tem validade de 15 dias",
];

const NOTES_HEADER: &str = "Observações adicionais:";
const NOTES_MAX_WIDTH: f32 = 176.0;

// Fixed vertical anchors of the pre-table sections, in mm from the page top.
const LOGO_X: f32 = 70.0;
const LOGO_Y: f32 = 0.0;
const LOGO_WIDTH: f32 = 80.0;
const LOGO_HEIGHT: f32 = 60.0;
const TITLE_Y: f32 = 70.0;
const DATE_Y: f32 = 77.0;
const CLIENT_HEADER_Y: f32 = 85.0;
const COMPANY_Y: f32 = 93.0;
const TAX_ID_Y: f32 = 99.0;
const REPRESENTATIVE_Y: f32 = 105.0;
const MACHINE_Y: f32 = 111.0;
const ITEMS_HEADER_Y: f32 = 123.0;
const TABLE_START_Y: f32 = 127.0;
const FOOTER_Y: f32 = 285.0;

/// Right edge shared by the date line and the total.
const AMOUNTS_RIGHT_X: f32 = 190.0;
/// Left offset of the second field on the two-field client lines.
const DETAIL_COLUMN_X: f32 = 110.0;

// Vertical rhythm of the post-table sections, relative to the measured
// table end.
const TOTAL_OFFSET: f32 = 10.0;
const HEADER_AFTER_TOTAL: f32 = 5.0;
const HEADER_TO_BODY: f32 = 8.0;
const BODY_LINE: f32 = 7.0;
const SECTION_GAP: f32 = 15.0;

/// Which columns the items table carries, decided once before any row is
/// built: the unit value column only appears when at least one item is
/// priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVariant {
    QuantityAndDescription,
    QuantityDescriptionAndValue,
}

impl TableVariant {
    pub fn for_items(items: &[LineItem]) -> Self {
        if items.iter().any(LineItem::is_priced) {
            TableVariant::QuantityDescriptionAndValue
        } else {
            TableVariant::QuantityAndDescription
        }
    }
}

/// Monta a tabela de itens no formato decidido pelo [`TableVariant`].
/// Itens sem preço em uma tabela com coluna de valor mostram `-`.
pub fn build_items_table(items: &[LineItem]) -> TableData {
    let variant = TableVariant::for_items(items);

    let mut table = match variant {
        TableVariant::QuantityAndDescription => {
            TableData::new(vec!["Qtd".to_string(), "Descrição".to_string()])
                .with_column_widths(vec![25.0, 157.0])
                .with_alignment(vec![ColumnAlign::Center, ColumnAlign::Left])
        }
        TableVariant::QuantityDescriptionAndValue => TableData::new(vec![
            "Qtd".to_string(),
            "Descrição".to_string(),
            "Valor Unit.".to_string(),
        ])
        .with_column_widths(vec![25.0, 117.0, 40.0])
        .with_alignment(vec![ColumnAlign::Center, ColumnAlign::Left, ColumnAlign::Right]),
    };

    for item in items {
        let mut row = vec![item.quantity.to_string(), item.description.clone()];
        if variant == TableVariant::QuantityDescriptionAndValue {
            row.push(if item.is_priced() {
                format_currency(item.unit_value)
            } else {
                "-".to_string()
            });
        }
        table.add_row(row);
    }

    table
}

/// Deriva o nome do arquivo a partir do nome da empresa:
/// `"Acme & Co."` vira `quote_acme_co.pdf`.
pub fn quote_filename(company_name: &str) -> String {
    let cleaned: String = company_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let slug = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    format!("quote_{}.pdf", slug)
}

#[derive(Debug, Clone)]
pub struct GeneratedQuote {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Gera o PDF de orçamento a partir de um [`QuoteRequest`].
pub struct QuoteGenerator {
    config: PdfConfig,
    assets_dir: PathBuf,
    output_dir: PathBuf,
}

impl QuoteGenerator {
    pub fn new() -> Self {
        let assets_dir = env::var("QUOTE_ASSETS_DIR").unwrap_or_else(|_| "assets".to_string());
        let output_dir = env::var("QUOTE_OUTPUT_DIR").unwrap_or_else(|_| "output".to_string());

        QuoteGenerator {
            config: PdfConfig::default(),
            assets_dir: assets_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Gera o documento em memória. Falha na carga do logo aborta a operação
    /// inteira; nenhum artefato parcial é produzido.
    pub fn generate(&self, request: &QuoteRequest) -> DocumentResult<GeneratedQuote> {
        tracing::info!(
            company = %request.client.company_name,
            items = request.items.len(),
            "gerando orçamento"
        );

        let logo = self.load_logo()?;

        let mut canvas = Canvas::new(&self.config, DOCUMENT_TITLE)?;
        self.draw_header(&canvas, logo);
        self.draw_client_section(&canvas, request);
        let table_end = self.draw_items_table(&mut canvas, &request.items);
        self.draw_closing_sections(&mut canvas, request, table_end);

        let bytes = canvas.save()?;
        let filename = quote_filename(&request.client.company_name);
        tracing::info!(filename = %filename, size = bytes.len(), "orçamento gerado");

        Ok(GeneratedQuote { filename, bytes })
    }

    /// Gera e salva no diretório de saída com o nome derivado do cliente.
    pub fn generate_to_file(&self, request: &QuoteRequest) -> DocumentResult<PathBuf> {
        let quote = self.generate(request)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&quote.filename);
        fs::write(&path, &quote.bytes)?;
        tracing::info!(path = %path.display(), "orçamento salvo");

        Ok(path)
    }

    fn load_logo(&self) -> DocumentResult<Image> {
        let path = self.assets_dir.join(LOGO_ASSET);
        let bytes = fs::read(&path).map_err(|source| DocumentError::LogoUnavailable {
            path: path.clone(),
            source,
        })?;

        let decoder = PngDecoder::new(Cursor::new(bytes))
            .map_err(|e| DocumentError::LogoDecode(e.to_string()))?;
        let image = Image::try_from(decoder).map_err(|e| DocumentError::LogoDecode(e.to_string()))?;

        tracing::debug!(path = %path.display(), "logo carregado");
        Ok(image)
    }

    fn draw_header(&self, canvas: &Canvas, logo: Image) {
        canvas.image(logo, LOGO_X, LOGO_Y, LOGO_WIDTH, LOGO_HEIGHT);
        canvas.text(
            DOCUMENT_TITLE,
            16.0,
            canvas.page_width() / 2.0,
            TITLE_Y,
            FontStyle::Regular,
            Align::Center,
        );

        let date = Local::now().format("%d/%m/%Y");
        canvas.text(
            &format!("Data: {}", date),
            10.0,
            AMOUNTS_RIGHT_X,
            DATE_Y,
            FontStyle::Regular,
            Align::Right,
        );
    }

    fn draw_client_section(&self, canvas: &Canvas, request: &QuoteRequest) {
        let client = &request.client;
        let left = canvas.left_edge();

        canvas.text("Dados do Cliente", 12.0, left, CLIENT_HEADER_Y, FontStyle::Regular, Align::Left);
        canvas.text(
            &format!("Empresa: {}", client.company_name),
            10.0,
            left,
            COMPANY_Y,
            FontStyle::Regular,
            Align::Left,
        );
        canvas.text(
            &format!("CNPJ: {}", mask_cnpj(&client.tax_id)),
            10.0,
            left,
            TAX_ID_Y,
            FontStyle::Regular,
            Align::Left,
        );

        // Two-field lines appear when either field is present; the missing
        // one renders as empty.
        if client.has_representative_info() {
            let name = client.representative_name.as_deref().unwrap_or("");
            let cpf = client.representative_tax_id.as_deref().unwrap_or("");
            canvas.text(
                &format!("Representante: {}", name),
                10.0,
                left,
                REPRESENTATIVE_Y,
                FontStyle::Regular,
                Align::Left,
            );
            canvas.text(
                &format!("CPF: {}", mask_cpf(cpf)),
                10.0,
                DETAIL_COLUMN_X,
                REPRESENTATIVE_Y,
                FontStyle::Regular,
                Align::Left,
            );
        }

        if client.has_machine_info() {
            let brand = client.machine_brand.as_deref().unwrap_or("");
            let model = client.machine_model.as_deref().unwrap_or("");
            canvas.text(
                &format!("Marca: {}", brand),
                10.0,
                left,
                MACHINE_Y,
                FontStyle::Regular,
                Align::Left,
            );
            canvas.text(
                &format!("Modelo: {}", model),
                10.0,
                DETAIL_COLUMN_X,
                MACHINE_Y,
                FontStyle::Regular,
                Align::Left,
            );
        }
    }

    fn draw_items_table(&self, canvas: &mut Canvas, items: &[LineItem]) -> f32 {
        canvas.text(
            "Itens do Orçamento",
            12.0,
            canvas.left_edge(),
            ITEMS_HEADER_Y,
            FontStyle::Regular,
            Align::Left,
        );

        let table = build_items_table(items);
        canvas.draw_table(&table, canvas.left_edge(), TABLE_START_Y)
    }

    fn draw_closing_sections(&self, canvas: &mut Canvas, request: &QuoteRequest, table_end: f32) {
        let left = canvas.left_edge();
        canvas.set_cursor(table_end);

        canvas.advance(TOTAL_OFFSET);
        canvas.ensure_space(0.0);
        canvas.text(
            &format!("Total: {}", format_currency(request.total)),
            12.0,
            AMOUNTS_RIGHT_X,
            canvas.cursor(),
            FontStyle::Regular,
            Align::Right,
        );

        if request.has_notes() {
            let notes = request.notes.as_deref().unwrap_or("");
            let line_count = super::metrics::wrap_text(notes, 10.0, NOTES_MAX_WIDTH).len();
            let block_height = HEADER_TO_BODY + line_count as f32 * canvas.line_height();

            canvas.advance(HEADER_AFTER_TOTAL);
            canvas.ensure_space(block_height);
            canvas.text(NOTES_HEADER, 12.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);
            canvas.advance(HEADER_TO_BODY);
            let drawn = canvas.draw_wrapped(notes, 10.0, left, canvas.cursor(), NOTES_MAX_WIDTH);
            canvas.advance(drawn as f32 * canvas.line_height());
            canvas.advance(BODY_LINE);
        } else {
            canvas.advance(HEADER_AFTER_TOTAL);
        }

        canvas.ensure_space(HEADER_TO_BODY + 2.0 * BODY_LINE);
        canvas.text(PAYMENT_HEADER, 12.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);
        canvas.advance(HEADER_TO_BODY);
        canvas.text(PAYMENT_BANK, 10.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);
        canvas.advance(BODY_LINE);
        canvas.text(PAYMENT_PIX, 10.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);

        canvas.advance(SECTION_GAP);
        canvas.ensure_space(HEADER_TO_BODY + 2.0 * BODY_LINE);
        canvas.text(TERMS_HEADER, 12.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);
        for term in TERMS {
            canvas.advance(if term == TERMS[0] { HEADER_TO_BODY } else { BODY_LINE });
            canvas.text(term, 10.0, left, canvas.cursor(), FontStyle::Regular, Align::Left);
        }

        canvas.text(
            FOOTER_TEXT,
            8.0,
            canvas.page_width() / 2.0,
            FOOTER_Y,
            FontStyle::Regular,
            Align::Center,
        );
    }
}

impl Default for QuoteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use printpdf::image_crate::{Rgb, RgbImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_test_logo(dir: &Path) {
        let img = RgbImage::from_pixel(120, 90, Rgb([8, 83, 13]));
        img.save(dir.join(LOGO_ASSET)).unwrap();
    }

    fn sample_request() -> QuoteRequest {
        let client = Client::new("Padaria Pão & Cia", "12345678000190")
            .with_representative("Maria Souza", "98765432100")
            .with_machine("Perfecta", "MX-500");
        let items = vec![
            LineItem::new(2, "Troca de rolamento do batedor", 180.0),
            LineItem::new(1, "Limpeza geral do equipamento", 0.0),
        ];
        QuoteRequest::new(client, items, 360.0).with_notes("Atendimento no local.")
    }

    #[test]
    fn test_quote_filename_strips_and_collapses() {
        assert_eq!(quote_filename("Acme & Co."), "quote_acme_co.pdf");
        assert_eq!(quote_filename("  Oficina   Silva  "), "quote_oficina_silva.pdf");
        assert_eq!(quote_filename("LM Manutenções"), "quote_lm_manutenes.pdf");
    }

    #[test]
    fn test_table_variant_without_priced_items() {
        let items = vec![
            LineItem::new(1, "Visita técnica", 0.0),
            LineItem::new(2, "Avaliação", 0.0),
        ];
        assert_eq!(
            TableVariant::for_items(&items),
            TableVariant::QuantityAndDescription
        );
    }

    #[test]
    fn test_table_variant_with_mixed_items() {
        let items = vec![
            LineItem::new(1, "Visita técnica", 0.0),
            LineItem::new(2, "Correia nova", 45.0),
        ];
        assert_eq!(
            TableVariant::for_items(&items),
            TableVariant::QuantityDescriptionAndValue
        );
    }

    #[test]
    fn test_items_table_omits_value_column_when_unpriced() {
        let items = vec![LineItem::new(1, "Visita técnica", 0.0)];
        let table = build_items_table(&items);
        assert_eq!(table.headers, vec!["Qtd", "Descrição"]);
        assert_eq!(table.rows[0], vec!["1", "Visita técnica"]);
    }

    #[test]
    fn test_items_table_renders_dash_for_unpriced_rows() {
        let items = vec![
            LineItem::new(1, "Visita técnica", 0.0),
            LineItem::new(2, "Correia nova", 45.0),
        ];
        let table = build_items_table(&items);
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0][2], "-");
        assert_eq!(table.rows[1][2], "R$ 45,00");
    }

    #[test]
    fn test_generate_produces_pdf_bytes() {
        let assets = TempDir::new().unwrap();
        write_test_logo(assets.path());

        let generator = QuoteGenerator::new().with_assets_dir(assets.path());
        let quote = generator.generate(&sample_request()).unwrap();

        assert!(quote.bytes.starts_with(b"%PDF"));
        assert_eq!(quote.filename, "quote_padaria_po_cia.pdf");
    }

    #[test]
    fn test_generate_to_file_writes_named_file() {
        let assets = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_test_logo(assets.path());

        let generator = QuoteGenerator::new()
            .with_assets_dir(assets.path())
            .with_output_dir(output.path());
        let path = generator.generate_to_file(&sample_request()).unwrap();

        assert!(path.ends_with("quote_padaria_po_cia.pdf"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_missing_logo_aborts_without_artifact() {
        let assets = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let generator = QuoteGenerator::new()
            .with_assets_dir(assets.path())
            .with_output_dir(output.path());
        let result = generator.generate_to_file(&sample_request());

        assert!(matches!(
            result,
            Err(DocumentError::LogoUnavailable { .. })
        ));
        assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_corrupt_logo_aborts_without_artifact() {
        let assets = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(assets.path().join(LOGO_ASSET), b"not a png at all").unwrap();

        let generator = QuoteGenerator::new()
            .with_assets_dir(assets.path())
            .with_output_dir(output.path());
        let result = generator.generate_to_file(&sample_request());

        assert!(matches!(result, Err(DocumentError::LogoDecode(_))));
        assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_generate_with_many_items_paginates() {
        let assets = TempDir::new().unwrap();
        write_test_logo(assets.path());

        let client = Client::new("Indústria Grande", "11222333000144");
        let items: Vec<LineItem> = (0..60)
            .map(|i| LineItem::new(1, format!("Serviço número {}", i), 10.0))
            .collect();
        let request = QuoteRequest::new(client, items, 600.0);

        let generator = QuoteGenerator::new().with_assets_dir(assets.path());
        let quote = generator.generate(&request).unwrap();
        assert!(quote.bytes.starts_with(b"%PDF"));
    }
}
