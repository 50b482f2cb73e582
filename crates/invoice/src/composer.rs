//! PDF document composer
//!
//! Turns an [`InvoiceRecord`] into flowables, paginates them on A4 and hands
//! the layout to the renderer. The record is rendered as given: amounts are
//! never recomputed here.

use crate::fonts::FontHandle;
use crate::layout::{
    paginate, Flowable, Layout, Margins, Padding, Paragraph, Rule, Run, Section, Table,
    TableStyle, TextStyle, VAlign,
};
use crate::model::{non_blank, InvoiceRecord, Party};
use crate::render::render;
use crate::Result;
use locale_text::{format_money, format_quantity, format_rate, labels, Currency, Labels, Language};
use log::{debug, warn};
use pdf_core::units::mm;
use pdf_core::{Align, Color, FontFamily, PageSize};

const PAGE_SIZE: PageSize = PageSize::A4;

const HEADER_BLUE: u32 = 0x4472C4;
const ROW_SHADE: u32 = 0xF2F2F2;
const GRID_GREY: u32 = 0xCCCCCC;
const MUTED_GREY: u32 = 0x808080;

fn margins() -> Margins {
    Margins {
        left: mm(20.0),
        right: mm(20.0),
        top: mm(15.0),
        bottom: mm(15.0),
    }
}

fn frame_width() -> f64 {
    let m = margins();
    PAGE_SIZE.width - m.left - m.right
}

/// Paragraph styles used by the document
struct Styles {
    title: TextStyle,
    heading: TextStyle,
    normal: TextStyle,
    right: TextStyle,
    footer: TextStyle,
}

impl Styles {
    fn new() -> Self {
        let normal = TextStyle::normal();
        Self {
            title: TextStyle {
                size: 22.0,
                leading: 26.4,
                align: Align::Center,
                space_after: 6.0,
                ..normal
            },
            heading: TextStyle {
                size: 11.0,
                space_after: 4.0,
                ..normal
            },
            normal,
            right: normal.aligned(Align::Right),
            footer: TextStyle {
                color: Color::from_hex(MUTED_GREY),
                ..normal.aligned(Align::Center)
            },
        }
    }
}

/// Font family for the body text of a language
///
/// English always uses the built-in Helvetica pair. Korean uses the resolved
/// handle, which may itself be the Helvetica fallback.
pub(crate) fn body_family(language: Language, font: &FontHandle) -> FontFamily {
    match language {
        Language::En => FontFamily::helvetica(),
        Language::Ko => {
            if font.is_fallback() {
                warn!("no Hangul-capable font resolved, Korean text falls back to Helvetica");
            }
            font.family()
        }
    }
}

/// Metadata row: three `Label: value` cells
fn metadata_table(record: &InvoiceRecord, l: &Labels, s: &Styles) -> Table {
    let cell = |label: &str, value: &str| {
        Some(Paragraph::new(
            vec![Run::bold(format!("{label}:")), Run::plain(format!(" {value}"))],
            s.normal,
        ))
    };
    let width = frame_width();
    Table {
        rows: vec![vec![
            cell(l.invoice_no, &record.invoice_number),
            cell(l.issue_date, &record.issue_date),
            cell(l.due_date, &record.due_date),
        ]],
        col_widths: vec![width / 3.0; 3],
        repeat_rows: 0,
        style: TableStyle::default(),
    }
}

/// One party block: bold title then one line per present field
fn party_paragraph(title: &str, party: &Party, l: &Labels, s: &Styles) -> Paragraph {
    let mut lines: Vec<String> = Vec::new();
    if !party.company.trim().is_empty() {
        lines.push(party.company.clone());
    }
    if let Some(number) = non_blank(&party.business_number) {
        lines.push(format!("{}: {number}", l.business_no));
    }
    lines.extend(
        [&party.address, &party.email, &party.phone]
            .into_iter()
            .filter_map(non_blank)
            .map(str::to_string),
    );

    let mut runs = vec![Run::bold(title)];
    if !lines.is_empty() {
        runs.push(Run::plain(format!("\n{}", lines.join("\n"))));
    }
    Paragraph::new(runs, s.normal)
}

fn parties_table(record: &InvoiceRecord, l: &Labels, s: &Styles) -> Table {
    let width = frame_width();
    Table {
        rows: vec![vec![
            Some(party_paragraph(l.from_title, &record.from, l, s)),
            Some(party_paragraph(l.to_title, &record.to, l, s)),
        ]],
        col_widths: vec![width / 2.0; 2],
        repeat_rows: 0,
        style: TableStyle {
            padding: Padding {
                left: 0.0,
                ..Padding::default()
            },
            ..TableStyle::default()
        },
    }
}

fn items_table(record: &InvoiceRecord, symbol: &str, l: &Labels, s: &Styles) -> Table {
    let header = |text: &str, base: TextStyle| {
        Some(Paragraph::text(
            text,
            true,
            TextStyle {
                color: Color::white(),
                ..base
            },
        ))
    };
    let mut rows = vec![vec![
        header("#", s.normal),
        header(l.item_name, s.normal),
        header(l.qty, s.right),
        header(l.unit_price, s.right),
        header(l.amount, s.right),
    ]];

    for (index, item) in record.items.iter().enumerate() {
        rows.push(vec![
            Some(Paragraph::text((index + 1).to_string(), false, s.normal)),
            Some(Paragraph::text(item.name.clone(), false, s.normal)),
            Some(Paragraph::text(format_quantity(item.quantity), false, s.right)),
            Some(Paragraph::text(format_money(item.unit_price, symbol), false, s.right)),
            Some(Paragraph::text(format_money(item.amount, symbol), false, s.right)),
        ]);
    }

    let width = frame_width();
    Table {
        rows,
        col_widths: vec![mm(8.0), width - mm(68.0), mm(15.0), mm(22.0), mm(23.0)],
        repeat_rows: 1,
        style: TableStyle {
            // narrow sides keep two- and three-digit row numbers on one line
            col_padding: vec![Some(Padding {
                left: 2.0,
                right: 2.0,
                ..Padding::default()
            })],
            valign: VAlign::Middle,
            header_background: Some(Color::from_hex(HEADER_BLUE)),
            body_backgrounds: vec![Color::from_hex(ROW_SHADE), Color::white()],
            grid: Some((0.5, Color::from_hex(GRID_GREY))),
            ..TableStyle::default()
        },
    }
}

fn totals_table(record: &InvoiceRecord, symbol: &str, l: &Labels, s: &Styles) -> Table {
    let label = |text: String| Some(Paragraph::text(text, true, s.right));
    let value = |amount: f64, bold: bool| {
        Some(Paragraph::text(format_money(amount, symbol), bold, s.right))
    };

    let width = frame_width();
    Table {
        rows: vec![
            vec![None, label(l.subtotal.to_string()), value(record.subtotal, false)],
            vec![
                None,
                label(format!("{} ({}%)", l.tax, format_rate(record.tax_rate_percent))),
                value(record.tax, false),
            ],
            vec![None, label(l.total.to_string()), value(record.total, true)],
        ],
        col_widths: vec![width - mm(60.0), mm(30.0), mm(30.0)],
        repeat_rows: 0,
        style: TableStyle {
            padding: Padding {
                top: 2.0,
                bottom: 2.0,
                ..Padding::default()
            },
            rules: vec![
                Rule {
                    row: 1,
                    first_col: 1,
                    width: 0.5,
                    color: Color::from_hex(MUTED_GREY),
                },
                Rule {
                    row: 2,
                    first_col: 1,
                    width: 1.0,
                    color: Color::black(),
                },
            ],
            ..TableStyle::default()
        },
    }
}

fn payment_lines(record: &InvoiceRecord, l: &Labels) -> Vec<String> {
    let payment = &record.payment;
    [
        (l.bank_name, &payment.bank_name),
        (l.account_no, &payment.account_number),
        (l.account_holder, &payment.account_holder),
    ]
    .into_iter()
    .filter_map(|(label, value)| non_blank(value).map(|v| format!("{label}: {v}")))
    .collect()
}

/// The document as an ordered list of section-tagged flowables
fn build_flowables(
    record: &InvoiceRecord,
    currency: Currency,
    l: &Labels,
) -> Vec<(Section, Flowable)> {
    let s = Styles::new();
    let symbol = currency.symbol();
    let mut flow = vec![
        (
            Section::Header,
            Flowable::Paragraph(Paragraph::text(l.pdf_header, true, s.title)),
        ),
        (Section::Header, Flowable::Spacer(mm(4.0))),
        (
            Section::Metadata,
            Flowable::Table(metadata_table(record, l, &s)),
        ),
        (Section::Metadata, Flowable::Spacer(mm(6.0))),
        (Section::Parties, Flowable::Table(parties_table(record, l, &s))),
        (Section::Parties, Flowable::Spacer(mm(6.0))),
        (
            Section::Items,
            Flowable::Table(items_table(record, symbol, l, &s)),
        ),
        (Section::Items, Flowable::Spacer(mm(4.0))),
        (
            Section::Totals,
            Flowable::Table(totals_table(record, symbol, l, &s)),
        ),
        (Section::Totals, Flowable::Spacer(mm(6.0))),
    ];

    if !record.payment.is_empty() {
        flow.push((
            Section::Payment,
            Flowable::Paragraph(Paragraph::text(l.payment_title, true, s.heading)),
        ));
        flow.push((
            Section::Payment,
            Flowable::Paragraph(Paragraph::text(
                payment_lines(record, l).join("\n"),
                false,
                s.normal,
            )),
        ));
        flow.push((Section::Payment, Flowable::Spacer(mm(4.0))));
    }

    if let Some(notes) = record.notes_text() {
        flow.push((
            Section::Notes,
            Flowable::Paragraph(Paragraph::text(l.notes_title, true, s.heading)),
        ));
        flow.push((
            Section::Notes,
            Flowable::Paragraph(Paragraph::text(notes, false, s.normal)),
        ));
        flow.push((Section::Notes, Flowable::Spacer(mm(4.0))));
    }

    flow.push((Section::Footer, Flowable::Spacer(mm(8.0))));
    flow.push((
        Section::Footer,
        Flowable::Paragraph(Paragraph::text(l.pdf_footer, false, s.footer)),
    ));
    flow
}

fn layout_with(
    record: &InvoiceRecord,
    language: Language,
    currency: Currency,
    family: &FontFamily,
) -> Result<Layout> {
    let flowables = build_flowables(record, currency, labels(language));
    paginate(&flowables, family, PAGE_SIZE, margins())
}

/// Paginate an invoice without producing PDF bytes
pub fn layout_invoice(
    record: &InvoiceRecord,
    language: Language,
    currency: Currency,
    font: &FontHandle,
) -> Result<Layout> {
    layout_with(record, language, currency, &body_family(language, font))
}

/// Compose an invoice into PDF bytes
///
/// Same inputs always produce the same bytes. Fails with
/// [`InvoiceError::InvalidComposition`](crate::InvoiceError::InvalidComposition)
/// when content cannot be placed, or [`InvoiceError::Pdf`](crate::InvoiceError::Pdf)
/// when the backend cannot serialize the document.
pub fn compose(
    record: &InvoiceRecord,
    language: Language,
    currency: Currency,
    font: &FontHandle,
) -> Result<Vec<u8>> {
    let family = body_family(language, font);
    let layout = layout_with(record, language, currency, &family)?;
    debug!(
        "composing {} ({}, {}) on {} page(s)",
        record.invoice_number,
        language.code(),
        currency.code(),
        layout.page_count()
    );

    let title = format!("{} {}", labels(language).pdf_header, record.invoice_number);
    render(&layout, family, &title)
}

/// Compose with language and currency given as codes (e.g. `"ko"`, `"KRW"`)
///
/// Unknown codes fail before any layout work is done.
pub fn compose_codes(
    record: &InvoiceRecord,
    language: &str,
    currency: &str,
    font: &FontHandle,
) -> Result<Vec<u8>> {
    let language: Language = language.parse()?;
    let currency: Currency = currency.parse()?;
    compose(record, language, currency, font)
}
