//! # Receipt Formatter
//!
//! Turns a completed [`Transaction`] into a printer-neutral document:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Transaction │ ──▶ │ ReceiptFormatter │ ──▶ │ Vec<Segment> │
//! └─────────────┘     └──────────────────┘     └──────────────┘
//!                                                     │
//!                                        render_plain │
//!                                                     ▼
//!                                           plain-text preview
//! ```
//!
//! Segments carry intent (alignment, emphasis, rules, paper feed)
//! rather than escape bytes, so an ESC/POS encoder and the on-screen
//! preview consume the same document.
//!
//! ## Layout Rules
//!
//! All text is laid out against a fixed column width (32 by default).
//! The store name prints double-size, so its rows wrap and center at
//! half width. Label/value rows keep at least one space between the
//! two sides; a label too long for one row wraps, and the value lands
//! on the last label row if it fits there, otherwise right-aligned on
//! its own row. Values are never truncated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::StoreProfile;
use crate::types::Transaction;
use crate::DEFAULT_RECEIPT_WIDTH;

// ============================================================================
// Segments
// ============================================================================

/// Horizontal alignment for subsequent lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// One instruction in a receipt document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Reset the printer to its power-on state.
    Init,
    /// Switch line alignment.
    Align(Align),
    /// Toggle emphasis.
    Bold(bool),
    /// Toggle double-width, double-height characters.
    DoubleSize(bool),
    /// One row of text, already padded to the column width where the
    /// layout calls for it.
    Line(String),
    /// Horizontal rule: the character repeated to full width.
    Rule(char),
    /// Advance the paper by blank lines.
    Feed(u8),
    /// Cut the paper.
    Cut,
}

// ============================================================================
// Text layout helpers
// ============================================================================

/// Greedy word-wrap at `width` columns.
///
/// Words longer than the width are broken mid-word to fill each row.
/// Whitespace-only input yields no rows; callers use that to skip
/// empty profile fields.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();
        loop {
            let sep = usize::from(current_len > 0);
            if current_len + sep + word_len <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len += sep + word_len;
                break;
            }
            if word_len > width {
                // Break the oversized word to fill the remaining space.
                let space_left = width.saturating_sub(current_len + sep);
                if space_left > 0 {
                    if sep == 1 {
                        current.push(' ');
                    }
                    let (head, tail) = split_at_chars(word, space_left);
                    current.push_str(head);
                    word = tail;
                    word_len -= space_left;
                }
            }
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Wraps `text` at `width` and centers every row to exactly `width`
/// characters.
pub fn center_lines(text: &str, width: usize) -> Vec<String> {
    wrap_text(text, width)
        .into_iter()
        .map(|row| format!("{row:^width$}"))
        .collect()
}

/// Lays out a label on the left and a value on the right of one row,
/// keeping at least one space between them.
///
/// ## Rules
/// 1. If both fit on one row, pad between them to exactly `width`.
/// 2. Otherwise wrap the label; if the value fits after the last
///    wrapped row, pad it onto that row.
/// 3. Otherwise the value goes right-aligned on its own row.
///
/// The value is never truncated.
pub fn left_right(left: &str, right: &str, width: usize) -> Vec<String> {
    let left_len = left.chars().count();
    let right_len = right.chars().count();

    if left_len + right_len + 1 <= width {
        let pad = width - left_len - right_len;
        return vec![format!("{left}{}{right}", " ".repeat(pad))];
    }

    let mut rows = wrap_text(left, width);
    match rows.pop() {
        Some(last) if last.chars().count() + right_len + 1 <= width => {
            let pad = width - last.chars().count() - right_len;
            rows.push(format!("{last}{}{right}", " ".repeat(pad)));
        }
        Some(last) => {
            rows.push(last);
            rows.push(format!("{right:>width$}"));
        }
        None => rows.push(format!("{right:>width$}")),
    }
    rows
}

/// Formats a business date for display, `DD/MM/YYYY`.
pub fn format_date_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn split_at_chars(text: &str, count: usize) -> (&str, &str) {
    match text.char_indices().nth(count) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder over the segment vocabulary.
///
/// ## Example
/// ```
/// use kasir_core::receipt::{ReceiptBuilder, Segment};
///
/// let mut doc = ReceiptBuilder::new(32);
/// doc.center().line("TOKO SEJAHTERA").left().rule('=');
/// let segments = doc.finish();
/// assert_eq!(segments[0], Segment::Init);
/// assert_eq!(segments.last(), Some(&Segment::Rule('=')));
/// ```
#[derive(Debug)]
pub struct ReceiptBuilder {
    width: usize,
    segments: Vec<Segment>,
}

impl ReceiptBuilder {
    /// Starts a document; the first segment is always [`Segment::Init`].
    pub fn new(width: usize) -> Self {
        ReceiptBuilder {
            width,
            segments: vec![Segment::Init],
        }
    }

    pub fn center(&mut self) -> &mut Self {
        self.segments.push(Segment::Align(Align::Center));
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.segments.push(Segment::Align(Align::Left));
        self
    }

    pub fn bold(&mut self) -> &mut Self {
        self.segments.push(Segment::Bold(true));
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.segments.push(Segment::Bold(false));
        self
    }

    pub fn double_size(&mut self) -> &mut Self {
        self.segments.push(Segment::DoubleSize(true));
        self
    }

    pub fn normal_size(&mut self) -> &mut Self {
        self.segments.push(Segment::DoubleSize(false));
        self
    }

    /// Pushes one row of text verbatim.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.segments.push(Segment::Line(text.into()));
        self
    }

    /// Horizontal rule across the full width.
    pub fn rule(&mut self, ch: char) -> &mut Self {
        self.segments.push(Segment::Rule(ch));
        self
    }

    /// Label/value row(s), laid out by [`left_right`].
    pub fn row(&mut self, left: &str, right: &str) -> &mut Self {
        for row in left_right(left, right, self.width) {
            self.line(row);
        }
        self
    }

    /// Wrapped, centered text block. Whitespace-only text emits nothing.
    pub fn centered(&mut self, text: &str) -> &mut Self {
        for row in center_lines(text, self.width) {
            self.line(row);
        }
        self
    }

    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.segments.push(Segment::Feed(lines));
        self
    }

    pub fn cut(&mut self) -> &mut Self {
        self.segments.push(Segment::Cut);
        self
    }

    pub fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// Renders transactions into receipt documents using a store profile
/// for the header and footer blocks.
#[derive(Debug, Clone)]
pub struct ReceiptFormatter {
    profile: StoreProfile,
    width: usize,
}

impl ReceiptFormatter {
    pub fn new(profile: StoreProfile) -> Self {
        ReceiptFormatter {
            profile,
            width: DEFAULT_RECEIPT_WIDTH,
        }
    }

    /// Overrides the column width (for 58mm vs 80mm paper).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lays out the full receipt for one transaction.
    pub fn format(&self, transaction: &Transaction) -> Vec<Segment> {
        let mut doc = ReceiptBuilder::new(self.width);
        // Double-size characters occupy two columns each.
        let half = (self.width / 2).max(1);

        doc.center().bold().double_size();
        for row in center_lines(&self.profile.name.to_uppercase(), half) {
            doc.line(row);
        }
        doc.normal_size().bold_off();
        doc.centered(&self.profile.address);
        doc.centered(&self.profile.phone);

        doc.left().rule('=');
        doc.row("No:", &transaction.id);
        doc.row("Tgl:", &format_date_display(transaction.date));
        doc.row("Jam:", &transaction.time.format("%H:%M:%S").to_string());
        doc.row("Kasir:", &transaction.cashier);

        doc.rule('-');
        doc.bold().row("Item", "Harga").bold_off();
        doc.rule('-');

        for item in &transaction.items {
            doc.line(item.name.clone());
            doc.row(
                &format!(" {} x {}", item.qty, item.price.format_plain()),
                &item.subtotal.format_plain(),
            );
        }

        doc.rule('-');
        doc.row("Subtotal", &transaction.subtotal.format_plain());
        if transaction.discount.is_positive() {
            doc.row("Diskon", &format!("-{}", transaction.discount.format_plain()));
        }
        doc.bold().row("TOTAL", &transaction.total.format_plain()).bold_off();
        doc.row("Bayar", &transaction.payment.format_plain());
        doc.row("Kembali", &transaction.change.format_plain());

        doc.rule('=');
        doc.center().centered(&self.profile.footer);
        doc.left().feed(3).cut();

        doc.finish()
    }
}

// ============================================================================
// Plain-text rendering
// ============================================================================

/// Renders a segment document as plain text for previews and logs.
///
/// Styling segments are dropped; rules expand to `width` characters.
pub fn render_plain(segments: &[Segment], width: usize) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Line(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Segment::Rule(ch) => {
                out.push_str(&ch.to_string().repeat(width));
                out.push('\n');
            }
            Segment::Feed(lines) => {
                for _ in 0..*lines {
                    out.push('\n');
                }
            }
            Segment::Init
            | Segment::Align(_)
            | Segment::Bold(_)
            | Segment::DoubleSize(_)
            | Segment::Cut => {}
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{LineItem, Transaction};
    use chrono::{NaiveDate, NaiveTime};

    const W: usize = 32;

    fn test_transaction() -> Transaction {
        Transaction {
            id: "TRX-20250812-000001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 12).unwrap(),
            time: NaiveTime::from_hms_opt(14, 5, 9).unwrap(),
            items: vec![LineItem::new(
                "AB12CD34",
                "PRD000001",
                "Kopi Hitam",
                Money::new(8_000),
                3,
            )],
            subtotal: Money::new(24_000),
            discount: Money::new(4_000),
            total: Money::new(20_000),
            payment: Money::new(20_000),
            change: Money::zero(),
            cashier: "Kasir".to_string(),
        }
    }

    fn lines_of(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Line(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_wrap_fits_single_row() {
        assert_eq!(wrap_text("ayam goreng", 32), vec!["ayam goreng"]);
    }

    #[test]
    fn test_wrap_is_greedy() {
        assert_eq!(
            wrap_text("ayam goreng spesial", 11),
            vec!["ayam goreng", "spesial"]
        );
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(
            wrap_text("ABCDEFGHIJKLMNOP", 6),
            vec!["ABCDEF", "GHIJKL", "MNOP"]
        );
        // An oversized word fills the space left on the current row.
        assert_eq!(wrap_text("ab CDEFGHIJ", 6), vec!["ab CDE", "FGHIJ"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_no_rows() {
        assert!(wrap_text("", 32).is_empty());
        assert!(wrap_text("   ", 32).is_empty());
    }

    #[test]
    fn test_left_right_pads_to_exact_width() {
        let rows = left_right("A", "B", W);
        assert_eq!(rows, vec![format!("A{}B", " ".repeat(30))]);
        assert_eq!(rows[0].chars().count(), W);
    }

    #[test]
    fn test_left_right_keeps_one_space_minimum() {
        let value = "X".repeat(23);
        let rows = left_right("Subtotal", &value, W);
        assert_eq!(rows, vec![format!("Subtotal {value}")]);
        assert_eq!(rows[0].chars().count(), W);
    }

    #[test]
    fn test_left_right_long_label_keeps_value_on_last_row() {
        let label = "A".repeat(40);
        let rows = left_right(&label, "99.000", W);
        assert_eq!(
            rows,
            vec![
                "A".repeat(32),
                format!("{}{}99.000", "A".repeat(8), " ".repeat(18)),
            ]
        );
        for row in &rows {
            assert_eq!(row.chars().count(), W);
        }
    }

    #[test]
    fn test_left_right_value_alone_when_nothing_fits() {
        let label = "A".repeat(40);
        let value = "B".repeat(30);
        let rows = left_right(&label, &value, W);
        assert_eq!(
            rows,
            vec!["A".repeat(32), "A".repeat(8), format!("  {value}")]
        );
        // Never truncated, even when longer than the width.
        let huge = "C".repeat(40);
        let rows = left_right("No:", &huge, W);
        assert!(rows.last().unwrap().contains(&huge));
    }

    #[test]
    fn test_center_lines_pads_both_sides() {
        assert_eq!(center_lines("TOKO SEJAHTERA", 16), vec![" TOKO SEJAHTERA "]);
        assert!(center_lines("", 16).is_empty());
    }

    #[test]
    fn test_format_date_display() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_display(date), "05/01/2025");
    }

    #[test]
    fn test_builder_starts_with_init() {
        let mut doc = ReceiptBuilder::new(W);
        doc.line("x");
        let segments = doc.finish();
        assert_eq!(segments[0], Segment::Init);
    }

    #[test]
    fn test_format_full_document() {
        let formatter = ReceiptFormatter::new(StoreProfile::default());
        let segments = formatter.format(&test_transaction());

        assert_eq!(segments[0], Segment::Init);
        let n = segments.len();
        assert_eq!(&segments[n - 2..], &[Segment::Feed(3), Segment::Cut]);

        let lines = lines_of(&segments);
        // Header block: default store name fits one double-size row.
        assert!(lines.contains(&" TOKO SEJAHTERA "));
        // Info rows are padded to the full width.
        assert!(lines.contains(&format!("No:{}TRX-20250812-000001", " ".repeat(10)).as_str()));
        assert!(lines.contains(&format!("Tgl:{}12/08/2025", " ".repeat(18)).as_str()));
        // Item block: name row, then qty x price against the subtotal.
        assert!(lines.contains(&"Kopi Hitam"));
        assert!(lines.contains(&format!(" 3 x 8.000{}24.000", " ".repeat(16)).as_str()));
        // Totals.
        assert!(lines.contains(&format!("Diskon{}-4.000", " ".repeat(20)).as_str()));
        assert!(lines.contains(&format!("TOTAL{}20.000", " ".repeat(21)).as_str()));
        assert!(lines.contains(&format!("Kembali{}0", " ".repeat(24)).as_str()));
    }

    #[test]
    fn test_format_bold_wraps_total_row() {
        let formatter = ReceiptFormatter::new(StoreProfile::default());
        let segments = formatter.format(&test_transaction());
        let total_row = format!("TOTAL{}20.000", " ".repeat(21));
        let idx = segments
            .iter()
            .position(|segment| matches!(segment, Segment::Line(text) if *text == total_row))
            .unwrap();
        assert_eq!(segments[idx - 1], Segment::Bold(true));
        assert_eq!(segments[idx + 1], Segment::Bold(false));
    }

    #[test]
    fn test_format_skips_empty_blocks() {
        let mut profile = StoreProfile::default();
        profile.address = String::new();
        profile.phone = "  ".to_string();
        let mut transaction = test_transaction();
        transaction.discount = Money::zero();
        transaction.total = Money::new(24_000);
        transaction.change = Money::new(1_000);
        transaction.payment = Money::new(25_000);

        let formatter = ReceiptFormatter::new(profile);
        let plain = render_plain(&formatter.format(&transaction), W);
        assert!(!plain.contains("Diskon"));
        assert!(!plain.contains("Jl. Contoh"));
        assert!(!plain.contains("08123456789"));
    }

    #[test]
    fn test_long_store_name_wraps_at_half_width() {
        let mut profile = StoreProfile::default();
        profile.name = "Warung Makan Sejahtera Abadi".to_string();
        let formatter = ReceiptFormatter::new(profile);
        let segments = formatter.format(&test_transaction());

        let lines = lines_of(&segments);
        assert!(lines.contains(&"  WARUNG MAKAN  "));
        assert!(lines.contains(&"SEJAHTERA ABADI "));
    }

    #[test]
    fn test_render_plain_expands_rules() {
        let formatter = ReceiptFormatter::new(StoreProfile::default());
        let plain = render_plain(&formatter.format(&test_transaction()), W);
        assert!(plain.contains(&"=".repeat(32)));
        assert!(plain.contains(&"-".repeat(32)));
        assert!(plain.ends_with("\n\n\n"));
    }
}
