// * Markup Table Extractor
// * Streams HTML through the html5ever tokenizer and emits one TableCandidate per
// * <table> as soon as its end tag (or end of input) is seen. No DOM is built, so
// * tables are recognised while the upstream body is still arriving.

use futures::{pin_mut, Stream, StreamExt};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::config::constants::{MAX_COLSPAN, STREAM_CHANNEL_DEPTH};
use crate::refinery::text::collapse_whitespace;

/// One table row's cell texts in source order
pub type RawRow = Vec<String>;

/// Failure while driving the extractor from a stream
#[derive(Debug, Error)]
pub enum ExtractError<E> {
    #[error("Body stream failed: {0}")]
    Stream(E),

    #[error("Extraction worker did not complete: {0}")]
    Worker(#[source] JoinError),
}

/// Headers and body rows of one `<table>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCandidate {
    pub header_labels: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl TableCandidate {
    /// Number of columns every row of this candidate carries
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.header_labels.len())
    }

    /// Larger of the header count and the first row's cell count
    pub fn width(&self) -> usize {
        let first_row = self.rows.first().map(Vec::len).unwrap_or(0);
        first_row.max(self.header_labels.len())
    }
}

// * Text of the cell being read, split into fragments at every inner tag
struct CellBuilder {
    fragments: Vec<String>,
    current: String,
    // * Columns covered by the cell (colspan)
    span: usize,
}

impl CellBuilder {
    fn new(span: usize) -> Self {
        Self {
            fragments: Vec::new(),
            current: String::new(),
            span,
        }
    }

    fn break_fragment(&mut self) {
        let fragment = collapse_whitespace(&self.current);
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_fragment();
        self.fragments.join(" ")
    }
}

struct RowBuilder {
    cells: Vec<String>,
    cell: Option<CellBuilder>,
    all_header_cells: bool,
    in_thead: bool,
}

impl RowBuilder {
    fn new(in_thead: bool) -> Self {
        Self {
            cells: Vec::new(),
            cell: None,
            all_header_cells: true,
            in_thead,
        }
    }

    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            // * A spanned cell's text sits in its first column; the rest stay empty
            let span = cell.span;
            self.cells.push(cell.finish());
            self.cells
                .extend(std::iter::repeat(String::new()).take(span.saturating_sub(1)));
        }
    }
}

#[derive(Default)]
struct TableBuilder {
    header_labels: Vec<String>,
    rows: Vec<RawRow>,
    row: Option<RowBuilder>,
    in_thead: bool,
}

impl TableBuilder {
    fn start_row(&mut self) {
        self.finish_row();
        self.row = Some(RowBuilder::new(self.in_thead));
    }

    fn start_cell(&mut self, is_header: bool, span: usize) {
        if self.row.is_none() {
            self.start_row();
        }
        if let Some(row) = self.row.as_mut() {
            row.finish_cell();
            row.all_header_cells &= is_header;
            row.cell = Some(CellBuilder::new(span));
        }
    }

    fn finish_cell(&mut self) {
        if let Some(row) = self.row.as_mut() {
            row.finish_cell();
        }
    }

    fn finish_row(&mut self) {
        let Some(mut row) = self.row.take() else {
            return;
        };
        row.finish_cell();
        if row.cells.is_empty() {
            return;
        }

        // * <thead> rows, or a leading all-<th> row, are header labels
        let leading_th_row = row.all_header_cells && self.rows.is_empty();
        if row.in_thead || leading_th_row {
            // ? Grouped headers span several rows; the widest one names the columns
            if row.cells.len() >= self.header_labels.len() {
                self.header_labels = row.cells;
            }
        } else {
            self.rows.push(row.cells);
        }
    }

    fn open_cell(&mut self) -> Option<&mut CellBuilder> {
        self.row.as_mut().and_then(|row| row.cell.as_mut())
    }

    fn finish(mut self) -> TableCandidate {
        self.finish_row();
        let mut candidate = TableCandidate {
            header_labels: self.header_labels,
            rows: self.rows,
        };
        // * Missing trailing cells become empty strings, never absent columns
        let columns = candidate.column_count();
        for row in &mut candidate.rows {
            row.resize(columns, String::new());
        }
        candidate
    }
}

// * Tokenizer sink: tracks the stack of open tables
#[derive(Default)]
struct TableSink {
    open: Vec<TableBuilder>,
    completed: VecDeque<TableCandidate>,
    in_raw_text: bool,
}

impl TableSink {
    fn on_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name: &str = &tag.name;
        let is_start = tag.kind == TagKind::StartTag;

        // * Raw-text element bodies are never markup or cell content
        if let Some(kind) = raw_text_kind(name) {
            if !is_start {
                self.in_raw_text = false;
                return TokenSinkResult::Continue;
            }
            if !tag.self_closing {
                self.in_raw_text = true;
                return TokenSinkResult::RawData(kind);
            }
        }

        if name == "table" && is_start {
            if let Some(cell) = self.open.last_mut().and_then(TableBuilder::open_cell) {
                cell.break_fragment();
            }
            self.open.push(TableBuilder::default());
            return TokenSinkResult::Continue;
        }

        let Some(table) = self.open.last_mut() else {
            return TokenSinkResult::Continue;
        };

        // * Any tag inside a cell separates text fragments
        if let Some(cell) = table.open_cell() {
            cell.break_fragment();
        }

        match (name, is_start) {
            ("table", false) => self.close_table(),
            ("thead", true) => {
                table.finish_row();
                table.in_thead = true;
            }
            ("thead", false) => {
                table.finish_row();
                table.in_thead = false;
            }
            ("tbody" | "tfoot", true) => {
                table.finish_row();
                table.in_thead = false;
            }
            ("tr", true) => table.start_row(),
            ("tr", false) => table.finish_row(),
            ("td", true) => table.start_cell(false, colspan(&tag)),
            ("th", true) => table.start_cell(true, colspan(&tag)),
            ("td" | "th", false) => table.finish_cell(),
            _ => {}
        }

        TokenSinkResult::Continue
    }

    fn on_text(&mut self, text: &str) {
        if self.in_raw_text {
            return;
        }
        if let Some(cell) = self.open.last_mut().and_then(TableBuilder::open_cell) {
            cell.current.push_str(text);
        }
    }

    fn close_table(&mut self) {
        if let Some(table) = self.open.pop() {
            let candidate = table.finish();
            debug!(
                headers = candidate.header_labels.len(),
                rows = candidate.rows.len(),
                columns = candidate.column_count(),
                "Table recognised"
            );
            self.completed.push_back(candidate);
        }
    }

    fn close_all(&mut self) {
        while !self.open.is_empty() {
            self.close_table();
        }
    }
}

fn raw_text_kind(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}

// * Missing or unparseable colspan counts as 1
fn colspan(tag: &Tag) -> usize {
    tag.attrs
        .iter()
        .find(|attr| &*attr.name.local == "colspan")
        .and_then(|attr| attr.value.trim().parse::<usize>().ok())
        .map(|span| span.clamp(1, MAX_COLSPAN))
        .unwrap_or(1)
}

impl TokenSink for TableSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => return self.on_tag(tag),
            Token::CharacterTokens(text) => self.on_text(&text),
            Token::EOFToken => self.close_all(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Incremental table extractor.
///
/// Feed byte chunks as they arrive and pull completed tables with
/// [`TableExtractor::next_table`]. Malformed markup never fails: unclosed
/// elements are closed implicitly and stray end tags are ignored.
///
/// # Example
/// ```ignore
/// let mut extractor = TableExtractor::new();
/// extractor.feed(b"<table><tr><td>A</td></tr></table>");
/// let table = extractor.next_table().unwrap();
/// assert_eq!(table.rows, vec![vec!["A".to_string()]]);
/// ```
pub struct TableExtractor {
    tokenizer: Tokenizer<TableSink>,
    queue: BufferQueue,
    // * Trailing bytes of an incomplete UTF-8 sequence, carried to the next chunk
    pending: Vec<u8>,
}

impl TableExtractor {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(TableSink::default(), TokenizerOpts::default()),
            queue: BufferQueue::new(),
            pending: Vec::new(),
        }
    }

    /// Feeds the next chunk of the document
    pub fn feed(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        let (text, consumed) = decode_utf8_prefix(&self.pending);
        self.pending.drain(..consumed);
        self.push_text(text);
    }

    /// Pops the next completed table, in the order tables were closed
    pub fn next_table(&mut self) -> Option<TableCandidate> {
        self.tokenizer.sink.completed.pop_front()
    }

    /// Ends the document and returns every table not yet pulled
    pub fn finish(mut self) -> Vec<TableCandidate> {
        if !self.pending.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.push_text(tail);
        }
        self.tokenizer.end();
        self.tokenizer.sink.close_all();
        self.tokenizer.sink.completed.drain(..).collect()
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        self.queue.push_back(StrTendril::from(text));
        // * The sink never yields script handles, so feeding always runs to completion
        let _ = self.tokenizer.feed(&mut self.queue);
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes the longest prefix of `bytes` that does not end inside a UTF-8
/// sequence. Invalid sequences become U+FFFD. Returns the text and the number
/// of bytes consumed.
fn decode_utf8_prefix(bytes: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                rest = &[];
                break;
            }
            Err(error) => {
                let (valid, after) = rest.split_at(error.valid_up_to());
                text.push_str(&String::from_utf8_lossy(valid));
                match error.error_len() {
                    Some(invalid) => {
                        text.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[invalid..];
                    }
                    None => {
                        rest = after;
                        break;
                    }
                }
            }
        }
    }

    (text, bytes.len() - rest.len())
}

/// Extracts every table of a complete document
pub fn extract_tables(html: &str) -> Vec<TableCandidate> {
    let mut extractor = TableExtractor::new();
    extractor.feed(html.as_bytes());
    extractor.finish()
}

/// Drives the extractor from a stream of body chunks.
///
/// The tokenizer is not `Send`, so it lives on a blocking worker and chunks
/// reach it over a bounded channel; tables are still recognised as chunks
/// arrive. The first stream error aborts extraction and discards partially
/// built tables. A worker that does not complete is an error, never an empty
/// page. Must be called within a tokio runtime.
pub async fn extract_tables_from_stream<S, B, E>(
    stream: S,
) -> Result<Vec<TableCandidate>, ExtractError<E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    pin_mut!(stream);
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(STREAM_CHANNEL_DEPTH);

    let worker = tokio::task::spawn_blocking(move || {
        let mut extractor = TableExtractor::new();
        let mut tables = Vec::new();
        let mut bytes_seen: usize = 0;

        while let Some(chunk) = rx.blocking_recv() {
            bytes_seen += chunk.len();
            extractor.feed(&chunk);
            while let Some(table) = extractor.next_table() {
                debug!(index = tables.len(), bytes_seen, "Table completed mid-stream");
                tables.push(table);
            }
        }

        tables.extend(extractor.finish());
        tables
    });

    while let Some(chunk) = stream.next().await {
        // * Dropping the sender on error lets the worker wind down; its output is discarded
        let chunk = chunk.map_err(ExtractError::Stream)?;
        if tx.send(chunk.as_ref().to_vec()).await.is_err() {
            break;
        }
    }
    drop(tx);

    match worker.await {
        Ok(tables) => Ok(tables),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!(error = %e, "Extraction worker cancelled");
            Err(ExtractError::Worker(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_thead_and_tbody() {
        let html = r#"
            <table>
                <thead><tr><th>Navio</th><th>Bandeira</th></tr></thead>
                <tbody>
                    <tr><td>MSC LORENA</td><td>Panamá</td></tr>
                    <tr><td>MAERSK X</td><td>Libéria</td></tr>
                </tbody>
            </table>
        "#;

        let tables = extract_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header_labels, strings(&["Navio", "Bandeira"]));
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[1], strings(&["MAERSK X", "Libéria"]));
    }

    #[test]
    fn test_fragments_joined_with_single_space() {
        let html = "<table><tr><td> <b>MSC</b>\n  <i>LORENA</i> </td><td>A<br>B</td><td>x&nbsp;y</td></tr></table>";
        let tables = extract_tables(html);
        assert_eq!(tables[0].rows[0], strings(&["MSC LORENA", "A B", "x y"]));
    }

    #[test]
    fn test_empty_cells_are_kept() {
        let html = "<table><tr><td>a</td><td></td><td> </td><td>d</td></tr><tr><td>e</td></tr></table>";
        let tables = extract_tables(html);
        assert_eq!(tables[0].rows[0], strings(&["a", "", "", "d"]));
        // * Short rows are padded to the table's column count
        assert_eq!(tables[0].rows[1], strings(&["e", "", "", ""]));
    }

    #[test]
    fn test_leading_th_row_without_thead() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let tables = extract_tables(html);
        assert_eq!(tables[0].header_labels, strings(&["A", "B"]));
        assert_eq!(tables[0].rows, vec![strings(&["1", "2"])]);
    }

    #[test]
    fn test_headerless_table() {
        let html = "<table><tr><td>1</td><td>2</td></tr></table>";
        let tables = extract_tables(html);
        assert!(tables[0].header_labels.is_empty());
        assert_eq!(tables[0].width(), 2);
    }

    #[test]
    fn test_multiple_and_nested_tables() {
        let html = r#"
            <table id="layout"><tr><td>
                <table><tr><td>inner</td></tr></table>
            </td><td>outer</td></tr></table>
            <table><tr><td>second</td></tr></table>
        "#;
        let tables = extract_tables(html);
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0].rows[0], strings(&["inner"]));
        assert_eq!(tables[1].rows[0], strings(&["", "outer"]));
        assert_eq!(tables[2].rows[0], strings(&["second"]));
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = "</td></tr><table><tr><td>a<td>b</tr><tr><td>c</table></td><table><td>d";
        let tables = extract_tables(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows, vec![strings(&["a", "b"]), strings(&["c", ""])]);
        assert_eq!(tables[1].rows, vec![strings(&["d"])]);
    }

    #[test]
    fn test_script_content_is_ignored() {
        let html = "<table><tr><td>a<script>var x = '<td>';</script></td><td><style>td{}</style>b</td></tr></table>";
        let tables = extract_tables(html);
        assert_eq!(tables[0].rows[0], strings(&["a", "b"]));
    }

    #[test]
    fn test_incremental_feed_across_utf8_boundaries() {
        let html = "<table><tr><td>Agência</td><td>Panamá</td></tr></table><p>tail</p>".as_bytes();
        let mut extractor = TableExtractor::new();

        for chunk in html.chunks(3) {
            extractor.feed(chunk);
        }
        let table = extractor.next_table().expect("table completes before finish");
        assert_eq!(table.rows[0], strings(&["Agência", "Panamá"]));
        assert!(extractor.finish().is_empty());
    }

    #[test]
    fn test_table_available_before_document_ends() {
        let mut extractor = TableExtractor::new();
        extractor.feed(b"<html><body><table><tr><td>1</td></tr></table>");
        assert!(extractor.next_table().is_some());
        extractor.feed(b"<table><tr><td>2</td>");
        assert!(extractor.next_table().is_none());

        let rest = extractor.finish();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].rows[0], strings(&["2"]));
    }

    #[test]
    fn test_colspan_keeps_columns_aligned() {
        let html = r#"<table>
            <tr><th colspan="2">Comp/Calado</th><th>Navio</th></tr>
            <tr><td>180</td><td>10</td><td>X</td></tr>
            <tr><td colspan="3">Total: 1 navio</td></tr>
            <tr><td colspan="abc">a</td><td colspan="0">b</td></tr>
        </table>"#;
        let tables = extract_tables(html);

        assert_eq!(tables[0].header_labels, strings(&["Comp/Calado", "", "Navio"]));
        assert_eq!(tables[0].rows[0], strings(&["180", "10", "X"]));
        assert_eq!(tables[0].rows[1], strings(&["Total: 1 navio", "", ""]));
        assert_eq!(tables[0].rows[2], strings(&["a", "b", ""]));
    }

    #[test]
    fn test_textarea_and_title_content_is_ignored() {
        let html = r#"<html><head><title>Navios <table></title></head><body>
            <textarea><table><tr><td>x</td></tr></table></textarea>
            <table><tr><td>a</td></tr></table>
        </body></html>"#;
        let tables = extract_tables(html);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![strings(&["a"])]);
    }

    #[tokio::test]
    async fn test_stream_error_is_reported_as_stream_failure() {
        let chunks: Vec<Result<&[u8], &str>> = vec![Ok(&b"<table><tr><td>a"[..]), Err("reset")];
        let err = extract_tables_from_stream(futures::stream::iter(chunks))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Stream("reset")));
    }

    #[test]
    fn test_decode_utf8_prefix() {
        let bytes = "ação".as_bytes();
        let (text, consumed) = decode_utf8_prefix(&bytes[..2]);
        assert_eq!(text, "a");
        assert_eq!(consumed, 1);

        let (text, consumed) = decode_utf8_prefix(&[b'a', 0xff, b'b']);
        assert_eq!(text, "a\u{fffd}b");
        assert_eq!(consumed, 3);
    }
}
