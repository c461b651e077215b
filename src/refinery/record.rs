// * Record Assembler
// * One ShipRecord per retained row; unmapped or unreadable fields are absent.

use serde::Serialize;

use crate::refinery::cargo::{categorize, CargoCategory};
use crate::refinery::columns::{ColumnMap, SemanticKey};
use crate::refinery::dates::parse_arrival;
use crate::refinery::dimensions::parse_length_draft;
use crate::refinery::identifiers::extract_imo;
use crate::refinery::tables::RawRow;
use crate::refinery::text::non_empty;
use crate::refinery::translate::{translate_flag, translate_goods, translate_notice};
use crate::refinery::vocabulary::Vocabulary;

/// Normalised vessel call
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShipRecord {
    pub imo: Option<String>,
    pub ship: Option<String>,
    pub flag: Option<String>,
    pub flag_en: Option<String>,
    pub length_m: Option<f64>,
    pub draft_m: Option<f64>,
    pub nav: Option<String>,
    pub arrival_text: Option<String>,
    pub arrival_iso: Option<String>,
    pub arrival_ts: Option<i64>,
    pub notice_code: Option<String>,
    pub notice_en: Option<String>,
    pub agency: Option<String>,
    pub operation: Option<String>,
    pub goods: Option<String>,
    pub goods_en: Option<String>,
    pub weight: Option<String>,
    pub voyage: Option<String>,
    pub duv: Option<String>,
    pub duv_class: Option<String>,
    pub pier: Option<String>,
    pub terminal: Option<String>,
    pub cargo_category: Option<CargoCategory>,
    pub cargo_category_en: Option<String>,
    /// Source cells, always kept; serialised only on request
    #[serde(skip)]
    pub raw: RawRow,
}

/// Per-request inputs shared by every row
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub columns: &'a ColumnMap,
    pub vocab: &'a Vocabulary,
    /// Year applied to arrival dates written without one
    pub default_year: i32,
}

/// Builds the record for one row
pub fn assemble_record(row: &RawRow, ctx: &AssemblyContext<'_>) -> ShipRecord {
    let field = |key: SemanticKey| ctx.columns.cell(row, key).and_then(non_empty);

    let ship = field(SemanticKey::Ship);
    let flag = field(SemanticKey::Flag);
    let nav = field(SemanticKey::Nav);
    let arrival_text = field(SemanticKey::Arrival);
    let notice_code = field(SemanticKey::Notice);
    let agency = field(SemanticKey::Agency);
    let operation = field(SemanticKey::Operation);
    let goods = field(SemanticKey::Goods);
    let weight = field(SemanticKey::Weight);
    let voyage = field(SemanticKey::Voyage);
    let duv = field(SemanticKey::Duv);
    let duv_class = field(SemanticKey::DuvClass);
    let pier = field(SemanticKey::Pier);
    let terminal = field(SemanticKey::Terminal);

    let dimensions = field(SemanticKey::LengthDraft)
        .map(|text| parse_length_draft(&text))
        .unwrap_or_default();

    // * ISO text and epoch come from one parse, so they are present together
    let arrival = arrival_text
        .as_deref()
        .and_then(|text| parse_arrival(text, ctx.default_year));

    let imo = extract_imo(
        row,
        ctx.columns.position_of(SemanticKey::Imo),
        ctx.columns.position_of(SemanticKey::Duv),
    );

    let category = categorize(
        [
            goods.as_deref(),
            terminal.as_deref(),
            pier.as_deref(),
            agency.as_deref(),
        ],
        ctx.vocab,
    );

    ShipRecord {
        imo,
        flag_en: flag.as_deref().and_then(|f| translate_flag(f, ctx.vocab)),
        flag,
        ship,
        length_m: dimensions.length_m,
        draft_m: dimensions.draft_m,
        nav,
        arrival_iso: arrival.map(|a| a.iso()),
        arrival_ts: arrival.map(|a| a.epoch_millis()),
        arrival_text,
        notice_en: notice_code.as_deref().and_then(translate_notice),
        notice_code,
        agency,
        operation,
        goods_en: goods.as_deref().and_then(|g| translate_goods(g, ctx.vocab)),
        goods,
        weight,
        voyage,
        duv,
        duv_class,
        pier,
        terminal,
        cargo_category: Some(category),
        cargo_category_en: Some(category.label_en().to_string()),
        raw: row.clone(),
    }
}
