// * Configuration Constants
// * Central location for all configurable thresholds, timeouts and layouts

use crate::refinery::columns::SemanticKey;

// * Expected-vessels listing published by the port authority
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://www.portodesantos.com.br/informacoes-operacionais/operacoes-portuarias/navegacao-e-movimento-de-navios/navios-esperados-carga/";

// * Sent on every upstream request unless overridden
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ship-lineup/0.1)";

// * Upstream fetch timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// * Body chunks buffered between the network and the extraction worker
pub const STREAM_CHANNEL_DEPTH: usize = 32;

// * Largest colspan honoured; larger values are clamped (HTML caps it at 1000)
pub const MAX_COLSPAN: usize = 1000;

// * Default bind address of the HTTP service
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

// * Rows with fewer non-blank cells are separators/summaries, not vessels (inclusive bound)
pub const MIN_FILLED_CELLS: usize = 12;

// * A headerless table whose first row matches this many synonyms has it promoted to headers
pub const MIN_PROMOTED_HEADER_MATCHES: usize = 3;

// * Upper plausibility bound for a draft when splitting concatenated "length+draft" cells
pub const MAX_DRAFT_M: f64 = 30.0;

// * Wall-clock offset of the source listing (UTC-3, no daylight saving)
pub const SOURCE_UTC_OFFSET_SECS: i32 = -3 * 3600;

// * Positional column order for headerless pages that carry an "operation" column
pub const LAYOUT_WITH_OPERATION: &[SemanticKey] = &[
    SemanticKey::Ship,
    SemanticKey::Flag,
    SemanticKey::LengthDraft,
    SemanticKey::Nav,
    SemanticKey::Arrival,
    SemanticKey::Notice,
    SemanticKey::Agency,
    SemanticKey::Operation,
    SemanticKey::Goods,
    SemanticKey::Weight,
    SemanticKey::Voyage,
    SemanticKey::Duv,
    SemanticKey::DuvClass,
    SemanticKey::Pier,
    SemanticKey::Terminal,
];

// * Positional column order for headerless pages without the "operation" column
pub const LAYOUT_WITHOUT_OPERATION: &[SemanticKey] = &[
    SemanticKey::Ship,
    SemanticKey::Flag,
    SemanticKey::LengthDraft,
    SemanticKey::Nav,
    SemanticKey::Arrival,
    SemanticKey::Notice,
    SemanticKey::Agency,
    SemanticKey::Goods,
    SemanticKey::Weight,
    SemanticKey::Voyage,
    SemanticKey::Duv,
    SemanticKey::DuvClass,
    SemanticKey::Pier,
    SemanticKey::Terminal,
];
