mod common;

use chrono::Utc;
use serde_json::Value;

use ship_lineup::refinery::Refinery;
use ship_lineup::service::{ResponseOptions, ShipsEnvelope};

const SOURCE: &str = "https://www.portodesantos.com.br/informacoes-operacionais/operacoes-portuarias/navegacao-e-movimento-de-navios/navios-esperados-carga/";

fn envelope_json(query: Option<&str>) -> Value {
    let result = Refinery::new().process_html(common::HEADERLESS_PAGE, 2025);
    let options = ResponseOptions::from_query(query);
    let body = ShipsEnvelope::new(SOURCE, Utc::now(), &result.records, options.include_raw)
        .to_json(options.pretty)
        .unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn test_envelope_carries_every_record() {
    let value = envelope_json(None);

    assert_eq!(value["source"], SOURCE);
    assert!(value["updatedAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(value["count"], 3);
    assert_eq!(value["ships"].as_array().unwrap().len(), 3);
}

#[test]
fn test_record_json_shape() {
    let value = envelope_json(None);
    let ship = &value["ships"][0];

    for key in [
        "imo", "ship", "flag", "flag_en", "length_m", "draft_m", "nav", "arrival_text",
        "arrival_iso", "arrival_ts", "notice_code", "notice_en", "agency", "operation", "goods",
        "goods_en", "weight", "voyage", "duv", "duv_class", "pier", "terminal", "cargo_category",
        "cargo_category_en",
    ] {
        assert!(ship.get(key).is_some(), "missing key {key}");
    }
    assert!(ship["imo"].is_null());
    assert_eq!(ship["cargo_category"], "container");
    assert_eq!(ship["length_m"], 300.0);
    assert_eq!(ship["arrival_ts"], 1_757_994_840_000_i64);
    assert!(ship.get("raw").is_none());
}

#[test]
fn test_raw_cells_on_request() {
    let value = envelope_json(Some("raw=1"));
    let raw = value["ships"][2]["raw"].as_array().unwrap();

    assert_eq!(raw.len(), 15);
    assert_eq!(raw[0], "TANK ONE");
    assert_eq!(raw[4], "");
}

#[test]
fn test_liquid_category_label() {
    let value = envelope_json(Some("pretty=1"));
    assert_eq!(value["ships"][2]["cargo_category"], "liquid");
    assert_eq!(value["ships"][2]["cargo_category_en"], "Liquid / Oil");
}
