//! Viewer-style searches over the ddash listing

use symdex::config::SearchConfig;
use symdex::symbol::search::{FindSymbolRequest, ListSymbolsRequest, SymbolSearcher};
use symdex::{SymbolError, SymbolKind};

use crate::helpers::test_utils::{loaded_store, sample_symbols};

fn searcher() -> SymbolSearcher {
    SymbolSearcher::new(loaded_store().snapshot(), SearchConfig::default())
}

#[test]
fn test_find_symbol_from_json_request() {
    let request: FindSymbolRequest = serde_json::from_str(
        r#"{"query": "ddash.algorithm.compact", "mode": "exact"}"#,
    )
    .unwrap();

    let response = searcher().find_symbol(request).unwrap();
    assert_eq!(response.total_matches, 1);
    assert_eq!(response.symbols[0].kind, SymbolKind::Module);
    assert_eq!(response.search_mode_used, "exact");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["symbols"][0]["kind"], "module");
    assert_eq!(
        json["symbols"][0]["path"],
        "./ddash/algorithm/compact.html"
    );
}

#[test]
fn test_fuzzy_finds_misspelled_leaf() {
    let response = searcher()
        .find_symbol(FindSymbolRequest {
            query: "diferenceBy".to_string(),
            mode: Some("fuzzy".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        response.symbols[0].name,
        "ddash.algorithm.difference.differenceBy"
    );
}

#[test]
fn test_prefix_with_kind_and_attribute() {
    let response = searcher()
        .find_symbol(FindSymbolRequest {
            query: "ddash.algorithm".to_string(),
            kind: Some("functiondeclaration".to_string()),
            attribute: Some("ref".to_string()),
            ..Default::default()
        })
        .unwrap();

    let names: Vec<&str> = response.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ddash.algorithm.pull.pull",
            "ddash.algorithm.pull.pullBy",
            "ddash.algorithm.sort.maybeSort",
            "ddash.algorithm.sort.maybeSortBy",
        ]
    );
}

#[test]
fn test_limit_reports_total() {
    let response = searcher()
        .find_symbol(FindSymbolRequest {
            query: String::new(),
            limit: Some(5),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(response.total_matches, 136);
    assert_eq!(response.symbols.len(), 5);
}

#[test]
fn test_list_module_members() {
    let response = searcher()
        .list_symbols(ListSymbolsRequest {
            parent: Some("ddash.functional.pred".to_string()),
            kind_filter: Some(vec!["structdeclaration".to_string()]),
            group_by_kind: false,
        })
        .unwrap();

    let leaves: Vec<&str> = response.symbols.iter().map(|s| s.leaf.as_str()).collect();
    assert_eq!(leaves, vec!["eq", "lt"]);
}

#[test]
fn test_unknown_kind_in_list_request() {
    let err = searcher()
        .list_symbols(ListSymbolsRequest {
            parent: None,
            kind_filter: Some(vec!["interface".to_string()]),
            group_by_kind: true,
        })
        .unwrap_err();

    assert!(matches!(err, SymbolError::Kind(_)));
}

#[test]
fn test_global_store() {
    let store = symdex::symbol::global();
    store.load(sample_symbols()).unwrap();

    let record = store
        .find_by_exact_name("ddash.utils.try_.FrontOrRethrowException")
        .unwrap();
    assert_eq!(record.kind, SymbolKind::ClassDeclaration);
    assert!(store.generation() >= 1);
}
