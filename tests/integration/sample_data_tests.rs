//! Queries against the real ddash symbol listing

use symdex::{RawSymbol, SymbolError, SymbolKind, SymbolRecord, SymbolStore};

use crate::helpers::test_utils::{
    create_test_record, fixture_path, loaded_store, names, sample_records, sample_symbols,
};

#[test]
fn test_fixture_parses_completely() {
    let symbols = sample_symbols();
    assert_eq!(symbols.len(), 136);
    assert!(symbols
        .iter()
        .all(|s| s.name.is_some() && s.kind.is_some() && s.path.is_some()));
}

#[test]
fn test_every_record_found_by_exact_name() {
    let store = loaded_store();

    for record in sample_records() {
        assert_eq!(store.find_by_exact_name(&record.name).unwrap(), record);
    }
}

#[test]
fn test_records_round_trip_to_input() {
    let store = loaded_store();
    let back: Vec<RawSymbol> = store.find_by_prefix("").map(RawSymbol::from).collect();

    assert_eq!(back, sample_symbols());
}

#[test]
fn test_empty_prefix_returns_everything_in_order() {
    let store = loaded_store();
    let all: Vec<SymbolRecord> = store.find_by_prefix("").collect();

    assert_eq!(all, sample_records());
    assert_eq!(all[0].name, "ddash.algorithm.compact");
    assert_eq!(all[135].name, "ddash.utils");
}

#[test]
fn test_prefix_compact() {
    let store = loaded_store();

    assert_eq!(
        names(store.find_by_prefix("ddash.algorithm.compact")),
        vec![
            "ddash.algorithm.compact",
            "ddash.algorithm.compact.compact",
            "ddash.algorithm.compact.compactBy",
            "ddash.algorithm.compact.compactValues",
        ]
    );
}

#[test]
fn test_prefix_sequences_are_restartable() {
    let store = loaded_store();

    let first: Vec<String> = names(store.find_by_prefix("ddash.range.front"));
    let second: Vec<String> = names(store.find_by_prefix("ddash.range.front"));
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);

    // A partially consumed sequence leaves fresh ones unaffected
    let mut partial = store.find_by_prefix("ddash.range.front");
    partial.next();
    assert_eq!(store.find_by_prefix("ddash.range.front").count(), 5);
}

#[test]
fn test_filter_by_kind_module() {
    let store = loaded_store();
    let modules: Vec<SymbolRecord> = store.filter_by_kind_name("module").unwrap().collect();

    let module_names: Vec<&str> = modules.iter().map(|r| r.name.as_str()).collect();
    assert!(module_names.contains(&"ddash.algorithm.compact"));
    assert!(module_names.contains(&"ddash.algorithm.concat"));
    assert!(module_names.contains(&"ddash.utils"));
    assert!(modules.iter().all(|r| r.kind == SymbolKind::Module));
    assert!(!module_names.contains(&"ddash.algorithm.compact.compact"));
    assert_eq!(modules.len(), 45);
}

#[test]
fn test_kind_counts() {
    let snapshot = loaded_store().snapshot();

    assert_eq!(
        snapshot.kind_counts(),
        vec![
            (SymbolKind::Module, 45),
            (SymbolKind::FunctionDeclaration, 61),
            (SymbolKind::TemplateDeclaration, 6),
            (SymbolKind::StructDeclaration, 6),
            (SymbolKind::ClassDeclaration, 1),
            (SymbolKind::EnumMemberDeclaration, 6),
            (SymbolKind::AliasDeclaration, 10),
            (SymbolKind::VariableDeclaration, 1),
        ]
    );
    assert_eq!(snapshot.list_attributes(), vec!["auto", "ref", "const"]);
}

#[test]
fn test_filter_by_attribute() {
    let store = loaded_store();

    assert_eq!(
        names(store.filter_by_attribute("const")),
        vec![
            "ddash.utils.expect.Expect.isExpected",
            "ddash.utils.expect.Expect.opEquals",
            "ddash.utils.expect.Expect.toString",
        ]
    );
    assert_eq!(store.filter_by_attribute("ref").count(), 6);
    assert_eq!(store.filter_by_attribute("auto").count(), 44);
    assert_eq!(store.filter_by_attribute("pure").count(), 0);
}

#[test]
fn test_top_level_modules_listed_last_are_children_of_package() {
    let snapshot = loaded_store().snapshot();
    let children: Vec<&str> = snapshot
        .children_of("ddash")
        .map(|r| r.name.as_str())
        .collect();

    assert_eq!(
        children,
        vec![
            "ddash.algorithm",
            "ddash.functional",
            "ddash.lang",
            "ddash.range",
            "ddash.utils",
        ]
    );
}

#[test]
fn test_missing_path_keeps_previous_snapshot() {
    let store = loaded_store();

    let mut broken = sample_symbols();
    broken[10].path = None;

    let err = store.load(broken).unwrap_err();
    assert!(matches!(err, SymbolError::Validation { position: 10, .. }));

    assert_eq!(store.generation(), 1);
    assert_eq!(store.find_by_prefix("ddash.algorithm.compact").count(), 4);
    assert_eq!(store.find_by_prefix("").count(), 136);
}

#[test]
fn test_unknown_kind_keeps_previous_snapshot() {
    let store = SymbolStore::default();
    store
        .load(vec![create_test_record("old.module", SymbolKind::Module)])
        .unwrap();

    let mut symbols = sample_symbols();
    symbols[0].kind = Some("interfacedeclaration".to_string());

    assert!(store.load(symbols).unwrap_err().is_validation());
    assert_eq!(names(store.find_by_prefix("")), vec!["old.module"]);
}

#[test]
fn test_loading_twice_is_idempotent() {
    let once = loaded_store();
    let twice = loaded_store();
    twice.load(sample_symbols()).unwrap();

    assert_eq!(
        once.find_by_prefix("").collect::<Vec<_>>(),
        twice.find_by_prefix("").collect::<Vec<_>>()
    );
    assert_eq!(
        once.filter_by_kind(SymbolKind::AliasDeclaration).collect::<Vec<_>>(),
        twice.filter_by_kind(SymbolKind::AliasDeclaration).collect::<Vec<_>>()
    );
    assert_eq!(
        once.filter_by_attribute("ref").collect::<Vec<_>>(),
        twice.filter_by_attribute("ref").collect::<Vec<_>>()
    );
    assert_eq!(
        once.find_by_exact_name("ddash.utils.match.match").unwrap(),
        twice.find_by_exact_name("ddash.utils.match.match").unwrap()
    );
}

#[test]
fn test_load_file_and_json_equivalence() {
    let store = SymbolStore::default();
    store
        .load_file(&fixture_path(), symdex::SourceFormat::Auto)
        .unwrap();

    let json = symdex::source::json::to_string_pretty(store.snapshot().iter()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("symbols.json");
    std::fs::write(&json_path, json).unwrap();

    let from_json = SymbolStore::default();
    from_json
        .load_file(&json_path, symdex::SourceFormat::Auto)
        .unwrap();

    assert_eq!(
        from_json.find_by_prefix("").collect::<Vec<_>>(),
        store.find_by_prefix("").collect::<Vec<_>>()
    );
}
