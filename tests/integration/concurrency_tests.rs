//! Readers racing snapshot swaps

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use symdex::{SymbolKind, SymbolRecord, SymbolStore};

use crate::helpers::test_utils::{create_test_record, sample_records};

fn small_listing() -> Vec<SymbolRecord> {
    vec![
        create_test_record("tiny", SymbolKind::Module),
        create_test_record("tiny.a", SymbolKind::FunctionDeclaration),
        create_test_record("tiny.b", SymbolKind::FunctionDeclaration),
    ]
}

#[test]
fn test_readers_only_see_complete_snapshots() {
    let big = sample_records();
    let small = small_listing();

    let store = SymbolStore::default();
    store.load(big.clone()).unwrap();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let seen: Vec<SymbolRecord> = store.find_by_prefix("").collect();
                    assert!(
                        seen == big || seen == small,
                        "observed a partial snapshot of {} records",
                        seen.len()
                    );
                }
            });
        }

        scope.spawn(|| {
            for i in 0..50 {
                let listing = if i % 2 == 0 { small.clone() } else { big.clone() };
                store.load(listing).unwrap();
            }
            done.store(true, Ordering::Release);
        });
    });

    assert_eq!(store.generation(), 51);
    assert_eq!(store.snapshot().len(), big.len());
}

#[test]
fn test_failed_loads_race_with_readers() {
    let store = SymbolStore::default();
    store.load(small_listing()).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..20 {
                let mut bad: Vec<symdex::RawSymbol> =
                    sample_records().into_iter().map(Into::into).collect();
                bad[100].name = Some(String::new());
                assert!(store.load(bad).is_err());
            }
        });

        scope.spawn(|| {
            for _ in 0..200 {
                assert_eq!(store.find_by_prefix("tiny").count(), 3);
            }
        });
    });

    assert_eq!(store.generation(), 1);
}
