//! # Ledger Service Tests

use super::*;
use crate::domain::config::DEFAULT_GENESIS_NOTE;
use crate::domain::entities::StarRecord;
use crate::domain::errors::{GateRejection, KVStoreError};
use crate::ports::outbound::ScanResult;
use shared_types::ManualTimeSource;
use std::sync::Arc;

type TestLedger = LedgerService<InMemoryKVStore, JsonBlockSerializer, Arc<ManualTimeSource>>;

const START: u64 = 1_700_000_000;

fn make_test_service() -> (TestLedger, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(START));
    let deps = LedgerDependencies {
        kv_store: InMemoryKVStore::new(),
        serializer: JsonBlockSerializer,
        time_source: clock.clone(),
    };
    (LedgerService::new(deps, LedgerConfig::default()), clock)
}

fn star(address: &str, story: &str) -> StarBody {
    StarBody {
        address: address.to_string(),
        star: StarRecord {
            ra: "16h 29m 1.0s".to_string(),
            dec: "-26° 29' 24.9".to_string(),
            mag: None,
            cen: None,
            story: story.to_string(),
        },
    }
}

/// Gate with a fixed answer that records released addresses.
struct RecordingGate {
    answer: Result<(), GateRejection>,
    released: parking_lot::Mutex<Vec<String>>,
}

impl RecordingGate {
    fn new(answer: Result<(), GateRejection>) -> Self {
        Self {
            answer,
            released: parking_lot::Mutex::new(Vec::new()),
        }
    }
}

impl SubmissionGate for RecordingGate {
    fn admit(&self, _address: &str) -> Result<(), GateRejection> {
        self.answer
    }

    fn release(&self, address: &str) {
        self.released.lock().push(address.to_string());
    }
}

/// Store whose writes always fail.
#[derive(Default)]
struct FailingKVStore {
    inner: InMemoryKVStore,
}

impl KeyValueStore for FailingKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), KVStoreError> {
        Err(KVStoreError::IOError {
            message: "disk unplugged".to_string(),
        })
    }

    fn scan_all(&self) -> Result<ScanResult, KVStoreError> {
        self.inner.scan_all()
    }

    fn count(&self) -> Result<u64, KVStoreError> {
        self.inner.count()
    }
}

// =============================================================================
// Genesis and appends
// =============================================================================

#[test]
fn test_genesis_is_written_once() {
    let (service, clock) = make_test_service();

    let genesis = service.ensure_genesis().unwrap();
    clock.advance(10);
    let again = service.ensure_genesis().unwrap();

    assert_eq!(genesis, again);
    assert_eq!(genesis.height, 0);
    assert_eq!(genesis.previous_block_hash, "");
    assert_eq!(genesis.body, BlockBody::Note(DEFAULT_GENESIS_NOTE.to_string()));
    assert_eq!(service.chain_height().unwrap(), Some(0));
}

#[test]
fn test_empty_ledger_has_no_height() {
    let (service, _) = make_test_service();
    assert_eq!(service.chain_height().unwrap(), None);
    assert!(service.validate_chain().unwrap().is_empty());
}

#[test]
fn test_append_links_to_previous_block() {
    let (service, clock) = make_test_service();
    let genesis = service.ensure_genesis().unwrap();

    clock.advance(5);
    let block = service.append_block(star("1A2b", "74657374").into()).unwrap();

    assert_eq!(block.height, 1);
    assert_eq!(block.previous_block_hash, genesis.hash);
    assert_eq!(block.time, START + 5);
    assert!(block.has_valid_hash());
    assert_eq!(service.get_block(1).unwrap(), block);
}

#[test]
fn test_heights_are_gap_free() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();

    for expected in 1..=5 {
        let block = service.append_block(star("1A2b", "00").into()).unwrap();
        assert_eq!(block.height, expected);
    }

    assert_eq!(service.chain_height().unwrap(), Some(5));
    for height in 1..=5 {
        let block = service.get_block(height).unwrap();
        let previous = service.get_block(height - 1).unwrap();
        assert_eq!(block.previous_block_hash, previous.hash);
    }
}

#[test]
fn test_concurrent_appends_stay_sequential() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let service = &service;
            scope.spawn(move || {
                for _ in 0..10 {
                    let address = format!("1Worker{}", worker);
                    service.append_block(star(&address, "00").into()).unwrap();
                }
            });
        }
    });

    assert_eq!(service.chain_height().unwrap(), Some(40));
    assert!(service.validate_chain().unwrap().is_empty());
}

#[test]
fn test_storage_failure_aborts_append() {
    let deps = LedgerDependencies {
        kv_store: FailingKVStore::default(),
        serializer: JsonBlockSerializer,
        time_source: SystemTimeSource,
    };
    let service = LedgerService::new(deps, LedgerConfig::default());

    let result = service.append_block(star("1A2b", "00").into());

    assert!(matches!(result, Err(LedgerError::StorageFailure { .. })));
    assert_eq!(service.chain_height().unwrap(), None);
    assert!(matches!(
        service.get_block(0),
        Err(LedgerError::HeightNotFound { height: 0 })
    ));
}

// =============================================================================
// Gated appends
// =============================================================================

#[test]
fn test_gate_refusal_blocks_append() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();

    for rejection in [GateRejection::NotPending, GateRejection::NotValidated] {
        let gate = RecordingGate::new(Err(rejection));
        let result = service.append_gated(star("1A2b", "00"), &gate);

        match result {
            Err(LedgerError::ValidationExpiredOrAbsent { address, reason }) => {
                assert_eq!(address, "1A2b");
                assert_eq!(reason, rejection);
            }
            other => panic!("Expected ValidationExpiredOrAbsent, got {:?}", other),
        }
        assert!(gate.released.lock().is_empty());
    }

    assert_eq!(service.chain_height().unwrap(), Some(0));
}

#[test]
fn test_admitted_append_releases_address() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();
    let gate = RecordingGate::new(Ok(()));

    let block = service.append_gated(star("1A2b", "00"), &gate).unwrap();

    assert_eq!(block.height, 1);
    assert_eq!(block.body.address(), Some("1A2b"));
    assert_eq!(*gate.released.lock(), vec!["1A2b".to_string()]);
}

#[test]
fn test_failed_write_does_not_release() {
    let deps = LedgerDependencies {
        kv_store: FailingKVStore::default(),
        serializer: JsonBlockSerializer,
        time_source: SystemTimeSource,
    };
    let service = LedgerService::new(deps, LedgerConfig::default());
    let gate = RecordingGate::new(Ok(()));

    assert!(service.append_gated(star("1A2b", "00"), &gate).is_err());
    assert!(gate.released.lock().is_empty());
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_get_block_missing_height() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();

    let err = service.get_block(7).unwrap_err();
    assert_eq!(err, LedgerError::HeightNotFound { height: 7 });
    assert!(err.is_not_found());
}

#[test]
fn test_get_block_by_hash() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();
    let block = service.append_block(star("1A2b", "00").into()).unwrap();

    assert_eq!(service.get_block_by_hash(&block.hash).unwrap(), block);
    assert!(matches!(
        service.get_block_by_hash("deadbeef"),
        Err(LedgerError::HashNotFound { .. })
    ));
}

#[test]
fn test_lookup_by_address_in_height_order() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();

    service.append_block(star("1Alice", "01").into()).unwrap();
    service.append_block(star("1Bob", "02").into()).unwrap();
    service.append_block(star("1Alice", "03").into()).unwrap();

    let blocks = service.get_blocks_by_wallet_address("1Alice").unwrap();
    let heights: Vec<_> = blocks.iter().map(|b| b.height).collect();
    assert_eq!(heights, vec![1, 3]);
    assert!(blocks.iter().all(|b| b.body.address() == Some("1Alice")));

    assert!(matches!(
        service.get_blocks_by_wallet_address("1Nobody"),
        Err(LedgerError::AddressNotFound { .. })
    ));
}

// =============================================================================
// Chain audit and corruption
// =============================================================================

#[test]
fn test_out_of_band_mutation_is_detected() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();
    for _ in 0..3 {
        service.append_block(star("1A2b", "00").into()).unwrap();
    }
    assert!(service.validate_chain().unwrap().is_empty());

    let mut tampered = service.get_block(2).unwrap();
    tampered.body = star("1Mallory", "00").into();
    let bytes = JsonBlockSerializer.serialize(&tampered).unwrap();
    service.kv_store.write().put(&height_key(2), &bytes).unwrap();

    assert_eq!(service.validate_chain().unwrap(), vec![2]);
}

#[test]
fn test_undecodable_record_is_corrupt() {
    let (service, _) = make_test_service();
    service.ensure_genesis().unwrap();
    service
        .kv_store
        .write()
        .put(&height_key(1), b"{not a block")
        .unwrap();

    assert!(matches!(
        service.get_block(1),
        Err(LedgerError::CorruptRecord { .. })
    ));
    assert!(matches!(
        service.validate_chain(),
        Err(LedgerError::CorruptRecord { .. })
    ));
}

#[test]
fn test_record_under_wrong_key_is_corrupt() {
    let (service, _) = make_test_service();
    let genesis = service.ensure_genesis().unwrap();
    let bytes = JsonBlockSerializer.serialize(&genesis).unwrap();
    service.kv_store.write().put(&height_key(1), &bytes).unwrap();

    match service.get_block(1) {
        Err(LedgerError::CorruptRecord { key, .. }) => {
            assert_eq!(key, "00000000000000000001");
        }
        other => panic!("Expected CorruptRecord, got {:?}", other),
    }
}

#[test]
fn test_new_in_memory_ledger() {
    let service = LedgerService::new_in_memory(LedgerConfig {
        genesis_note: "hello".to_string(),
    });
    let genesis = service.ensure_genesis().unwrap();
    assert_eq!(genesis.body, BlockBody::Note("hello".to_string()));
}
