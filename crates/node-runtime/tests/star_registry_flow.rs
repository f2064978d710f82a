//! # Star Registry Flow Tests
//!
//! Drives the node end to end: request a challenge, sign it with a real
//! secp256k1 key, submit a star and read it back. Time and expiry timers are
//! manual so window behavior is deterministic.

use std::sync::Arc;

use node_runtime::container::{StorageBackend, StorageConfig};
use node_runtime::{
    ErrorKind, NodeConfig, NodeError, RuntimeServices, StarInput, StarRegistryNode,
    StarSubmission, SubsystemContainer,
};
use shared_crypto::WalletKeyPair;
use shared_types::{ManualTimeSource, TimeSource};
use sr_01_ledger::GateRejection;
use sr_02_validation::{
    ExpiryScheduler, ManualExpiryScheduler, SignatureVerifier, ValidationRegistryApi,
    ValidationStatus, WalletMessageVerifier,
};

const START: u64 = 1_700_000_000;
const WINDOW: u64 = 300;

struct TestNode {
    node: StarRegistryNode,
    clock: Arc<ManualTimeSource>,
    scheduler: Arc<ManualExpiryScheduler<Arc<ManualTimeSource>>>,
}

impl TestNode {
    /// Advance the clock and fire whatever timers came due.
    fn advance(&self, secs: u64) {
        self.clock.advance(secs);
        self.scheduler.run_due();
    }

    /// Request and sign a challenge for `wallet`.
    fn validate(&self, wallet: &WalletKeyPair) {
        let address = wallet.address();
        let entry = self.node.request_validation(&address).unwrap();
        let signature = wallet.sign_message(&entry.message).unwrap();
        let verified = self.node.verify_signature(&address, &signature).unwrap();
        assert!(verified.validated);
    }
}

fn start_node(config: NodeConfig) -> Result<TestNode, NodeError> {
    let clock = Arc::new(ManualTimeSource::new(START));
    let scheduler = Arc::new(ManualExpiryScheduler::new(clock.clone()));
    let services = RuntimeServices {
        time_source: clock.clone() as Arc<dyn TimeSource>,
        scheduler: scheduler.clone() as Arc<dyn ExpiryScheduler>,
        verifier: Box::new(WalletMessageVerifier) as Box<dyn SignatureVerifier>,
    };
    let node = StarRegistryNode::new(SubsystemContainer::new(config, services)?);
    node.start()?;
    Ok(TestNode {
        node,
        clock,
        scheduler,
    })
}

fn memory_node() -> TestNode {
    start_node(NodeConfig::for_testing()).unwrap()
}

fn file_config(dir: &std::path::Path) -> NodeConfig {
    NodeConfig {
        storage: StorageConfig {
            data_dir: dir.to_path_buf(),
            backend: StorageBackend::File,
        },
        ..NodeConfig::default()
    }
}

fn submission(address: &str, story: &str) -> StarSubmission {
    StarSubmission {
        address: address.to_string(),
        star: StarInput {
            ra: "16h 29m".to_string(),
            dec: "-26° 29'".to_string(),
            mag: None,
            cen: None,
            story: story.to_string(),
        },
    }
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn test_star_lands_after_genesis() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    let address = wallet.address();

    let entry = t.node.request_validation(&address).unwrap();
    assert_eq!(entry.message, format!("{}:{}:starRegistry", address, START));
    assert_eq!(entry.validation_window, WINDOW);

    let signature = wallet.sign_message(&entry.message).unwrap();
    let verified = t.node.verify_signature(&address, &signature).unwrap();
    assert!(verified.validated);
    assert_eq!(verified.status, ValidationStatus::Verified);

    let block = t.node.submit_star(submission(&address, "testing")).unwrap();
    let genesis = t.node.block_at("0").unwrap();

    assert_eq!(block.height, 1);
    assert_eq!(block.previous_block_hash, genesis.hash);
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["body"]["address"], address);
    assert_eq!(json["body"]["star"]["story"], "74657374696e67");
    assert_eq!(json["body"]["star"]["storyDecoded"], "testing");

    // One submission per validation.
    let registry = &t.node.container().registry;
    assert!(!registry.is_address_pending(&address));
    assert!(registry.entry(&address).is_none());
}

#[test]
fn test_repeat_request_returns_same_challenge() {
    let t = memory_node();
    let address = WalletKeyPair::generate().address();

    let first = t.node.request_validation(&address).unwrap();
    t.advance(10);
    let second = t.node.request_validation(&address).unwrap();

    assert_eq!(first.message, second.message);
    assert_eq!(first.request_timestamp, second.request_timestamp);
    assert_eq!(second.validation_window, WINDOW - 10);
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn test_submission_without_request_is_refused() {
    let t = memory_node();
    let address = WalletKeyPair::generate().address();

    match t.node.submit_star(submission(&address, "testing")) {
        Err(NodeError::ValidationExpiredOrAbsent { reason, .. }) => {
            assert_eq!(reason, GateRejection::NotPending);
        }
        other => panic!("Expected ValidationExpiredOrAbsent, got {:?}", other),
    }
    assert_eq!(t.node.chain_height().unwrap(), Some(0));
}

#[test]
fn test_submission_before_signature_is_refused() {
    let t = memory_node();
    let address = WalletKeyPair::generate().address();
    t.node.request_validation(&address).unwrap();

    let err = t.node.submit_star(submission(&address, "testing")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValidationExpiredOrAbsent);
    assert!(matches!(
        err,
        NodeError::ValidationExpiredOrAbsent {
            reason: GateRejection::NotValidated,
            ..
        }
    ));
}

#[test]
fn test_wrong_signature_keeps_entry_unvalidated() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    let impostor = WalletKeyPair::generate();
    let address = wallet.address();

    let entry = t.node.request_validation(&address).unwrap();
    let forged = impostor.sign_message(&entry.message).unwrap();

    let err = t.node.verify_signature(&address, &forged).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VerificationFailed);

    // Entry survives; the owner can still sign.
    let signature = wallet.sign_message(&entry.message).unwrap();
    assert!(t.node.verify_signature(&address, &signature).unwrap().validated);
}

#[test]
fn test_expired_window_blocks_submission() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    let address = wallet.address();
    let entry = t.node.request_validation(&address).unwrap();

    t.advance(WINDOW);

    let signature = wallet.sign_message(&entry.message).unwrap();
    let err = t.node.verify_signature(&address, &signature).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationExpiredOrAbsent);
    assert!(matches!(
        t.node.submit_star(submission(&address, "testing")),
        Err(NodeError::ValidationExpiredOrAbsent {
            reason: GateRejection::NotPending,
            ..
        })
    ));
}

#[test]
fn test_validated_entry_outlives_window() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    t.validate(&wallet);

    t.advance(WINDOW * 2);

    let block = t.node.submit_star(submission(&wallet.address(), "late")).unwrap();
    assert_eq!(block.height, 1);
}

#[test]
fn test_second_submission_needs_new_validation() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    let address = wallet.address();

    t.validate(&wallet);
    t.node.submit_star(submission(&address, "first")).unwrap();
    assert!(t.node.submit_star(submission(&address, "second")).is_err());

    t.validate(&wallet);
    let block = t.node.submit_star(submission(&address, "second")).unwrap();
    assert_eq!(block.height, 2);
}

#[test]
fn test_missing_fields_rejected_without_consuming() {
    let t = memory_node();
    let wallet = WalletKeyPair::generate();
    let address = wallet.address();
    t.validate(&wallet);

    let mut incomplete = submission(&address, "testing");
    incomplete.star.dec = String::new();
    let err = t.node.submit_star(incomplete).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("dec, ra and story are mandatory"));

    assert!(t.node.submit_star(submission(&address, "testing")).is_ok());
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_lookups() {
    let t = memory_node();
    let alice = WalletKeyPair::generate();
    let bob = WalletKeyPair::generate();

    t.validate(&alice);
    let first = t.node.submit_star(submission(&alice.address(), "one")).unwrap();
    t.validate(&bob);
    t.node.submit_star(submission(&bob.address(), "two")).unwrap();
    t.validate(&alice);
    t.node.submit_star(submission(&alice.address(), "three")).unwrap();

    let heights: Vec<_> = t
        .node
        .blocks_by_address(&alice.address())
        .unwrap()
        .iter()
        .map(|b| b.height)
        .collect();
    assert_eq!(heights, vec![1, 3]);

    assert_eq!(t.node.block_by_hash(&first.hash).unwrap(), first);
    assert_eq!(t.node.block_at("1").unwrap(), first);

    let unknown = WalletKeyPair::generate().address();
    assert_eq!(
        t.node.blocks_by_address(&unknown).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(t.node.block_at("9").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        t.node.block_by_hash("00").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    for bad in ["abc", "-1"] {
        assert_eq!(
            t.node.block_at(bad).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
    assert!(t.node.validate_chain().unwrap().is_empty());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let wallet = WalletKeyPair::generate();

    let stored = {
        let t = start_node(file_config(dir.path())).unwrap();
        t.validate(&wallet);
        t.node.submit_star(submission(&wallet.address(), "kept")).unwrap()
    };

    let t = start_node(file_config(dir.path())).unwrap();
    assert_eq!(t.node.chain_height().unwrap(), Some(1));
    assert_eq!(t.node.block_at("1").unwrap(), stored);
    assert!(t.node.validate_chain().unwrap().is_empty());
}

#[test]
fn test_data_dir_is_single_writer() {
    let dir = tempfile::tempdir().unwrap();
    let _running = start_node(file_config(dir.path())).unwrap();

    match start_node(file_config(dir.path())) {
        Err(err) => {
            assert!(matches!(err, NodeError::Lock(_)));
            assert_eq!(err.kind(), ErrorKind::Startup);
        }
        Ok(_) => panic!("Second node must not open a locked data directory"),
    }
}
