//! # Star Registry Node
//!
//! Request-level operations over the subsystem container: validation
//! requests, signature checks, gated star submission and block lookups.

use tracing::{info, warn};

use sr_01_ledger::{parse_height, BlockHeight, LedgerApi, StarBody, StarRecord, SubmissionGate};
use sr_02_validation::{ValidationEntry, ValidationRegistryApi};

use crate::adapters::RegistryGate;
use crate::container::SubsystemContainer;
use crate::errors::NodeError;
use crate::presentation::{encode_story, StarBlockView, StarSubmission};

/// State of the ledger after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub genesis_hash: String,
    pub chain_height: BlockHeight,
    /// Heights that failed the integrity audit.
    pub failing_heights: Vec<BlockHeight>,
}

impl StartupReport {
    pub fn is_healthy(&self) -> bool {
        self.failing_heights.is_empty()
    }
}

pub struct StarRegistryNode {
    container: SubsystemContainer,
}

impl StarRegistryNode {
    pub fn new(container: SubsystemContainer) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &SubsystemContainer {
        &self.container
    }

    /// Write genesis if needed and audit the stored chain.
    pub fn start(&self) -> Result<StartupReport, NodeError> {
        let ledger = &self.container.ledger;

        let genesis = ledger.ensure_genesis()?;
        let failing_heights = ledger.validate_chain()?;
        let chain_height = ledger.chain_height()?.unwrap_or(0);

        if failing_heights.is_empty() {
            info!("✅ Chain verified up to height {}", chain_height);
        } else {
            warn!(
                "⚠️ Chain integrity check failed at heights {:?}",
                failing_heights
            );
        }

        Ok(StartupReport {
            genesis_hash: genesis.hash,
            chain_height,
            failing_heights,
        })
    }

    pub fn request_validation(&self, address: &str) -> Result<ValidationEntry, NodeError> {
        Ok(self.container.registry.request_validation(address)?)
    }

    pub fn verify_signature(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<ValidationEntry, NodeError> {
        Ok(self
            .container
            .registry
            .verify_signature(address, signature)?)
    }

    /// Record a star claim for a validated address and consume its entry.
    pub fn submit_star(&self, submission: StarSubmission) -> Result<StarBlockView, NodeError> {
        let registry = self.container.registry.as_ref();
        let gate = RegistryGate::new(registry);

        // Pre-check so field errors never mask a gating refusal.
        gate.admit(&submission.address).map_err(|reason| {
            NodeError::ValidationExpiredOrAbsent {
                address: submission.address.clone(),
                reason,
            }
        })?;

        let star = submission.star;
        if star.ra.trim().is_empty() || star.dec.trim().is_empty() || star.story.trim().is_empty()
        {
            return Err(NodeError::invalid_input("dec, ra and story are mandatory"));
        }

        let body = StarBody {
            address: submission.address,
            star: StarRecord {
                ra: star.ra,
                dec: star.dec,
                mag: star.mag,
                cen: star.cen,
                story: encode_story(&star.story),
            },
        };

        let block = self.container.ledger.append_gated(body, &gate)?;
        Ok(block.into())
    }

    /// Block at a textual height, as given in a request path.
    pub fn block_at(&self, height: &str) -> Result<StarBlockView, NodeError> {
        let height = parse_height(height)?;
        Ok(self.container.ledger.get_block(height)?.into())
    }

    pub fn block_by_hash(&self, hash: &str) -> Result<StarBlockView, NodeError> {
        Ok(self.container.ledger.get_block_by_hash(hash)?.into())
    }

    pub fn blocks_by_address(&self, address: &str) -> Result<Vec<StarBlockView>, NodeError> {
        let blocks = self.container.ledger.get_blocks_by_wallet_address(address)?;
        Ok(blocks.into_iter().map(StarBlockView::from).collect())
    }

    pub fn chain_height(&self) -> Result<Option<BlockHeight>, NodeError> {
        Ok(self.container.ledger.chain_height()?)
    }

    /// Heights failing the integrity audit.
    pub fn validate_chain(&self) -> Result<Vec<BlockHeight>, NodeError> {
        Ok(self.container.ledger.validate_chain()?)
    }
}
