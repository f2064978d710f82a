//! # Wire Presentation
//!
//! Request and response shapes for the star-submission flow. Stories are
//! stored hex-encoded; responses carry the decoded text alongside.

use serde::{Deserialize, Serialize};

use sr_01_ledger::{Block, BlockBody, BlockHeight, StarRecord};

/// Star claim as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StarSubmission {
    pub address: String,
    pub star: StarInput,
}

/// Star fields with the story in plain text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StarInput {
    pub ra: String,
    pub dec: String,
    pub mag: Option<String>,
    pub cen: Option<String>,
    pub story: String,
}

/// Block as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarBlockView {
    pub height: BlockHeight,
    pub time: u64,
    pub previous_block_hash: String,
    pub hash: String,
    pub body: BodyView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BodyView {
    Star { address: String, star: StarView },
    Note(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarView {
    pub ra: String,
    pub dec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,
    /// Hex as stored.
    pub story: String,
    pub story_decoded: String,
}

impl From<&StarRecord> for StarView {
    fn from(star: &StarRecord) -> Self {
        Self {
            ra: star.ra.clone(),
            dec: star.dec.clone(),
            mag: star.mag.clone(),
            cen: star.cen.clone(),
            story: star.story.clone(),
            story_decoded: decode_story(&star.story),
        }
    }
}

impl From<Block> for StarBlockView {
    fn from(block: Block) -> Self {
        let body = match block.body {
            BlockBody::Star(body) => BodyView::Star {
                star: StarView::from(&body.star),
                address: body.address,
            },
            BlockBody::Note(note) => BodyView::Note(note),
        };
        Self {
            height: block.height,
            time: block.time,
            previous_block_hash: block.previous_block_hash,
            hash: block.hash,
            body,
        }
    }
}

/// Hex of the story's UTF-8 bytes.
pub fn encode_story(story: &str) -> String {
    hex::encode(story.as_bytes())
}

/// Inverse of [`encode_story`]. Invalid UTF-8 is replaced; non-hex input is
/// returned as is.
pub fn decode_story(hex_story: &str) -> String {
    match hex::decode(hex_story) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => hex_story.to_string(),
    }
}
