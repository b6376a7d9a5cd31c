//! Append-only JSONL block journal
//!
//! One line per committed transaction. Each block carries the hash of its
//! predecessor, so a truncated or edited journal is detected on open.

use crate::error::JournalError;
use crate::write_set::{WriteOp, WriteSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// prev_hash of the first block
pub const GENESIS_HASH: &str = "GENESIS";

/// One committed write set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub tx_id: String,
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub function: String,
    pub writes: WriteSet,
    pub prev_hash: String,
    pub hash: String,
}

impl Block {
    /// Build a block and seal it with its hash
    pub fn seal(
        number: u64,
        tx_id: impl Into<String>,
        channel: impl Into<String>,
        function: impl Into<String>,
        writes: WriteSet,
        prev_hash: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            number,
            tx_id: tx_id.into(),
            timestamp: Utc::now(),
            channel: channel.into(),
            function: function.into(),
            writes,
            prev_hash: prev_hash.into(),
            hash: String::new(),
        };
        block.hash = calculate_block_hash(&block);
        block
    }
}

/// SHA256 over every field except `hash`
pub fn calculate_block_hash(block: &Block) -> String {
    let mut hasher = Sha256::new();

    hasher.update(block.number.to_le_bytes());
    hasher.update(block.prev_hash.as_bytes());
    hasher.update(block.timestamp.to_rfc3339().as_bytes());
    hasher.update(block.tx_id.as_bytes());
    hasher.update(block.channel.as_bytes());
    hasher.update(block.function.as_bytes());

    for (key, op) in block.writes.iter() {
        hasher.update((key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
        match op {
            WriteOp::Put { value } => {
                hasher.update(b"P");
                hasher.update((value.len() as u64).to_le_bytes());
                hasher.update(value);
            }
            WriteOp::Delete => hasher.update(b"D"),
        }
    }

    hex::encode(hasher.finalize())
}

/// Verify links, hashes and numbering of a block sequence
pub fn verify_chain(blocks: &[Block]) -> Result<(), JournalError> {
    let mut prev_hash = GENESIS_HASH.to_string();

    for (i, block) in blocks.iter().enumerate() {
        let expected_number = i as u64 + 1;
        if block.number != expected_number {
            return Err(JournalError::InvalidSequence {
                expected: expected_number,
                actual: block.number,
            });
        }

        if block.prev_hash != prev_hash {
            return Err(JournalError::BrokenChain {
                number: block.number,
                expected: prev_hash,
                actual: block.prev_hash.clone(),
            });
        }

        let calculated = calculate_block_hash(block);
        if block.hash != calculated {
            return Err(JournalError::InvalidHash {
                number: block.number,
                expected: calculated,
                actual: block.hash.clone(),
            });
        }

        prev_hash = block.hash.clone();
    }

    Ok(())
}

/// Append-only block journal.
///
/// The file only ever holds complete blocks: a failed append is cut back to
/// the previous length, and an unterminated trailing line left by an
/// interrupted process is dropped on open.
pub struct Journal {
    path: PathBuf,
    file: File,
    /// Length of the file up to the end of the last complete block
    len: u64,
}

/// How a journal file ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Clean,
    /// Last block is complete but lacks its newline
    Unterminated,
    /// Trailing bytes that do not form a block
    Torn,
}

impl Journal {
    pub const FILE_NAME: &'static str = "blocks.jsonl";

    /// Open (or create) the journal in `dir` and return the verified blocks it holds
    pub fn open(dir: impl AsRef<Path>) -> Result<(Self, Vec<Block>), JournalError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::FILE_NAME);

        let (blocks, len, tail) = if path.exists() {
            scan(&fs::read(&path)?)?
        } else {
            (Vec::new(), 0, Tail::Clean)
        };
        verify_chain(&blocks)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut journal = Self { path, file, len };

        match tail {
            Tail::Clean => {}
            Tail::Unterminated => {
                journal.file.write_all(b"\n")?;
                journal.len += 1;
            }
            Tail::Torn => {
                let size = journal.file.metadata()?.len();
                warn!(
                    path = %journal.path.display(),
                    dropped = size - journal.len,
                    "dropping incomplete trailing block"
                );
                journal.file.set_len(journal.len)?;
            }
        }

        debug!(path = %journal.path.display(), blocks = blocks.len(), "journal opened");
        Ok((journal, blocks))
    }

    /// Read every block from a journal file, skipping blank lines.
    ///
    /// An incomplete trailing line is ignored.
    pub fn read_blocks(path: &Path) -> Result<Vec<Block>, JournalError> {
        let (blocks, _, _) = scan(&fs::read(path)?)?;
        Ok(blocks)
    }

    /// Append a block and sync it to disk.
    ///
    /// On failure the file is truncated back to its last complete block.
    pub fn append(&mut self, block: &Block) -> Result<(), JournalError> {
        let mut line = serde_json::to_string(block)?;
        line.push('\n');

        // A previous rollback may itself have failed
        if self.file.metadata()?.len() != self.len {
            self.file.set_len(self.len)?;
        }

        if let Err(err) = self.write_line(line.as_bytes()) {
            if let Err(rollback) = self.file.set_len(self.len) {
                warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "failed to truncate journal after a failed append"
                );
            }
            return Err(err.into());
        }

        self.len += line.len() as u64;
        Ok(())
    }

    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.file.write_all(line)?;
        self.file.sync_data()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse journal bytes into blocks.
///
/// Returns the blocks, the length covered by complete blocks and how the
/// file ends. A newline-terminated line that does not parse is an error.
fn scan(bytes: &[u8]) -> Result<(Vec<Block>, u64, Tail), JournalError> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let rest = &bytes[offset..];
        let Some(end) = rest.iter().position(|b| *b == b'\n') else {
            return Ok(match serde_json::from_slice::<Block>(rest) {
                Ok(block) => {
                    blocks.push(block);
                    (blocks, bytes.len() as u64, Tail::Unterminated)
                }
                Err(_) => (blocks, offset as u64, Tail::Torn),
            });
        };

        let line = &rest[..end];
        if !line.iter().all(u8::is_ascii_whitespace) {
            blocks.push(serde_json::from_slice(line)?);
        }
        offset += end + 1;
    }

    Ok((blocks, offset as u64, Tail::Clean))
}
