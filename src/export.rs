//! JSON export and import of a chain
//!
//! A chain is written as an array of block objects in chain order, keys in
//! the order `index`, `previous_hash`, `timestamp`, `data`, `hash`. The
//! pretty form is indented by four spaces.

use crate::blockchain::{Block, Blockchain};
use crate::error::{ChainError, Result};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Serialize `blocks` into `writer`, pretty-printed or compact.
pub fn write_blocks<W: Write>(blocks: &[Block], writer: W, pretty: bool) -> Result<()> {
    if pretty {
        let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
        blocks.serialize(&mut ser)?;
    } else {
        let mut ser = Serializer::with_formatter(writer, CompactFormatter);
        blocks.serialize(&mut ser)?;
    }
    Ok(())
}

pub fn read_blocks<R: Read>(reader: R) -> Result<Vec<Block>> {
    Ok(serde_json::from_reader(reader)?)
}

impl Blockchain {
    /// Pretty-printed JSON array of every block.
    pub fn to_json(&self) -> Result<String> {
        self.render(true)
    }

    pub fn to_json_compact(&self) -> Result<String> {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> Result<String> {
        let mut buf = Vec::new();
        write_blocks(self.blocks(), &mut buf, pretty)?;
        String::from_utf8(buf).map_err(|e| ChainError::SerializationError(e.to_string()))
    }

    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<()> {
        write_blocks(self.blocks(), writer, pretty)
    }

    /// Rebuild a chain from its JSON export. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let blocks: Vec<Block> = serde_json::from_str(json)?;
        Blockchain::from_blocks(blocks)
    }

    pub fn export_to_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer, pretty)?;
        writer.flush()?;
        info!(path = %path.display(), blocks = self.len(), "exported chain");
        Ok(())
    }

    pub fn import_from_file(path: &Path) -> Result<Self> {
        let blocks = read_blocks(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), blocks = blocks.len(), "imported chain");
        Blockchain::from_blocks(blocks)
    }
}
