//! Loader for Volatility3 ISF symbol tables (`*.json.xz`).
//!
//! Only `user_types` is kept, in file order. Its entries are read lazily so
//! a malformed type only matters if somebody looks at it.

use std::{
    fs,
    io::Read,
    path::Path,
};

extern crate log;
use log::{debug, trace};

extern crate serde;
use serde::Deserialize;

use serde_json::{Map, Value};

mod err;
mod types;

pub use err::{
    IsfParserError,
    Result,
};

pub use types::{
    TypeKind,
    UserType,
};

const XZ_MAGIC: [u8; 6] = [0xfd, b'7', b'z', b'X', b'Z', 0x00];

#[derive(PartialEq, Debug, Deserialize)]
pub struct SymbolDb {
    user_types: Map<String, Value>,
}

impl SymbolDb {
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let db: Self = serde_json::from_slice(data)?;
        debug!("parsed {} user types", db.user_types.len());
        Ok(db)
    }

    /// Decompress an xz stream, or a legacy `.lzma` stream when the xz
    /// magic is absent, and parse the JSON inside.
    pub fn from_compressed<R>(reader: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let mut json = Vec::new();
        if data.starts_with(&XZ_MAGIC) {
            lzma_rs::xz_decompress(&mut data.as_slice(), &mut json)?;
        } else {
            trace!("no xz magic, trying legacy lzma");
            lzma_rs::lzma_decompress(&mut data.as_slice(), &mut json)?;
        }
        debug!("decompressed {} -> {} bytes", data.len(), json.len());
        Self::from_json(&json)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = fs::File::open(path)?;
        Self::from_compressed(&mut file)
    }

    pub fn user_types(&self) -> impl Iterator<Item = (&str, UserType<'_>)> {
        self.user_types
            .iter()
            .map(|(name, v)| (name.as_str(), UserType::from_value(v)))
    }

    pub fn user_type(&self, name: &str) -> Option<UserType<'_>> {
        self.user_types.get(name).map(UserType::from_value)
    }

    /// First struct, in file order, whose name contains `pattern`.
    pub fn find_struct(&self, pattern: &str) -> Option<(&str, UserType<'_>)> {
        self.user_types()
            .filter(|(name, _)| name.contains(pattern))
            .find(|(name, t)| {
                if !t.is_struct() {
                    trace!("skip {}: kind {:?}", name, t.kind);
                }
                t.is_struct()
            })
    }
}
