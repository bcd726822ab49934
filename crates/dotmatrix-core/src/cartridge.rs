use std::{fs, io, path::Path};

use thiserror::Error;

/// Largest ROM image the flat address space can hold.
pub const MAX_ROM_SIZE: usize = 0x10000;

const TITLE_RANGE: std::ops::Range<usize> = 0x0134..0x0144;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),
    #[error("ROM image is {len} bytes; at most 65536 fit in the address space")]
    TooLarge { len: usize },
}

#[derive(Debug)]
pub struct Cartridge {
    pub rom: Vec<u8>,
    pub title: String,
}

impl Cartridge {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Wrap an in-memory ROM image. No header validation beyond the size
    /// limit; the title bytes are only read for diagnostics.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CartridgeError> {
        if data.len() > MAX_ROM_SIZE {
            return Err(CartridgeError::TooLarge { len: data.len() });
        }
        let title = data
            .get(TITLE_RANGE)
            .map(|bytes| {
                bytes
                    .iter()
                    .take_while(|&&b| b != 0)
                    .filter(|b| b.is_ascii_graphic() || **b == b' ')
                    .map(|&b| b as char)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self { rom: data, title })
    }
}
