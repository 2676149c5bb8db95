// Per-label symbol files.
//
// Layout of `<root>/<label>.symb` (all integers little endian):
//   0  magic  b"SYMB"
//   4  u16    format version
//   6  u32    image width
//   10 u32    image height
//   14 u32    image count
//   18 ..     count * width * height intensity bytes, image after image, row-major
use crate::error::Error;
use crate::types::SymbolImage;
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const EXTENSION: &str = "symb";
const MAGIC: &[u8; 4] = b"SYMB";
const VERSION: u16 = 1;
const HEADER_LEN: usize = 18;

/// Where a label's collection lives.
pub fn label_path(root: &Path, label: &str) -> PathBuf {
    root.join(format!("{label}.{EXTENSION}"))
}

/// Create the output directory if it doesn't exist.
pub fn ensure_root(root: &Path) -> Result<(), Error> {
    if !root.as_os_str().is_empty() && !root.exists() {
        fs::create_dir_all(root).map_err(|e| Error::io(root, e))?;
        info!("created output directory {}", root.display());
    }
    Ok(())
}

fn dimensions_of(images: &[SymbolImage]) -> Result<(u32, u32), Error> {
    let Some(first) = images.first() else {
        return Ok((0, 0));
    };
    let dims = first.dimensions();
    for img in &images[1..] {
        if img.dimensions() != dims {
            return Err(Error::DimensionMismatch { stored: dims, new: img.dimensions() });
        }
    }
    Ok(dims)
}

/// Serialize a collection. Every image must share one size.
pub fn encode(images: &[SymbolImage]) -> Result<Vec<u8>, Error> {
    let (w, h) = dimensions_of(images)?;
    let payload = images.len() * (w as usize) * (h as usize);
    let mut out = Vec::with_capacity(HEADER_LEN + payload);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&(images.len() as u32).to_le_bytes());
    for img in images {
        out.extend_from_slice(img.as_raw());
    }
    Ok(out)
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse a collection. `path` is only used in error messages.
pub fn decode(bytes: &[u8], path: &Path) -> Result<Vec<SymbolImage>, Error> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::format(path, "file shorter than header"));
    }
    if &bytes[0..4] != MAGIC {
        return Err(Error::format(path, "not a symbol file"));
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(Error::format(path, format!("unsupported version {version}")));
    }

    let w = read_u32(bytes, 6);
    let h = read_u32(bytes, 10);
    let count = read_u32(bytes, 14);
    let overflow = || Error::format(path, "header sizes overflow");
    let image_len = (w as u64).checked_mul(h as u64).ok_or_else(overflow)?;
    let expected = image_len.checked_mul(count as u64).ok_or_else(overflow)?;
    let payload = &bytes[HEADER_LEN..];
    if payload.len() as u64 != expected {
        return Err(Error::format(
            path,
            format!("expected {expected} payload bytes, found {}", payload.len()),
        ));
    }
    if count > 0 && image_len == 0 {
        return Err(Error::format(path, "zero-sized images"));
    }
    let image_len = usize::try_from(image_len).map_err(|_| overflow())?;

    let mut images = Vec::with_capacity(count as usize);
    if image_len > 0 {
        for chunk in payload.chunks_exact(image_len) {
            let img = SymbolImage::from_raw(w, h, chunk.to_vec())
                .ok_or_else(|| Error::format(path, "bad image buffer"))?;
            images.push(img);
        }
    }
    Ok(images)
}

/// Read a label's stored collection. A missing file is an empty collection.
pub fn load(path: &Path) -> Result<Vec<SymbolImage>, Error> {
    match fs::read(path) {
        Ok(bytes) => decode(&bytes, path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Append `pending` after whatever is stored at `path` and rewrite the file.
/// Returns the number of images now stored.
pub fn append(path: &Path, pending: &[SymbolImage]) -> Result<usize, Error> {
    let mut all = load(path)?;
    if pending.is_empty() {
        return Ok(all.len());
    }

    let new_dims = dimensions_of(pending)?;
    if let Some(first) = all.first() {
        if first.dimensions() != new_dims {
            return Err(Error::DimensionMismatch { stored: first.dimensions(), new: new_dims });
        }
    }

    all.extend(pending.iter().cloned());
    let bytes = encode(&all)?;
    fs::write(path, bytes).map_err(|e| Error::io(path, e))?;
    info!("saved {} new images to {} ({} total)", pending.len(), path.display(), all.len());
    Ok(all.len())
}

/// Write every stored image of `label` as `<root>/<label>/<nnnn>.png`.
pub fn export_png(root: &Path, label: &str) -> Result<Vec<PathBuf>, Error> {
    let images = load(&label_path(root, label))?;
    let dir = root.join(label);
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let mut written = Vec::with_capacity(images.len());
    for (i, img) in images.iter().enumerate() {
        let file = dir.join(format!("{i:04}.png"));
        img.save(&file)?;
        written.push(file);
    }
    info!("exported {} images to {}", written.len(), dir.display());
    Ok(written)
}
