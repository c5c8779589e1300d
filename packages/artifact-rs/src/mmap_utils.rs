use crate::error::{ArtifactError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Open a file and map it into memory (read-only)
pub fn mmap_file(path: &Path) -> Result<Mmap> {
    if !path.exists() {
        return Err(ArtifactError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(ArtifactError::IoError)?;
    let mmap = unsafe { Mmap::map(&file).map_err(ArtifactError::IoError)? };
    Ok(mmap)
}
