use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::geojson::types::GroupCollection;

/// Write one `{label}.geojson` per group into `dir`, creating it if needed.
/// Returns the paths written, in group order.
pub fn write_collections(dir: &Path, groups: &[GroupCollection]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let path = dir.join(format!("{}.geojson", group.label));
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, &group.collection).map_err(|e| {
            io::Error::other(format!("Failed to serialize {}: {}", group.label, e))
        })?;
        out.flush()?;

        log::info!(
            "Wrote {} features to {}",
            group.collection.features.len(),
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
