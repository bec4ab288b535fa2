use crate::digest::DIGEST_TITLE;
use crate::types::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the digest as `<output_dir>/<date>.md`, replacing any earlier run from the same day.
pub fn write_digest(output_dir: &Path, date: &str, document: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.md", date));
    fs::write(&path, document)?;
    info!("Wrote digest {}", path.display());
    Ok(path)
}

/// Regenerate the pointer page that links to the latest digest.
pub fn write_index(index_path: &Path, latest_date: &str, digest_path: &Path) -> Result<()> {
    let index_dir = index_path.parent().unwrap_or_else(|| Path::new(""));
    if !index_dir.as_os_str().is_empty() {
        fs::create_dir_all(index_dir)?;
    }
    fs::write(index_path, render_index(index_dir, latest_date, digest_path))?;
    info!("Updated index {}", index_path.display());
    Ok(())
}

pub fn render_index(index_dir: &Path, latest_date: &str, digest_path: &Path) -> String {
    let link = link_from(index_dir, digest_path);
    let archive = digest_path
        .parent()
        .map(|p| format!("{}/", to_slashes(p)))
        .unwrap_or_default();

    format!(
        "# {title}\n\n- Latest digest: [{date}]({link})\n- Archive: {archive}\n- Usage: see README.md\n",
        title = DIGEST_TITLE,
        date = latest_date,
        link = link,
        archive = archive,
    )
}

/// `./`-relative when the digest sits under the index directory, otherwise the path unchanged.
fn link_from(index_dir: &Path, digest_path: &Path) -> String {
    match digest_path.strip_prefix(index_dir) {
        Ok(rel) if !index_dir.as_os_str().is_empty() => format!("./{}", to_slashes(rel)),
        _ => to_slashes(digest_path),
    }
}

fn to_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
