pub mod check;
pub mod play;

use std::path::Path;

use eb_core::ContentStore;

/// Load and validate the content directory, mapping failures to a
/// user-facing error string.
fn open_store(dir: &Path) -> Result<ContentStore, String> {
    ContentStore::open(dir).map_err(|e| e.to_string())
}
