//! Fixed three-folder archive layout
//!
//! ```text
//! audio/<name>
//! images/<name>
//! data/<name>        (conventionally locations.json, characters.json)
//! ```
//!
//! The folder is the only class discriminator. Files at the root, in other
//! folders, or nested below a class folder are not part of the layout.

use bard_core::AssetClass;

/// Map an archive path to its asset class and entry name
///
/// Returns `None` for directories, files outside the three class folders and
/// files nested deeper than one level.
pub fn classify_entry(path: &str) -> Option<(AssetClass, &str)> {
    AssetClass::ALL.into_iter().find_map(|class| {
        let name = path.strip_prefix(class.folder())?;
        if name.is_empty() || name.contains('/') {
            None
        } else {
            Some((class, name))
        }
    })
}

/// Archive path for an entry of `class`
pub fn entry_path(class: AssetClass, name: &str) -> String {
    format!("{}{}", class.folder(), name)
}
