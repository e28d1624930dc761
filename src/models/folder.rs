use serde::{Deserialize, Serialize};

/// A player folder discovered in the upstream directory listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    /// Absolute URL of the folder, always ending with `/`
    pub url: String,
}

impl Folder {
    /// Build a folder whose URL is `base_url` joined with `name/`.
    ///
    /// `base_url` is expected to end with `/`; one is inserted if missing.
    pub fn under(base_url: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        let url = if base_url.ends_with('/') {
            format!("{}{}/", base_url, name)
        } else {
            format!("{}/{}/", base_url, name)
        };
        Self { name, url }
    }

    /// URL of a file inside this folder.
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}{}", self.url, file_name)
    }
}
