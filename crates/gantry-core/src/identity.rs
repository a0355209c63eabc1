use std::path::Path;

/// Marker file written into the project root before each deploy so the
/// packaged build context carries the service name.
pub const MARKER_FILE: &str = ".service_name";

/// A service name derived from its project directory.
///
/// The directory basename is the single source of naming: it becomes the
/// image tag, the lifecycle label on every container gantry creates for
/// the service, and the `<name>_<index>` container names.
///
/// # Examples
///
/// ```
/// use gantry_core::ServiceIdentity;
/// use std::path::Path;
///
/// let identity = ServiceIdentity::from_dir(Path::new("/home/dev/orders")).unwrap();
/// assert_eq!(identity.name(), "orders");
/// assert_eq!(identity.container_name(1), "orders_1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    name: String,
}

impl ServiceIdentity {
    /// Derive the identity from a project directory.
    ///
    /// # Errors
    ///
    /// Fails when the path has no usable final component (the filesystem
    /// root, or a path ending in `..`).
    pub fn from_dir(dir: &Path) -> crate::Result<Self> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| crate::Error::IdentityResolve {
                path: dir.to_owned(),
            })?;
        Ok(Self {
            name: name.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name for the `index`-th container of this service, e.g. `orders_1`.
    pub fn container_name(&self, index: u32) -> String {
        format!("{}_{}", self.name, index)
    }

    /// Write the [`MARKER_FILE`] into `dir`, overwriting any previous one.
    pub fn write_marker(&self, dir: &Path) -> crate::Result<()> {
        let path = dir.join(MARKER_FILE);
        std::fs::write(&path, &self.name)
            .map_err(|e| crate::Error::MarkerWrite { path, source: e })
    }
}
