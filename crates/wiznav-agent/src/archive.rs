//! Zone archive access
//!
//! Archives are opened per navigation cycle and must be closed on every
//! path once opened, including when the cycle future is dropped mid-read.
//! [`read_archive_asset`] is the only place that opens an archive; the handle
//! lives in an [`OpenArchive`] guard that closes it on drop.

use std::path::{Path, PathBuf};

use wiznav_common::{Error, Result};

/// Read access to packed zone archives
#[allow(async_fn_in_trait)]
pub trait ZoneArchive {
    type Handle;

    async fn open(&mut self, archive_name: &str) -> Result<Self::Handle>;

    async fn read_asset(&mut self, handle: &Self::Handle, asset_name: &str) -> Result<Vec<u8>>;

    fn close(&mut self, handle: Self::Handle);
}

/// Archive name for a zone; zone paths use `/`, archive names use `-`
pub fn archive_name_for_zone(zone_name: &str) -> String {
    zone_name.replace('/', "-")
}

/// An opened archive; the handle is closed when the guard is dropped
pub struct OpenArchive<'a, A: ZoneArchive> {
    archive: &'a mut A,
    handle: Option<A::Handle>,
}

impl<'a, A: ZoneArchive> OpenArchive<'a, A> {
    pub async fn open(archive: &'a mut A, archive_name: &str) -> Result<Self> {
        let handle = archive.open(archive_name).await?;
        Ok(Self {
            archive,
            handle: Some(handle),
        })
    }

    pub async fn read_asset(&mut self, asset_name: &str) -> Result<Vec<u8>> {
        match &self.handle {
            Some(handle) => self.archive.read_asset(handle, asset_name).await,
            None => Err(Error::Archive("archive already closed".to_string())),
        }
    }
}

impl<A: ZoneArchive> Drop for OpenArchive<'_, A> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.archive.close(handle);
        }
    }
}

/// Opens `archive_name`, reads one asset and closes the archive again,
/// whether the read succeeded, failed or was cancelled.
pub async fn read_archive_asset<A: ZoneArchive>(
    archive: &mut A,
    archive_name: &str,
    asset_name: &str,
) -> Result<Vec<u8>> {
    let mut open = OpenArchive::open(archive, archive_name).await?;
    open.read_asset(asset_name).await
}

/// Archives already extracted to disk as `<root>/<archive name>/<asset name>`
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

/// Open archive directory
#[derive(Debug)]
pub struct DirArchiveHandle {
    path: PathBuf,
}

impl DirArchiveHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ZoneArchive for DirArchive {
    type Handle = DirArchiveHandle;

    async fn open(&mut self, archive_name: &str) -> Result<Self::Handle> {
        let path = self.root.join(archive_name);
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| Error::Archive(format!("cannot open {}: {}", path.display(), e)))?;

        if !metadata.is_dir() {
            return Err(Error::Archive(format!(
                "{} is not an extracted archive directory",
                path.display()
            )));
        }

        log::debug!("Opened archive {}", path.display());
        Ok(DirArchiveHandle { path })
    }

    async fn read_asset(&mut self, handle: &Self::Handle, asset_name: &str) -> Result<Vec<u8>> {
        let path = handle.path.join(asset_name);
        tokio::fs::read(&path)
            .await
            .map_err(|e| Error::Archive(format!("cannot read {}: {}", path.display(), e)))
    }

    fn close(&mut self, handle: Self::Handle) {
        log::debug!("Closed archive {}", handle.path.display());
    }
}
