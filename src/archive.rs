//! Zip archive access and transcript resolution.
//!
//! A WhatsApp "export with media" is a zip holding the transcript next to
//! the media files. The transcript is usually `_chat.txt`, but exports that
//! passed through other tools carry names like `WhatsApp Chat with Bob.txt`
//! or decorated duplicates such as `Copy of WhatsApp Chat with Bob.txt`.
//!
//! [`read_chat_file`] resolves the transcript in three steps:
//! 1. exact lookup of [`CHAT_FILE_NAME`]
//! 2. otherwise every entry matching [`CHAT_FILE_PATTERN`]
//! 3. the candidate with the shortest name (in UTF-16 code units) wins;
//!    among equally short names the first in archive order wins
//!
//! # Example
//!
//! ```rust,no_run
//! use chatsift::archive::{ArchiveHandle, read_chat_file};
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), chatsift::error::AcquisitionError> {
//! let archive = ArchiveHandle::new(bytes);
//! let transcript = read_chat_file(&archive).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::OnceCell;
use tracing::debug;
use zip::ZipArchive;

use crate::error::AcquisitionError;

/// Name WhatsApp gives the transcript inside its own exports.
pub const CHAT_FILE_NAME: &str = "_chat.txt";

/// Case-insensitive pattern for transcript-like entry names.
pub static CHAT_FILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^.*(?:chat|whatsapp).*\.txt$").unwrap());

const UTF8_BOM: char = '\u{FEFF}';

type ZipReader = ZipArchive<Cursor<Arc<[u8]>>>;

/// Parsed central directory plus the file entry names in archive order.
struct ArchiveIndex {
    zip: ZipReader,
    names: Vec<String>,
}

impl ArchiveIndex {
    fn build(bytes: Arc<[u8]>) -> Result<Self, AcquisitionError> {
        let mut zip = ZipArchive::new(Cursor::new(bytes)).map_err(AcquisitionError::corrupt)?;
        let mut names = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index_raw(i).map_err(AcquisitionError::corrupt)?;
            if !entry.is_dir() {
                names.push(entry.name().to_owned());
            }
        }
        Ok(Self { zip, names })
    }
}

/// Read-only view over zip bytes.
///
/// Constructing a handle never fails. The central directory is parsed once,
/// on tokio's blocking pool, at the first lookup. Cloning shares both the
/// bytes and the index.
#[derive(Clone)]
pub struct ArchiveHandle {
    bytes: Arc<[u8]>,
    index: Arc<OnceCell<ArchiveIndex>>,
}

impl ArchiveHandle {
    /// Wraps archive bytes without reading them.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            index: Arc::new(OnceCell::new()),
        }
    }

    async fn index(&self) -> Result<&ArchiveIndex, AcquisitionError> {
        self.index
            .get_or_try_init(|| {
                let bytes = Arc::clone(&self.bytes);
                async move {
                    match tokio::task::spawn_blocking(move || ArchiveIndex::build(bytes)).await {
                        Ok(built) => built,
                        Err(err) => Err(AcquisitionError::corrupt(err)),
                    }
                }
            })
            .await
    }

    /// Names of all file entries in archive order. Directories are skipped.
    pub async fn entry_names(&self) -> Result<&[String], AcquisitionError> {
        Ok(&self.index().await?.names)
    }

    /// Looks up an entry by exact name.
    pub async fn file(&self, name: &str) -> Result<Option<ArchiveEntry>, AcquisitionError> {
        let index = self.index().await?;
        Ok(index
            .names
            .iter()
            .find(|entry| entry.as_str() == name)
            .map(|entry| ArchiveEntry::new(entry, &index.zip)))
    }

    /// Returns every entry whose name matches `pattern`, in archive order.
    pub async fn files_matching(&self, pattern: &Regex) -> Result<Vec<ArchiveEntry>, AcquisitionError> {
        let index = self.index().await?;
        Ok(index
            .names
            .iter()
            .filter(|entry| pattern.is_match(entry))
            .map(|entry| ArchiveEntry::new(entry, &index.zip))
            .collect())
    }
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("bytes", &self.bytes.len())
            .field("entries", &self.index.get().map(|index| index.names.len()))
            .finish()
    }
}

/// A single file inside an [`ArchiveHandle`].
#[derive(Clone)]
pub struct ArchiveEntry {
    name: String,
    zip: ZipReader,
}

impl ArchiveEntry {
    fn new(name: &str, zip: &ZipReader) -> Self {
        Self {
            name: name.to_owned(),
            zip: zip.clone(),
        }
    }

    /// Full path of the entry inside the archive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decompresses the entry and decodes it as UTF-8.
    ///
    /// Decompression runs on tokio's blocking pool, so this must be awaited
    /// inside a tokio runtime. A leading byte-order mark is removed.
    pub async fn read_to_string(&self) -> Result<String, AcquisitionError> {
        let name = self.name.clone();
        let zip = self.zip.clone();

        tokio::task::spawn_blocking(move || decode_entry(zip, &name))
            .await
            .map_err(|err| AcquisitionError::entry(self.name.as_str(), err))?
    }
}

impl fmt::Debug for ArchiveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry").field("name", &self.name).finish()
    }
}

fn decode_entry(mut zip: ZipReader, name: &str) -> Result<String, AcquisitionError> {
    let mut file = zip
        .by_name(name)
        .map_err(|err| AcquisitionError::entry(name, err))?;

    let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
    file.read_to_end(&mut buf)
        .map_err(|err| AcquisitionError::entry(name, err))?;

    let text = String::from_utf8(buf).map_err(|err| AcquisitionError::entry(name, err))?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_owned(),
        None => text,
    })
}

/// Length of an entry name in UTF-16 code units, the unit exports are
/// compared in when picking the shortest transcript name.
fn name_length(name: &str) -> usize {
    name.encode_utf16().count()
}

/// Picks the transcript entry of an export archive.
pub async fn resolve_chat_entry(archive: &ArchiveHandle) -> Result<ArchiveEntry, AcquisitionError> {
    if let Some(entry) = archive.file(CHAT_FILE_NAME).await? {
        debug!(entry = entry.name(), "transcript found by exact name");
        return Ok(entry);
    }

    let candidates = archive.files_matching(&CHAT_FILE_PATTERN).await?;
    debug!(candidates = candidates.len(), "searching transcript by pattern");

    // min_by_key keeps the first of equally short names
    let entry = candidates
        .into_iter()
        .min_by_key(|entry| name_length(entry.name()))
        .ok_or(AcquisitionError::NoTranscriptFound)?;

    debug!(entry = entry.name(), "transcript selected");
    Ok(entry)
}

/// Resolves the transcript entry and returns its text.
pub async fn read_chat_file(archive: &ArchiveHandle) -> Result<String, AcquisitionError> {
    let entry = resolve_chat_entry(archive).await?;
    entry.read_to_string().await
}
