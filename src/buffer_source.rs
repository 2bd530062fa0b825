use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use log::debug;
use memmap2::Mmap;

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
    Released,
}

/// Read-only view over the full contents of a catalog file.
///
/// The bytes are mapped into memory when the input is a regular, non-empty
/// file and mapping succeeds; otherwise the stream is read into an owned
/// buffer. Mapping is an optimisation only, so the fallback is silent.
///
/// Dropping the source unmaps it. [`BufferSource::release`] does the same
/// eagerly and may be called any number of times.
#[derive(Debug)]
pub struct BufferSource {
    backing: Backing,
}

impl BufferSource {
    /// Map `file` read-only, or read it fully if it cannot be mapped.
    pub fn open(file: &mut File) -> io::Result<Self> {
        match Self::try_map(file) {
            Ok(Some(source)) => return Ok(source),
            Ok(None) => {}
            Err(e) => debug!("mapping unavailable, reading into memory: {}", e),
        }

        // Pipes and other unseekable streams are read from where they are.
        if let Err(e) = file.seek(SeekFrom::Start(0)) {
            debug!("seek before fallback read failed: {}", e);
        }
        Self::from_reader(file)
    }

    /// Read an arbitrary stream fully into an owned buffer.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(data),
        }
    }

    // `Ok(None)` means the file is not a mapping candidate; `Err` means
    // the map call itself failed. Both fall back to reading.
    fn try_map(file: &File) -> io::Result<Option<Self>> {
        let meta = file.metadata()?;
        if !meta.is_file() {
            return Ok(None);
        }

        let size = meta.len();
        if size == 0 {
            return Ok(Some(Self::from_bytes(Vec::new())));
        }
        if usize::try_from(size).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("file of {} bytes does not fit the address space", size),
            ));
        }

        // SAFETY: the mapping is private and read-only. Catalog files are
        // not expected to be truncated while loaded; doing so is outside
        // what this library can defend against.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Some(Self {
            backing: Backing::Mapped(mmap),
        }))
    }

    /// Return the underlying bytes. Empty once released.
    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Owned(data) => data,
            Backing::Released => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the bytes come from a live memory mapping.
    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }

    /// Unmap or free the bytes now. Idempotent.
    pub fn release(&mut self) {
        self.backing = Backing::Released;
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::BufferSource;

    #[test]
    fn maps_regular_file() {
        let mut tmp = tempfile::tempfile().unwrap();
        tmp.write_all(&[0xde, 0x12, 0x04, 0x95, 1, 2, 3]).unwrap();

        let source = BufferSource::open(&mut tmp).unwrap();
        assert!(source.is_mapped());
        assert_eq!(source.len(), 7);
        assert_eq!(&source.as_slice()[..4], &[0xde, 0x12, 0x04, 0x95]);
    }

    #[test]
    fn empty_file_is_not_mapped_and_not_an_error() {
        let mut tmp = tempfile::tempfile().unwrap();
        let source = BufferSource::open(&mut tmp).unwrap();
        assert!(!source.is_mapped());
        assert!(source.is_empty());
    }

    #[test]
    fn reader_fallback_owns_bytes() {
        let source = BufferSource::from_reader(Cursor::new(b"Hello world!".to_vec())).unwrap();
        assert!(!source.is_mapped());
        assert_eq!(source.as_slice(), b"Hello world!");
    }

    #[cfg(unix)]
    #[test]
    fn pipe_falls_back_to_reading() {
        use std::fs::File;
        use std::os::fd::OwnedFd;

        let (reader, mut writer) = std::io::pipe().unwrap();
        writer.write_all(b"Hello world!").unwrap();
        drop(writer);

        // Neither mappable nor seekable.
        let mut file = File::from(OwnedFd::from(reader));
        let source = BufferSource::open(&mut file).unwrap();
        assert!(!source.is_mapped());
        assert_eq!(source.as_slice(), b"Hello world!");
    }

    #[cfg(unix)]
    #[test]
    fn directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::open(dir.path()).unwrap();
        assert!(BufferSource::open(&mut file).is_err());
    }

    #[test]
    fn release_is_idempotent() {
        let mut tmp = tempfile::tempfile().unwrap();
        tmp.write_all(b"abc").unwrap();
        let mut source = BufferSource::open(&mut tmp).unwrap();

        source.release();
        assert!(!source.is_mapped());
        assert!(source.as_slice().is_empty());
        source.release();
        assert!(source.is_empty());
    }
}
