//! Zip archives.
//!
//! The container is assembled with the seekable `ZipWriter`, which patches
//! each local header with the final CRC and sizes, so entries carry no
//! trailing data descriptors. That writer targets a staging file next to the
//! destination; the finished container is then streamed once through a
//! `HashingWriter` into the final file. The staging file is removed on drop,
//! including on error paths.

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{ArchiveError, ArchiveMember, Written};
use crate::consts::{APP_NAME, ARCHIVE_ENTRY_MODE};
use crate::util::hash::HashingWriter;

pub(super) fn write_zip(dest: &Path, top_dir: &str, members: &[ArchiveMember]) -> Result<Written, ArchiveError> {
  let write_err = |source| ArchiveError::Write {
    path: dest.display().to_string(),
    source,
  };
  let zip_err = |source| ArchiveError::Zip {
    path: dest.display().to_string(),
    source,
  };

  let staging_dir = dest.parent().unwrap_or(Path::new("."));
  let mut staging = tempfile::Builder::new()
    .prefix(&format!(".{APP_NAME}-"))
    .suffix(".zip.tmp")
    .tempfile_in(staging_dir)
    .map_err(write_err)?;

  {
    let mut zip = ZipWriter::new(BufWriter::new(staging.as_file_mut()));
    for member in members {
      let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(ARCHIVE_ENTRY_MODE)
        .large_file(member.size >= u64::from(u32::MAX));

      zip
        .start_file(format!("{top_dir}/{}", member.name), options)
        .map_err(zip_err)?;

      let mut source = File::open(&member.source).map_err(|source| ArchiveError::ReadExecutable {
        path: member.source.display().to_string(),
        source,
      })?;
      io::copy(&mut source, &mut zip).map_err(write_err)?;
    }
    let mut buffered = zip.finish().map_err(zip_err)?;
    buffered.flush().map_err(write_err)?;
  }

  let staged = staging.as_file_mut();
  staged.seek(SeekFrom::Start(0)).map_err(write_err)?;

  let file = File::create(dest).map_err(write_err)?;
  let mut hashing = HashingWriter::new(BufWriter::new(file));
  io::copy(staged, &mut hashing).map_err(write_err)?;
  let size = hashing.bytes_written();
  let (buffered, digest) = hashing.finish().map_err(write_err)?;
  let file = buffered.into_inner().map_err(|e| write_err(e.into_error()))?;
  file.sync_all().map_err(write_err)?;

  Ok(Written { digest, size })
}
