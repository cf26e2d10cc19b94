//! Gzip-compressed tar archives.
//!
//! Written in one pass: `tar::Builder` -> `GzEncoder` -> `HashingWriter` ->
//! file. Headers are USTAR; a name longer than the 100-byte name field gets
//! a PAX `path` record in front of its header. mtime, uid and gid are zero
//! and owner names empty, so the output does not depend on the build host.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};

use super::{ArchiveError, ArchiveMember, Written};
use crate::consts::ARCHIVE_ENTRY_MODE;
use crate::util::hash::HashingWriter;

/// Size of the USTAR `name` field.
const NAME_FIELD_LEN: usize = 100;

pub(super) fn write_tar_gz(dest: &Path, top_dir: &str, members: &[ArchiveMember]) -> Result<Written, ArchiveError> {
  let write_err = |source| ArchiveError::Write {
    path: dest.display().to_string(),
    source,
  };

  let file = File::create(dest).map_err(write_err)?;
  let hashing = HashingWriter::new(BufWriter::new(file));
  let mut builder = Builder::new(GzEncoder::new(hashing, Compression::default()));

  let dir_header = entry_header(EntryType::Directory, 0);
  append_entry(&mut builder, dir_header, &format!("{top_dir}/"), std::io::empty()).map_err(write_err)?;

  for member in members {
    let source = File::open(&member.source).map_err(|source| ArchiveError::ReadExecutable {
      path: member.source.display().to_string(),
      source,
    })?;
    let header = entry_header(EntryType::Regular, member.size);
    append_entry(&mut builder, header, &format!("{top_dir}/{}", member.name), source).map_err(write_err)?;
  }

  let encoder = builder.into_inner().map_err(write_err)?;
  let hashing = encoder.finish().map_err(write_err)?;
  let size = hashing.bytes_written();
  let (buffered, digest) = hashing.finish().map_err(write_err)?;
  let file = buffered.into_inner().map_err(|e| write_err(e.into_error()))?;
  file.sync_all().map_err(write_err)?;

  Ok(Written { digest, size })
}

fn entry_header(entry_type: EntryType, size: u64) -> Header {
  let mut header = Header::new_ustar();
  header.set_entry_type(entry_type);
  header.set_mode(ARCHIVE_ENTRY_MODE);
  header.set_size(size);
  header.set_mtime(0);
  header.set_uid(0);
  header.set_gid(0);
  header
}

/// Append one entry named exactly `name` (forward slashes, no normalization).
fn append_entry<W: Write, R: Read>(
  builder: &mut Builder<W>,
  mut header: Header,
  name: &str,
  data: R,
) -> std::io::Result<()> {
  let bytes = name.as_bytes();
  let field = if bytes.len() <= NAME_FIELD_LEN {
    bytes
  } else {
    builder.append_pax_extensions([("path", bytes)])?;
    &bytes[..truncate_at(name, NAME_FIELD_LEN)]
  };

  let slot = &mut header.as_old_mut().name;
  slot.fill(0);
  slot[..field.len()].copy_from_slice(field);
  header.set_cksum();

  builder.append(&header, data)
}

/// Largest char boundary in `s` that is <= `max`.
fn truncate_at(s: &str, max: usize) -> usize {
  s.char_indices()
    .map(|(i, c)| i + c.len_utf8())
    .take_while(|&end| end <= max)
    .last()
    .unwrap_or(0)
}
