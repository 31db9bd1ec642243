use std::{ffi::OsStr, path::Path};

use tracing::debug;

use crate::{
    error::IldaError,
    palette::{Palette, DEFAULT_PALETTE},
    parser::{parse_header, parse_records_3d_indexed},
    types::{Format, Frame, Record},
};

const MAGIC: &[u8; 4] = b"ILDA";

/// Decodes every frame of an ILDA stream, resolving indexed colors
/// against [`DEFAULT_PALETTE`].
///
/// The stream is a sequence of header-plus-records blocks terminated
/// by a header with a record count of zero; bytes after the terminator
/// are ignored. Decoding is all-or-nothing: a malformed frame anywhere
/// fails the whole call and no frames are returned.
pub fn decode(i: &[u8]) -> Result<Vec<Frame>, IldaError> {
    decode_with_palette(i, &DEFAULT_PALETTE)
}

/// Same as [`decode`], resolving colors against the given palette.
pub fn decode_with_palette(mut i: &[u8], palette: &Palette) -> Result<Vec<Frame>, IldaError> {
    let mut frames: Vec<Frame> = vec![];

    loop {
        let (rest, header) =
            parse_header(i).map_err(|_| IldaError::TruncatedStream { context: "header" })?;

        if &header.magic != MAGIC {
            return Err(IldaError::MalformedHeader {
                magic: header.magic,
            });
        }
        if header.num_records == 0 {
            // Stream terminator. The only normal way out of the loop.
            break;
        }

        let (rest, records) = match header.format {
            Format::Indexed3d => {
                let (rest, raw_records) =
                    parse_records_3d_indexed(rest, header.num_records as usize)
                        .map_err(|_| IldaError::TruncatedStream { context: "record" })?;
                let records = raw_records
                    .into_iter()
                    .map(|raw| {
                        let [r, g, b] = palette.lookup(raw.color_index as usize)?;
                        Ok(Record {
                            x: raw.x,
                            y: raw.y,
                            z: raw.z,
                            r,
                            g,
                            b,
                            status: raw.status,
                        })
                    })
                    .collect::<Result<Vec<Record>, IldaError>>()?;
                (rest, records)
            }
            format => return Err(IldaError::UnsupportedFormat { format }),
        };

        debug!(
            "decoded frame {}/{} for projector {} ({} records)",
            header.frame_number,
            header.total_frames,
            header.projector,
            records.len()
        );

        frames.push(Frame {
            format: header.format,
            frame_name: trim_nulls(&header.frame_name),
            company_name: trim_nulls(&header.company_name),
            records,
        });

        i = rest;
    }

    Ok(frames)
}

/// Reads and decodes an ILDA file with the default palette.
pub fn decode_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Vec<Frame>, IldaError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Strips trailing null padding (only nulls, not whitespace) from a
/// fixed-width name field.
fn trim_nulls(field: &[u8]) -> String {
    let end = field.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&field[..end]).into_owned()
}
