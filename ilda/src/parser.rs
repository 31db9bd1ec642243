use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{be_i16, be_u16, be_u8},
    IResult as _IResult, Parser,
};

use crate::types::Format;

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// The 32-byte block preceding every frame's records. Every field is
/// big-endian. Frame number, total frames and projector are carried
/// for completeness but informational only.
#[derive(Debug)]
pub struct RawHeader {
    pub magic: [u8; 4],
    pub format: Format,
    pub frame_name: [u8; 8],
    pub company_name: [u8; 8],
    pub num_records: u16,
    pub frame_number: u16,
    pub total_frames: u16,
    pub projector: u8,
}

/// One on-disk record of the 3D-indexed-color layout, before the
/// palette index is resolved into a color.
#[derive(Debug)]
pub struct RawRecord3d {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub status: u8,
    pub color_index: u8,
}

fn take_bytes<const N: usize>(i: &'_ [u8]) -> IResult<'_, [u8; N]> {
    map(take(N), |bytes: &[u8]| {
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        arr
    })
    .parse(i)
}

pub fn parse_header(i: &'_ [u8]) -> IResult<'_, RawHeader> {
    map(
        (
            take_bytes::<4>,
            take(3usize),
            be_u8,
            take_bytes::<8>,
            take_bytes::<8>,
            be_u16,
            be_u16,
            be_u16,
            be_u8,
            be_u8,
        ),
        |(
            magic,
            _reserved,
            format,
            frame_name,
            company_name,
            num_records,
            frame_number,
            total_frames,
            projector,
            _padding,
        )| RawHeader {
            magic,
            format: Format::from(format),
            frame_name,
            company_name,
            num_records,
            frame_number,
            total_frames,
            projector,
        },
    )
    .parse(i)
}

pub fn parse_record_3d_indexed(i: &'_ [u8]) -> IResult<'_, RawRecord3d> {
    map(
        (be_i16, be_i16, be_i16, be_u8, be_u8),
        |(x, y, z, status, color_index)| RawRecord3d {
            x,
            y,
            z,
            status,
            color_index,
        },
    )
    .parse(i)
}

pub fn parse_records_3d_indexed(i: &'_ [u8], num_records: usize) -> IResult<'_, Vec<RawRecord3d>> {
    count(parse_record_3d_indexed, num_records).parse(i)
}
