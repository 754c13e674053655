// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reader for the segmented Swiss-Ephemeris SE1 binary format.
//!
//! Byte layout per spec.md §4.D. The per-reader single-slot record
//! cache is private, non-`Sync` state (spec.md §9): a reader is cheap
//! to open per thread, but is not itself shared across threads.

use std::cell::RefCell;
use std::fs::File;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memmap2::Mmap;

use crate::error::{Error, Result};

const HEADER_SIZE: usize = 96;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endianness {
    Little,
    Big,
}

fn read_i32(buf: &[u8], offset: usize, endian: Endianness) -> i32 {
    match endian {
        Endianness::Little => LittleEndian::read_i32(&buf[offset..offset + 4]),
        Endianness::Big => BigEndian::read_i32(&buf[offset..offset + 4]),
    }
}

fn read_f64(buf: &[u8], offset: usize, endian: Endianness) -> f64 {
    match endian {
        Endianness::Little => LittleEndian::read_f64(&buf[offset..offset + 8]),
        Endianness::Big => BigEndian::read_f64(&buf[offset..offset + 8]),
    }
}

/// The per-planet SE1 header (spec.md §4.D table).
#[derive(Clone, Debug)]
pub struct Se1Header {
    pub index_pos: i32,
    pub flags: i32,
    pub n_coeffs: i32,
    pub rmax: f64,
    pub start_jd: f64,
    pub end_jd: f64,
    pub seg_days: f64,
    pub orbital: [f64; 7],
}

/// One 32-day (typically) Chebyshev segment. (spec.md §3)
#[derive(Clone, Debug)]
pub struct Se1Record {
    pub start_jd: f64,
    pub end_jd: f64,
    pub long_coeffs: Vec<f64>,
    pub lat_coeffs: Vec<f64>,
    pub dist_coeffs: Vec<f64>,
}

fn header_looks_sane(buf: &[u8], endian: Endianness) -> bool {
    if buf.len() < HEADER_SIZE {
        return false;
    }
    let n_coeffs = read_i32(buf, 8, endian);
    let start_jd = read_f64(buf, 16, endian);
    let end_jd = read_f64(buf, 24, endian);
    let seg_days = read_f64(buf, 32, endian);
    (1..=99).contains(&n_coeffs)
        && start_jd > 0.0
        && end_jd > start_jd
        && (1.0..=10_000.0).contains(&seg_days)
}

fn parse_header(buf: &[u8], endian: Endianness, path: &str) -> Result<Se1Header> {
    if buf.len() < HEADER_SIZE {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: "file shorter than the fixed header".to_string(),
        });
    }

    let index_pos = read_i32(buf, 0, endian);
    let flags = read_i32(buf, 4, endian);
    let n_coeffs = read_i32(buf, 8, endian);
    let rmax = read_i32(buf, 12, endian) as f64 / 1000.0;
    let start_jd = read_f64(buf, 16, endian);
    let end_jd = read_f64(buf, 24, endian);
    let seg_days = read_f64(buf, 32, endian);
    let mut orbital = [0.0; 7];
    for (i, o) in orbital.iter_mut().enumerate() {
        *o = read_f64(buf, 40 + i * 8, endian);
    }

    if !(1..=99).contains(&n_coeffs) {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("n_coeffs {n_coeffs} out of [1, 99]"),
        });
    }
    if start_jd <= 0.0 {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("start_jd {start_jd} <= 0"),
        });
    }
    if end_jd <= start_jd {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: "end_jd <= start_jd".to_string(),
        });
    }
    if !(1.0..=10_000.0).contains(&seg_days) {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("seg_days {seg_days} out of [1, 10000]"),
        });
    }

    Ok(Se1Header {
        index_pos,
        flags,
        n_coeffs,
        rmax,
        start_jd,
        end_jd,
        seg_days,
        orbital,
    })
}

/// A reader over one opened SE1 file: immutable header and index,
/// plus a private single-slot record cache.
pub struct Se1Reader {
    path: String,
    mmap: Mmap,
    endian: Endianness,
    header: Se1Header,
    index: Vec<i32>,
    cache: RefCell<Option<(usize, Se1Record)>>,
}

impl Se1Reader {
    /// Open and parse an SE1 file, detecting its byte order by
    /// sanity-checking the header fields under each interpretation.
    /// (spec.md §4.D)
    pub fn open(path: &str) -> Result<Self> {
        let file = File::open(path).map_err(|_| Error::FileNotFound {
            path: path.to_string(),
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|_| Error::FileNotFound {
            path: path.to_string(),
        })?;

        let endian = if header_looks_sane(&mmap, Endianness::Little) {
            Endianness::Little
        } else if header_looks_sane(&mmap, Endianness::Big) {
            Endianness::Big
        } else {
            return Err(Error::BadEndianness {
                path: path.to_string(),
            });
        };

        let header = parse_header(&mmap, endian, path)?;
        log::debug!(
            "opened SE1 file {path} ({endian:?}, {:.1}-{:.1}, n_coeffs={})",
            header.start_jd,
            header.end_jd,
            header.n_coeffs
        );

        let n_segments = ((header.end_jd - header.start_jd + 0.1) / header.seg_days).floor() as usize;
        let index_start = header.index_pos as usize;
        let index_end = index_start + n_segments * 4;
        if index_end > mmap.len() {
            return Err(Error::CorruptHeader {
                path: path.to_string(),
                reason: "segment index table runs past end of file".to_string(),
            });
        }
        let index = (0..n_segments)
            .map(|k| read_i32(&mmap, index_start + k * 4, endian))
            .collect();

        Ok(Se1Reader {
            path: path.to_string(),
            mmap,
            endian,
            header,
            index,
            cache: RefCell::new(None),
        })
    }

    pub fn header(&self) -> &Se1Header {
        &self.header
    }

    fn read_segment(&self, k: usize) -> Result<Se1Record> {
        let offset = self.index[k] as usize;
        let n = self.header.n_coeffs as usize;
        let buf = &self.mmap;
        if offset + 16 + 3 * n * 8 > buf.len() {
            return Err(Error::CorruptHeader {
                path: self.path.clone(),
                reason: format!("segment {k} runs past end of file"),
            });
        }

        let seg_start_jd = read_f64(buf, offset, self.endian);
        let seg_end_jd = read_f64(buf, offset + 8, self.endian);
        let mut pos = offset + 16;
        let mut read_coeffs = || {
            let v: Vec<f64> = (0..n).map(|i| read_f64(buf, pos + i * 8, self.endian)).collect();
            pos += n * 8;
            v
        };
        let long_coeffs = read_coeffs();
        let lat_coeffs = read_coeffs();
        let dist_coeffs = read_coeffs();

        Ok(Se1Record {
            start_jd: seg_start_jd,
            end_jd: seg_end_jd,
            long_coeffs,
            lat_coeffs,
            dist_coeffs,
        })
    }

    /// Binary search by segment start time; `None` if `jd` falls in a
    /// gap between segments or outside the file's coverage.
    /// (spec.md §4.D)
    pub fn find_record(&self, jd: f64) -> Result<Option<Se1Record>> {
        if self.index.is_empty() {
            return Ok(None);
        }

        if let Some((_, record)) = self.cache.borrow().as_ref() {
            if jd >= record.start_jd && jd < record.end_jd {
                return Ok(Some(record.clone()));
            }
        }

        log::trace!("SE1 cache miss for JD {jd} in {}", self.path);
        let mut lo = 0usize;
        let mut hi = self.index.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let record = self.read_segment(mid)?;
            if jd < record.start_jd {
                hi = mid;
            } else if jd >= record.end_jd {
                lo = mid + 1;
            } else {
                *self.cache.borrow_mut() = Some((mid, record.clone()));
                return Ok(Some(record));
            }
        }

        Ok(None)
    }
}

/// Select the SE1 filename prefix for a body. (spec.md §4.D)
pub fn file_prefix(body: crate::body::Body) -> &'static str {
    use crate::body::Body;
    match body {
        Body::Moon => "semo",
        Body::Sun
        | Body::Mercury
        | Body::Venus
        | Body::Mars
        | Body::Jupiter
        | Body::Saturn
        | Body::Uranus
        | Body::Neptune
        | Body::Pluto
        | Body::Earth
        | Body::MeanNode
        | Body::TrueNode => "sepl",
    }
}

/// The two-digit century suffix used in SE1 filenames, e.g.
/// `⌊year/100⌋` for a file named `sepl_18.se1`. (spec.md §4.D)
pub fn century_suffix(year: i32) -> i32 {
    year.div_euclid(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_prefixes_match_convention() {
        use crate::body::Body;
        assert_eq!(file_prefix(Body::Moon), "semo");
        assert_eq!(file_prefix(Body::Mars), "sepl");
    }

    #[test]
    fn century_suffix_floors() {
        assert_eq!(century_suffix(1974), 19);
        assert_eq!(century_suffix(2000), 20);
        assert_eq!(century_suffix(99), 0);
    }

    #[test]
    fn missing_file_fails_with_file_not_found() {
        let err = Se1Reader::open("/nonexistent/path/sepl_99.se1").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
