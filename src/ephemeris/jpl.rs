// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reader for the JPL DE binary ephemeris format: a fixed-layout
//! header record followed by fixed-size Chebyshev data records.

use std::cell::RefCell;
use std::fs::File;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memmap2::Mmap;

use crate::body::Body;
use crate::error::{Error, Result};

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

const TITLE_OFFSET: usize = 0;
const TITLE_LEN: usize = 252;
const CONST_NAMES_OFFSET: usize = 252;
const N_CONST_NAMES: usize = 400;
const CONST_NAME_LEN: usize = 6;
const TIMES_OFFSET: usize = 2652;
const N_CONSTANTS_OFFSET: usize = 2676;
const AU_OFFSET: usize = 2680;
const EMRAT_OFFSET: usize = 2688;
const INDEX_TABLE_OFFSET: usize = 2696;
const DE_NUMBER_OFFSET: usize = 2840;
const LIBRATION_OFFSET: usize = 2844;

/// One `(start_position, n_coef, n_intervals)` entry of the header's
/// 13-triple index table. `start_position` is 1-based, as stored on
/// disk. (spec.md §4.E)
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexEntry {
    pub start_position: i32,
    pub n_coef: i32,
    pub n_intervals: i32,
}

/// The fixed-layout JPL DE header (record 1). (spec.md §4.E)
#[derive(Clone, Debug)]
pub struct JplHeader {
    pub title: String,
    pub de_number: i32,
    pub start_jd: f64,
    pub end_jd: f64,
    pub interval_days: f64,
    pub au_km: f64,
    pub earth_moon_ratio: f64,
    pub n_constants: i32,
    pub index_table: [IndexEntry; 13],
    pub record_size_bytes: usize,
}

fn interval_looks_sane(buf: &[u8], endian: Endianness) -> bool {
    if buf.len() < TIMES_OFFSET + 24 {
        return false;
    }
    let interval = read_f64(buf, TIMES_OFFSET + 16, endian);
    (1.0..=200.0).contains(&interval)
}

/// Among the 13 `(start_position, n_coef, n_intervals)` triples,
/// compute the data-record size in bytes. (spec.md §4.E)
fn compute_record_size(index_table: &[IndexEntry; 13]) -> usize {
    let (kmx_idx, kmx) = index_table
        .iter()
        .enumerate()
        .max_by_key(|(_, e)| e.start_position)
        .map(|(i, e)| (i, e.start_position))
        .unwrap_or((0, 0));

    // Index 11 (the 12th triple) is the nutations triple: 2 components
    // (dpsi, deps) instead of 3.
    let n_components = if kmx_idx == 11 { 2 } else { 3 };
    let entry = index_table[kmx_idx];
    let mut n_doubles = kmx as i64 + n_components * entry.n_coef as i64 * entry.n_intervals as i64 - 1;

    // Legacy padding: one historical ephemeris computes to 1546
    // doubles but was shipped with 1652-double records.
    if n_doubles == 1546 {
        n_doubles = 1652;
    }

    8 * n_doubles as usize
}

fn parse_header(buf: &[u8], endian: Endianness, path: &str) -> Result<JplHeader> {
    if buf.len() < LIBRATION_OFFSET + 12 {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: "file shorter than the fixed header".to_string(),
        });
    }

    let title = String::from_utf8_lossy(&buf[TITLE_OFFSET..TITLE_OFFSET + TITLE_LEN])
        .trim()
        .to_string();

    let _ = (CONST_NAMES_OFFSET, N_CONST_NAMES, CONST_NAME_LEN); // layout documented, names not retained

    let start_jd = read_f64(buf, TIMES_OFFSET, endian);
    let end_jd = read_f64(buf, TIMES_OFFSET + 8, endian);
    let interval_days = read_f64(buf, TIMES_OFFSET + 16, endian);
    let n_constants = read_i32(buf, N_CONSTANTS_OFFSET, endian);
    let au_km = read_f64(buf, AU_OFFSET, endian);
    let earth_moon_ratio = read_f64(buf, EMRAT_OFFSET, endian);
    let de_number = read_i32(buf, DE_NUMBER_OFFSET, endian);

    let mut index_table = [IndexEntry::default(); 13];
    for (i, entry) in index_table.iter_mut().take(12).enumerate() {
        let base = INDEX_TABLE_OFFSET + i * 12;
        entry.start_position = read_i32(buf, base, endian);
        entry.n_coef = read_i32(buf, base + 4, endian);
        entry.n_intervals = read_i32(buf, base + 8, endian);
    }
    index_table[12] = IndexEntry {
        start_position: read_i32(buf, LIBRATION_OFFSET, endian),
        n_coef: read_i32(buf, LIBRATION_OFFSET + 4, endian),
        n_intervals: read_i32(buf, LIBRATION_OFFSET + 8, endian),
    };

    if !(1.0..=200.0).contains(&interval_days) {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("interval_days {interval_days} out of [1, 200]"),
        });
    }
    if !(1.49e8..=1.50e8).contains(&au_km) {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("au_km {au_km} out of [1.49e8, 1.50e8]"),
        });
    }
    if !(80.0..=82.0).contains(&earth_moon_ratio) {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("earth_moon_ratio {earth_moon_ratio} out of [80, 82]"),
        });
    }
    if end_jd <= start_jd {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: "end_jd <= start_jd".to_string(),
        });
    }
    if n_constants < 0 || n_constants > 10_000 {
        return Err(Error::CorruptHeader {
            path: path.to_string(),
            reason: format!("n_constants {n_constants} out of [0, 10000]"),
        });
    }

    let record_size_bytes = compute_record_size(&index_table);

    Ok(JplHeader {
        title,
        de_number,
        start_jd,
        end_jd,
        interval_days,
        au_km,
        earth_moon_ratio,
        n_constants,
        index_table,
        record_size_bytes,
    })
}

/// The coefficients for one body over one sub-interval, plus the
/// sub-interval's own bounds. (spec.md §4.E)
#[derive(Clone, Debug)]
pub struct JplCoefficients {
    pub components: Vec<Vec<f64>>,
    pub sub_start_jd: f64,
    pub sub_end_jd: f64,
}

/// A reader over one opened JPL DE file.
pub struct JplReader {
    path: String,
    mmap: Mmap,
    endian: Endianness,
    header: JplHeader,
    cache: RefCell<Option<(i64, Vec<f64>)>>,
}

impl JplReader {
    /// Open and parse a JPL DE file, detecting byte order by
    /// sanity-checking the interval field, retrying byte-swapped if
    /// the plain interpretation falls outside `[1, 200]`. (spec.md §4.E)
    pub fn open(path: &str) -> Result<Self> {
        let file = File::open(path).map_err(|_| Error::FileNotFound {
            path: path.to_string(),
        })?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|_| Error::FileNotFound {
            path: path.to_string(),
        })?;

        let endian = if interval_looks_sane(&mmap, Endianness::Little) {
            Endianness::Little
        } else if interval_looks_sane(&mmap, Endianness::Big) {
            Endianness::Big
        } else {
            return Err(Error::BadEndianness {
                path: path.to_string(),
            });
        };

        let header = parse_header(&mmap, endian, path)?;
        log::debug!(
            "opened JPL DE{} file {path} ({endian:?}, {:.1}-{:.1}, record_size={})",
            header.de_number,
            header.start_jd,
            header.end_jd,
            header.record_size_bytes
        );

        Ok(JplReader {
            path: path.to_string(),
            mmap,
            endian,
            header,
            cache: RefCell::new(None),
        })
    }

    pub fn header(&self) -> &JplHeader {
        &self.header
    }

    /// `record_num = floor((jd - start_jd) / interval_days)`. (spec.md §4.E)
    pub fn find_record(&self, jd: f64) -> Result<i64> {
        if jd < self.header.start_jd || jd > self.header.end_jd {
            return Err(Error::JdOutOfRange {
                jd,
                reason: "outside the ephemeris file's declared span",
            });
        }
        Ok(((jd - self.header.start_jd) / self.header.interval_days).floor() as i64)
    }

    fn read_record_doubles(&self, record_num: i64) -> Result<Vec<f64>> {
        if let Some((n, doubles)) = self.cache.borrow().as_ref() {
            if *n == record_num {
                return Ok(doubles.clone());
            }
        }

        log::trace!("JPL cache miss for record {record_num} in {}", self.path);
        let rec_size = self.header.record_size_bytes;
        let byte_offset = rec_size * (1 + record_num as usize);
        if byte_offset + rec_size > self.mmap.len() {
            return Err(Error::JdOutOfRange {
                jd: f64::NAN,
                reason: "record falls past end of file",
            });
        }

        let n_doubles = rec_size / 8;
        let doubles: Vec<f64> = (0..n_doubles)
            .map(|i| read_f64(&self.mmap, byte_offset + i * 8, self.endian))
            .collect();

        *self.cache.borrow_mut() = Some((record_num, doubles.clone()));
        Ok(doubles)
    }

    /// Extract the Chebyshev coefficients and sub-interval bounds for
    /// `body` at `jd`. (spec.md §4.E)
    pub fn extract_coefficients(&self, body: Body, jd: f64) -> Result<JplCoefficients> {
        let table_index = jpl_table_index(body).ok_or(Error::BodyUnsupported { body })?;
        let record_num = self.find_record(jd)?;
        let doubles = self.read_record_doubles(record_num)?;

        let rec_start = doubles[0];
        let rec_end = doubles[1];
        if jd < rec_start || jd > rec_end {
            return Err(Error::JdOutOfRange {
                jd,
                reason: "outside the data record's own bounds",
            });
        }

        let entry = self.header.index_table[table_index];
        let n_intervals = entry.n_intervals.max(1) as f64;
        let duration = (rec_end - rec_start) / n_intervals;
        let sub_idx = (((jd - rec_start) / duration).floor() as i64)
            .clamp(0, entry.n_intervals as i64 - 1) as usize;

        let n_components = if table_index == 11 { 2 } else { 3 };
        let n_coef = entry.n_coef as usize;
        let base = (entry.start_position - 1) as usize + sub_idx * n_coef * n_components;

        let mut components = Vec::with_capacity(n_components);
        for c in 0..n_components {
            let start = base + c * n_coef;
            components.push(doubles[start..start + n_coef].to_vec());
        }

        Ok(JplCoefficients {
            components,
            sub_start_jd: rec_start + sub_idx as f64 * duration,
            sub_end_jd: rec_start + (sub_idx + 1) as f64 * duration,
        })
    }
}

/// Map a [`Body`] onto its 0-based slot in the header's 13-triple
/// index table, where present. (spec.md §4.E data model)
pub fn jpl_table_index(body: Body) -> Option<usize> {
    match body {
        Body::Mercury => Some(0),
        Body::Venus => Some(1),
        Body::Mars => Some(3),
        Body::Jupiter => Some(4),
        Body::Saturn => Some(5),
        Body::Uranus => Some(6),
        Body::Neptune => Some(7),
        Body::Pluto => Some(8),
        Body::Moon => Some(9),
        Body::Sun => Some(10),
        Body::Earth | Body::MeanNode | Body::TrueNode => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_index_covers_major_planets() {
        assert_eq!(jpl_table_index(Body::Mercury), Some(0));
        assert_eq!(jpl_table_index(Body::Sun), Some(10));
        assert_eq!(jpl_table_index(Body::Earth), None);
        assert_eq!(jpl_table_index(Body::MeanNode), None);
    }

    #[test]
    fn record_size_applies_legacy_padding() {
        let mut table = [IndexEntry::default(); 13];
        // Contrive an index table whose kmx body yields exactly 1546
        // doubles before padding.
        table[10] = IndexEntry {
            start_position: 1,
            n_coef: 1,
            n_intervals: 1,
        };
        table[0] = IndexEntry {
            start_position: 549,
            n_coef: 333,
            n_intervals: 1,
        };
        // kmx=549, n_components=3 (index 0), n_doubles = 549+3*333*1-1 = 1547, not the legacy case;
        // adjust so n_doubles is exactly 1546.
        table[0].start_position = 548;
        assert_eq!(compute_record_size(&table), 8 * 1652);
    }

    #[test]
    fn missing_file_fails_with_file_not_found() {
        let err = JplReader::open("/nonexistent/path/de440.eph").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
