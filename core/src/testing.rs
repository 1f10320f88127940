//! Fixture writers for on-disk volumes used across unit tests

use byteorder::{BigEndian, ByteOrder};
use flate2::write::GzEncoder;
use flate2::Compression;
use ndarray::ArrayD;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// NIfTI-1 header field byte offsets
pub(crate) mod nifti_offsets {
    pub const PIXDIM: usize = 76;
    pub const SCL_SLOPE: usize = 112;
    pub const SCL_INTER: usize = 116;
    pub const MAGIC: usize = 344;
}

/// Serializes `data` as a single-file float64 NIfTI-1 image in byte order `E`
pub(crate) fn nifti_bytes<E: ByteOrder>(
    data: &ArrayD<f64>,
    spacing: [f32; 3],
    units_code: u8,
) -> Vec<u8> {
    let mut bytes = vec![0u8; 352];
    E::write_i32(&mut bytes[0..4], 348);

    E::write_i16(&mut bytes[40..42], data.ndim() as i16);
    for (i, &len) in data.shape().iter().enumerate() {
        let offset = 42 + i * 2;
        E::write_i16(&mut bytes[offset..offset + 2], len as i16);
    }
    E::write_i16(&mut bytes[70..72], 64);
    E::write_i16(&mut bytes[72..74], 64);

    E::write_f32(&mut bytes[nifti_offsets::PIXDIM..], 1.0);
    for (i, &s) in spacing.iter().enumerate() {
        let offset = nifti_offsets::PIXDIM + 4 + i * 4;
        E::write_f32(&mut bytes[offset..offset + 4], s);
    }
    E::write_f32(&mut bytes[92..96], 1.0);

    E::write_f32(&mut bytes[108..112], 352.0);
    E::write_f32(&mut bytes[nifti_offsets::SCL_SLOPE..], 1.0);
    bytes[123] = units_code;
    bytes[nifti_offsets::MAGIC..nifti_offsets::MAGIC + 4].copy_from_slice(b"n+1\0");

    // First axis fastest.
    for &value in data.t().iter() {
        let mut buf = [0u8; 8];
        E::write_f64(&mut buf, value);
        bytes.extend_from_slice(&buf);
    }
    bytes
}

/// Serializes `data` as a float32 MGH image with identity-like orientation
pub(crate) fn mgh_bytes(data: &ArrayD<f64>, spacing: [f32; 3]) -> Vec<u8> {
    let mut bytes = vec![0u8; 284];
    let shape = data.shape();
    let extent = |i: usize| shape.get(i).copied().unwrap_or(1) as i32;

    BigEndian::write_i32(&mut bytes[0..4], 1);
    for i in 0..4 {
        BigEndian::write_i32(&mut bytes[4 + i * 4..8 + i * 4], extent(i));
    }
    BigEndian::write_i32(&mut bytes[20..24], 3);
    BigEndian::write_i16(&mut bytes[28..30], 1);

    for (i, &s) in spacing.iter().enumerate() {
        BigEndian::write_f32(&mut bytes[30 + i * 4..34 + i * 4], s);
    }
    // LIA orientation, as written by FreeSurfer for conformed volumes
    let mdc: [f32; 9] = [-1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0];
    for (i, &c) in mdc.iter().enumerate() {
        BigEndian::write_f32(&mut bytes[42 + i * 4..46 + i * 4], c);
    }

    for &value in data.t().iter() {
        let mut buf = [0u8; 4];
        BigEndian::write_f32(&mut buf, value as f32);
        bytes.extend_from_slice(&buf);
    }
    bytes
}

/// Writes a little-endian NIfTI file, gzipped when the name ends in `.gz`
pub(crate) fn write_nifti(path: &Path, data: &ArrayD<f64>, spacing: [f32; 3], units_code: u8) {
    let bytes = nifti_bytes::<byteorder::LittleEndian>(data, spacing, units_code);
    write_bytes(path, &bytes);
}

/// Writes an MGH file, gzipped when the name ends in `.mgz`
pub(crate) fn write_mgh(path: &Path, data: &ArrayD<f64>, spacing: [f32; 3]) {
    let bytes = mgh_bytes(data, spacing);
    write_maybe_gzipped(path, &bytes, path.to_string_lossy().ends_with(".mgz"));
}

/// Writes raw bytes, gzipped when the name ends in `.gz`
pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) {
    write_maybe_gzipped(path, bytes, path.to_string_lossy().ends_with(".gz"));
}

fn write_maybe_gzipped(path: &Path, bytes: &[u8], compressed: bool) {
    let file = File::create(path).unwrap();
    if compressed {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap();
    } else {
        let mut file = file;
        file.write_all(bytes).unwrap();
    }
}
