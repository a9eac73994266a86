//! Output writers for a packed bitmap.
//!
//! A `.pbi` file is the header immediately followed by the packed rows. The
//! C source variant declares the same bytes as a `uint8_t` array plus a
//! `GBitmap` struct literal pointing at it.

use std::{fmt, io};

use crate::{header::BitmapHeader, pack::PackedBlob};

/// Write a complete PBI file: 12 header bytes, then the blob.
pub fn write_pbi<W: io::Write>(
    out: &mut W,
    header: &BitmapHeader,
    blob: &PackedBlob,
) -> io::Result<()> {
    out.write_all(&header.to_bytes())?;
    out.write_all(blob.as_bytes())?;
    Ok(())
}

/// Turn a file stem into something usable inside a C identifier.
pub fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Write the array and `GBitmap` declarations for static linkage.
pub fn write_source<W: fmt::Write>(
    out: &mut W,
    name: &str,
    header: &BitmapHeader,
    blob: &PackedBlob,
) -> fmt::Result {
    let name = c_identifier(name);
    writeln!(out, "// GBitmap + pixel data generated by pbi-gen:")?;
    writeln!(out)?;
    write!(out, "static const uint8_t s_{}_pixels[] = {{\n    ", name)?;
    for (index, byte) in blob.as_bytes().iter().enumerate() {
        if index != 0 && index % 16 == 0 {
            write!(out, "/* bytes {} - {} */\n    ", index - 16, index)?;
        }
        write!(out, "0x{:02x}, ", byte)?;
    }
    write!(out, "\n}};\n\n")?;

    let bounds = header.bounds;
    writeln!(out, "static const GBitmap s_{}_bitmap = {{", name)?;
    writeln!(out, "  .addr = (void*) &s_{}_pixels,", name)?;
    writeln!(out, "  .row_size_bytes = {},", header.row_size_bytes)?;
    writeln!(out, "  .info_flags = 0x{:02x},", header.info_flags)?;
    writeln!(out, "  .bounds = {{")?;
    writeln!(
        out,
        "    .origin = {{ .x = {}, .y = {} }},",
        bounds.x, bounds.y
    )?;
    writeln!(out, "    .size = {{ .w = {}, .h = {} }},", bounds.w, bounds.h)?;
    writeln!(out, "  }},")?;
    write!(out, "}};\n\n")?;
    Ok(())
}

/// Manifest header including every generated source file.
pub fn write_manifest<W: fmt::Write>(out: &mut W, includes: &[String]) -> fmt::Result {
    writeln!(out, "#pragma once")?;
    for include in includes {
        writeln!(out, "#include \"{}\"", include)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::BoundingBox, color::ColorMap, pixel::Pixel, pixel::PixelGrid};

    fn two_by_two() -> (BitmapHeader, PackedBlob) {
        let white = Pixel::new(255, 255, 255, 255);
        let black = Pixel::new(0, 0, 0, 255);
        let grid = PixelGrid::new(2, 2, vec![white, white, black, black]).unwrap();
        let bounds = BoundingBox::trim(&grid);
        let blob = PackedBlob::pack(&grid, bounds, ColorMap::WHITE_IS_SET).unwrap();
        (BitmapHeader::new(bounds), blob)
    }

    #[test]
    fn test_write_pbi() {
        let (header, blob) = two_by_two();
        let mut out = Vec::new();
        write_pbi(&mut out, &header, &blob).unwrap();
        assert_eq!(
            out,
            vec![
                0x04, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x02, 0x00, //
                0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_write_source() {
        let (header, blob) = two_by_two();
        let mut out = String::new();
        write_source(&mut out, "arrow", &header, &blob).unwrap();
        let expected = concat!(
            "// GBitmap + pixel data generated by pbi-gen:\n",
            "\n",
            "static const uint8_t s_arrow_pixels[] = {\n",
            "    0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, \n",
            "};\n",
            "\n",
            "static const GBitmap s_arrow_bitmap = {\n",
            "  .addr = (void*) &s_arrow_pixels,\n",
            "  .row_size_bytes = 4,\n",
            "  .info_flags = 0x1000,\n",
            "  .bounds = {\n",
            "    .origin = { .x = 0, .y = 0 },\n",
            "    .size = { .w = 2, .h = 2 },\n",
            "  },\n",
            "};\n",
            "\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_source_byte_groups() {
        let grid = PixelGrid::new(40, 3, vec![Pixel::new(255, 255, 255, 255); 120]).unwrap();
        let bounds = BoundingBox::trim(&grid);
        let blob = PackedBlob::pack(&grid, bounds, ColorMap::WHITE_IS_SET).unwrap();
        let mut out = String::new();
        write_source(&mut out, "bar", &BitmapHeader::new(bounds), &blob).unwrap();

        assert_eq!(blob.len(), 24);
        assert!(out.contains("0x00, /* bytes 0 - 16 */\n    0xff, "));
        assert_eq!(out.matches("/* bytes").count(), 1);
        assert_eq!(out.matches("0x").count(), 24 + 1);
    }

    #[test]
    fn test_c_identifier() {
        assert_eq!(c_identifier("icon"), "icon");
        assert_eq!(c_identifier("arrow-left.2x"), "arrow_left_2x");
        assert_eq!(c_identifier("9lives"), "_9lives");
    }

    #[test]
    fn test_write_manifest() {
        let mut out = String::new();
        write_manifest(&mut out, &["a.h".to_string(), "b.h".to_string()]).unwrap();
        assert_eq!(out, "#pragma once\n#include \"a.h\"\n#include \"b.h\"\n");
    }
}
