use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre, WrapErr};
use env_logger::Env;
use log::{info, LevelFilter};

use pbi_gen::{
    convert_dir, pbi_path_for, BatchConfig, Bitmap, BitmapHeader, ColorMap,
};

#[derive(Parser)]
#[clap(name = "pbi-gen")]
/// Generate 1-bit PBI bitmaps and C sources from images.
///
/// Without a command, every png in `bitmaps/` is converted.
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Make a .pbi (binary image) file
    Pbi {
        /// The image to process
        input: PathBuf,
        /// The pbi output file, defaults to INPUT with a .pbi extension
        output: Option<PathBuf>,
        /// Which pixels become set bits: `white` or `black`
        #[clap(long, short = 'm', default_value = "white")]
        color_map: ColorMap,
    },
    /// Make a C source file, printed to stdout unless `--out` is given
    Header {
        /// The image to process
        input: PathBuf,
        #[clap(long, short = 'o')]
        out: Option<PathBuf>,
        /// Which pixels become set bits: `white` or `black`
        #[clap(long, short = 'm', default_value = "white")]
        color_map: ColorMap,
    },
    /// Make a .pbi file for a white transparency layer
    WhiteTransPbi {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Make a .pbi file for a black transparency layer
    BlackTransPbi {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Convert every png in a folder and write a `bitmaps.h` manifest
    Batch {
        #[clap(default_value = "bitmaps")]
        dir: PathBuf,
        #[clap(long, short = 'm', default_value = "white")]
        color_map: ColorMap,
    },
    /// Print the header of a .pbi file
    Info { file: PathBuf },
}

/// Set up error reporting and logging, then parse the arguments
fn init() -> eyre::Result<Args> {
    color_eyre::install()?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_env(Env::new().filter("PBI_GEN_LOG"))
        .init();
    Ok(Args::parse())
}

fn open(input: &Path, color_map: ColorMap) -> eyre::Result<Bitmap> {
    Bitmap::open(input, color_map)
        .wrap_err_with(|| format!("Failed to convert '{}'", input.display()))
}

fn cmd_pbi(input: &Path, output: Option<PathBuf>, color_map: ColorMap) -> eyre::Result<()> {
    let bitmap = open(input, color_map)?;
    let out_path = output.unwrap_or_else(|| pbi_path_for(input));
    bitmap
        .save_pbi(&out_path)
        .wrap_err_with(|| format!("Failed to write '{}'", out_path.display()))?;
    Ok(())
}

fn cmd_header(input: &Path, out: Option<PathBuf>, color_map: ColorMap) -> eyre::Result<()> {
    let bitmap = open(input, color_map)?;
    match out {
        Some(out_path) => bitmap
            .save_source(&out_path)
            .wrap_err_with(|| format!("Failed to write '{}'", out_path.display()))?,
        None => print!("{}", bitmap.to_source()),
    }
    Ok(())
}

fn cmd_batch(dir: &Path, color_map: ColorMap) -> eyre::Result<()> {
    let config = BatchConfig::new().color_map(color_map);
    let report = convert_dir(dir, &config)
        .wrap_err_with(|| format!("Failed to process folder '{}'", dir.display()))?;

    info!(
        "Converted {} image(s), {} failed",
        report.converted.len(),
        report.failed.len()
    );
    if report.is_success() {
        Ok(())
    } else {
        Err(eyre!(
            "{} image(s) in '{}' could not be converted",
            report.failed.len(),
            dir.display()
        ))
    }
}

fn cmd_info(file: &Path) -> eyre::Result<()> {
    let buffer = std::fs::read(file)
        .wrap_err_with(|| format!("Failed to open file: `{}`", file.display()))?;
    let header = BitmapHeader::from_buf(&buffer)?;
    let bounds = header.bounds;

    println!("version:        {}", header.version());
    println!("info_flags:     0x{:04x}", header.info_flags);
    println!("row_size_bytes: {}", header.row_size_bytes);
    println!("origin:         ({}, {})", bounds.x, bounds.y);
    println!("size:           {}x{}", bounds.w, bounds.h);

    let data_len = buffer.len() - BitmapHeader::SIZE;
    if data_len != header.blob_len() {
        return Err(eyre!(
            "Pixel data is {} bytes, header expects {}",
            data_len,
            header.blob_len()
        ));
    }
    println!("pixel data:     {} bytes", data_len);
    Ok(())
}

fn main() -> eyre::Result<()> {
    let args = init()?;

    match args.command {
        Some(Command::Pbi {
            input,
            output,
            color_map,
        }) => cmd_pbi(&input, output, color_map),
        Some(Command::Header {
            input,
            out,
            color_map,
        }) => cmd_header(&input, out, color_map),
        Some(Command::WhiteTransPbi { input, output }) => {
            cmd_pbi(&input, output, ColorMap::WHITE_IS_SET)
        }
        Some(Command::BlackTransPbi { input, output }) => {
            cmd_pbi(&input, output, ColorMap::BLACK_IS_SET)
        }
        Some(Command::Batch { dir, color_map }) => cmd_batch(&dir, color_map),
        Some(Command::Info { file }) => cmd_info(&file),
        None => cmd_batch(Path::new("bitmaps"), ColorMap::WHITE_IS_SET),
    }
}
