/*!
Building formulas from DIMACS streams.

The [parser](dimacs) is generic over [clause stores](crate::db::store), so the same pass
fills whichever layout an analysis wants.
[open_dimacs] opens a path with transparent decompression, selected by the file extension
(`.xz`, `.lzma`, `.gz`, `.bz2`).
The [writer](write) emits a store back out in DIMACS form.
*/

pub mod dimacs;
pub mod write;

use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::{
    db::store::ClauseStore,
    types::err::{self},
};

/// A boxed reader over the (possibly compressed) contents of a file.
pub fn open_dimacs(path: &Path) -> Result<Box<dyn Read>, err::ErrorKind> {
    let file = File::open(path)?;

    match path.extension() {
        Some(extension) if extension == "xz" || extension == "lzma" => {
            Ok(Box::new(xz2::read::XzDecoder::new(file)))
        }
        Some(extension) if extension == "gz" => Ok(Box::new(flate2::read::GzDecoder::new(file))),
        Some(extension) if extension == "bz2" => Ok(Box::new(bzip2::read::BzDecoder::new(file))),
        Some(_) | None => Ok(Box::new(file)),
    }
}

/// Parse the file at the given path into a fresh store.
pub fn store_from_path<S: ClauseStore>(path: &Path) -> Result<S, err::ErrorKind> {
    let reader = open_dimacs(path)?;
    let mut store = S::default();
    dimacs::read_dimacs(BufReader::new(reader), &mut store)?;
    Ok(store)
}

/// The innermost extension of a path, looking through any compression extension.
///
/// `formula.cnf.xz` has the content extension `cnf`.
pub fn content_extension(path: &Path) -> Option<&str> {
    let extension = path.extension()?.to_str()?;
    match extension {
        "xz" | "lzma" | "gz" | "bz2" => {
            let stem = Path::new(path.file_stem()?);
            stem.extension()?.to_str()
        }
        _ => Some(extension),
    }
}

/// Parse, normalize, and time a store build, as the identification hashes want.
pub fn normalized_store_from_path<S: ClauseStore>(
    path: &Path,
) -> Result<(S, std::time::Duration), err::ErrorKind> {
    let parse_start = std::time::Instant::now();
    let mut store: S = store_from_path(path)?;
    store.normalize_variable_names();
    Ok((store, parse_start.elapsed()))
}
