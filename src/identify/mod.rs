/*!
Identification of formulas: hashes which name a CNF.

Two identifiers with different equivalence classes:

- The [GBD hash](gbd): a cryptographic digest of the name-normalized clause text.
  The identifier external benchmark databases key on.
- The [Weisfeiler-Leman hash](wl): a 64-bit invariant of the formula up to variable
  renaming and polarity flipping, built on the [kernel](kernel).

Both are exposed as path-level operations here, parsing with transparent decompression
and variable normalization.
*/

pub mod gbd;
pub mod kernel;
pub mod wl;

use std::path::Path;

use crate::{
    builder,
    config::WlConfig,
    db::store::{BucketStore, PointerStore},
    types::err::{self},
};

/// The GBD hash of the file at the given path, as a hex string.
pub fn gbd_hash(path: &Path) -> Result<String, err::ErrorKind> {
    let (store, _) = builder::normalized_store_from_path::<PointerStore>(path)?;
    Ok(gbd::gbd_hash_of_store(&store))
}

/// The Weisfeiler-Leman hash of the file at the given path, as a decimal string.
///
/// With [measurements](crate::config::WlConfig::measurements) enabled the result is
/// `hash,parse_ns,calc_ns,mem_bytes,iterations`.
pub fn iso_hash(path: &Path, cfg: &WlConfig) -> Result<String, err::ErrorKind> {
    let (store, parse_time) = builder::normalized_store_from_path::<BucketStore>(path)?;

    let calculation_start = std::time::Instant::now();
    let mut hasher = wl::WeisfeilerLemanHasher::new(&store, cfg);
    let hash = hasher.run();
    let calculation_time = calculation_start.elapsed();

    let mut result = hash.to_string();
    if cfg.measurements {
        result.push_str(&format!(
            ",{},{},{},{}",
            parse_time.as_nanos(),
            calculation_time.as_nanos(),
            hasher.state_bytes(),
            hasher.iterations(),
        ));
    }
    Ok(result)
}
