//! Neighbor enumeration and radius search on top of the codec.

use crate::cell::PinCell;
use crate::coord::{Coordinate, Position};
use crate::error::DigipinError;
use crate::geom::haversine_distance;
use crate::index::{GridCodec, MAX_SEARCH_CELLS};
use crate::validate::{check_distance_radius, check_radius};
use crate::warning::{Annotated, Warning};
use rayon::prelude::*;
use std::collections::HashSet;

/// Outcome of encoding one shifted position.
enum Candidate {
    Hit(PinCell),
    Skipped(Skip),
}

enum Skip {
    OutsideRegion,
    Rejected(DigipinError),
}

fn locate_offset(codec: &GridCodec, latitude: f64, longitude: f64) -> Candidate {
    if !codec.is_within_region(&(longitude, latitude)) {
        return Candidate::Skipped(Skip::OutsideRegion);
    }
    match codec.encode(latitude, longitude) {
        Ok(cell) => Candidate::Hit(cell),
        Err(e) => Candidate::Skipped(Skip::Rejected(e)),
    }
}

/// Cells within `radius` grid steps of `cell`, excluding `cell` itself.
///
/// The cell's own latitude and longitude spans are the unit step. Candidates
/// falling outside the region are dropped, so cells on the region edge have
/// fewer neighbors. Radii above 100 are capped, with a warning.
///
/// Results are ordered south to north, then west to east.
///
/// # Errors
///
/// - [`DigipinError::InvalidRadius`] - `radius` is zero or negative
pub fn neighbors(
    codec: &GridCodec,
    cell: &PinCell,
    radius: i64,
) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
    let (radius, capped) = check_radius(radius)?;
    let warnings: Vec<Warning> = capped.into_iter().collect();
    for warning in &warnings {
        log::warn!("neighbors of {}: {}", cell, warning);
    }

    let r = radius as i64;
    let center = cell.center();
    let bounds = cell.bounds();
    let (lat_step, lon_step) = (bounds.height(), bounds.width());

    let offsets: Vec<(i64, i64)> = (-r..=r)
        .flat_map(|di| (-r..=r).map(move |dj| (di, dj)))
        .filter(|&offset| offset != (0, 0))
        .collect();

    let candidates: Vec<Candidate> = offsets
        .par_iter()
        .map(|&(di, dj)| {
            locate_offset(
                codec,
                center.latitude() + di as f64 * lat_step,
                center.longitude() + dj as f64 * lon_step,
            )
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len() + 1);
    seen.insert(cell.code().to_string());

    let mut skipped = 0usize;
    let mut cells = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match candidate {
            Candidate::Hit(found) => {
                if seen.insert(found.code().to_string()) {
                    cells.push(found);
                }
            }
            Candidate::Skipped(Skip::OutsideRegion) => skipped += 1,
            Candidate::Skipped(Skip::Rejected(e)) => {
                log::trace!("neighbor of {} rejected: {}", cell, e);
                skipped += 1;
            }
        }
    }

    log::debug!(
        "{} neighbors of {} at radius {} ({} skipped)",
        cells.len(),
        cell,
        radius,
        skipped
    );
    Ok(Annotated::with_warnings(cells, warnings))
}

/// Cells whose centers lie within `radius_meters` of `center`.
///
/// The search covers `ceil(radius / grid size)` cells around the cell
/// holding `center`, capped at 100 with a warning, plus that cell itself
/// (last in the list). A center outside the region yields an empty result
/// and an [`Warning::OutsideRegion`] warning rather than an error; a center
/// close to the region edge carries [`Warning::NearBoundary`].
///
/// # Errors
///
/// - [`DigipinError::InvalidRadius`] - radius is zero, negative or not finite
/// - [`DigipinError::InvalidCoordinate`] - `center` is not a valid coordinate
///
/// # Example
/// ```
/// use digipin_rs::{GridCodec, search};
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let codec = GridCodec::default();
/// let found = search::find_in_radius(&codec, &(77.2090, 28.6139), 10.0)?;
/// assert!(found.value.iter().any(|c| c.code() == "39J438TJC7"));
/// # Ok(())
/// # }
/// ```
pub fn find_in_radius(
    codec: &GridCodec,
    center: &impl Position,
    radius_meters: f64,
) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
    let mut warnings: Vec<Warning> = check_distance_radius(radius_meters)?.into_iter().collect();
    let origin = Coordinate::from_position(center)?;

    if !codec.is_within_region(&origin) {
        let warning = Warning::OutsideRegion { coordinate: origin };
        log::warn!("radius search skipped: {}", warning);
        warnings.push(warning);
        return Ok(Annotated::with_warnings(Vec::new(), warnings));
    }

    let located = codec.encode_annotated(origin.latitude(), origin.longitude())?;
    warnings.extend(located.warnings);
    let center_cell = located.value;
    let wanted = (radius_meters / center_cell.grid_size_meters()).ceil().max(1.0);
    let cells = if wanted > MAX_SEARCH_CELLS as f64 {
        let warning = Warning::RadiusCapped {
            requested: wanted as u64,
            applied: MAX_SEARCH_CELLS,
        };
        log::warn!("radius search around {}: {}", origin, warning);
        warnings.push(warning);
        MAX_SEARCH_CELLS
    } else {
        wanted as u32
    };

    let around = neighbors(codec, &center_cell, cells as i64)?;
    warnings.extend(around.warnings);

    let mut candidates = around.value;
    candidates.push(center_cell);

    let found: Vec<PinCell> = candidates
        .into_par_iter()
        .filter(|cell| haversine_distance(&origin, &cell.center()) <= radius_meters)
        .collect();

    log::debug!(
        "{} cells within {} m of {}",
        found.len(),
        radius_meters,
        origin
    );
    Ok(Annotated::with_warnings(found, warnings))
}
