use crate::cell::PinCell;
use crate::coord::{BoundingBox, Position};
use crate::error::DigipinError;
use crate::index::{GridCodec, GridConfig};
use geo_types::{Polygon, Rect};
use rayon::prelude::*;
use std::collections::HashMap;

/// Upper bound on the number of cells a single grid may hold.
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Every cell of one precision level covering a lon/lat extent.
///
/// The extent is clipped to the codec's region first.
#[derive(Debug, Clone)]
pub struct PinGrid {
    codec: GridCodec,
    cells: Vec<PinCell>,
    lookup: HashMap<String, usize>,
}

impl PinGrid {
    pub fn builder() -> PinGridBuilder {
        PinGridBuilder::new()
    }

    /// Covers `extent` with cells at the codec's precision level.
    ///
    /// # Errors
    ///
    /// - [`DigipinError::InvalidBounds`] - the extent needs more than [`MAX_GRID_CELLS`] cells
    pub fn from_extent(codec: &GridCodec, extent: &BoundingBox) -> Result<Self, DigipinError> {
        let cells = generate_cells_for_extent(codec, extent)?;
        let lookup = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell.code().to_string(), i))
            .collect();

        Ok(Self {
            codec: codec.clone(),
            cells,
            lookup,
        })
    }

    /// Covers a `geo_types::Rect` given in (longitude, latitude).
    pub fn from_rect(codec: &GridCodec, rect: &Rect<f64>) -> Result<Self, DigipinError> {
        let extent =
            BoundingBox::from_edges(rect.min().y, rect.max().y, rect.min().x, rect.max().x)?;
        Self::from_extent(codec, &extent)
    }

    pub fn precision_level(&self) -> u8 {
        self.codec.precision_level()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[PinCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinCell> {
        self.cells.iter()
    }

    /// The grid's cell containing `position`, if the grid covers it.
    pub fn get_cell_at(&self, position: &impl Position) -> Option<&PinCell> {
        let cell = self.codec.encode_position(position).ok()?;
        self.get(cell.code())
    }

    /// The grid's cell with this code, if present.
    pub fn get(&self, code: &str) -> Option<&PinCell> {
        self.lookup.get(code).map(|&i| &self.cells[i])
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.par_iter().map(|cell| cell.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&PinCell>
    where
        F: Fn(&PinCell) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).collect()
    }
}

#[derive(Debug, Default)]
pub struct PinGridBuilder {
    config: GridConfig,
    extent: Option<BoundingBox>,
}

impl PinGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn precision_level(mut self, level: u8) -> Self {
        self.config.precision_level = level;
        self
    }

    pub fn extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.extent =
            BoundingBox::from_edges(rect.min().y, rect.max().y, rect.min().x, rect.max().x).ok();
        self
    }

    pub fn build(self) -> Result<PinGrid, DigipinError> {
        let extent = self
            .extent
            .ok_or_else(|| DigipinError::ConfigError("extent must be set".to_string()))?;
        let codec = GridCodec::new(self.config)?;
        PinGrid::from_extent(&codec, &extent)
    }
}

fn generate_cells_for_extent(
    codec: &GridCodec,
    extent: &BoundingBox,
) -> Result<Vec<PinCell>, DigipinError> {
    let Some(clipped) = extent.intersection(codec.region()) else {
        return Ok(Vec::new());
    };

    let southwest = codec.encode(clipped.south(), clipped.west())?;
    let northeast = codec.encode(clipped.north(), clipped.east())?;
    let lat_step = southwest.bounds().height();
    let lon_step = southwest.bounds().width();

    let rows = ((northeast.latitude() - southwest.latitude()) / lat_step).round() as usize + 1;
    let cols = ((northeast.longitude() - southwest.longitude()) / lon_step).round() as usize + 1;

    if rows.saturating_mul(cols) > MAX_GRID_CELLS {
        return Err(DigipinError::InvalidBounds(format!(
            "extent {} needs {} x {} cells at level {}, limit is {}",
            extent,
            rows,
            cols,
            codec.precision_level(),
            MAX_GRID_CELLS
        )));
    }

    let origin = southwest.center();
    let per_row: Vec<Vec<PinCell>> = (0..rows)
        .into_par_iter()
        .map(|i| {
            (0..cols)
                .map(|j| {
                    codec.encode(
                        origin.latitude() + i as f64 * lat_step,
                        origin.longitude() + j as f64 * lon_step,
                    )
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(per_row.into_iter().flatten().collect())
}
