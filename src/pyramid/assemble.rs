//! Pyramid assembly from normalized instance metadata.
//!
//! Instances arrive as a flat list: one record per stored object, where a
//! logical pyramid level may be split across several concatenation parts.
//! Assembly proceeds in two passes:
//!
//! 1. **Merge**: records are sorted by total pixel matrix width (parts of one
//!    level tie-broken by their frame offset, so mapping union happens in
//!    frame order) and folded into one record per distinct matrix size.
//! 2. **Derive**: for each merged level, tile size, tile-grid size,
//!    resolution factor and tile origin are computed; extent and rotation
//!    come from the base (highest resolution) level alone.
//!
//! Levels are presented coarse to fine: index 0 is the lowest resolution and
//! the last level is the base. Tile lookups address levels by that index.

use std::cmp::Ordering;

use tracing::{debug, warn};
use url::Url;

use crate::error::PyramidError;
use crate::metadata::{NormalizedMetadata, RawImageMetadata};

use super::orientation::Rotation;

// =============================================================================
// Constants
// =============================================================================

/// Tile origin shared by every level, in the flipped-Y tile addressing
/// convention: x starts at 0, y at -1.
pub const TILE_ORIGIN: (f64, f64) = (0.0, -1.0);

// =============================================================================
// PyramidLevel
// =============================================================================

/// One resolution level of the assembled pyramid, with derived geometry.
#[derive(Debug, Clone)]
pub struct PyramidLevel {
    /// The merged metadata backing this level
    pub metadata: NormalizedMetadata,

    /// Tile size as (columns, rows) in pixels
    pub tile_size: (u32, u32),

    /// Tile-grid size as (columns, rows) of tiles, ceil-divided so frames
    /// overhanging the nominal extent still get a grid slot
    pub grid_size: (u32, u32),

    /// Resolution factor relative to the base level: 1.0 at the base, larger
    /// for coarser levels (their pixel spacing is larger)
    pub resolution: f64,

    /// Tile origin in the flipped-Y addressing convention
    pub origin: (f64, f64),
}

impl PyramidLevel {
    fn derive(metadata: NormalizedMetadata, base_spacing_row: f64) -> Self {
        let tile_size = (metadata.columns, metadata.rows);
        let grid_size = (metadata.grid_columns(), metadata.grid_rows());
        let resolution = metadata.pixel_spacing.row / base_spacing_row;
        PyramidLevel {
            metadata,
            tile_size,
            grid_size,
            resolution,
            origin: TILE_ORIGIN,
        }
    }

    /// Total number of tiles in this level's grid.
    pub fn tile_count(&self) -> u32 {
        self.grid_size.0 * self.grid_size.1
    }

    /// Resolve a 1-based tile-grid address to the storage location of the
    /// frame that covers it.
    ///
    /// Returns `None` when no frame maps to that address (sparse levels are
    /// legal: background-only tiles may simply not be stored).
    pub fn frame_location(&self, column: u32, row: u32) -> Option<&str> {
        self.metadata
            .frame_mapping
            .get(&format!("{}-{}", column, row))
            .map(String::as_str)
    }
}

// =============================================================================
// Pyramid
// =============================================================================

/// The assembled multi-resolution pyramid.
///
/// Immutable after assembly; supplying new metadata means assembling a new
/// pyramid, never mutating in place. All accessors are read-only, so sharing
/// a pyramid across threads is safe.
#[derive(Debug, Clone)]
pub struct Pyramid {
    /// Levels ordered coarse to fine; never empty
    levels: Vec<PyramidLevel>,

    /// View extent [min x, min y, max x, max y] in the flipped-Y convention
    extent: [f64; 4],

    /// Rotation of the pixel matrix relative to the slide coordinate system
    rotation: Rotation,
}

impl Pyramid {
    /// Assemble a pyramid from raw per-instance metadata records.
    ///
    /// Fails if any record cannot be normalized, if a concatenation part is
    /// missing its source identifier, if the input is empty, or if the base
    /// level's orientation is not one of the four supported patterns.
    pub fn assemble(records: &[RawImageMetadata]) -> Result<Self, PyramidError> {
        let mut normalized = records
            .iter()
            .map(NormalizedMetadata::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        // Parts of one level must merge in ascending frame-offset order for
        // the mapping union to be correct, regardless of input order.
        normalized.sort_by(compare_records);

        let mut merged: Vec<NormalizedMetadata> = Vec::new();
        for record in normalized {
            let existing = merged.iter_mut().find(|level| {
                level.total_pixel_matrix_columns == record.total_pixel_matrix_columns
                    && level.total_pixel_matrix_rows == record.total_pixel_matrix_rows
            });
            match existing {
                Some(level) => merge_concatenation_part(level, record)?,
                None => merged.push(record),
            }
        }

        let Some(base) = merged.last() else {
            return Err(PyramidError::EmptyPyramid);
        };

        let rotation = Rotation::from_orientation(&base.image_orientation_slide)
            .ok_or(PyramidError::UnsupportedOrientation(base.image_orientation_slide))?;

        // Frames may overhang the nominal matrix; the extent covers only the
        // actual image, in the flipped-Y convention where y spans [-(rows+1), -1].
        let extent = [
            0.0,
            -(f64::from(base.total_pixel_matrix_rows) + 1.0),
            f64::from(base.total_pixel_matrix_columns),
            -1.0,
        ];

        let base_spacing_row = base.pixel_spacing.row;

        // Derive geometry from the base down, then flip back so that levels
        // run coarse to fine for grid addressing.
        let mut levels: Vec<PyramidLevel> = merged
            .into_iter()
            .rev()
            .map(|metadata| PyramidLevel::derive(metadata, base_spacing_row))
            .collect();
        levels.reverse();

        debug!(
            levels = levels.len(),
            rotation = rotation.degrees(),
            "assembled pyramid"
        );

        Ok(Pyramid {
            levels,
            extent,
            rotation,
        })
    }

    /// All levels, ordered coarse to fine.
    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    /// Number of resolution levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get a level by index (0 = coarsest).
    pub fn get_level(&self, level: usize) -> Option<&PyramidLevel> {
        self.levels.get(level)
    }

    /// The base (highest resolution) level.
    pub fn base_level(&self) -> &PyramidLevel {
        // assemble() rejects empty input, so a base level always exists
        &self.levels[self.levels.len() - 1]
    }

    /// View extent [min x, min y, max x, max y] derived from the base level.
    pub fn extent(&self) -> [f64; 4] {
        self.extent
    }

    /// Rotation derived from the base level's orientation vector.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Resolution factors of all levels, coarse to fine.
    pub fn resolutions(&self) -> Vec<f64> {
        self.levels.iter().map(|level| level.resolution).collect()
    }

    /// Resolve a level index and 1-based tile-grid address to a frame
    /// storage location.
    ///
    /// A miss is not an error: the tile-fetch collaborator decides whether a
    /// missing frame means background or a broken source.
    pub fn frame_location(&self, level: usize, column: u32, row: u32) -> Option<&str> {
        let Some(level_ref) = self.levels.get(level) else {
            warn!(level, "pyramid level out of range");
            return None;
        };
        let location = level_ref.frame_location(column, row);
        if location.is_none() {
            warn!(level, column, row, "tile not found in frame mapping");
        }
        location
    }

    /// Build the WADO-RS retrieval URL for a tile.
    ///
    /// Joins the frame storage location with the study/series path of the
    /// addressed level under the given DICOMweb base URL. Returns `None`
    /// when the tile has no stored frame.
    pub fn frame_url(
        &self,
        base_url: &Url,
        level: usize,
        column: u32,
        row: u32,
    ) -> Option<Url> {
        let level_ref = self.levels.get(level)?;
        let location = self.frame_location(level, column, row)?;
        let path = format!(
            "{}/studies/{}/series/{}/instances/{}",
            base_url.as_str().trim_end_matches('/'),
            level_ref.metadata.study_instance_uid,
            level_ref.metadata.series_instance_uid,
            location
        );
        match Url::parse(&path) {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(%error, "failed to build frame retrieval URL");
                None
            }
        }
    }
}

// =============================================================================
// Merge pass
// =============================================================================

/// Sort key for the merge pass: total matrix width ascending, parts of one
/// level by frame offset ascending.
fn compare_records(a: &NormalizedMetadata, b: &NormalizedMetadata) -> Ordering {
    a.total_pixel_matrix_columns
        .cmp(&b.total_pixel_matrix_columns)
        .then_with(|| {
            a.concatenation_frame_offset_number
                .unwrap_or(0)
                .cmp(&b.concatenation_frame_offset_number.unwrap_or(0))
        })
}

/// Fold a concatenation part into the level it belongs to.
///
/// Frame counts are summed, frame mappings unioned, per-frame positions
/// concatenated. The level adopts the concatenation source's SOP Instance
/// UID as its identity and drops the concatenation-only attributes.
fn merge_concatenation_part(
    level: &mut NormalizedMetadata,
    part: NormalizedMetadata,
) -> Result<(), PyramidError> {
    let Some(source_uid) = part.concatenation_source_uid else {
        return Err(PyramidError::MissingConcatenationSource {
            sop_instance_uid: part.sop_instance_uid,
        });
    };

    debug!(
        source = %source_uid,
        part = %part.sop_instance_uid,
        frames = part.number_of_frames,
        "merging concatenation part"
    );

    level.frame_mapping.extend(part.frame_mapping);
    level.number_of_frames += part.number_of_frames;
    level.frame_positions.extend(part.frame_positions);

    level.sop_instance_uid = source_uid;
    level.concatenation_source_uid = None;
    level.concatenation_uid = None;
    level.in_concatenation_number = None;
    level.concatenation_frame_offset_number = None;

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
