//! The reflective plate: a dense rectangular grid of mirror cells.
//!
//! The plate lies on z = 0 facing (0, 0, -1). Cells sit on integer x/y
//! positions starting at the plate origin. Encoding engraves mirror normals
//! into cells hit by camera sightlines; decoding scans every cell for a
//! stored normal that would bounce a light into a camera.
//!
//! Cells are stored flat, row-major: `index = y * size_x + x`.

use crate::core::cell::Cell;
use crate::core::math::{is_degenerate, mirror_normal};
use crate::core::scene::SceneRecord;
use nalgebra::Vector3;
use rayon::prelude::*;
use std::borrow::Borrow;
use std::collections::HashMap;
use thiserror::Error;

/// Default decode tolerance, roughly one degree in radians.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 0.017453;

/// Furthest a sightline crossing may land from its cell and still count as
/// hitting the plate (one grid diagonal).
pub const SIGHTLINE_MAX_OFFSET: f64 = std::f64::consts::SQRT_2;

/// Errors that can occur when constructing a plate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateError {
    #[error("Plate bounds must be a positive area, got {size_x}x{size_y}")]
    InvalidDimensions { size_x: i64, size_y: i64 },

    #[error("Plate of {size_x}x{size_y} cells is too large to allocate")]
    TooManyCells { size_x: i64, size_y: i64 },

    #[error("Plate starting at ({start_x}, {start_y}) overflows integer cell coordinates")]
    CoordinateOverflow { start_x: i64, start_y: i64 },
}

/// Counters describing one encode call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Scene records consumed
    pub records: usize,

    /// Keypoints seen across all records
    pub keypoints: usize,

    /// Gradients appended to cells
    pub written: usize,

    /// Keypoints whose sightline missed the plate
    pub dropped: usize,

    /// Keypoints that hit a cell where no mirror orientation exists
    /// (light or camera on the cell, or directly opposed)
    pub degenerate: usize,
}

impl EncodeStats {
    fn merge(self, other: Self) -> Self {
        Self {
            records: self.records + other.records,
            keypoints: self.keypoints + other.keypoints,
            written: self.written + other.written,
            dropped: self.dropped + other.dropped,
            degenerate: self.degenerate + other.degenerate,
        }
    }
}

/// What a single keypoint contributes to the plate.
enum Engraving {
    Gradient { cell: usize, normal: Vector3<f64> },
    Missed,
    Degenerate,
}

impl Engraving {
    fn tally(&self, stats: &mut EncodeStats) {
        stats.keypoints += 1;
        match self {
            Engraving::Gradient { .. } => stats.written += 1,
            Engraving::Missed => stats.dropped += 1,
            Engraving::Degenerate => stats.degenerate += 1,
        }
    }
}

/// A flat rectangular grid of mirror cells on z = 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Plate {
    start_x: i64,
    start_y: i64,
    size_x: usize,
    size_y: usize,
    cells: Vec<Cell>,
}

impl Plate {
    /// Create a plate whose corner cell sits at `(start_x, start_y, 0)`.
    ///
    /// Fails unless both sizes are positive.
    pub fn new(start_x: i64, start_y: i64, size_x: i64, size_y: i64) -> Result<Self, PlateError> {
        if size_x <= 0 || size_y <= 0 {
            return Err(PlateError::InvalidDimensions { size_x, size_y });
        }

        let too_many = PlateError::TooManyCells { size_x, size_y };
        let (nx, ny) = match (usize::try_from(size_x), usize::try_from(size_y)) {
            (Ok(nx), Ok(ny)) => (nx, ny),
            _ => return Err(too_many),
        };
        let len = nx.checked_mul(ny).ok_or_else(|| too_many.clone())?;

        if start_x.checked_add(size_x - 1).is_none() || start_y.checked_add(size_y - 1).is_none() {
            return Err(PlateError::CoordinateOverflow { start_x, start_y });
        }

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_many)?;
        for y in 0..size_y {
            for x in 0..size_x {
                cells.push(Cell::new(start_x + x, start_y + y));
            }
        }

        log::debug!(
            "Created {}x{} plate at ({}, {}) with {} cells",
            nx,
            ny,
            start_x,
            start_y,
            len
        );

        Ok(Self {
            start_x,
            start_y,
            size_x: nx,
            size_y: ny,
            cells,
        })
    }

    /// World position of the corner cell `(0, 0)`.
    pub fn origin(&self) -> (i64, i64) {
        (self.start_x, self.start_y)
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// Total number of cells (`size_x * size_y`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a plate has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at grid index `(x, y)`, if in range.
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.size_x && y < self.size_y {
            self.cells.get(y * self.size_x + x)
        } else {
            None
        }
    }

    /// Total gradients engraved across every cell.
    pub fn gradient_count(&self) -> usize {
        self.cells.iter().map(Cell::gradient_count).sum()
    }

    /// Corner cell positions, counter-clockwise from the origin corner.
    pub fn corners(&self) -> [Vector3<i64>; 4] {
        let max_x = self.start_x + self.size_x as i64 - 1;
        let max_y = self.start_y + self.size_y as i64 - 1;
        [
            Vector3::new(self.start_x, self.start_y, 0),
            Vector3::new(max_x, self.start_y, 0),
            Vector3::new(max_x, max_y, 0),
            Vector3::new(self.start_x, max_y, 0),
        ]
    }

    /// The cell nearest to `point` in x/y.
    ///
    /// Out-of-range points clamp to the nearest edge or corner cell, so this
    /// always returns a cell. Intended for points already on the plate plane.
    pub fn closest_cell(&self, point: &Vector3<f64>) -> &Cell {
        &self.cells[self.closest_index(point)]
    }

    /// The cell where the line from `camera` through `keypoint` crosses the plate.
    ///
    /// Returns `None` when the line is parallel to the plate (`camera.z ==
    /// keypoint.z`) or when the crossing lands off the plate's footprint.
    pub fn sightline_cell(&self, camera: &Vector3<f64>, keypoint: &Vector3<f64>) -> Option<&Cell> {
        self.sightline_index(camera, keypoint)
            .map(|index| &self.cells[index])
    }

    fn closest_index(&self, point: &Vector3<f64>) -> usize {
        let x = clamp_axis(point.x, self.start_x, self.size_x);
        let y = clamp_axis(point.y, self.start_y, self.size_y);
        y * self.size_x + x
    }

    fn sightline_index(&self, camera: &Vector3<f64>, keypoint: &Vector3<f64>) -> Option<usize> {
        let dz = camera.z - keypoint.z;
        if dz == 0.0 {
            return None;
        }

        // keypoint + t * (camera - keypoint) has z = 0 at this t
        let t = -keypoint.z / dz;
        let crossing = keypoint + (camera - keypoint) * t;

        let index = self.closest_index(&crossing);
        let offset = (self.cells[index].position() - crossing).norm();

        // Written so a NaN offset is rejected too
        if offset <= SIGHTLINE_MAX_OFFSET {
            Some(index)
        } else {
            None
        }
    }

    fn engraving(&self, record: &SceneRecord, keypoint: &Vector3<f64>) -> Engraving {
        let Some(cell) = self.sightline_index(&record.camera, keypoint) else {
            log::trace!("Keypoint {:?} misses the plate", keypoint);
            return Engraving::Missed;
        };

        // The mirror sits at the cell's own position, not the raw crossing
        let normal = mirror_normal(&record.source, &record.camera, &self.cells[cell].position());
        if is_degenerate(&normal) {
            Engraving::Degenerate
        } else {
            Engraving::Gradient { cell, normal }
        }
    }

    /// Engrave a stream of scene records into the plate.
    ///
    /// Records are consumed lazily in arrival order. Each keypoint is traced
    /// along its sightline to a cell, and the mirror normal that cell needs to
    /// reflect the record's source into its camera is appended there. Keypoints
    /// that miss the plate are dropped; degenerate normals are not stored.
    ///
    /// Encoding is cumulative across calls.
    pub fn encode<I>(&mut self, records: I) -> EncodeStats
    where
        I: IntoIterator,
        I::Item: Borrow<SceneRecord>,
    {
        let mut stats = EncodeStats::default();

        for record in records {
            let record = record.borrow();
            stats.records += 1;

            for keypoint in &record.keypoints {
                let engraving = self.engraving(record, keypoint);
                engraving.tally(&mut stats);
                if let Engraving::Gradient { cell, normal } = engraving {
                    self.cells[cell].push_gradient(normal);
                }
            }
        }

        log::debug!(
            "Encoded {} records: {} gradients written, {} keypoints dropped, {} degenerate",
            stats.records,
            stats.written,
            stats.dropped,
            stats.degenerate
        );
        stats
    }

    /// Parallel [`encode`](Self::encode) over an in-memory batch.
    ///
    /// Workers stage gradients per cell index, staged maps are merged in
    /// record order, then committed to the cells in one pass. The plate ends
    /// up identical to a sequential encode of the same records.
    pub fn encode_par(&mut self, records: &[SceneRecord]) -> EncodeStats {
        type Staged = (HashMap<usize, Vec<Vector3<f64>>>, EncodeStats);

        let plate = &*self;
        let (staged, stats) = records
            .par_iter()
            .fold(
                || -> Staged { (HashMap::new(), EncodeStats::default()) },
                |(mut staged, mut stats), record| {
                    stats.records += 1;
                    for keypoint in &record.keypoints {
                        let engraving = plate.engraving(record, keypoint);
                        engraving.tally(&mut stats);
                        if let Engraving::Gradient { cell, normal } = engraving {
                            staged.entry(cell).or_default().push(normal);
                        }
                    }
                    (staged, stats)
                },
            )
            .reduce(
                || -> Staged { (HashMap::new(), EncodeStats::default()) },
                |(mut left, left_stats), (right, right_stats)| {
                    for (cell, gradients) in right {
                        left.entry(cell).or_default().extend(gradients);
                    }
                    (left, left_stats.merge(right_stats))
                },
            );

        let touched = staged.len();
        for (cell, gradients) in staged {
            self.cells[cell].extend_gradients(gradients);
        }

        log::debug!(
            "Encoded {} records in parallel: {} gradients into {} cells, {} dropped, {} degenerate",
            stats.records,
            stats.written,
            touched,
            stats.dropped,
            stats.degenerate
        );
        stats
    }

    /// Coordinates of every cell that reflects `source` into `camera`.
    ///
    /// Full scan: a cell is visible when any stored gradient lies within
    /// `angle_tolerance` radians of the mirror normal it would need at its
    /// position. Output follows row-major scan order.
    pub fn decode(
        &self,
        source: &Vector3<f64>,
        camera: &Vector3<f64>,
        angle_tolerance: f64,
    ) -> Vec<Vector3<i64>> {
        let visible: Vec<Vector3<i64>> = self
            .cells
            .iter()
            .filter(|cell| cell_is_visible(cell, source, camera, angle_tolerance))
            .map(Cell::coords)
            .collect();

        log::debug!("Decoded {} visible cells", visible.len());
        visible
    }

    /// Parallel [`decode`](Self::decode); same cells in the same order.
    pub fn decode_par(
        &self,
        source: &Vector3<f64>,
        camera: &Vector3<f64>,
        angle_tolerance: f64,
    ) -> Vec<Vector3<i64>> {
        let visible: Vec<Vector3<i64>> = self
            .cells
            .par_iter()
            .filter(|cell| cell_is_visible(cell, source, camera, angle_tolerance))
            .map(Cell::coords)
            .collect();

        log::debug!("Decoded {} visible cells in parallel", visible.len());
        visible
    }
}

fn cell_is_visible(
    cell: &Cell,
    source: &Vector3<f64>,
    camera: &Vector3<f64>,
    angle_tolerance: f64,
) -> bool {
    if cell.gradient_count() == 0 {
        return false;
    }
    let expected = mirror_normal(source, camera, &cell.position());
    cell.reflects(&expected, angle_tolerance)
}

/// Round to the nearest grid line (ties to even), shift by the plate origin,
/// and clamp into `[0, size - 1]`.
fn clamp_axis(value: f64, start: i64, size: usize) -> usize {
    // Float-to-int `as` saturates, and maps NaN to 0
    let offset = (value.round_ties_even() as i64).saturating_sub(start);
    offset.clamp(0, size as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_row_major_from_origin() {
        let plate = Plate::new(-2, 3, 4, 2).unwrap();
        assert_eq!(plate.len(), 8);
        assert_eq!(plate.cells()[0].coords(), Vector3::new(-2, 3, 0));
        assert_eq!(plate.cells()[3].coords(), Vector3::new(1, 3, 0));
        assert_eq!(plate.cells()[4].coords(), Vector3::new(-2, 4, 0));
        assert_eq!(plate.cell(3, 1).unwrap().coords(), Vector3::new(1, 4, 0));
        assert!(plate.cell(4, 0).is_none());
        assert!(plate.cell(0, 2).is_none());
    }

    #[test]
    fn test_non_square_addressing_uses_row_width() {
        // A 3-wide, 5-tall plate must step rows by 3, not by 5
        let plate = Plate::new(0, 0, 3, 5).unwrap();
        for y in 0..5 {
            for x in 0..3 {
                let point = Vector3::new(x as f64, y as f64, 0.0);
                assert_eq!(plate.closest_cell(&point).coords(), Vector3::new(x, y, 0));
            }
        }
    }

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(0.4, 0, 5), 0);
        assert_eq!(clamp_axis(2.6, 0, 5), 3);
        assert_eq!(clamp_axis(-100.0, 0, 5), 0);
        assert_eq!(clamp_axis(100.0, 0, 5), 4);
        assert_eq!(clamp_axis(-1.0, -2, 5), 1);
        assert_eq!(clamp_axis(f64::NAN, 0, 5), 0);
        assert_eq!(clamp_axis(f64::INFINITY, 0, 5), 4);
        // Ties go to the even neighbour
        assert_eq!(clamp_axis(0.5, 0, 5), 0);
        assert_eq!(clamp_axis(1.5, 0, 5), 2);
    }

    #[test]
    fn test_construction_rejects_overflow() {
        assert_eq!(
            Plate::new(0, 0, i64::MAX, i64::MAX),
            Err(PlateError::TooManyCells {
                size_x: i64::MAX,
                size_y: i64::MAX
            })
        );
        assert_eq!(
            Plate::new(i64::MAX, 0, 2, 1),
            Err(PlateError::CoordinateOverflow {
                start_x: i64::MAX,
                start_y: 0
            })
        );
    }

    #[test]
    fn test_corners() {
        let plate = Plate::new(-20, -10, 41, 21).unwrap();
        assert_eq!(
            plate.corners(),
            [
                Vector3::new(-20, -10, 0),
                Vector3::new(20, -10, 0),
                Vector3::new(20, 10, 0),
                Vector3::new(-20, 10, 0),
            ]
        );
    }

    #[test]
    fn test_encode_stats_count_every_outcome() {
        let mut plate = Plate::new(-2, -2, 5, 5).unwrap();
        let camera = Vector3::new(0.0, 0.0, -10.0);
        let record = SceneRecord::new(
            camera,
            camera,
            vec![
                Vector3::new(1.0, 1.0, 3.0),   // lands on the plate
                Vector3::new(40.0, 0.0, 5.0),  // misses
                Vector3::new(0.0, 0.0, -10.0), // parallel sightline
            ],
        );

        let stats = plate.encode([&record]);
        assert_eq!(
            stats,
            EncodeStats {
                records: 1,
                keypoints: 3,
                written: 1,
                dropped: 2,
                degenerate: 0,
            }
        );
        assert_eq!(plate.gradient_count(), 1);
    }

    #[test]
    fn test_encode_skips_degenerate_normals() {
        let mut plate = Plate::new(-2, -2, 5, 5).unwrap();
        // Light directly behind the plate, camera directly in front: normals cancel
        let record = SceneRecord::new(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, -10.0),
            vec![Vector3::new(0.0, 0.0, 1.0)],
        );

        let stats = plate.encode([record]);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.written, 0);
        assert_eq!(plate.gradient_count(), 0);
    }
}
