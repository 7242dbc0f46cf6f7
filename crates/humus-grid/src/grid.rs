//! Three boundary arrays composed into a linear box index.

use crate::boundary::BoundaryArray;
use crate::dimension::{Dimension, Face};
use crate::edge::WrapConfig;
use crate::error::GridError;
use crate::wrap::WrapDirection;
use humus_core::{Aabb, BoxCoordinate, BoxIndex, SoilPoint};
use smallvec::SmallVec;

/// A non-uniform 3D grid of boxes.
///
/// Box `(x, y, z)` (1-based) has linear index
/// `x-1 + nx*(y-1) + nx*ny*(z-1)`, so X varies fastest. Encoding and
/// decoding are exact inverses over `[0, box_count)`.
///
/// X and Y may be periodic (see [`WrapConfig`]); Z never is.
///
/// # Examples
///
/// ```
/// use humus_core::{BoxCoordinate, BoxIndex, SoilPoint};
/// use humus_grid::{BoundaryArray, BoxGrid, Dimension, WrapConfig};
///
/// let axis = |d| BoundaryArray::new(d, vec![0.0, 5.0, 10.0]).unwrap();
/// let grid = BoxGrid::new(
///     axis(Dimension::X),
///     axis(Dimension::Y),
///     axis(Dimension::Z),
///     WrapConfig::NONE,
/// )
/// .unwrap();
///
/// assert_eq!(grid.box_count(), 8);
/// assert_eq!(grid.box_index(BoxCoordinate::new(2, 2, 2)).unwrap(), BoxIndex(7));
/// let (coord, _) = grid.find_box(&SoilPoint::new(7.0, 7.0, 7.0)).unwrap();
/// assert_eq!(coord, BoxCoordinate::new(2, 2, 2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGrid {
    x: BoundaryArray,
    y: BoundaryArray,
    z: BoundaryArray,
    wrap: WrapConfig,
    box_count: usize,
}

/// Map a continuous position into `[lower, upper]` by whole periods.
fn wrap_position(value: f64, lower: f64, upper: f64) -> (f64, bool) {
    if value >= lower && value <= upper {
        return (value, false);
    }
    let period = upper - lower;
    (lower + (value - lower).rem_euclid(period), true)
}

/// Map a 1-based layer index into `[1, layers]` by whole periods.
fn wrap_layer(layer: i64, layers: u32) -> (u32, bool) {
    let n = layers as i64;
    if layer >= 1 && layer <= n {
        return (layer as u32, false);
    }
    ((layer - 1).rem_euclid(n) as u32 + 1, true)
}

impl BoxGrid {
    /// Compose a grid from one boundary array per dimension.
    ///
    /// Each array must have been built for the axis it is supplied as.
    pub fn new(
        x: BoundaryArray,
        y: BoundaryArray,
        z: BoundaryArray,
        wrap: WrapConfig,
    ) -> Result<Self, GridError> {
        for (expected, array) in [(Dimension::X, &x), (Dimension::Y, &y), (Dimension::Z, &z)] {
            if array.dimension() != expected {
                return Err(GridError::DimensionMismatch {
                    expected,
                    found: array.dimension(),
                });
            }
        }
        let box_count = (x.layer_count() as usize)
            .checked_mul(y.layer_count() as usize)
            .and_then(|xy| xy.checked_mul(z.layer_count() as usize))
            .ok_or(GridError::BoxCountOverflow)?;
        Ok(Self {
            x,
            y,
            z,
            wrap,
            box_count,
        })
    }

    /// Boundary array for one dimension.
    pub fn boundary(&self, dimension: Dimension) -> &BoundaryArray {
        match dimension {
            Dimension::X => &self.x,
            Dimension::Y => &self.y,
            Dimension::Z => &self.z,
        }
    }

    /// Periodic dimensions.
    pub fn wrap(&self) -> WrapConfig {
        self.wrap
    }

    /// Layers along X.
    pub fn num_x(&self) -> u32 {
        self.x.layer_count()
    }

    /// Layers along Y.
    pub fn num_y(&self) -> u32 {
        self.y.layer_count()
    }

    /// Layers along Z.
    pub fn num_z(&self) -> u32 {
        self.z.layer_count()
    }

    /// Total number of boxes.
    pub fn box_count(&self) -> usize {
        self.box_count
    }

    /// All box indices in ascending order.
    pub fn box_indices(&self) -> impl Iterator<Item = BoxIndex> {
        (0..self.box_count).map(BoxIndex)
    }

    /// Continuous extent of the whole grid.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            SoilPoint::new(self.x.lower_bound(), self.y.lower_bound(), self.z.lower_bound()),
            SoilPoint::new(self.x.upper_bound(), self.y.upper_bound(), self.z.upper_bound()),
        )
    }

    fn check_coord(&self, coord: BoxCoordinate) -> Result<(), GridError> {
        let (nx, ny, nz) = (self.num_x(), self.num_y(), self.num_z());
        let ok = |v: u32, n: u32| v >= 1 && v <= n;
        if ok(coord.x, nx) && ok(coord.y, ny) && ok(coord.z, nz) {
            Ok(())
        } else {
            Err(GridError::CoordinateOutOfRange {
                coord,
                bounds: format!("[1, {nx}] x [1, {ny}] x [1, {nz}]"),
            })
        }
    }

    /// Verify `index` lies in `[0, box_count)`.
    pub fn check_index(&self, index: BoxIndex) -> Result<(), GridError> {
        if index.0 < self.box_count {
            Ok(())
        } else {
            Err(GridError::BoxOutOfRange {
                index,
                count: self.box_count,
            })
        }
    }

    /// Linear index of a 1-based box coordinate.
    pub fn box_index(&self, coord: BoxCoordinate) -> Result<BoxIndex, GridError> {
        self.check_coord(coord)?;
        let nx = self.num_x() as usize;
        let ny = self.num_y() as usize;
        Ok(BoxIndex(
            (coord.x as usize - 1)
                + nx * (coord.y as usize - 1)
                + nx * ny * (coord.z as usize - 1),
        ))
    }

    /// Linear index after wrapping X and Y into range.
    ///
    /// X and Y are reduced modulo their layer counts (so `0` maps to the
    /// last layer and `num + 1` to the first); the returned
    /// [`WrapDirection`] records which of them moved. Z is not wrapped
    /// and must already be in range.
    pub fn box_index_wrapped(
        &self,
        x: i64,
        y: i64,
        z: i64,
    ) -> Result<(BoxIndex, WrapDirection), GridError> {
        let (wx, x_wrapped) = wrap_layer(x, self.num_x());
        let (wy, y_wrapped) = wrap_layer(y, self.num_y());
        if z < 1 || z > self.num_z() as i64 {
            return Err(GridError::LayerOutOfRange {
                dimension: Dimension::Z,
                layer: z,
                layers: self.num_z(),
            });
        }
        let mut wrap = WrapDirection::NONE;
        if x_wrapped {
            wrap |= WrapDirection::X;
        }
        if y_wrapped {
            wrap |= WrapDirection::Y;
        }
        let index = self.box_index(BoxCoordinate::new(wx, wy, z as u32))?;
        Ok((index, wrap))
    }

    /// Decode a linear index into its 1-based coordinate.
    pub fn coordinate(&self, index: BoxIndex) -> Result<BoxCoordinate, GridError> {
        self.check_index(index)?;
        let nx = self.num_x() as usize;
        let nxy = nx * self.num_y() as usize;
        let i = index.0;
        Ok(BoxCoordinate::new(
            (i % nx) as u32 + 1,
            ((i % nxy) / nx) as u32 + 1,
            (i / nxy) as u32 + 1,
        ))
    }

    /// X layer of a box.
    pub fn get_x(&self, index: BoxIndex) -> Result<u32, GridError> {
        Ok(self.coordinate(index)?.x)
    }

    /// Y layer of a box.
    pub fn get_y(&self, index: BoxIndex) -> Result<u32, GridError> {
        Ok(self.coordinate(index)?.y)
    }

    /// Z layer of a box.
    pub fn get_z(&self, index: BoxIndex) -> Result<u32, GridError> {
        Ok(self.coordinate(index)?.z)
    }

    /// Resolve a continuous point to the box containing it.
    ///
    /// On a periodic dimension a position outside the domain is first
    /// shifted by whole domain widths and the shift is reported in the
    /// returned [`WrapDirection`]. Otherwise each axis follows its
    /// boundary array's [`LookupPolicy`](crate::LookupPolicy).
    pub fn find_box(&self, point: &SoilPoint) -> Result<(BoxCoordinate, WrapDirection), GridError> {
        let mut wrap = WrapDirection::NONE;
        let mut px = point.x;
        let mut py = point.y;
        if self.wrap.x && px.is_finite() {
            let (v, moved) = wrap_position(px, self.x.lower_bound(), self.x.upper_bound());
            px = v;
            if moved {
                wrap |= WrapDirection::X;
            }
        }
        if self.wrap.y && py.is_finite() {
            let (v, moved) = wrap_position(py, self.y.lower_bound(), self.y.upper_bound());
            py = v;
            if moved {
                wrap |= WrapDirection::Y;
            }
        }
        let coord = BoxCoordinate::new(
            self.x.find_layer_with(px)?,
            self.y.find_layer_with(py)?,
            self.z.find_layer_with(point.z)?,
        );
        Ok((coord, wrap))
    }

    /// Linear index of the box containing `point`.
    pub fn find_box_index(&self, point: &SoilPoint) -> Result<(BoxIndex, WrapDirection), GridError> {
        let (coord, wrap) = self.find_box(point)?;
        Ok((self.box_index(coord)?, wrap))
    }

    /// The box adjacent to `index` across `face`.
    ///
    /// Returns `Ok(None)` at a non-periodic domain edge. Crossing a
    /// periodic edge reports the wrap.
    pub fn neighbour(
        &self,
        index: BoxIndex,
        face: Face,
    ) -> Result<Option<(BoxIndex, WrapDirection)>, GridError> {
        let c = self.coordinate(index)?;
        let (dx, dy, dz) = face.offset();
        let x = c.x as i64 + dx;
        let y = c.y as i64 + dy;
        let z = c.z as i64 + dz;
        let inside = |v: i64, n: u32| v >= 1 && v <= n as i64;
        if !inside(z, self.num_z())
            || (!self.wrap.x && !inside(x, self.num_x()))
            || (!self.wrap.y && !inside(y, self.num_y()))
        {
            return Ok(None);
        }
        self.box_index_wrapped(x, y, z).map(Some)
    }

    /// Every existing neighbour of `index` with the face crossed.
    pub fn neighbours(
        &self,
        index: BoxIndex,
    ) -> Result<SmallVec<[(Face, BoxIndex, WrapDirection); 6]>, GridError> {
        let mut out = SmallVec::new();
        for face in Face::ALL {
            if let Some((nb, wrap)) = self.neighbour(index, face)? {
                out.push((face, nb, wrap));
            }
        }
        Ok(out)
    }

    /// Face of `from` that borders `to`, if the two boxes are adjacent.
    pub fn shared_face(&self, from: BoxIndex, to: BoxIndex) -> Result<Option<Face>, GridError> {
        self.check_index(to)?;
        for face in Face::ALL {
            if let Some((nb, _)) = self.neighbour(from, face)? {
                if nb == to {
                    return Ok(Some(face));
                }
            }
        }
        Ok(None)
    }

    /// Continuous extent of one box.
    pub fn box_bounds(&self, index: BoxIndex) -> Result<Aabb, GridError> {
        let c = self.coordinate(index)?;
        Ok(Aabb::new(
            SoilPoint::new(
                self.x.layer_start(c.x)?,
                self.y.layer_start(c.y)?,
                self.z.layer_start(c.z)?,
            ),
            SoilPoint::new(
                self.x.layer_end(c.x)?,
                self.y.layer_end(c.y)?,
                self.z.layer_end(c.z)?,
            ),
        ))
    }

    /// Volume of one box.
    pub fn box_volume(&self, index: BoxIndex) -> Result<f64, GridError> {
        let c = self.coordinate(index)?;
        Ok(self.x.layer_width(c.x)? * self.y.layer_width(c.y)? * self.z.layer_width(c.z)?)
    }
}
