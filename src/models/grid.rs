use crate::errors::{PricerError, PricerResult};
use crate::models::OptionContract;
use ndarray::{arr0, ArrayD, ArrayViewD};
use smallvec::{smallvec, SmallVec};

/// Shape of a broadcast result. Heatmaps are 2-D, so four dims stay inline.
pub type Shape = SmallVec<[usize; 4]>;

/// Contract parameters as n-dimensional arrays.
///
/// Each field may have any shape; the fields are broadcast together
/// (shapes aligned on the trailing axis, length-1 axes stretch) before
/// evaluation. A scalar is a 0-d array.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractGrid {
    pub spot: ArrayD<f64>,
    pub strike: ArrayD<f64>,
    pub expiry: ArrayD<f64>,
    pub rate: ArrayD<f64>,
    pub vol: ArrayD<f64>,
}

impl ContractGrid {
    pub fn new(
        spot: ArrayD<f64>,
        strike: ArrayD<f64>,
        expiry: ArrayD<f64>,
        rate: ArrayD<f64>,
        vol: ArrayD<f64>,
    ) -> Self {
        Self { spot, strike, expiry, rate, vol }
    }

    pub fn with_spot(mut self, spot: ArrayD<f64>) -> Self {
        self.spot = spot;
        self
    }

    pub fn with_vol(mut self, vol: ArrayD<f64>) -> Self {
        self.vol = vol;
        self
    }

    /// Common shape of all five fields.
    pub fn shape(&self) -> PricerResult<Shape> {
        broadcast_shape(&[
            self.spot.shape(),
            self.strike.shape(),
            self.expiry.shape(),
            self.rate.shape(),
            self.vol.shape(),
        ])
    }

    /// Views of all fields stretched to the common shape, in
    /// (spot, strike, expiry, rate, vol) order.
    pub fn broadcast(&self) -> PricerResult<BroadcastViews<'_>> {
        let shape = self.shape()?;
        Ok((
            stretch(&self.spot, &shape, "spot")?,
            stretch(&self.strike, &shape, "strike")?,
            stretch(&self.expiry, &shape, "expiry")?,
            stretch(&self.rate, &shape, "rate")?,
            stretch(&self.vol, &shape, "vol")?,
        ))
    }
}

impl From<&OptionContract> for ContractGrid {
    fn from(c: &OptionContract) -> Self {
        Self {
            spot: scalar(c.spot),
            strike: scalar(c.strike),
            expiry: scalar(c.expiry),
            rate: scalar(c.rate),
            vol: scalar(c.vol),
        }
    }
}

pub type BroadcastViews<'a> = (
    ArrayViewD<'a, f64>,
    ArrayViewD<'a, f64>,
    ArrayViewD<'a, f64>,
    ArrayViewD<'a, f64>,
    ArrayViewD<'a, f64>,
);

/// 0-d array holding `x`.
#[inline]
pub fn scalar(x: f64) -> ArrayD<f64> {
    arr0(x).into_dyn()
}

/// Combine shapes with the usual broadcasting rules.
pub fn broadcast_shape(shapes: &[&[usize]]) -> PricerResult<Shape> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out: Shape = smallvec![1; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &len) in shape.iter().enumerate() {
            let slot = &mut out[offset + axis];
            if *slot == 1 {
                *slot = len;
            } else if len != 1 && len != *slot {
                return Err(PricerError::InvalidArgument(format!(
                    "shapes {:?} cannot be broadcast together",
                    shapes
                )));
            }
        }
    }

    Ok(out)
}

fn stretch<'a>(a: &'a ArrayD<f64>, shape: &[usize], field: &str) -> PricerResult<ArrayViewD<'a, f64>> {
    a.broadcast(shape).ok_or_else(|| {
        PricerError::InvalidArgument(format!(
            "{field} of shape {:?} cannot be broadcast to {:?}",
            a.shape(),
            shape
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn test_scalars_broadcast_to_0d() {
        let grid = ContractGrid::from(&OptionContract::default());
        assert!(grid.shape().unwrap().is_empty());
    }

    #[test]
    fn test_row_and_column_make_matrix() {
        let row = Array2::<f64>::zeros((1, 4));
        let col = Array2::<f64>::zeros((3, 1));
        let shape = broadcast_shape(&[row.shape(), col.shape(), &[]]).unwrap();
        assert_eq!(shape.as_slice(), &[3, 4]);
    }

    #[test]
    fn test_trailing_axis_alignment() {
        let shape = broadcast_shape(&[&[2, 1, 5], &[5], &[3, 1]]).unwrap();
        assert_eq!(shape.as_slice(), &[2, 3, 5]);
    }

    #[test]
    fn test_incompatible_shapes_rejected() {
        let grid = ContractGrid::from(&OptionContract::default())
            .with_spot(Array1::from(vec![90.0, 100.0, 110.0]).into_dyn())
            .with_vol(Array1::from(vec![0.1, 0.2]).into_dyn());
        assert!(matches!(grid.shape(), Err(PricerError::InvalidArgument(_))));
        assert!(grid.broadcast().is_err());
    }

    #[test]
    fn test_zero_length_axis() {
        let shape = broadcast_shape(&[&[0], &[1]]).unwrap();
        assert_eq!(shape.as_slice(), &[0]);
        assert!(broadcast_shape(&[&[0], &[2]]).is_err());
    }

    #[test]
    fn test_views_share_shape() {
        let grid = ContractGrid::from(&OptionContract::default())
            .with_spot(Array1::from(vec![90.0, 100.0]).into_dyn());
        let (s, k, t, r, v) = grid.broadcast().unwrap();
        for view in [&s, &k, &t, &r, &v] {
            assert_eq!(view.shape(), &[2]);
        }
        assert_eq!(k[[1]], 100.0);
    }
}
