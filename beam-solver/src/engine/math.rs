//! Element matrices and linear algebra for the Euler-Bernoulli beam engine
//!
//! DOF order per element is [v_i, θ_i, v_j, θ_j]: transverse displacement
//! positive upward, rotation positive counter-clockwise.

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for element bending stiffness
pub type Mat4 = SMatrix<f64, 4, 4>;
/// 4-element vector for element end forces/displacements
pub type Vec4 = SVector<f64, 4>;

/// Bending stiffness of a prismatic element
///
/// # Arguments
/// * `ei` - Flexural rigidity E·I
/// * `length` - Element length
pub fn element_stiffness(ei: f64, length: f64) -> Mat4 {
    let l = length;
    let l2 = l * l;
    let ei_l3 = ei / (l2 * l);

    #[rustfmt::skip]
    let data = [
        12.0,     6.0 * l,   -12.0,    6.0 * l,
        6.0 * l,  4.0 * l2,  -6.0 * l, 2.0 * l2,
        -12.0,    -6.0 * l,  12.0,     -6.0 * l,
        6.0 * l,  2.0 * l2,  -6.0 * l, 4.0 * l2,
    ];

    Mat4::from_row_slice(&data) * ei_l3
}

/// Work-equivalent nodal loads for a linearly varying load over the element
///
/// # Arguments
/// * `w_start` - Intensity at the i-node (positive = upward)
/// * `w_end` - Intensity at the j-node
/// * `length` - Element length
///
/// The fixed end reactions are the negation of this vector.
pub fn equivalent_nodal_loads(w_start: f64, w_end: f64, length: f64) -> Vec4 {
    let l = length;
    let l2 = l * l;

    Vec4::new(
        l * (7.0 * w_start + 3.0 * w_end) / 20.0,
        l2 * (3.0 * w_start + 2.0 * w_end) / 60.0,
        l * (3.0 * w_start + 7.0 * w_end) / 20.0,
        -l2 * (2.0 * w_start + 3.0 * w_end) / 60.0,
    )
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}
