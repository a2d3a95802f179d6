//! Euler-Bernoulli beam engine
//!
//! A self-contained linear static solver for a single straight beam. It
//! plays the part of an external structural-analysis library: it has its own
//! mutable beam object, its own error type, and knows nothing about
//! [`BeamModel`](crate::model::BeamModel). Callers reach it through
//! [`StiffnessBackend`](crate::backend::StiffnessBackend).
//!
//! The beam is meshed with one node per station (ends, supports, load
//! points, load bounds), two DOFs per node. With exact equivalent nodal
//! loads the nodal solution is exact, and internal forces between nodes are
//! recovered from the element end forces by statics.

pub mod math;

use thiserror::Error;

use self::math::{Mat, Mat4, Vec as BeamVec, Vec4};

/// Errors raised by the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Beam is unstable: {0}")]
    Unstable(String),

    #[error("Singular stiffness matrix - beam may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Equilibrium check failed: residual force {force:e}, residual moment {moment:e}")]
    EquilibriumCheckFailed { force: f64, moment: f64 },

    #[error("Beam not analyzed - run solve() first")]
    NotAnalyzed,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Restrained DOFs at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixity {
    /// Transverse translation restrained
    pub dy: bool,
    /// Rotation restrained
    pub rz: bool,
}

impl Fixity {
    pub fn free() -> Self {
        Self::default()
    }

    /// Transverse translation restrained only
    pub fn roller() -> Self {
        Self { dy: true, rz: false }
    }

    /// Same as a roller for a beam without an axial DOF
    pub fn pinned() -> Self {
        Self::roller()
    }

    pub fn fixed() -> Self {
        Self { dy: true, rz: true }
    }
}

/// A linearly varying line load
#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearLoad {
    x1: f64,
    x2: f64,
    w1: f64,
    w2: f64,
}

impl LinearLoad {
    fn intensity_at(&self, x: f64) -> f64 {
        self.w1 + (self.w2 - self.w1) * (x - self.x1) / (self.x2 - self.x1)
    }

    fn total_force(&self) -> f64 {
        (self.w1 + self.w2) / 2.0 * (self.x2 - self.x1)
    }

    fn moment_about_origin(&self) -> f64 {
        let h = self.x2 - self.x1;
        self.w1 * h * (self.x1 + h / 2.0) + (self.w2 - self.w1) * h / 2.0 * (self.x1 + 2.0 * h / 3.0)
    }
}

/// Internal forces along the part of the beam between two adjacent nodes
///
/// Shear is the sum of upward forces left of the cut; moment is sagging
/// positive. Offsets `s` are measured from `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    /// Shear just right of `start`
    pub shear_start: f64,
    /// Moment just right of `start`
    pub moment_start: f64,
    /// Load intensity at `start`
    pub w_start: f64,
    /// Rate of change of load intensity
    pub w_slope: f64,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn shear_at(&self, s: f64) -> f64 {
        self.shear_start + self.w_start * s + 0.5 * self.w_slope * s * s
    }

    pub fn moment_at(&self, s: f64) -> f64 {
        self.moment_start
            + self.shear_start * s
            + 0.5 * self.w_start * s * s
            + self.w_slope * s * s * s / 6.0
    }

    /// Offsets strictly inside the segment where shear crosses zero
    pub fn zero_shear_offsets(&self) -> Vec<f64> {
        let l = self.length();
        let eps = 1e-9 * l.max(1.0);
        let (a, b, c) = (0.5 * self.w_slope, self.w_start, self.shear_start);

        let mut roots = Vec::new();
        if a.abs() < 1e-12 {
            if b.abs() > 1e-12 {
                roots.push(-c / b);
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                roots.push((-b - sq) / (2.0 * a));
                roots.push((-b + sq) / (2.0 * a));
            }
        }

        roots.retain(|&s| s > eps && s < l - eps);
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|x, y| (*x - *y).abs() <= eps);
        roots
    }
}

#[derive(Debug, Clone)]
struct Solution {
    /// Nodal [v, θ]
    displacements: Vec<[f64; 2]>,
    /// Nodal [force, moment] reactions, zero at unrestrained DOFs
    reactions: Vec<[f64; 2]>,
    segments: Vec<Segment>,
}

/// A straight beam on [0, L] assembled one item at a time
#[derive(Debug, Clone)]
pub struct EulerBeam {
    length: f64,
    elastic_modulus: f64,
    moment_of_inertia: f64,
    statics_tolerance: Option<f64>,
    fixities: Vec<(f64, Fixity)>,
    vertical_loads: Vec<(f64, f64)>,
    linear_loads: Vec<LinearLoad>,
    nodes: Vec<f64>,
    solution: Option<Solution>,
}

impl EulerBeam {
    /// Create an unloaded, unsupported beam with steel-like defaults
    pub fn new(length: f64) -> EngineResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(EngineError::InvalidGeometry(format!(
                "Beam length must be positive, got {}",
                length
            )));
        }
        Ok(Self {
            length,
            elastic_modulus: 200e9,
            moment_of_inertia: 1e-4,
            statics_tolerance: None,
            fixities: Vec::new(),
            vertical_loads: Vec::new(),
            linear_loads: Vec::new(),
            nodes: Vec::new(),
            solution: None,
        })
    }

    /// Set E and I
    pub fn with_section(mut self, elastic_modulus: f64, moment_of_inertia: f64) -> Self {
        self.elastic_modulus = elastic_modulus;
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// Verify global equilibrium after solving, relative to the applied load
    pub fn with_statics_check(mut self, tolerance: f64) -> Self {
        self.statics_tolerance = Some(tolerance);
        self
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    fn check_position(&self, x: f64, what: &str) -> EngineResult<()> {
        if (0.0..=self.length).contains(&x) {
            Ok(())
        } else {
            Err(EngineError::InvalidGeometry(format!(
                "{} at {} lies outside [0, {}]",
                what, x, self.length
            )))
        }
    }

    /// Set the fixity at `x`, replacing any fixity already there
    pub fn set_fixity(&mut self, x: f64, fixity: Fixity) -> EngineResult<()> {
        self.check_position(x, "Fixity")?;
        let tolerance = self.tolerance();
        match self
            .fixities
            .iter_mut()
            .find(|(pos, _)| (*pos - x).abs() <= tolerance)
        {
            Some(existing) => existing.1 = fixity,
            None => self.fixities.push((x, fixity)),
        }
        self.solution = None;
        Ok(())
    }

    /// Add a vertical point load (positive = upward)
    pub fn add_vertical_load(&mut self, x: f64, force: f64) -> EngineResult<()> {
        self.check_position(x, "Vertical load")?;
        self.vertical_loads.push((x, force));
        self.solution = None;
        Ok(())
    }

    /// Add a linearly varying load from `w1` at `x1` to `w2` at `x2`
    ///
    /// Zero-length loads carry no force and are ignored.
    pub fn add_linear_load(&mut self, x1: f64, x2: f64, w1: f64, w2: f64) -> EngineResult<()> {
        self.check_position(x1, "Linear load start")?;
        self.check_position(x2, "Linear load end")?;
        if x1 > x2 {
            return Err(EngineError::InvalidGeometry(format!(
                "Linear load starts at {} after its end {}",
                x1, x2
            )));
        }
        if x2 - x1 > self.tolerance() {
            self.linear_loads.push(LinearLoad { x1, x2, w1, w2 });
        }
        self.solution = None;
        Ok(())
    }

    fn tolerance(&self) -> f64 {
        1e-9 * self.length.max(1.0)
    }

    /// Solve for displacements, reactions and segment forces
    pub fn solve(&mut self) -> EngineResult<()> {
        self.check_stability()?;
        self.prepare_nodes();

        let n_nodes = self.nodes.len();
        let n_dofs = n_nodes * 2;
        let ei = self.elastic_modulus * self.moment_of_inertia;
        if !(ei.is_finite() && ei > 0.0) {
            return Err(EngineError::InvalidGeometry(format!(
                "Flexural rigidity must be positive, got {}",
                ei
            )));
        }

        let mut k_global = Mat::zeros(n_dofs, n_dofs);
        let mut p_global = BeamVec::zeros(n_dofs);
        let mut element_data: Vec<(Mat4, Vec4, f64, f64)> =
            Vec::with_capacity(n_nodes.saturating_sub(1));

        // Assemble elements and their span loads
        for e in 0..n_nodes - 1 {
            let (xa, xb) = (self.nodes[e], self.nodes[e + 1]);
            let l = xb - xa;
            let k = math::element_stiffness(ei, l);

            let (mut wa, mut wb) = (0.0, 0.0);
            for load in &self.linear_loads {
                if load.x1 <= xa + self.tolerance() && load.x2 >= xb - self.tolerance() {
                    wa += load.intensity_at(xa);
                    wb += load.intensity_at(xb);
                }
            }
            let q = math::equivalent_nodal_loads(wa, wb, l);

            let base = 2 * e;
            for a in 0..4 {
                p_global[base + a] += q[a];
                for b in 0..4 {
                    k_global[(base + a, base + b)] += k[(a, b)];
                }
            }
            element_data.push((k, q, wa, wb));
        }

        // Nodal loads
        for &(x, force) in &self.vertical_loads {
            let node = self.node_index(x)?;
            p_global[2 * node] += force;
        }

        // Partition into free and restrained DOFs
        let mut restrained = vec![false; n_dofs];
        for &(x, fixity) in &self.fixities {
            let node = self.node_index(x)?;
            restrained[2 * node] |= fixity.dy;
            restrained[2 * node + 1] |= fixity.rz;
        }
        let free_dofs: Vec<usize> = (0..n_dofs).filter(|&d| !restrained[d]).collect();

        let mut d_full = BeamVec::zeros(n_dofs);
        if !free_dofs.is_empty() {
            let n_free = free_dofs.len();
            let mut k11 = Mat::zeros(n_free, n_free);
            let mut p1 = BeamVec::zeros(n_free);
            for (i, &di) in free_dofs.iter().enumerate() {
                p1[i] = p_global[di];
                for (j, &dj) in free_dofs.iter().enumerate() {
                    k11[(i, j)] = k_global[(di, dj)];
                }
            }

            let d1 = math::solve_linear_system(&k11, &p1).ok_or(EngineError::SingularMatrix)?;
            if d1.iter().any(|v| !v.is_finite()) {
                return Err(EngineError::SingularMatrix);
            }
            for (i, &di) in free_dofs.iter().enumerate() {
                d_full[di] = d1[i];
            }
        }

        // Reactions: R = K d - P at restrained DOFs
        let r_full = &k_global * &d_full - &p_global;
        let reactions = (0..n_nodes)
            .map(|n| {
                [
                    if restrained[2 * n] { r_full[2 * n] } else { 0.0 },
                    if restrained[2 * n + 1] { r_full[2 * n + 1] } else { 0.0 },
                ]
            })
            .collect();
        let displacements = (0..n_nodes)
            .map(|n| [d_full[2 * n], d_full[2 * n + 1]])
            .collect();

        // Element end forces: f = k d - q
        let segments = element_data
            .iter()
            .enumerate()
            .map(|(e, (k, q, wa, wb))| {
                let d_e = Vec4::from_iterator((0..4).map(|a| d_full[2 * e + a]));
                let f = k * d_e - q;
                let (xa, xb) = (self.nodes[e], self.nodes[e + 1]);
                Segment {
                    start: xa,
                    end: xb,
                    shear_start: f[0],
                    moment_start: -f[1],
                    w_start: *wa,
                    w_slope: (wb - wa) / (xb - xa),
                }
            })
            .collect();

        let solution = Solution {
            displacements,
            reactions,
            segments,
        };

        if let Some(tolerance) = self.statics_tolerance {
            self.check_statics(&solution, tolerance)?;
        }

        self.solution = Some(solution);
        Ok(())
    }

    /// Reject support sets that leave a rigid-body mode
    fn check_stability(&self) -> EngineResult<()> {
        let translations = self.fixities.iter().filter(|(_, f)| f.dy).count();
        let rotations = self.fixities.iter().filter(|(_, f)| f.rz).count();

        if translations >= 2 || (translations >= 1 && rotations >= 1) {
            Ok(())
        } else {
            Err(EngineError::Unstable(format!(
                "{} translational and {} rotational restraints cannot prevent rigid-body motion",
                translations, rotations
            )))
        }
    }

    fn prepare_nodes(&mut self) {
        let mut xs = vec![0.0, self.length];
        xs.extend(self.fixities.iter().map(|(x, _)| *x));
        xs.extend(self.vertical_loads.iter().map(|(x, _)| *x));
        for load in &self.linear_loads {
            xs.push(load.x1);
            xs.push(load.x2);
        }
        xs.sort_by(f64::total_cmp);

        let tolerance = self.tolerance();
        self.nodes.clear();
        for x in xs {
            match self.nodes.last() {
                Some(&last) if (x - last).abs() <= tolerance => {}
                _ => self.nodes.push(x),
            }
        }
    }

    fn node_index(&self, x: f64) -> EngineResult<usize> {
        let tolerance = self.tolerance();
        self.nodes
            .iter()
            .position(|&n| (n - x).abs() <= tolerance)
            .ok_or_else(|| EngineError::InvalidGeometry(format!("No node at {}", x)))
    }

    fn check_statics(&self, solution: &Solution, tolerance: f64) -> EngineResult<()> {
        let mut force = 0.0;
        let mut moment = 0.0;
        let mut scale: f64 = 0.0;

        for (x, r) in self.nodes.iter().zip(&solution.reactions) {
            force += r[0];
            moment += r[0] * x + r[1];
        }
        for &(x, p) in &self.vertical_loads {
            force += p;
            moment += p * x;
            scale += p.abs() * self.length.max(1.0);
        }
        for load in &self.linear_loads {
            force += load.total_force();
            moment += load.moment_about_origin();
            scale += load.total_force().abs() * self.length.max(1.0)
                + (load.w1.abs() + load.w2.abs()) * (load.x2 - load.x1);
        }

        // NaN anywhere fails the check
        let limit = tolerance * scale.max(1.0);
        if !(force.abs() <= limit && moment.abs() <= limit) {
            log::warn!(
                "Equilibrium check failed: residual force {:e}, moment {:e}",
                force,
                moment
            );
            return Err(EngineError::EquilibriumCheckFailed { force, moment });
        }
        Ok(())
    }

    // ========================
    // Result Access Methods
    // ========================

    pub fn is_analyzed(&self) -> bool {
        self.solution.is_some()
    }

    /// Node positions used by the last solve
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    fn solution(&self) -> EngineResult<&Solution> {
        self.solution.as_ref().ok_or(EngineError::NotAnalyzed)
    }

    /// Reaction [force, moment] at the node at `x`
    pub fn reaction(&self, x: f64) -> EngineResult<[f64; 2]> {
        let solution = self.solution()?;
        let node = self.node_index(x)?;
        Ok(solution.reactions[node])
    }

    /// Displacement [v, θ] at the node at `x`
    pub fn displacement(&self, x: f64) -> EngineResult<[f64; 2]> {
        let solution = self.solution()?;
        let node = self.node_index(x)?;
        Ok(solution.displacements[node])
    }

    pub fn segments(&self) -> EngineResult<&[Segment]> {
        Ok(&self.solution()?.segments)
    }
}
