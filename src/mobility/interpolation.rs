//! Scattered interpolation over the (field, %agarose) plane
//!
//! Calibration points do not sit on a regular grid, so values are
//! interpolated over a Delaunay triangulation of the sample positions.
//!
//! # Methods
//!
//! | Method    | Inside convex hull                     | Outside hull |
//! |-----------|----------------------------------------|--------------|
//! | `Linear`  | barycentric blend of the 3 vertices    | undefined    |
//! | `Cubic`   | cubic Bézier triangle (C¹ at vertices) | undefined    |
//! | `Nearest` | nearest finite sample                  | same         |
//!
//! "Undefined" is reported as `None`; the mobility model decides whether to
//! fall back to `Nearest`.
//!
//! # Triangulation
//!
//! Bowyer–Watson insertion inside a large enclosing triangle. Exactly
//! cocircular configurations (the vertical dataset is a rectangular grid)
//! are treated as "outside" the circumcircle, which keeps the insertion
//! cavity star-shaped.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix2, Vector2};

use crate::error::{GelError, Result};

/// Interpolation scheme for the 2-D scattered data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
    #[default]
    Linear,
    Nearest,
    Cubic,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Cubic => "cubic",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = GelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(InterpolationMethod::Linear),
            "nearest" => Ok(InterpolationMethod::Nearest),
            "cubic" => Ok(InterpolationMethod::Cubic),
            other => Err(GelError::invalid(format!(
                "unknown interpolation method '{}' (expected linear, nearest or cubic)",
                other
            ))),
        }
    }
}

// =================================================================================================
// Delaunay triangulation
// =================================================================================================

/// Barycentric slack when deciding whether a query lies in a triangle
const INSIDE_TOLERANCE: f64 = 1e-10;

/// Relative slack on the circumcircle test
const CIRCLE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    center: [f64; 2],
    radius2: f64,
}

impl Circumcircle {
    fn of(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Self {
        let d = 2.0 * (a[0] * (b[1] - c[1]) + b[0] * (c[1] - a[1]) + c[0] * (a[1] - b[1]));
        if d.abs() < f64::MIN_POSITIVE {
            // collinear: any later insertion replaces it
            return Self {
                center: a,
                radius2: f64::INFINITY,
            };
        }
        let a2 = a[0] * a[0] + a[1] * a[1];
        let b2 = b[0] * b[0] + b[1] * b[1];
        let c2 = c[0] * c[0] + c[1] * c[1];
        let ux = (a2 * (b[1] - c[1]) + b2 * (c[1] - a[1]) + c2 * (a[1] - b[1])) / d;
        let uy = (a2 * (c[0] - b[0]) + b2 * (a[0] - c[0]) + c2 * (b[0] - a[0])) / d;
        let radius2 = (a[0] - ux).powi(2) + (a[1] - uy).powi(2);
        Self {
            center: [ux, uy],
            radius2,
        }
    }

    fn strictly_contains(&self, p: [f64; 2]) -> bool {
        if self.radius2.is_infinite() {
            return true;
        }
        let d2 = (p[0] - self.center[0]).powi(2) + (p[1] - self.center[1]).powi(2);
        d2 < self.radius2 * (1.0 - CIRCLE_TOLERANCE)
    }
}

/// Delaunay triangulation of a planar point set
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<[f64; 2]>,
    triangles: Vec<[usize; 3]>,
    neighbours: Vec<BTreeSet<usize>>,
}

impl Triangulation {
    /// Triangulate `points`
    ///
    /// Fewer than three distinct non-collinear points give an empty
    /// triangulation. Duplicate positions keep their first occurrence.
    pub fn new(points: &[[f64; 2]]) -> Self {
        let n = points.len();
        let mut triangulation = Self {
            points: points.to_vec(),
            triangles: Vec::new(),
            neighbours: vec![BTreeSet::new(); n],
        };
        if n < 3 {
            return triangulation;
        }

        let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in points {
            for k in 0..2 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        let span = (max[0] - min[0]).max(max[1] - min[1]).max(1e-12);
        let mid = [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0];

        // enclosing triangle, appended after the real points
        let mut all = points.to_vec();
        all.push([mid[0] - 100.0 * span, mid[1] - 100.0 * span]);
        all.push([mid[0], mid[1] + 100.0 * span]);
        all.push([mid[0] + 100.0 * span, mid[1] - 100.0 * span]);

        let mut tris: Vec<([usize; 3], Circumcircle)> =
            vec![([n, n + 1, n + 2], Circumcircle::of(all[n], all[n + 1], all[n + 2]))];

        for i in 0..n {
            let p = all[i];
            let duplicate = (0..i).any(|j| all[j] == p);
            if duplicate || !p[0].is_finite() || !p[1].is_finite() {
                continue;
            }

            let (bad, good): (Vec<_>, Vec<_>) =
                tris.into_iter().partition(|(_, c)| c.strictly_contains(p));

            let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
            for (v, _) in &bad {
                for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
                    *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
                }
            }

            tris = good;
            let mut boundary: Vec<(usize, usize)> = edge_count
                .into_iter()
                .filter(|(_, count)| *count == 1)
                .map(|(edge, _)| edge)
                .collect();
            boundary.sort_unstable();

            for (a, b) in boundary {
                let tri = [a, b, i];
                tris.push((tri, Circumcircle::of(all[a], all[b], all[i])));
            }
        }

        for (v, _) in tris {
            if v.iter().any(|&k| k >= n) {
                continue;
            }
            if signed_area(points[v[0]], points[v[1]], points[v[2]]).abs() <= f64::EPSILON * span * span {
                continue;
            }
            for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
                triangulation.neighbours[a].insert(b);
                triangulation.neighbours[b].insert(a);
            }
            triangulation.triangles.push(v);
        }

        triangulation
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Vertices sharing an edge with vertex `i`
    pub fn neighbours(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbours[i].iter().copied()
    }

    /// Triangle containing `p` and the barycentric weights of `p` in it
    pub fn locate(&self, p: [f64; 2]) -> Option<([usize; 3], [f64; 3])> {
        self.triangles.iter().find_map(|tri| {
            let w = barycentric(p, self.points[tri[0]], self.points[tri[1]], self.points[tri[2]])?;
            w.iter().all(|&x| x >= -INSIDE_TOLERANCE).then_some((*tri, w))
        })
    }
}

fn signed_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

fn barycentric(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<[f64; 3]> {
    let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
    if det.abs() < f64::MIN_POSITIVE {
        return None;
    }
    let l1 = ((b[1] - c[1]) * (p[0] - c[0]) + (c[0] - b[0]) * (p[1] - c[1])) / det;
    let l2 = ((c[1] - a[1]) * (p[0] - c[0]) + (a[0] - c[0]) * (p[1] - c[1])) / det;
    Some([l1, l2, 1.0 - l1 - l2])
}

// =================================================================================================
// Interpolator
// =================================================================================================

/// Interpolates values attached to a fixed set of scattered positions
///
/// The positions are triangulated once; the values may change on every call.
#[derive(Debug, Clone)]
pub struct ScatteredInterpolator {
    triangulation: Triangulation,
}

impl ScatteredInterpolator {
    pub fn new(points: &[[f64; 2]]) -> Self {
        Self {
            triangulation: Triangulation::new(points),
        }
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    fn check_len(&self, values: &[f64]) -> Option<()> {
        (values.len() == self.triangulation.points.len()).then_some(())
    }

    /// Dispatch on `method`; `None` means undefined at `at`
    pub fn interpolate(&self, values: &[f64], at: [f64; 2], method: InterpolationMethod) -> Option<f64> {
        match method {
            InterpolationMethod::Linear => self.linear(values, at),
            InterpolationMethod::Nearest => self.nearest(values, at),
            InterpolationMethod::Cubic => self.cubic(values, at),
        }
    }

    pub fn linear(&self, values: &[f64], at: [f64; 2]) -> Option<f64> {
        self.check_len(values)?;
        let (tri, w) = self.triangulation.locate(at)?;
        let v = w[0] * values[tri[0]] + w[1] * values[tri[1]] + w[2] * values[tri[2]];
        v.is_finite().then_some(v)
    }

    /// Value of the closest sample whose value is finite
    pub fn nearest(&self, values: &[f64], at: [f64; 2]) -> Option<f64> {
        self.check_len(values)?;
        self.triangulation
            .points
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(p, v)| ((p[0] - at[0]).powi(2) + (p[1] - at[1]).powi(2), *v))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, v)| v)
    }

    /// Cubic Bézier triangle through the three vertices of the containing triangle
    pub fn cubic(&self, values: &[f64], at: [f64; 2]) -> Option<f64> {
        self.check_len(values)?;
        let (tri, w) = self.triangulation.locate(at)?;
        if tri.iter().any(|&i| !values[i].is_finite()) {
            return None;
        }

        let p = tri.map(|i| self.triangulation.points[i]);
        let f = tri.map(|i| values[i]);
        let g = tri.map(|i| self.gradient(values, i));

        // directional derivative along (to - from), scaled for the cubic control net
        let edge = |i: usize, j: usize| {
            let d = [p[j][0] - p[i][0], p[j][1] - p[i][1]];
            f[i] + (g[i][0] * d[0] + g[i][1] * d[1]) / 3.0
        };

        let b300 = f[0];
        let b030 = f[1];
        let b003 = f[2];
        let b210 = edge(0, 1);
        let b120 = edge(1, 0);
        let b021 = edge(1, 2);
        let b012 = edge(2, 1);
        let b102 = edge(2, 0);
        let b201 = edge(0, 2);
        let e = (b210 + b120 + b021 + b012 + b102 + b201) / 6.0;
        let v = (b300 + b030 + b003) / 3.0;
        let b111 = e + (e - v) / 2.0;

        let [u, s, t] = w;
        let value = b300 * u.powi(3)
            + b030 * s.powi(3)
            + b003 * t.powi(3)
            + 3.0 * (b210 * u * u * s + b120 * u * s * s + b201 * u * u * t)
            + 3.0 * (b102 * u * t * t + b021 * s * s * t + b012 * s * t * t)
            + 6.0 * b111 * u * s * t;

        value.is_finite().then_some(value)
    }

    /// Weighted least-squares gradient at vertex `i` from its triangulation neighbours
    ///
    /// Falls back to a zero gradient when the neighbours do not span the plane.
    fn gradient(&self, values: &[f64], i: usize) -> [f64; 2] {
        let pts = &self.triangulation.points;
        let mut a = Matrix2::<f64>::zeros();
        let mut b = Vector2::<f64>::zeros();

        for j in self.triangulation.neighbours(i) {
            if !values[j].is_finite() {
                continue;
            }
            let d = Vector2::new(pts[j][0] - pts[i][0], pts[j][1] - pts[i][1]);
            let dist2 = d.norm_squared();
            if dist2 == 0.0 {
                continue;
            }
            let weight = 1.0 / dist2;
            a += weight * d * d.transpose();
            b += weight * (values[j] - values[i]) * d;
        }

        match a.try_inverse() {
            Some(inv) if a.determinant().abs() > 1e-12 * a.norm_squared() => {
                let grad = inv * b;
                [grad[0], grad[1]]
            }
            _ => [0.0, 0.0],
        }
    }
}
