use serde::{Deserialize, Serialize};

/// One simulation result eligible for publication.
///
/// Created by the case loader from one surviving input row. `case_id` is
/// assigned at load time: 1-based, dense, and independent of the source row
/// number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub case_id: u32,
    pub airfoil: String,
    pub mach: f64,
    pub reynolds: f64,
    pub aoa: f64,
    /// Airfoil geometry as ordered `[x, y]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    pub cl: f64,
    pub cd: f64,
}
