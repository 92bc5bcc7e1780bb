use crate::lattice::{E, Populations, Q, W};

/// Second-order equilibrium distribution for density `rho` and velocity `(ux, uy)`.
///
/// `f_k = w_k * rho * (1 + 3 e.u + 4.5 (e.u)^2 - 1.5 |u|^2)`
#[inline]
pub fn equilibrium(rho: f32, ux: f32, uy: f32) -> Populations {
    debug_assert!(rho >= 0.0, "equilibrium called with negative density {rho}");

    let usq = ux * ux + uy * uy;
    let mut feq = [0.0; Q];
    for k in 0..Q {
        let eu = E[k][0] as f32 * ux + E[k][1] as f32 * uy;
        feq[k] = W[k] * rho * (1.0 + 3.0 * eu + 4.5 * eu * eu - 1.5 * usq);
    }
    feq
}
