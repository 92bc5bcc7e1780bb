use crate::equilibrium::equilibrium;
use crate::field::Field;
use crate::lattice::{Populations, Q};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// BGK relaxation of one cell toward the equilibrium of `(rho, ux, uy)`.
#[inline]
pub fn relax(f: &mut Populations, rho: f32, ux: f32, uy: f32, omega: f32) {
    let feq = equilibrium(rho, ux, uy);
    for k in 0..Q {
        f[k] -= omega * (f[k] - feq[k]);
    }
}

/// Collides every fluid cell of the current generation in place using the
/// macroscopic fields from the last reconstruction. Solid cells are left alone.
pub fn collide(field: &mut Field, tau: f32) {
    let omega = 1.0 / tau;
    let Field {
        current,
        density,
        velocity_x,
        velocity_y,
        obstacle,
        ..
    } = field;

    let kernel = |((((f, rho), ux), uy), solid): ((((&mut Populations, &f32), &f32), &f32), &bool)| {
        if !*solid {
            relax(f, *rho, *ux, *uy, omega);
        }
    };

    #[cfg(feature = "parallel")]
    current
        .par_iter_mut()
        .zip(density.par_iter())
        .zip(velocity_x.par_iter())
        .zip(velocity_y.par_iter())
        .zip(obstacle.par_iter())
        .for_each(kernel);

    #[cfg(not(feature = "parallel"))]
    current
        .iter_mut()
        .zip(density.iter())
        .zip(velocity_x.iter())
        .zip(velocity_y.iter())
        .zip(obstacle.iter())
        .for_each(kernel);
}
