use crate::field::Field;
use crate::lattice::{E, Populations};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Smallest density used as a divisor when recovering velocity.
pub const DENSITY_FLOOR: f32 = 1e-6;

/// Raw zeroth and first moments `(sum f, sum e_x f, sum e_y f)`.
#[inline]
pub fn moments(f: &Populations) -> (f32, f32, f32) {
    let mut rho = 0.0;
    let mut jx = 0.0;
    let mut jy = 0.0;
    for (fk, e) in f.iter().zip(E.iter()) {
        rho += fk;
        jx += fk * e[0] as f32;
        jy += fk * e[1] as f32;
    }
    (rho, jx, jy)
}

/// Density and velocity of one fluid cell, density floored before dividing.
#[inline]
pub fn density_velocity(f: &Populations) -> (f32, f32, f32) {
    let (rho, jx, jy) = moments(f);
    let rho = rho.max(DENSITY_FLOOR);
    (rho, jx / rho, jy / rho)
}

/// Recomputes density and velocity from the current generation.
/// Solid cells are pinned to `rho = 1, u = 0`.
pub fn reconstruct(field: &mut Field) {
    let Field {
        current,
        density,
        velocity_x,
        velocity_y,
        obstacle,
        ..
    } = field;

    let kernel = |((((f, rho), ux), uy), solid): (
        (((&Populations, &mut f32), &mut f32), &mut f32),
        &bool,
    )| {
        if *solid {
            *rho = 1.0;
            *ux = 0.0;
            *uy = 0.0;
        } else {
            (*rho, *ux, *uy) = density_velocity(f);
        }
    };

    #[cfg(feature = "parallel")]
    current
        .par_iter()
        .zip(density.par_iter_mut())
        .zip(velocity_x.par_iter_mut())
        .zip(velocity_y.par_iter_mut())
        .zip(obstacle.par_iter())
        .for_each(kernel);

    #[cfg(not(feature = "parallel"))]
    current
        .iter()
        .zip(density.iter_mut())
        .zip(velocity_x.iter_mut())
        .zip(velocity_y.iter_mut())
        .zip(obstacle.iter())
        .for_each(kernel);
}
