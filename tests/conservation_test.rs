use karman::collision::collide;
use karman::equilibrium::equilibrium;
use karman::lattice::{E, OPP, Q};
use karman::macroscopic::{density_velocity, moments, reconstruct};
use karman::streaming::stream;
use karman::{BounceBack, EdgePolicy, Field, Obstacle, SimConfig, Simulation};

fn close(a: f32, b: f32, rel: f32) -> bool {
    (a - b).abs() <= rel * b.abs().max(1.0)
}

/// Field with a different off-equilibrium state in every cell.
fn scrambled_field(width: usize, height: usize) -> Field {
    let mut field = Field::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let idx = field.idx(x, y);
            let rho = 1.0 + 0.05 * ((x * 7 + y * 3) % 11) as f32 / 11.0;
            let ux = 0.1 * ((x as f32) * 0.37).sin();
            let uy = 0.05 * ((y as f32) * 0.53).cos();
            let mut f = equilibrium(rho, ux, uy);
            for k in 0..Q {
                f[k] *= 1.0 + 0.02 * (((idx + 3 * k) % 5) as f32 - 2.0);
            }
            field.current[idx] = f;
        }
    }
    field
}

#[test]
fn test_collision_conserves_mass_and_momentum() {
    let mut field = scrambled_field(24, 16);
    reconstruct(&mut field);

    let before: Vec<_> = field.current.iter().map(moments).collect();
    let mass_before = field.fluid_mass();

    collide(&mut field, 0.7);

    for (idx, (f, (rho, jx, jy))) in field.current.iter().zip(&before).enumerate() {
        let (rho_after, jx_after, jy_after) = moments(f);
        assert!(close(rho_after, *rho, 1e-5), "cell {idx}: rho {rho} -> {rho_after}");
        assert!((jx_after - jx).abs() < 1e-5, "cell {idx}: jx {jx} -> {jx_after}");
        assert!((jy_after - jy).abs() < 1e-5, "cell {idx}: jy {jy} -> {jy_after}");
    }

    let mass_after = field.fluid_mass();
    assert!(
        ((mass_after - mass_before) / mass_before).abs() < 1e-6,
        "mass {mass_before} -> {mass_after}"
    );
}

#[test]
fn test_collision_relaxes_toward_equilibrium() {
    let mut field = scrambled_field(8, 8);
    reconstruct(&mut field);
    let idx = field.idx(3, 4);
    let feq = equilibrium(field.density[idx], field.velocity_x[idx], field.velocity_y[idx]);
    let distance = |f: &[f32; Q]| f.iter().zip(&feq).map(|(a, b)| (a - b).abs()).sum::<f32>();

    let before = distance(&field.current[idx]);
    collide(&mut field, 0.8);
    let after = distance(&field.current[idx]);

    // omega = 1.25 overshoots: |1 - omega| = 0.25 of the distance remains.
    assert!((after - 0.25 * before).abs() < 1e-5, "{before} -> {after}");

    let mut field = scrambled_field(8, 8);
    reconstruct(&mut field);
    collide(&mut field, 1.0);
    let f = field.current[idx];
    for k in 0..Q {
        assert!((f[k] - feq[k]).abs() < 1e-6);
    }
}

#[test]
fn test_collision_skips_solid_cells() {
    let mut field = scrambled_field(9, 9);
    field.carve_obstacle(&Obstacle::new(glam::Vec2::new(4.0, 4.0), 1.5));
    let idx = field.idx(4, 4);
    assert!(field.obstacle[idx]);

    let solid_before = field.current[idx];
    reconstruct(&mut field);
    assert_eq!(field.density[idx], 1.0);
    assert_eq!(field.velocity_x[idx], 0.0);
    assert_eq!(field.velocity_y[idx], 0.0);

    collide(&mut field, 0.6);
    assert_eq!(field.current[idx], solid_before);
}

#[test]
fn test_momentum_consistency_after_reconstruct() {
    let config = SimConfig {
        grid_width: 120,
        grid_height: 60,
        obstacle_radius: 6.0,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    for _ in 0..10 {
        sim.frame();
    }

    let field = sim.field();
    for idx in 0..field.len() {
        if field.obstacle[idx] {
            continue;
        }
        let (rho, jx, jy) = moments(&field.current[idx]);
        let rho_field = field.density[idx];
        assert!(close(rho, rho_field, 1e-5), "cell {idx}: {rho} vs {rho_field}");
        assert!(close(jx, rho_field * field.velocity_x[idx], 1e-5), "cell {idx}: jx");
        assert!(close(jy, rho_field * field.velocity_y[idx], 1e-5), "cell {idx}: jy");
    }
}

#[test]
fn test_equilibrium_fixed_point() {
    let cases = [
        (1.0, 0.0, 0.0),
        (1.0, 0.08, 0.0),
        (0.9, -0.1, 0.05),
        (1.3, 0.2, -0.2),
        (0.5, 0.0, 0.25),
        (2.0, -0.15, -0.1),
    ];
    for (rho, ux, uy) in cases {
        let feq = equilibrium(rho, ux, uy);
        assert!(feq.iter().all(|&f| f > 0.0), "negative population for {rho} {ux} {uy}");

        let (r, vx, vy) = density_velocity(&feq);
        assert!((r - rho).abs() < 1e-5 * rho, "rho {rho} -> {r}");
        assert!((vx - ux).abs() < 1e-5, "ux {ux} -> {vx}");
        assert!((vy - uy).abs() < 1e-5, "uy {uy} -> {vy}");
    }
}

#[test]
fn test_density_floor_prevents_non_finite_velocity() {
    let (rho, ux, uy) = density_velocity(&[0.0; Q]);
    assert!(rho > 0.0);
    assert_eq!(ux, 0.0);
    assert_eq!(uy, 0.0);

    let mut f = [0.0; Q];
    f[1] = 1e-9;
    f[3] = -1e-9;
    let (rho, ux, uy) = density_velocity(&f);
    assert!(rho > 0.0);
    assert!(ux.is_finite() && uy.is_finite());
}

/// 5x5 field at rest with one solid cell in the middle.
fn single_solid_field() -> Field {
    let mut field = Field::new(5, 5);
    field.carve_obstacle(&Obstacle::new(glam::Vec2::new(2.0, 2.0), 0.5));
    assert_eq!(field.obstacle.iter().filter(|&&s| s).count(), 1);
    field.seed_equilibrium(1.0, 0.0, 0.0);
    field
}

#[test]
fn test_bounce_back_no_slip_at_rest() {
    let mut field = single_solid_field();
    let solid = field.idx(2, 2);

    reconstruct(&mut field);
    collide(&mut field, 0.7);
    stream(&mut field, EdgePolicy::Drop, BounceBack::default());

    let (rho, jx, jy) = moments(&field.next[solid]);
    assert!((rho - 1.0).abs() < 1e-6);
    assert!(jx.abs() < 1e-7, "jx = {jx}");
    assert!(jy.abs() < 1e-7, "jy = {jy}");

    field.swap_generations();
    reconstruct(&mut field);
    assert_eq!(field.velocity_x[solid], 0.0);
    assert_eq!(field.velocity_y[solid], 0.0);
}

#[test]
fn test_full_way_bounce_back_returns_what_it_received() {
    let mut field = single_solid_field();
    for (idx, f) in field.current.iter_mut().enumerate() {
        for k in 0..Q {
            f[k] = 0.01 * (k + 1) as f32 + 0.001 * idx as f32;
        }
    }
    let initial = field.current.clone();

    // One step in, one step out.
    stream(&mut field, EdgePolicy::Drop, BounceBack::FullWay);
    field.swap_generations();
    stream(&mut field, EdgePolicy::Drop, BounceBack::FullWay);

    for k in 1..Q {
        let x = (2 + E[k][0]) as usize;
        let y = (2 + E[k][1]) as usize;
        let neighbour = field.idx(x, y);
        assert_eq!(
            field.next[neighbour][k],
            initial[neighbour][OPP[k]],
            "direction {k} at ({x}, {y})"
        );
    }
}

#[test]
fn test_full_way_bounce_back_conserves_arriving_mass() {
    let mut field = single_solid_field();
    for (idx, f) in field.current.iter_mut().enumerate() {
        for k in 0..Q {
            f[k] = 0.02 + 0.003 * ((idx + k) % 7) as f32;
        }
    }
    let solid = field.idx(2, 2);
    let arriving: f32 = (0..Q)
        .map(|k| {
            let x = (2 - E[k][0]) as usize;
            let y = (2 - E[k][1]) as usize;
            field.current[field.idx(x, y)][k]
        })
        .sum();

    stream(&mut field, EdgePolicy::Drop, BounceBack::FullWay);
    let stored: f32 = field.next[solid].iter().sum();
    assert!((stored - arriving).abs() < 1e-6);
}

#[test]
fn test_default_bounce_back_reverses_own_populations() {
    let mut field = single_solid_field();
    for (idx, f) in field.current.iter_mut().enumerate() {
        for k in 0..Q {
            f[k] = 0.05 + 0.001 * (k as f32) + 0.002 * ((idx * 3 + k) % 5) as f32;
        }
    }
    let solid = field.idx(2, 2);
    let before = field.current[solid];

    stream(&mut field, EdgePolicy::Drop, BounceBack::default());

    for k in 0..Q {
        assert_eq!(field.next[solid][k], before[OPP[k]], "direction {k}");
    }
    // Fluid neighbours still receive what the solid cell held.
    for k in 1..Q {
        let x = (2 + E[k][0]) as usize;
        let y = (2 + E[k][1]) as usize;
        assert_eq!(field.next[field.idx(x, y)][k], before[k], "direction {k}");
    }
}
