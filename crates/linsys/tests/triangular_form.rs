//! Integration tests for triangular-form computation.
//!
//! Fixed scenarios check exact outputs; randomized systems with integer
//! coefficients check the structural properties of the result and that the
//! solution set is preserved.

use linsys::{Hyperplane, LinSysError, LinearSystem, Scalar, Vector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn plane(a: &str, b: &str, c: &str, d: &str) -> Hyperplane {
    Hyperplane::plane(a, b, c, d).unwrap()
}

fn int_vector(coords: &[i64]) -> Vector {
    Vector::new(coords.iter().copied()).unwrap()
}

/// System whose every row passes through `solution`
fn random_consistent_system(
    rng: &mut ChaCha8Rng,
    nrows: usize,
    dimension: usize,
    solution: &Vector,
) -> LinearSystem {
    let planes = (0..nrows)
        .map(|_| {
            // Bias towards zeros so that swaps and degenerate rows show up
            let coords: Vec<i64> = (0..dimension)
                .map(|_| {
                    if rng.random_bool(0.3) {
                        0
                    } else {
                        rng.random_range(-5..=5)
                    }
                })
                .collect();
            let normal = int_vector(&coords);
            let constant = normal.dot_product(solution).unwrap();
            Hyperplane::new(normal, constant)
        })
        .collect();
    LinearSystem::new(planes).unwrap()
}

fn assert_triangular(system: &LinearSystem) {
    let pivots = system.indices_of_first_nonzero_terms_in_each_row();
    let mut previous: Option<usize> = None;
    let mut seen_degenerate = false;
    for (row, pivot) in pivots.iter().enumerate() {
        match pivot {
            Some(p) => {
                assert!(!seen_degenerate, "row {row} follows a degenerate row: {pivots:?}");
                if let Some(prev) = previous {
                    assert!(*p > prev, "pivots not increasing: {pivots:?}");
                }
                previous = Some(*p);
            }
            None => seen_degenerate = true,
        }
    }
}

#[test]
fn test_already_triangular_is_unchanged() {
    init_logger();
    let p1 = plane("1", "1", "1", "1");
    let p2 = plane("0", "1", "1", "2");
    let s = LinearSystem::new(vec![p1.clone(), p2.clone()]).unwrap();
    let t = s.compute_triangular_form().unwrap();

    assert_eq!(
        t.indices_of_first_nonzero_terms_in_each_row(),
        vec![Some(0), Some(1)]
    );
    assert!(t[0] == p1 && t[1] == p2);
}

#[test]
fn test_repeated_plane_becomes_contradiction() {
    init_logger();
    let p1 = plane("1", "1", "1", "1");
    let p2 = plane("1", "1", "1", "2");
    let s = LinearSystem::new(vec![p1.clone(), p2]).unwrap();
    let t = s.compute_triangular_form().unwrap();

    assert_eq!(t[0], p1);
    assert_eq!(t[1], Hyperplane::constant_only(3, "1").unwrap());
    assert_eq!(
        t.indices_of_first_nonzero_terms_in_each_row(),
        vec![Some(0), None]
    );
}

#[test]
fn test_four_planes_with_swaps() {
    init_logger();
    let p1 = plane("1", "1", "1", "1");
    let p2 = plane("0", "1", "0", "2");
    let p3 = plane("1", "1", "-1", "3");
    let p4 = plane("1", "0", "-2", "2");
    let s = LinearSystem::new(vec![p1.clone(), p2.clone(), p3, p4]).unwrap();
    let t = s.compute_triangular_form().unwrap();

    assert_eq!(t[0], p1);
    assert_eq!(t[1], p2);
    assert_eq!(t[2], plane("0", "0", "-2", "2"));
    assert_eq!(t[3], Hyperplane::zero(3).unwrap());
}

#[test]
fn test_three_planes_full_rank() {
    init_logger();
    let p1 = plane("0", "1", "1", "1");
    let p2 = plane("1", "-1", "1", "2");
    let p3 = plane("1", "2", "-5", "3");
    let s = LinearSystem::new(vec![p1, p2, p3]).unwrap();
    let t = s.compute_triangular_form().unwrap();

    assert_eq!(
        t.indices_of_first_nonzero_terms_in_each_row(),
        vec![Some(0), Some(1), Some(2)]
    );
    assert_eq!(t[0], plane("1", "-1", "1", "2"));
    assert_eq!(t[1], plane("0", "1", "1", "1"));
    assert_eq!(t[2], plane("0", "0", "-9", "-2"));
    // Equality is up to scale
    assert_eq!(t[2], plane("0", "0", "4.5", "1"));
}

#[test]
fn test_more_rows_than_columns() {
    init_logger();
    let s = LinearSystem::new(vec![
        Hyperplane::line("0", "0", "0").unwrap(),
        Hyperplane::line("2", "4", "6").unwrap(),
        Hyperplane::line("1", "2", "3").unwrap(),
        Hyperplane::line("0", "3", "1").unwrap(),
    ])
    .unwrap();
    let t = s.compute_triangular_form().unwrap();

    assert_eq!(t.len(), 4);
    assert_eq!(t.dimension(), 2);
    assert_eq!(
        t.indices_of_first_nonzero_terms_in_each_row(),
        vec![Some(0), Some(1), None, None]
    );
    assert_eq!(t[0], Hyperplane::line("2", "4", "6").unwrap());
    assert_eq!(t[1], Hyperplane::line("0", "3", "1").unwrap());
}

#[test]
fn test_mismatched_dimensions_rejected() {
    let result = LinearSystem::new(vec![
        plane("1", "1", "1", "1"),
        Hyperplane::line("1", "1", "1").unwrap(),
    ]);
    assert!(matches!(result, Err(LinSysError::DimensionMismatch { .. })));
}

#[test]
fn test_degenerate_row_has_no_pivot() {
    let row = plane("0", "1e-11", "-1e-12", "4");
    assert_eq!(row.first_nonzero_index(), None);
    assert_eq!(row.pivot_index(), Err(LinSysError::NoNonzeroElements));

    let s = LinearSystem::new(vec![row]).unwrap();
    assert_eq!(s.indices_of_first_nonzero_terms_in_each_row(), vec![None]);
}

#[test]
fn test_random_systems_triangular_and_idempotent() {
    init_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let dimension = rng.random_range(1..=4);
        let nrows = rng.random_range(1..=5);
        let solution: Vec<i64> = (0..dimension).map(|_| rng.random_range(-3..=3)).collect();
        let solution = int_vector(&solution);

        let s = random_consistent_system(&mut rng, nrows, dimension, &solution);
        let snapshot = s.clone();
        let t = s.compute_triangular_form().unwrap();

        assert_eq!(s, snapshot, "input system was modified");
        assert_eq!(t.len(), s.len());
        assert_eq!(t.dimension(), s.dimension());
        assert_triangular(&t);

        let again = t.compute_triangular_form().unwrap();
        assert_eq!(again, t, "not idempotent for\n{s}");
    }
}

#[test]
fn test_random_systems_preserve_solution() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let dimension = rng.random_range(2..=3);
        let nrows = rng.random_range(1..=4);
        let solution: Vec<i64> = (0..dimension).map(|_| rng.random_range(-4..=4)).collect();
        let solution = int_vector(&solution);

        let s = random_consistent_system(&mut rng, nrows, dimension, &solution);
        let t = s.compute_triangular_form().unwrap();

        for plane in t.planes() {
            let lhs: Scalar = plane.normal_vector().dot_product(&solution).unwrap();
            assert_eq!(&lhs, plane.constant_term(), "{plane} lost the solution");
        }
    }
}

#[test]
fn test_random_vectors_parallel_is_symmetric() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..200 {
        let dimension = rng.random_range(2..=3);
        let a: Vec<i64> = (0..dimension).map(|_| rng.random_range(-6..=6)).collect();
        let b: Vec<i64> = if rng.random_bool(0.5) {
            let k = rng.random_range(-3..=3);
            a.iter().map(|x| x * k).collect()
        } else {
            (0..dimension).map(|_| rng.random_range(-6..=6)).collect()
        };
        let (a, b) = (int_vector(&a), int_vector(&b));

        assert_eq!(
            a.is_parallel_to(&b).unwrap(),
            b.is_parallel_to(&a).unwrap(),
            "{a} vs {b}"
        );
        let sum = a.plus(&a.times_scalar(&linsys::to_scalar(-1).unwrap())).unwrap();
        assert!(sum.is_zero());
    }
}

#[test]
fn test_random_vectors_normalize_to_unit_length() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let one = linsys::to_scalar(1).unwrap();

    // sqrt(2) and sqrt(14) are irrational; make sure they are covered
    let mut samples = vec![vec![1, 1], vec![1, -2, 3]];
    for _ in 0..200 {
        let dimension = rng.random_range(2..=4);
        samples.push((0..dimension).map(|_| rng.random_range(-9..=9)).collect());
    }

    for coords in samples {
        let v = int_vector(&coords);
        if v.is_zero() {
            assert!(matches!(v.normalized(), Err(LinSysError::ZeroVector { .. })));
            continue;
        }
        let unit = v.normalized().unwrap();
        let error = unit.magnitude() - &one;
        assert!(linsys::scalar::is_near_zero(&error), "|{unit}| != 1");
        assert!(unit.is_parallel_to(&v).unwrap(), "{unit} not parallel to {v}");
    }
}

#[test]
fn test_random_hyperplanes_equal_up_to_scale() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..200 {
        let coords: Vec<i64> = (0..3).map(|_| rng.random_range(-5..=5)).collect();
        if coords.iter().all(|&c| c == 0) {
            // `0 = c` rows only equal rows with the same constant
            continue;
        }
        let constant: i64 = rng.random_range(-5..=5);
        let p = Hyperplane::with_constant(int_vector(&coords), constant).unwrap();

        let mut k: i64 = rng.random_range(-4..=4);
        if k == 0 {
            k = 3;
        }
        let q = p.scaled(&linsys::to_scalar(k).unwrap());

        assert_eq!(p, p.clone());
        assert_eq!(p, q, "{p} vs {q}");
        assert_eq!(q, p, "{q} vs {p}");
    }
}
