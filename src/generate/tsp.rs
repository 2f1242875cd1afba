//! TSP instance generation

use super::rng::XorShift64;
use crate::problem::{Payload, ProblemInstance};
use crate::solve::Witness;
use crate::tsp::TspInstance;
use anyhow::Result;
use serde_json::json;

/// Generate a TSP instance with uniformly random symmetric distances in
/// `[1, max_distance)`. Random distances generally violate the triangle
/// inequality; use [`euclidean_tsp`] when it matters.
pub fn random_tsp(num_cities: usize, max_distance: f64, seed: u64) -> Result<ProblemInstance> {
    validate_params(num_cities, max_distance)?;
    let mut rng = XorShift64::new(seed);

    let mut matrix = vec![vec![0.0; num_cities]; num_cities];
    for i in 0..num_cities {
        for j in i + 1..num_cities {
            let distance = rng.next_f64_range(1.0, max_distance);
            matrix[i][j] = distance;
            matrix[j][i] = distance;
        }
    }

    let mut instance = build_instance(matrix, seed)?;
    instance
        .parameters
        .insert("max_distance".to_string(), json!(max_distance));
    instance.metadata.generation_method = Some("random_symmetric".to_string());
    instance
        .metadata
        .extra
        .insert("satisfies_triangle_inequality".to_string(), json!(false));
    Ok(instance)
}

/// Generate a Euclidean TSP instance: cities placed uniformly on a
/// `grid_size` x `grid_size` plane with straight-line distances, so the
/// triangle inequality holds by construction. City coordinates are recorded
/// in the metadata extras.
pub fn euclidean_tsp(num_cities: usize, grid_size: f64, seed: u64) -> Result<ProblemInstance> {
    validate_params(num_cities, grid_size)?;
    let mut rng = XorShift64::new(seed);

    let coordinates: Vec<(f64, f64)> = (0..num_cities)
        .map(|_| {
            (
                rng.next_f64_range(0.0, grid_size),
                rng.next_f64_range(0.0, grid_size),
            )
        })
        .collect();

    let mut matrix = vec![vec![0.0; num_cities]; num_cities];
    for i in 0..num_cities {
        for j in 0..num_cities {
            if i != j {
                let (x1, y1) = coordinates[i];
                let (x2, y2) = coordinates[j];
                matrix[i][j] = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
            }
        }
    }

    let mut instance = build_instance(matrix, seed)?;
    instance
        .parameters
        .insert("grid_size".to_string(), json!(grid_size));
    instance.metadata.generation_method = Some("euclidean".to_string());
    instance
        .metadata
        .extra
        .insert("satisfies_triangle_inequality".to_string(), json!(true));
    instance.metadata.extra.insert(
        "city_coordinates".to_string(),
        json!(coordinates
            .iter()
            .map(|&(x, y)| vec![x, y])
            .collect::<Vec<_>>()),
    );
    Ok(instance)
}

fn validate_params(num_cities: usize, scale: f64) -> Result<()> {
    if num_cities < 2 {
        anyhow::bail!("TSP needs at least 2 cities, got {num_cities}");
    }
    if scale <= 0.0 {
        anyhow::bail!("distance scale must be positive, got {scale}");
    }
    Ok(())
}

fn build_instance(matrix: Vec<Vec<f64>>, seed: u64) -> Result<ProblemInstance> {
    let num_cities = matrix.len();
    let tsp = TspInstance::new(matrix)?;
    let mut instance = ProblemInstance::new(num_cities, Payload::Tsp(tsp));
    instance
        .parameters
        .insert("num_cities".to_string(), json!(num_cities));
    instance.parameters.insert("seed".to_string(), json!(seed));
    Ok(instance)
}

/// Attach a known-optimal tour to an instance, for tests that assert the
/// brute-force solver recovers it.
pub fn with_known_tour(mut instance: ProblemInstance, order: Vec<usize>) -> ProblemInstance {
    if let Ok(tsp) = instance.as_tsp() {
        let distance = tsp.tour_distance(&order);
        instance.metadata.known_witness = Some(Witness::Tour { order, distance });
    }
    instance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_matrix_is_symmetric_with_zero_diagonal() {
        let instance = random_tsp(6, 100.0, 77).unwrap();
        let tsp = instance.as_tsp().unwrap();
        for i in 0..6 {
            assert_eq!(tsp.distance(i, i), 0.0);
            for j in 0..6 {
                assert_eq!(tsp.distance(i, j), tsp.distance(j, i));
            }
        }
    }

    #[test]
    fn test_euclidean_satisfies_triangle_inequality() {
        let instance = euclidean_tsp(7, 100.0, 13).unwrap();
        let tsp = instance.as_tsp().unwrap();
        for i in 0..7 {
            for j in 0..7 {
                for k in 0..7 {
                    assert!(tsp.distance(i, k) <= tsp.distance(i, j) + tsp.distance(j, k) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_instance() {
        let a = euclidean_tsp(5, 50.0, 2024).unwrap();
        let b = euclidean_tsp(5, 50.0, 2024).unwrap();
        assert_eq!(a.as_tsp().unwrap(), b.as_tsp().unwrap());
    }

    #[test]
    fn test_coordinates_recorded() {
        let instance = euclidean_tsp(4, 10.0, 3).unwrap();
        let coords = instance.metadata.extra.get("city_coordinates").unwrap();
        assert_eq!(coords.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_parameter_validation() {
        assert!(random_tsp(1, 10.0, 0).is_err());
        assert!(random_tsp(4, 0.0, 0).is_err());
    }

    #[test]
    fn test_known_tour_recovered_by_brute_force() {
        use crate::solve::{Algorithm, Budget, Witness};

        // Unit square: the perimeter cycle of length 4 is optimal.
        let d = std::f64::consts::SQRT_2;
        let matrix = vec![
            vec![0.0, 1.0, d, 1.0],
            vec![1.0, 0.0, 1.0, d],
            vec![d, 1.0, 0.0, 1.0],
            vec![1.0, d, 1.0, 0.0],
        ];
        let tsp = TspInstance::new(matrix).unwrap();
        let instance = with_known_tour(
            ProblemInstance::new(4, Payload::Tsp(tsp)),
            vec![0, 1, 2, 3],
        );

        let known = match instance.metadata.known_witness {
            Some(Witness::Tour { distance, .. }) => distance,
            ref other => panic!("expected a tour witness, got {other:?}"),
        };
        assert!((known - 4.0).abs() < 1e-9);

        let result = Algorithm::TspBruteForce
            .build(&crate::config::SolverConfig::default())
            .solve(&instance, &Budget::unlimited())
            .unwrap();
        match result.witness {
            Some(Witness::Tour { distance, .. }) => {
                assert!((distance - known).abs() < 1e-9);
            }
            other => panic!("expected a tour witness, got {other:?}"),
        }
    }
}
