use anyhow::Result;
use morton_matrix::MortonMatrix;
use rand::Rng;
use std::time::Instant;

/// Row-major grid used as the comparison baseline
struct RowMajorGrid {
    rank: u32,
    cells: Vec<u64>,
}

impl RowMajorGrid {
    fn new(rank: u32) -> Self {
        Self {
            rank,
            cells: vec![0; (rank as usize) * (rank as usize)],
        }
    }

    #[inline(always)]
    fn get(&self, x: u32, y: u32) -> u64 {
        self.cells[(y * self.rank + x) as usize]
    }

    #[inline(always)]
    fn set(&mut self, x: u32, y: u32, value: u64) {
        self.cells[(y * self.rank + x) as usize] = value;
    }
}

/// Benchmark Morton layout against row-major layout
fn main() -> Result<()> {
    env_logger::init();

    println!("Morton Layout Benchmarks");
    println!("========================\n");

    // Test parameters
    const RANK: u32 = 512;
    const ITERATIONS: u32 = 50;
    const ACCESS_PATTERNS: usize = 100_000;

    log::info!(
        "rank {} matrix, {} iterations, {} random probes",
        RANK,
        ITERATIONS,
        ACCESS_PATTERNS
    );

    let mut rng = rand::thread_rng();
    let mut grid = RowMajorGrid::new(RANK);
    let mut matrix: MortonMatrix<u64> = MortonMatrix::new(RANK);

    // Fill with random data
    println!("Filling matrices with random data...");
    for y in 0..RANK {
        for x in 0..RANK {
            let value = rng.gen_range(0..1000u64);
            grid.set(x, y, value);
            *matrix.get_mut(x, y) = value;
        }
    }

    println!("\n1. Sequential Access Benchmark");
    println!("------------------------------");

    // Row-major grid sequential
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for y in 0..RANK {
            for x in 0..RANK {
                sum += grid.get(x, y);
            }
        }
        std::hint::black_box(sum);
    }
    let grid_seq_time = start.elapsed();

    // Morton matrix sequential (coordinate order)
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for y in 0..RANK {
            for x in 0..RANK {
                sum += *matrix.get(x, y);
            }
        }
        std::hint::black_box(sum);
    }
    let matrix_seq_time = start.elapsed();

    // Morton matrix sequential (storage order)
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for (_, value) in matrix.iter() {
            sum += *value;
        }
        std::hint::black_box(sum);
    }
    let matrix_storage_time = start.elapsed();

    println!("Row-major grid: {:?}", grid_seq_time);
    println!(
        "Morton matrix (coordinate order): {:?} ({:.2}x)",
        matrix_seq_time,
        grid_seq_time.as_secs_f64() / matrix_seq_time.as_secs_f64()
    );
    println!(
        "Morton matrix (storage order): {:?} ({:.2}x)",
        matrix_storage_time,
        grid_seq_time.as_secs_f64() / matrix_storage_time.as_secs_f64()
    );

    println!("\n2. Random Access Benchmark");
    println!("--------------------------");

    // Generate random access pattern
    let mut accesses = Vec::with_capacity(ACCESS_PATTERNS);
    for _ in 0..ACCESS_PATTERNS {
        accesses.push((rng.gen_range(0..RANK), rng.gen_range(0..RANK)));
    }

    // Row-major grid random
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for &(x, y) in &accesses {
            sum += grid.get(x, y);
        }
        std::hint::black_box(sum);
    }
    let grid_rand_time = start.elapsed();

    // Morton matrix random
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for &(x, y) in &accesses {
            sum += *matrix.get(x, y);
        }
        std::hint::black_box(sum);
    }
    let matrix_rand_time = start.elapsed();

    println!("Row-major grid: {:?}", grid_rand_time);
    println!(
        "Morton matrix: {:?} ({:.2}x)",
        matrix_rand_time,
        grid_rand_time.as_secs_f64() / matrix_rand_time.as_secs_f64()
    );

    println!("\n3. Neighborhood Access Benchmark");
    println!("--------------------------------");

    // 3x3 window sweeps around random centers
    let test_positions: Vec<_> = (0..1000)
        .map(|_| (rng.gen_range(1..RANK - 1), rng.gen_range(1..RANK - 1)))
        .collect();

    // Row-major grid neighborhoods
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for &(cx, cy) in &test_positions {
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let x = (cx as i32 + dx) as u32;
                    let y = (cy as i32 + dy) as u32;
                    sum += grid.get(x, y);
                }
            }
        }
        std::hint::black_box(sum);
    }
    let grid_neighbor_time = start.elapsed();

    // Morton matrix neighborhoods
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for &(cx, cy) in &test_positions {
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let x = (cx as i32 + dx) as u32;
                    let y = (cy as i32 + dy) as u32;
                    sum += *matrix.get(x, y);
                }
            }
        }
        std::hint::black_box(sum);
    }
    let matrix_neighbor_time = start.elapsed();

    println!("Row-major grid: {:?}", grid_neighbor_time);
    println!(
        "Morton matrix: {:?} ({:.2}x)",
        matrix_neighbor_time,
        grid_neighbor_time.as_secs_f64() / matrix_neighbor_time.as_secs_f64()
    );

    Ok(())
}
