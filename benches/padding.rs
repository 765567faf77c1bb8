//! Padding Engine Benchmarks
//!
//! Benchmarks for the global costmap padding hot path:
//! - Full-grid padding at typical indoor map sizes
//! - Single-cell restamping (the absorption service path)
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use patha_nav::{Costmap, DecayProfile, DecayType, PaddingMask, Pose2D, cost};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Create a map with perimeter walls and scattered interior obstacles.
fn create_test_map(side: usize) -> Costmap {
    let mut grid = Costmap::new(side, side, 0.05, Pose2D::identity(), cost::FREE);

    for i in 0..side {
        grid.set(i, 0, cost::OCCUPIED);
        grid.set(i, side - 1, cost::OCCUPIED);
        grid.set(0, i, cost::OCCUPIED);
        grid.set(side - 1, i, cost::OCCUPIED);
    }

    // Deterministic scattering of interior obstacles (~1% of cells)
    let mut seed = 0x2545_f491u64;
    for y in 2..side - 2 {
        for x in 2..side - 2 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if seed >> 57 == 0 {
                grid.set(x, y, cost::OCCUPIED);
            }
        }
    }

    grid
}

fn padding_mask() -> PaddingMask {
    let profile = DecayProfile::generate(DecayType::Exponential, 0.3, 0.05);
    PaddingMask::new(4, cost::PADDED, &profile)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_full_grid_padding(c: &mut Criterion) {
    let mask = padding_mask();

    let mut group = c.benchmark_group("padding");
    for side in [100usize, 200, 400] {
        let grid = create_test_map(side);
        group.bench_function(format!("pad_{}x{}", side, side), |b| {
            b.iter(|| {
                let mut working = grid.clone();
                mask.pad(black_box(&mut working));
                working
            })
        });
    }
    group.finish();
}

fn bench_single_stamp(c: &mut Criterion) {
    let mask = padding_mask();
    let grid = create_test_map(200);

    c.bench_function("stamp_single_cell", |b| {
        b.iter(|| {
            let mut working = grid.clone();
            working.set(100, 100, cost::OCCUPIED);
            mask.stamp(black_box(&mut working), 100, 100);
            working
        })
    });
}

criterion_group!(benches, bench_full_grid_padding, bench_single_stamp);
criterion_main!(benches);
