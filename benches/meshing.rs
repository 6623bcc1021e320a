/// Meshing benchmarks
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec3;
use softvox::{BlockType, FaceCullingMesher, World, WorldConfig};

fn bench_solid_cube(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_solid_cube");
    for &n in &[8i32, 16, 24] {
        let world = World::from_blocks(
            (0..n)
                .flat_map(|x| (0..n).flat_map(move |y| (0..n).map(move |z| IVec3::new(x, y, z))))
                .map(|p| (p, BlockType::Stone)),
        );
        let mesher = FaceCullingMesher::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &world, |b, world| {
            b.iter(|| black_box(mesher.build(world).len()));
        });
    }
    group.finish();
}

fn bench_terrain(c: &mut Criterion) {
    let world = World::generate(&WorldConfig::default());
    let mesher = FaceCullingMesher::default();
    c.bench_function("mesh_default_terrain", |b| {
        b.iter(|| black_box(mesher.build(&world).len()));
    });
}

criterion_group!(benches, bench_solid_cube, bench_terrain);
criterion_main!(benches);
