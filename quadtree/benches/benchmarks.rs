use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pseudo_quadtree::{Config, PseudoQuadTree, ViewDistance};
use rand::prelude::*;

const HEIGHT: u8 = 7;
const AREA: f32 = 1000.0;
const POPULATION: u32 = 20_000;
const VIEW_DISTANCE: f32 = 60.0;

fn populated_tree() -> PseudoQuadTree<u32> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut quadtree = PseudoQuadTree::with_origin(HEIGHT, AREA, AREA, 0.0, 0.0).unwrap();
    quadtree.populate_with_rng(1, POPULATION, &mut rng).unwrap();
    quadtree
}

fn build_benchmark(c: &mut Criterion) {
    c.bench_function("pseudo_quadtree_build", |b| {
        b.iter(|| PseudoQuadTree::<u32>::with_origin(black_box(HEIGHT), AREA, AREA, 0.0, 0.0))
    });
}

fn populate_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let empty = PseudoQuadTree::<u32>::with_origin(HEIGHT, AREA, AREA, 0.0, 0.0).unwrap();

    c.bench_function("pseudo_quadtree_populate", |b| {
        b.iter_batched(
            || PseudoQuadTree::<u32>::new_with_config(empty.area(), Config::with_height(HEIGHT)).unwrap(),
            |mut quadtree| {
                quadtree
                    .populate_with_rng(1, black_box(POPULATION), &mut rng)
                    .unwrap();
                quadtree
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

fn traverse_benchmark(c: &mut Criterion) {
    let quadtree = populated_tree();

    c.bench_function("pseudo_quadtree_traverse", |b| {
        b.iter(|| {
            let mut visited = 0u32;
            quadtree.traverse(|leaf| visited += black_box(leaf.value));
            visited
        })
    });
}

fn view_distance_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let quadtree = populated_tree();

    c.bench_function("pseudo_quadtree_view_distance", |b| {
        b.iter(|| {
            let view = ViewDistance::new(
                rng.gen_range(0.0..AREA),
                rng.gen_range(0.0..AREA),
                VIEW_DISTANCE,
            );
            let mut visited = 0u32;
            quadtree.traverse_with(view.predicate(), |leaf| visited += black_box(leaf.value));
            visited
        })
    });
}

criterion_group!(
    pseudo_quadtree_benchmarks,
    build_benchmark,
    populate_benchmark,
    traverse_benchmark,
    view_distance_benchmark
);
criterion_main!(pseudo_quadtree_benchmarks);
