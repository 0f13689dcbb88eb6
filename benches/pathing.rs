use criterion::{criterion_group, criterion_main, Criterion};
use mazerunner::{
    cells::Endpoints,
    generators,
    grid::Grid,
    pathing::{self, BreadthFirstSearch},
    units::SideLength,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn maze_grid(side: SideLength) -> Grid {
    let mut g = Grid::new(side).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    generators::recursive_backtracker(&mut g, &mut rng, Endpoints::corners(side)).unwrap();
    g
}

fn bench_solve_maze_128(c: &mut Criterion) {
    let side = SideLength(128);
    let g = maze_grid(side);
    let endpoints = Endpoints::corners(side);
    c.bench_function("solve_maze_128", move |b| {
        b.iter(|| pathing::solve(&g, endpoints).unwrap())
    });
}

fn bench_solve_open_grid_128(c: &mut Criterion) {
    let side = SideLength(128);
    let g = Grid::fully_open(side).unwrap();
    let endpoints = Endpoints::corners(side);
    c.bench_function("solve_open_grid_128", move |b| {
        b.iter(|| pathing::solve(&g, endpoints).unwrap())
    });
}

fn bench_step_and_restart_maze_128(c: &mut Criterion) {
    let side = SideLength(128);
    let g = maze_grid(side);
    let mut search = BreadthFirstSearch::new(&g, Endpoints::corners(side)).unwrap();
    c.bench_function("step_and_restart_maze_128", move |b| {
        b.iter(|| {
            search.restart();
            search.by_ref().count()
        })
    });
}

criterion_group!(benches,
                 bench_solve_maze_128,
                 bench_solve_open_grid_128,
                 bench_step_and_restart_maze_128);
criterion_main!(benches);
