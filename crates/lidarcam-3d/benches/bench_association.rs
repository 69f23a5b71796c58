use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lidarcam_3d::{
    cluster_lidar_with_roi, AssociationConfig, BoundingBox, CalibrationSet, LidarPoint, Projector,
    Rect,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(num_points: usize) -> Vec<LidarPoint> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..num_points)
        .map(|_| {
            LidarPoint::new(
                rng.random_range(2.0..40.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-1.5..1.0),
                rng.random_range(0.0..1.0),
            )
        })
        .collect()
}

fn random_boxes(num_boxes: usize) -> Vec<BoundingBox> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..num_boxes)
        .map(|i| {
            BoundingBox::new(
                i as i32,
                Rect::new(
                    rng.random_range(0..1100),
                    rng.random_range(100..300),
                    rng.random_range(40..200),
                    rng.random_range(40..200),
                ),
            )
        })
        .collect()
}

fn bench_association(c: &mut Criterion) {
    let projector = Projector::new(&CalibrationSet::kitti());
    let config = AssociationConfig::default();

    {
        let mut group = c.benchmark_group("Project");

        for num_points in [1_000, 100_000] {
            let points = random_points(num_points);
            group.bench_with_input(
                BenchmarkId::new("project_points", num_points),
                &points,
                |b, points| b.iter(|| std::hint::black_box(projector.project_points(points))),
            );
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("ClusterLidarWithRoi");

        for (num_points, num_boxes) in [(10_000, 4), (10_000, 32), (100_000, 32)] {
            let points = random_points(num_points);
            let boxes = random_boxes(num_boxes);
            let parameter_string = format!("{num_points}pts_{num_boxes}boxes");

            group.bench_with_input(
                BenchmarkId::new("cluster", &parameter_string),
                &(points, boxes),
                |b, (points, boxes)| {
                    b.iter(|| {
                        let mut boxes = boxes.clone();
                        cluster_lidar_with_roi(&mut boxes, points, &projector, &config)
                    })
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_association);
criterion_main!(benches);
