use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use clamsweep::{FileCollector, WalkConfig};

/// Spread `count` files over a two-level tree of subdirectories.
fn setup_tree(count: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    for i in 0..count {
        let dir = temp_dir
            .path()
            .join(format!("d{}", i % 8))
            .join(format!("e{}", i % 3));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("file_{i}.bin")), format!("payload {i}")).unwrap();
    }

    temp_dir
}

fn file_list(root: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

fn benchmark_collect_directories(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_directories");
    let collector = FileCollector::new(WalkConfig::default());
    let no_files: &[PathBuf] = &[];

    for count in [10, 100, 1000].iter() {
        let temp_dir = setup_tree(*count);
        let dirs = vec![temp_dir.path().to_path_buf()];

        group.bench_with_input(BenchmarkId::new("files", count), count, |b, _| {
            b.iter(|| {
                let work_set = collector.collect(no_files, black_box(&dirs));
                black_box(work_set.len())
            });
        });
    }

    group.finish();
}

fn benchmark_collect_overlapping(c: &mut Criterion) {
    let temp_dir = setup_tree(500);
    let files = file_list(temp_dir.path());
    let dirs = vec![
        temp_dir.path().to_path_buf(),
        temp_dir.path().join("d0"),
        temp_dir.path().join("d1").join(".."),
    ];
    let collector = FileCollector::new(WalkConfig::default());

    c.bench_function("collect_overlapping", |b| {
        b.iter(|| {
            let work_set = collector.collect(black_box(&files), black_box(&dirs));
            black_box(work_set.len())
        });
    });
}

criterion_group!(
    benches,
    benchmark_collect_directories,
    benchmark_collect_overlapping,
);
criterion_main!(benches);
