use criterion::{Criterion, criterion_group, criterion_main};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn create_test_project(file_count: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join("src")).unwrap();

    for i in 0..file_count {
        let content = if i == 0 {
            r#"/**
 * Root of the class chain.
 */
class Node0 {
    protected id: number = 0;
    describe(): string { return "node"; }
}
"#
            .to_string()
        } else {
            format!(
                r#"import {{ Node{prev} }} from "./node_{prev}";

/**
 * Link {i} in the chain.
 * @since 1.0
 */
class Node{i} extends Node{prev} {{
    private _payload: string;

    constructor(payload: string = "x") {{
        this._payload = payload;
    }}

    get payload(): string {{ return this._payload; }}
}}
"#,
                prev = i - 1,
                i = i
            )
        };

        let path = root.join("src").join(format!("node_{}.ts", i));
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    temp_dir
}

fn full_scan_benchmark(c: &mut Criterion) {
    let temp_10 = create_test_project(10);
    let temp_50 = create_test_project(50);
    let temp_100 = create_test_project(100);

    let mut group = c.benchmark_group("full_scan");
    group.sample_size(20);

    group.bench_function("10_files", |b| {
        b.iter(|| {
            let config = stratum::StratumConfig {
                path: temp_10.path().to_path_buf(),
                verbose: false,
                ..Default::default()
            };
            let _ = stratum::run_analysis(&config);
        })
    });

    group.bench_function("50_files", |b| {
        b.iter(|| {
            let config = stratum::StratumConfig {
                path: temp_50.path().to_path_buf(),
                verbose: false,
                ..Default::default()
            };
            let _ = stratum::run_analysis(&config);
        })
    });

    group.bench_function("100_files", |b| {
        b.iter(|| {
            let config = stratum::StratumConfig {
                path: temp_100.path().to_path_buf(),
                verbose: false,
                ..Default::default()
            };
            let _ = stratum::run_analysis(&config);
        })
    });

    group.finish();
}

criterion_group!(benches, full_scan_benchmark);
criterion_main!(benches);
