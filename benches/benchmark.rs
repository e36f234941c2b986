//! パフォーマンスベンチマーク
//!
//! 正規化・テーブル描画・ドキュメント組み立ての処理速度を測定します。
//! 入力はメモリ上で生成した合成データとrust_xlsxwriterで作成したワークブックです。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use xlsx2md::{normalize, render, CellValue, ConverterBuilder, Grid};

/// 文字列・整数・小数・空セルが混在する合成グリッド
fn synthetic_grid(rows: usize, cols: usize) -> Grid {
    let mut data = Vec::with_capacity(rows + 1);
    data.push(
        (0..cols)
            .map(|c| CellValue::text(format!("Column{}", c)))
            .collect(),
    );
    for r in 0..rows {
        data.push(
            (0..cols)
                .map(|c| match (r + c) % 4 {
                    0 => CellValue::text(format!("r{}|c{}", r, c)),
                    1 => CellValue::int((r * c) as i64),
                    2 => CellValue::float(r as f64 / 7.0),
                    _ => CellValue::Empty,
                })
                .collect(),
        );
    }
    Grid::from_rows(data)
}

/// 複数シートのワークブック（バイト列）
fn synthetic_workbook(sheets: usize, rows: u32, cols: u16) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for s in 0..sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(format!("Sheet{}", s + 1))
            .expect("valid sheet name");
        for c in 0..cols {
            worksheet
                .write_string(0, c, format!("H{}", c))
                .expect("write header");
        }
        for r in 1..=rows {
            for c in 0..cols {
                worksheet
                    .write_number(r, c, (r as f64) * (c as f64 + 0.5))
                    .expect("write number");
            }
        }
    }
    workbook.save_to_buffer().expect("save workbook")
}

fn benchmark_normalize_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_and_render");

    for rows in [100usize, 1_000, 10_000] {
        let grid = synthetic_grid(rows, 10);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &grid, |b, grid| {
            b.iter(|| {
                let normalized = normalize(black_box(grid.clone()));
                render(&normalized).expect("finite values only")
            })
        });
    }

    group.finish();
}

fn benchmark_workbook_conversion(c: &mut Criterion) {
    let data = synthetic_workbook(8, 500, 8);
    let sequential = ConverterBuilder::new().build().expect("default config");
    let parallel = ConverterBuilder::new()
        .with_parallel(true)
        .build()
        .expect("default config");

    let mut group = c.benchmark_group("workbook_conversion");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            sequential
                .convert_to_string("bench.xlsx", Cursor::new(black_box(data.clone())))
                .expect("conversion")
        })
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            parallel
                .convert_to_string("bench.xlsx", Cursor::new(black_box(data.clone())))
                .expect("conversion")
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize_and_render,
    benchmark_workbook_conversion
);
criterion_main!(benches);
