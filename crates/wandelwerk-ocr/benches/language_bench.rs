// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for OCR language preparation. The preparer runs once
// per asset per job, but bulk re-derivation sweeps call it for every record
// in the repository, so the expansion/filter path is worth watching.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wandelwerk_ocr::LanguagePreparer;

/// Benchmark preparation of a mixed CJK/European request against a
/// realistic supported-language list.
fn bench_prepared_languages(c: &mut Criterion) {
    let supported: Vec<String> = [
        "afr", "ara", "chi_sim", "chi_tra", "dan", "deu", "eng", "fin", "fra", "frk", "heb",
        "hin", "ita", "jpn", "kor", "lat", "nld", "nor", "pol", "por", "rus", "spa", "swe",
        "tur", "ukr", "vie",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let requested: Vec<String> = ["eng", "deu", "chi", "jpn", "", "invalid"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    c.bench_function("prepared_languages (mixed request)", |b| {
        b.iter(|| {
            let preparer = LanguagePreparer::new(
                black_box(requested.clone()),
                None,
                black_box(supported.clone()),
            );
            black_box(preparer.argument());
        });
    });
}

criterion_group!(benches, bench_prepared_languages);
criterion_main!(benches);
