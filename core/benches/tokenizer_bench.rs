use boolsearch_core::tokenizer::Analyzer;
use boolsearch_core::IndexBuilder;
use criterion::{criterion_group, criterion_main, Criterion};

const PAGE: &str = "<html><head><style>body { color: red }</style></head><body>\
<h1>Матч года</h1><p>Футбольный матч между командами прошёл при полных трибунах. \
Болельщиков было больше, чем ожидалось; walking, played and running fans.</p>\
<script>var tracking = true;</script></body></html>";

fn bench_tokenize(c: &mut Criterion) {
    let analyzer = Analyzer::default();
    let text = PAGE.repeat(64);
    c.bench_function("tokenize_page", |b| b.iter(|| analyzer.tokens(&text).count()));
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("index_256_pages", |b| {
        b.iter(|| {
            let mut builder = IndexBuilder::default();
            for i in 0..256 {
                builder.add_document(PAGE, &format!("https://example.com/{i}"), "");
            }
            builder.postings().len()
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_build);
criterion_main!(benches);
