use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use html::{Document, tokenize};

const BLOCK_TEMPLATE: &str = "<div class=box><span>hello &amp; bye</span><img src=x></div>";
const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri");
        body.push('<');
        body.push_str("pt");
    }
    body.push_str("</script>");
    body
}

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

fn bench_parse_fragment_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_parse_fragment_large", |b| {
        b.iter(|| black_box(Document::parse_fragment(black_box(&input))));
    });
}

fn bench_set_inner_html_repeated(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_set_inner_html_repeated", |b| {
        b.iter_batched(
            || Document::parse_fragment(""),
            |(mut doc, root)| {
                for _ in 0..16 {
                    doc.set_inner_html(root, black_box(&input));
                }
                black_box(doc);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_serialize_large(c: &mut Criterion) {
    let (doc, root) = Document::parse_fragment(&make_blocks(LARGE_BLOCKS));
    c.bench_function("bench_serialize_large", |b| {
        b.iter(|| black_box(doc.inner_html(black_box(root)).len()));
    });
}

fn bench_tokenize_rawtext_adversarial(c: &mut Criterion) {
    let input = make_rawtext_adversarial(512 * 1024);
    c.bench_function("bench_tokenize_rawtext_adversarial", |b| {
        b.iter(|| black_box(tokenize(black_box(&input)).len()));
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_parse_fragment_large,
    bench_set_inner_html_repeated,
    bench_serialize_large,
    bench_tokenize_rawtext_adversarial
);
criterion_main!(benches);
