use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kumiwake_core::{FieldExtractor, StaticDetailSource, TorrentRecord, group_torrents};

const TITLES: [&str; 5] = [
    "[SubsPlease] Sousou no Frieren - 24 (1080p) [A1B2C3D4].mkv",
    "[Erai-raws] Shingeki no Kyojin - The Final Season - 28 [1080p][Multi-Sub]",
    "[Judas] Golden Kamuy Third Season - 01 (1080p) [Dual Audio]",
    "Mob Psycho 100 Season III - 05 [720p] English Dub",
    "[ASW] Kusuriya no Hitorigoto S2 Part 2 - 13 [1080p HEVC]",
];

fn bench_field_extraction(c: &mut Criterion) {
    let extractor = FieldExtractor::new().unwrap();

    c.bench_function("extract_season_single", |b| {
        b.iter(|| extractor.season(black_box(TITLES[2]), ""));
    });

    c.bench_function("extract_all_fields_batch_5", |b| {
        b.iter(|| {
            for title in &TITLES {
                let title = black_box(*title);
                let _ = extractor.anime_name(title);
                let _ = extractor.season(title, "");
                let _ = extractor.episode(title);
                let _ = extractor.quality(title, "");
                let _ = extractor.release_group(title);
                let _ = extractor.audio_language(title, "", "");
                let _ = extractor.subtitle_language(title, "", "");
            }
        });
    });
}

fn bench_grouping(c: &mut Criterion) {
    let torrents: Vec<TorrentRecord> = (0..200u32)
        .map(|i| {
            let title = TITLES[i as usize % TITLES.len()];
            TorrentRecord::new(i.to_string(), title).with_seeders(i)
        })
        .collect();
    let source = StaticDetailSource::new();

    c.bench_function("group_200_title_only", |b| {
        b.iter(|| group_torrents(black_box(torrents.clone()), &source, "Anime").unwrap());
    });
}

criterion_group!(benches, bench_field_extraction, bench_grouping);
criterion_main!(benches);
