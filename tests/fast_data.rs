use std::{collections::HashMap, fs, path::Path};

use burn::{backend::NdArray, data::dataset::Dataset};
use burn_fastdata::{
    datasets::{trial, DatasetKind},
    pipelines::{
        record::{pad_all, EOS, START},
        split::split,
        vocab::{PAD, UNK},
        Batcher, Config, FastData, FastDataError,
    },
};
use pretty_assertions::assert_eq;

const LEXICON: [&str; 12] = [
    "the", "food", "was", "great", "awful", "service", "slow", "friendly", "never", "again",
    "tacos", "wow",
];

/// Line `i` holds `i % 9 + 1` words, so every ninth group has lengths 7, 8 and 9
fn line(i: usize) -> String {
    (0..i % 9 + 1)
        .map(|j| LEXICON[(i * 7 + j * 5) % LEXICON.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_trial(dir: &Path, pos: usize, neg: usize) {
    let pos_lines: Vec<String> = (0..pos).map(line).collect();
    let neg_lines: Vec<String> = (0..neg).map(|i| line(i + 3).to_uppercase()).collect();

    fs::write(dir.join(trial::POSITIVE_FILE), pos_lines.join("\n") + "\n").unwrap();
    fs::write(dir.join(trial::NEGATIVE_FILE), neg_lines.join("\n") + "\n").unwrap();
}

fn config(dir: &Path) -> Config {
    Config::new()
        .with_path(dir.to_string_lossy().to_string())
        .with_data_type(DatasetKind::Trial)
        .with_batch_size(8)
        .with_seq_len(6)
}

#[test]
fn trial_loader_reads_both_files() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 10, 10);

    let items = trial::load(dir.path().to_str().unwrap()).unwrap();

    assert_eq!(items.len(), 20);
    assert_eq!(items.iter().filter(|item| item.label == 1).count(), 10);
    assert!(items[10..].iter().all(|item| item.label == 0));
}

#[test]
fn over_length_records_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);
    let config = config(dir.path());

    let raw = trial::load(dir.path().to_str().unwrap()).unwrap();
    let expected = raw.iter().filter(|item| item.words.len() <= 6).count();

    let data = FastData::new(&config).unwrap();

    assert!(expected < raw.len());
    assert_eq!(data.train_len() + data.test_len(), expected);
    assert_eq!(data.test_len(), expected / 10);
}

#[test]
fn every_record_is_padded_and_shifted() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);

    let data = FastData::new(&config(dir.path())).unwrap();

    for record in data.train_data.iter().chain(data.test_data.iter()) {
        assert_eq!(record.words.len(), 8);
        assert_eq!(record.word_seq.len(), 8);
        assert_eq!(record.dec_target.len(), 8);
        assert_eq!(record.words[0], START);
        assert!(record.words.contains(&EOS.to_string()));

        assert_eq!(&record.dec_target[..7], &record.word_seq[1..]);
        assert_eq!(record.dec_target[7], data.vocab.pad_index());
        assert!(record.label_seq <= 1);
    }
}

#[test]
fn vocabulary_respects_min_freq_on_the_fitting_split() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);
    let config = config(dir.path()).with_min_freq(3);

    let data = FastData::new(&config).unwrap();

    let raw = DatasetKind::Trial
        .load_raw(&config.path, config.seq_len)
        .unwrap();
    let (fit, _) = split(pad_all(raw, config.seq_len), config.split_ratio, config.seed);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in &fit {
        for word in &item.words {
            *counts.entry(word.as_str()).or_default() += 1;
        }
    }

    assert_eq!(data.vocab.to_word(0), Some(PAD));
    assert_eq!(data.vocab.to_word(1), Some(UNK));

    for word in &data.vocab.words()[2..] {
        assert!(counts[word.as_str()] >= 3, "{} is below min_freq", word);
    }

    for (word, count) in counts {
        if count >= 3 {
            assert!(data.vocab.contains(word), "{} is missing", word);
        }
    }
}

#[test]
fn next_batch_is_always_full_and_wraps() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);

    let mut data = FastData::new(&config(dir.path())).unwrap();
    let per_pass = data.batches_per_epoch();
    assert!(per_pass >= 2);

    let first = data.next_batch();
    for _ in 1..per_pass {
        assert_eq!(data.next_batch().len(), 8);
    }
    assert_eq!(data.epoch(), 0);

    let wrapped = data.next_batch();

    assert_eq!(wrapped, first);
    assert_eq!(data.epoch(), 1);

    for _ in 0..per_pass * 3 {
        let batch = data.next_batch();
        assert_eq!(batch.len(), 8);
        assert_eq!(batch.word_seq.len(), 8);
        assert_eq!(batch.dec_target.len(), 8);
    }
}

#[test]
fn first_batch_follows_training_order() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);

    let mut data = FastData::new(&config(dir.path())).unwrap();
    let batch = data.next_batch();

    for (i, word_seq) in batch.word_seq.iter().enumerate() {
        assert_eq!(word_seq, &data.train_data.get(i).unwrap().word_seq);
    }
}

#[test]
fn same_seed_gives_same_data() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);

    let mut a = FastData::new(&config(dir.path())).unwrap();
    let mut b = FastData::new(&config(dir.path())).unwrap();

    assert_eq!(a.vocab, b.vocab);
    assert_eq!(a.next_batch(), b.next_batch());
}

#[test]
fn tensor_batches_have_fixed_shape() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 60, 60);

    let mut data = FastData::new(&config(dir.path())).unwrap();
    let batcher = Batcher::<NdArray>::new(Default::default());

    let expected = data.next_batch();
    data.reset();
    let train = data.next_batch_tensors(&batcher);

    assert_eq!(train.word_seq.dims(), [8, 8]);
    assert_eq!(train.dec_target.dims(), [8, 8]);
    assert_eq!(train.label_seq.dims(), [8]);

    let labels = train.label_seq.into_data().convert::<i64>().value;
    let expected: Vec<i64> = expected.label_seq.iter().map(|&l| l as i64).collect();
    assert_eq!(labels, expected);
}

#[test]
fn empty_files_are_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(trial::POSITIVE_FILE), "").unwrap();
    fs::write(dir.path().join(trial::NEGATIVE_FILE), "").unwrap();

    assert!(matches!(
        FastData::new(&config(dir.path())),
        Err(FastDataError::NoInput { .. })
    ));
}

#[test]
fn training_split_smaller_than_a_batch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_trial(dir.path(), 3, 3);

    assert!(matches!(
        FastData::new(&config(dir.path())),
        Err(FastDataError::TooFewRecords { batch_size: 8, .. })
    ));
}

#[test]
fn yelp_and_sst_load_end_to_end() {
    let yelp = tempfile::tempdir().unwrap();
    let texts: Vec<String> = (0..40).map(line).collect();
    let labels: Vec<String> = (0..40).map(|i| (i % 2).to_string()).collect();
    fs::write(yelp.path().join("sentiment.train.text"), texts.join("\n")).unwrap();
    fs::write(yelp.path().join("sentiment.train.labels"), labels.join("\n")).unwrap();

    let data = FastData::new(
        &config(yelp.path())
            .with_data_type(DatasetKind::Yelp)
            .with_batch_size(4),
    )
    .unwrap();
    assert!(data.train_len() >= 4);

    let sst = tempfile::tempdir().unwrap();
    let trees: Vec<String> = (0..30)
        .map(|i| format!("({} (2 Good) (3 (2 fun) (2 movie{})))", [0, 1, 3, 4][i % 4], i % 3))
        .collect();
    fs::write(sst.path().join("train.txt"), trees.join("\n")).unwrap();
    fs::write(sst.path().join("dev.txt"), "(2 (2 neutral) (2 tree))\n").unwrap();
    fs::write(sst.path().join("test.txt"), "").unwrap();

    let data = FastData::new(
        &config(sst.path())
            .with_data_type(DatasetKind::Sst)
            .with_batch_size(4),
    )
    .unwrap();

    assert_eq!(data.train_len() + data.test_len(), 30);
    assert!(data.vocab.contains("good"));
    assert!(!data.vocab.contains("neutral"));
}
