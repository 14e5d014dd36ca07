//! Command line tool to prepare a dataset and preview its batches

use std::path::PathBuf;

use anyhow::anyhow;
use burn::config::Config as _;
use burn_fastdata::{pipelines::fast_data::Config, DatasetKind, FastData};
use pico_args::Arguments;

const HELP: &str = "\
Usage: prepare DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to use ('sst', 'yelp' or 'trial')

Options:
  -h, --help           Print help
  -p, --path           The dataset root directory
  -b, --batch-size     Batch size
  -s, --seq-len        Maximum number of tokens per sequence
  -r, --split-ratio    Share of records held out by each split
  -f, --min-freq       Minimum vocabulary frequency
  --seed               Seed for the split shuffles
  -c, --config         Load a JSON config first; other options override it
  --save-config        Write the effective config as JSON
  --save-vocab         Write the vocabulary as JSON
  -n, --num-batches    Number of batches to preview (defaults to 1)
";

#[derive(Debug)]
struct Args {
    dataset: DatasetKind,
    path: Option<String>,
    batch_size: Option<usize>,
    seq_len: Option<usize>,
    split_ratio: Option<f64>,
    min_freq: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    save_config: Option<PathBuf>,
    save_vocab: Option<PathBuf>,
    num_batches: usize,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            path: pargs.opt_value_from_str(["-p", "--path"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            seq_len: pargs.opt_value_from_str(["-s", "--seq-len"])?,
            split_ratio: pargs.opt_value_from_str(["-r", "--split-ratio"])?,
            min_freq: pargs.opt_value_from_str(["-f", "--min-freq"])?,
            seed: pargs.opt_value_from_str("--seed")?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            save_config: pargs.opt_value_from_str("--save-config")?,
            save_vocab: pargs.opt_value_from_str("--save-vocab")?,
            num_batches: pargs
                .opt_value_from_str(["-n", "--num-batches"])?
                .unwrap_or(1),
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .map_err(|e| anyhow!("Unable to load config {}: {}", path.display(), e))?,
            None => Config::new(),
        };

        config.data_type = self.dataset;

        if let Some(path) = &self.path {
            config.path = path.to_string();
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(seq_len) = self.seq_len {
            config.seq_len = seq_len;
        }

        if let Some(split_ratio) = self.split_ratio {
            config.split_ratio = split_ratio;
        }

        if let Some(min_freq) = self.min_freq {
            config.min_freq = min_freq;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config()?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        log::info!("Saved config to {}", path.display());
    }

    let mut data = FastData::new(&config)?;

    println!(
        "{}: {} train / {} test records, {} tokens in vocabulary, {} batches per pass",
        config.data_type,
        data.train_len(),
        data.test_len(),
        data.vocab.len(),
        data.batches_per_epoch()
    );

    if let Some(path) = &args.save_vocab {
        data.vocab.save(path)?;
        log::info!("Saved vocabulary to {}", path.display());
    }

    for i in 0..args.num_batches {
        let batch = data.next_batch();

        let first = batch
            .word_seq
            .first()
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| data.vocab.to_word(id))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        println!(
            "\n=== Batch {i} (pass {}) ===\
             \n- Records: {}\
             \n- First: {first}\
             \n- Labels: {:?}",
            data.epoch(),
            batch.len(),
            batch.label_seq
        );
    }

    Ok(())
}
