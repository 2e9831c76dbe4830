use anyhow::Context;
use candlelab::config::{AppConfig, ConfigManager, LabelingMethod};
use candlelab::data::{BinanceVenue, CandleFetcher, CsvConnector, FetchOutcome};
use candlelab::ml::labeling;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "candlelab.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        ConfigManager::load_from_file(&config_path)
            .with_context(|| format!("Loading {}", config_path))?
    } else {
        AppConfig::default()
    };
    config.validate()?;

    let fetcher = CandleFetcher::new(BinanceVenue::new()?);
    let sequence = match fetcher.fetch(&config.fetch)? {
        FetchOutcome::History(sequence) => sequence,
        FetchOutcome::NoData => {
            log::warn!(
                "No candles for {} {}; nothing written",
                config.fetch.symbol,
                config.fetch.interval
            );
            return Ok(());
        }
    };

    let dataset = labeling::generate(&sequence, &config.labeling)?;
    if dataset.is_empty() {
        log::warn!("Every candle was excluded; nothing written");
        return Ok(());
    }

    let output_path = match config.labeling.method {
        LabelingMethod::FixedHorizon => "dataset_shift.csv",
        LabelingMethod::TripleBarrier => "dataset_tp_sl.csv",
    };
    let mut df = CsvConnector::with_datetime_column(&dataset.to_dataframe()?)?;
    CsvConnector::write_dataset(&mut df, output_path)?;
    log::info!("Saved {} labeled rows to {}", dataset.len(), output_path);

    Ok(())
}
