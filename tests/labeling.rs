use candlelab::config::{LabelingMethod, LabelingSection};
use candlelab::data::SequenceValidator;
use candlelab::ml::labeling::{self, FixedHorizonConfig, Label, TripleBarrierConfig};
use candlelab::types::{Candle, CandleSequence};
use polars::df;

fn bar(ts: i64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        timestamp: ts,
        open: close,
        high,
        low,
        close,
        volume: 5.0,
    }
}

fn triple_barrier_section(tp: f64, sl: f64, lookahead: usize) -> LabelingSection {
    LabelingSection {
        method: LabelingMethod::TripleBarrier,
        fixed_horizon: FixedHorizonConfig::default(),
        triple_barrier: TripleBarrierConfig {
            take_profit_pct: tp,
            stop_loss_pct: sl,
            lookahead_bars: lookahead,
        },
    }
}

fn entry_then(window: Vec<Candle>) -> CandleSequence {
    let mut candles = vec![bar(0, 100.0, 100.0, 100.0)];
    candles.extend(window);
    CandleSequence::from_candles(candles).unwrap()
}

#[test]
fn tp_touch_labels_one() {
    let seq = entry_then(vec![bar(1, 102.0, 100.0, 101.0)]);
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 1)).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].label, Label::TakeProfit);
}

#[test]
fn sl_touch_labels_zero() {
    let seq = entry_then(vec![bar(1, 100.0, 98.0, 99.0)]);
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 1)).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].label, Label::StopLoss);
}

#[test]
fn same_bar_double_touch_goes_to_tp() {
    let seq = entry_then(vec![bar(1, 102.0, 98.0, 100.0)]);
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 1)).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].label, Label::TakeProfit);
}

#[test]
fn untouched_window_is_excluded() {
    let seq = entry_then(vec![bar(1, 100.5, 99.5, 100.0)]);
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 1)).unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.stats().unresolved_count, 1);
}

#[test]
fn first_touch_wins_over_later_bars() {
    // SL is touched at bar 1; the TP touch at bar 2 must never be seen.
    let seq = entry_then(vec![
        bar(1, 100.0, 98.0, 99.0),
        bar(2, 105.0, 99.0, 104.0),
        bar(3, 105.0, 99.0, 104.0),
    ]);
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 3)).unwrap();

    assert_eq!(dataset.records()[0].label, Label::StopLoss);
}

#[test]
fn fixed_horizon_shift_labels() {
    let seq = CandleSequence::from_candles(vec![
        bar(0, 10.0, 10.0, 10.0),
        bar(1, 12.0, 12.0, 12.0),
        bar(2, 11.0, 11.0, 11.0),
    ])
    .unwrap();

    let section = LabelingSection {
        method: LabelingMethod::FixedHorizon,
        fixed_horizon: FixedHorizonConfig { horizon: 1 },
        triple_barrier: TripleBarrierConfig::default(),
    };
    let dataset = labeling::generate(&seq, &section).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[0].label, Label::TakeProfit);
    assert_eq!(dataset.records()[1].label, Label::StopLoss);
    // Index 2 has no future close and is dropped entirely.
    assert_eq!(dataset.stats().truncated_count, 1);
}

#[test]
fn no_target_outside_binary_classes() {
    // Mix of TP hits, SL hits and unresolved windows.
    let mut candles = Vec::new();
    for i in 0..40i64 {
        let close = 100.0 + (i % 7) as f64 * 0.3;
        let high = close + if i % 3 == 0 { 2.0 } else { 0.2 };
        let low = close - if i % 5 == 0 { 2.0 } else { 0.2 };
        candles.push(bar(i, high, low, close));
    }
    let seq = CandleSequence::from_candles(candles).unwrap();
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 5)).unwrap();

    let df = dataset.to_dataframe().unwrap();
    let target = df.column("target").unwrap().i64().unwrap();
    for i in 0..df.height() {
        let t = target.get(i).unwrap();
        assert!(t == 0 || t == 1, "target {} outside {{0,1}}", t);
    }
}

#[test]
fn identical_inputs_yield_identical_datasets() {
    let mut candles = Vec::new();
    for i in 0..200i64 {
        let close = 100.0 + ((i * 37) % 11) as f64 * 0.4;
        candles.push(bar(i, close + 0.8, close - 0.8, close));
    }
    let seq = CandleSequence::from_candles(candles).unwrap();
    let section = triple_barrier_section(0.005, 0.003, 10);

    let first = labeling::generate(&seq, &section).unwrap();
    let second = labeling::generate(&seq, &section).unwrap();

    assert_eq!(first.records(), second.records());
    assert!(first
        .to_dataframe()
        .unwrap()
        .equals(&second.to_dataframe().unwrap()));
}

#[test]
fn external_frame_is_validated_then_labeled() {
    let df = df! {
        "timestamp" => &[0i64, 60_000, 120_000, 180_000],
        "open" => &[100.0, 100.0, 100.0, 100.0],
        "high" => &[100.2, 102.0, 100.2, 100.2],
        "low" => &[99.8, 99.8, 99.8, 99.8],
        "close" => &[100.0, 101.0, 100.0, 100.0],
        "volume" => &[5.0, 5.0, 5.0, 5.0],
    }
    .unwrap();

    let seq = SequenceValidator::to_sequence(&df).unwrap();
    let dataset = labeling::generate(&seq, &triple_barrier_section(0.01, 0.01, 1)).unwrap();

    // Index 0 sees the TP excursion at index 1; indices 1 and 2 resolve
    // nothing and are dropped; index 3 has no window.
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].label, Label::TakeProfit);
    assert_eq!(dataset.stats().unresolved_count, 2);
    assert_eq!(dataset.stats().truncated_count, 1);
}

#[test]
fn missing_column_is_reported_before_labeling() {
    let df = df! {
        "timestamp" => &[0i64, 60_000],
        "open" => &[100.0, 100.0],
        "high" => &[100.2, 100.2],
        "low" => &[99.8, 99.8],
        "volume" => &[5.0, 5.0],
    }
    .unwrap();

    assert!(SequenceValidator::to_sequence(&df).is_err());
}
