pub mod csv;
pub mod fetcher;
pub mod validator;
pub mod venue;

pub use csv::CsvConnector;
pub use fetcher::{CandleFetcher, FetchOutcome};
pub use validator::{RequiredColumn, SequenceValidator};
pub use venue::{BinanceVenue, CandleVenue};
