//! Data sources and the one-shot background load.
//!
//! A [`DataSource`] delivers the two parallel arrays (embeddings and labels).
//! [`DataLoad::spawn`] fetches them on a worker thread and hands a validated
//! [`Dataset`] back over a channel, which the UI polls once per frame.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::{is_url, DataSourceConfig};
use crate::data::dataset::{Dataset, LengthPolicy};
use crate::error::{LassoPlotError, Result};

/// Provider of the embeddings and labels arrays.
pub trait DataSource: Send + 'static {
    /// Ordered coordinate arrays, one per point.
    fn fetch_embeddings(&self) -> Result<Vec<Vec<f64>>>;
    /// Ordered class labels, positionally matching the embeddings.
    fn fetch_labels(&self) -> Result<Vec<i64>>;
    /// Short description for log messages.
    fn describe(&self) -> String;
}

/// Reads two JSON array files.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    embeddings: PathBuf,
    labels: PathBuf,
}

impl JsonFileSource {
    pub fn new(embeddings: impl Into<PathBuf>, labels: impl Into<PathBuf>) -> Self {
        Self {
            embeddings: embeddings.into(),
            labels: labels.into(),
        }
    }

    pub fn from_config(cfg: &DataSourceConfig) -> Self {
        Self::new(&cfg.embeddings, &cfg.labels)
    }
}

impl DataSource for JsonFileSource {
    fn fetch_embeddings(&self) -> Result<Vec<Vec<f64>>> {
        let s = fs::read_to_string(&self.embeddings)?;
        Ok(serde_json::from_str(&s)?)
    }

    fn fetch_labels(&self) -> Result<Vec<i64>> {
        let s = fs::read_to_string(&self.labels)?;
        Ok(serde_json::from_str(&s)?)
    }

    fn describe(&self) -> String {
        format!("files {:?} + {:?}", self.embeddings, self.labels)
    }
}

/// Request timeout for [`HttpSource`].
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches both arrays with HTTP GET; each response body is a JSON array.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    embeddings_url: String,
    labels_url: String,
}

impl HttpSource {
    pub fn new(embeddings_url: impl Into<String>, labels_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            embeddings_url: embeddings_url.into(),
            labels_url: labels_url.into(),
        })
    }

    /// Server exposing `/data/tsne` and `/data/labels` under `base`.
    pub fn from_base_url(base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/');
        Self::new(format!("{base}/data/tsne"), format!("{base}/data/labels"))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LassoPlotError::Source(format!(
                "GET {url} failed with status: {status}"
            )));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl DataSource for HttpSource {
    fn fetch_embeddings(&self) -> Result<Vec<Vec<f64>>> {
        self.get_json(&self.embeddings_url)
    }

    fn fetch_labels(&self) -> Result<Vec<i64>> {
        self.get_json(&self.labels_url)
    }

    fn describe(&self) -> String {
        format!("{} + {}", self.embeddings_url, self.labels_url)
    }
}

/// Source chosen from a [`DataSourceConfig`]: URLs go over HTTP, anything
/// else is read from disk.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Files(JsonFileSource),
    Http(HttpSource),
}

pub fn source_from_config(cfg: &DataSourceConfig) -> Result<ConfiguredSource> {
    match (is_url(&cfg.embeddings), is_url(&cfg.labels)) {
        (true, true) => Ok(ConfiguredSource::Http(HttpSource::new(
            cfg.embeddings.clone(),
            cfg.labels.clone(),
        )?)),
        (false, false) => Ok(ConfiguredSource::Files(JsonFileSource::from_config(cfg))),
        _ => Err(LassoPlotError::Config(
            "data.embeddings and data.labels must both be files or both be URLs".to_string(),
        )),
    }
}

impl DataSource for ConfiguredSource {
    fn fetch_embeddings(&self) -> Result<Vec<Vec<f64>>> {
        match self {
            ConfiguredSource::Files(s) => s.fetch_embeddings(),
            ConfiguredSource::Http(s) => s.fetch_embeddings(),
        }
    }

    fn fetch_labels(&self) -> Result<Vec<i64>> {
        match self {
            ConfiguredSource::Files(s) => s.fetch_labels(),
            ConfiguredSource::Http(s) => s.fetch_labels(),
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfiguredSource::Files(s) => s.describe(),
            ConfiguredSource::Http(s) => s.describe(),
        }
    }
}

/// Arrays already in memory (demos, tests, embedding applications).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub embeddings: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

impl StaticSource {
    pub fn new(embeddings: Vec<Vec<f64>>, labels: Vec<i64>) -> Self {
        Self { embeddings, labels }
    }
}

impl DataSource for StaticSource {
    fn fetch_embeddings(&self) -> Result<Vec<Vec<f64>>> {
        Ok(self.embeddings.clone())
    }

    fn fetch_labels(&self) -> Result<Vec<i64>> {
        Ok(self.labels.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory points", self.embeddings.len())
    }
}

/// Fetch both arrays and validate them into a [`Dataset`].
pub fn load_dataset(source: &dyn DataSource, policy: LengthPolicy) -> Result<Dataset> {
    log::info!("loading data from {}", source.describe());
    let embeddings = source.fetch_embeddings()?;
    let labels = source.fetch_labels()?;
    Dataset::new(embeddings, labels, policy)
}

/// Handle to a load running on a background thread.
pub struct DataLoad {
    rx: Receiver<Result<Dataset>>,
    finished: bool,
}

impl DataLoad {
    /// Start loading `source` on a worker thread.
    pub fn spawn<S: DataSource>(source: S, policy: LengthPolicy) -> Self {
        let (tx, rx) = mpsc::channel();
        let fallback = tx.clone();
        let spawned = thread::Builder::new()
            .name("lassoplot-load".to_string())
            .spawn(move || {
                let _ = tx.send(load_dataset(&source, policy));
            });
        if let Err(e) = spawned {
            let _ = fallback.send(Err(LassoPlotError::Io(e)));
        }
        Self {
            rx,
            finished: false,
        }
    }

    /// Non-blocking poll. Yields the result exactly once.
    pub fn try_take(&mut self) -> Option<Result<Dataset>> {
        if self.finished {
            return None;
        }
        let out = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LassoPlotError::Source(
                "loader thread exited without a result".to_string(),
            )),
        };
        self.finished = true;
        Some(out)
    }

    /// Block until the load finishes.
    pub fn wait(self) -> Result<Dataset> {
        if self.finished {
            return Err(LassoPlotError::Source("load result already taken".to_string()));
        }
        self.rx.recv().map_err(|_| {
            LassoPlotError::Source("loader thread exited without a result".to_string())
        })?
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
