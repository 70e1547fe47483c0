//! Concurrent lyrics fetching.
//!
//! One task per song, all-or-nothing: the batch succeeds with one record per
//! song, or fails with the first error and takes every sibling down with it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::lyrics::api::LyricsSource;
use crate::lyrics::types::{LyricsRecord, SongIdentity};

/// Fans a batch of songs out over a [`LyricsSource`] and gathers the results.
///
/// Each song gets its own `tokio` task in a `JoinSet`. The `JoinSet` is the
/// only channel back from the tasks, and the batch future is the only thing
/// that reads it or touches the result vector. On the first failure the
/// batch is cancelled and the set is shut down, so no task outlives the call.
pub struct FetchDispatcher<S> {
    source: Arc<S>,
    limit: Option<Arc<Semaphore>>,
}

impl<S> Clone for FetchDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            limit: self.limit.clone(),
        }
    }
}

impl<S: LyricsSource + 'static> FetchDispatcher<S> {
    /// Create a dispatcher with unbounded fan-out
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Create a dispatcher over a source that is shared elsewhere
    pub const fn from_shared(source: Arc<S>) -> Self {
        Self { source, limit: None }
    }

    /// Create a dispatcher honouring the configured concurrency cap
    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source).with_max_concurrency(config.max_concurrency.unwrap_or(0))
    }

    /// Cap the number of lookups in flight at once; `0` removes the cap.
    ///
    /// Clones made afterwards share the same cap.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.limit = (max > 0).then(|| Arc::new(Semaphore::new(max)));
        self
    }

    /// The source lookups go to
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch lyrics for every song.
    ///
    /// Returns one record per song, in completion order, or the first error.
    pub async fn fetch_all(&self, songs: &[SongIdentity]) -> Result<Vec<LyricsRecord>> {
        self.fetch_all_until(songs, &CancellationToken::new()).await
    }

    /// Like [`fetch_all`](Self::fetch_all), but gives up with
    /// [`Error::Cancelled`] once `cancel` fires.
    pub async fn fetch_all_until(
        &self,
        songs: &[SongIdentity],
        cancel: &CancellationToken,
    ) -> Result<Vec<LyricsRecord>> {
        if songs.is_empty() {
            return Ok(Vec::new());
        }

        let batch = cancel.child_token();
        let mut units = JoinSet::new();

        tracing::info!(
            "looking for lyrics for {} songs via {}...",
            songs.len(),
            self.source.name()
        );
        for song in songs {
            tracing::info!("{} - {}", song.artist, song.title);
            units.spawn(fetch_one(
                Arc::clone(&self.source),
                self.limit.clone(),
                batch.clone(),
                song.clone(),
            ));
        }

        let mut records = Vec::with_capacity(songs.len());
        let outcome = loop {
            let joined = tokio::select! {
                biased;
                () = cancel.cancelled() => break Err(Error::Cancelled),
                joined = units.join_next() => joined,
            };

            match joined {
                None => break Ok(()),
                Some(Ok(Ok(record))) => records.push(record),
                Some(Ok(Err(e))) => break Err(e),
                Some(Err(e)) => break Err(Error::Task(e.to_string())),
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!("fetched lyrics for all {} songs", records.len());
                Ok(records)
            }
            Err(e) => {
                batch.cancel();
                units.shutdown().await;
                tracing::warn!("lyrics batch aborted: {e}");
                Err(e)
            }
        }
    }
}

/// One unit of work: look up a single song and wrap the outcome.
async fn fetch_one<S: LyricsSource>(
    source: Arc<S>,
    limit: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
    song: SongIdentity,
) -> Result<LyricsRecord> {
    // A panicking source is caught here, while the song is still known
    let lookup = AssertUnwindSafe(async {
        let _permit = match &limit {
            Some(limit) => Some(limit.acquire().await.map_err(|_| Error::Cancelled)?),
            None => None,
        };
        source.lookup(&song).await
    })
    .catch_unwind();

    let text = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(Error::Cancelled),
        caught = lookup => caught
            .unwrap_or_else(|payload| {
                Err(Error::Task(format!("lookup panicked: {}", panic_message(payload.as_ref()))))
            })
            .map_err(|e| {
                tracing::debug!("lookup failed for {song}: {e}");
                Error::lookup(&song, e)
            })?,
    };

    if text.trim().is_empty() {
        tracing::info!("failed to find lyrics for: {} - {}", song.artist, song.title);
    }

    Ok(LyricsRecord::new(song.id, text))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
