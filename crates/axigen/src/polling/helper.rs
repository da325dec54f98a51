//! Time-based polling helper
//!
//! Lifecycle of a trigger instance:
//! - enable: store a watermark at the current time, emit nothing
//! - poll: emit items strictly newer than the watermark, oldest first, then
//!   advance the watermark to the newest timestamp seen
//! - test: fetch a sample without touching the watermark
//! - disable: drop the watermark
//!
//! Items sharing a timestamp are all new or all old together.

use log::{debug, info};

use crate::error::Result;
use crate::models::Watermark;
use crate::piece::PieceContext;
use crate::props::Props;
use crate::store::{KeyValueStore, KeyValueStoreExt};

/// Store key of the watermark
pub const WATERMARK_KEY: &str = "lastPoll";

/// Maximum number of items returned by [`test`]
pub const TEST_SAMPLE_SIZE: usize = 5;

/// An item tagged with its orderable timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct PolledItem<T> {
    pub epoch_millis: i64,
    pub data: T,
}

impl<T> PolledItem<T> {
    pub fn new(epoch_millis: i64, data: T) -> Self {
        Self { epoch_millis, data }
    }
}

/// Source of items for a polling trigger
pub trait Polling {
    type Item;

    /// Fetch the current items; order does not matter
    fn items(&self, ctx: &PieceContext, props: &Props) -> Result<Vec<PolledItem<Self::Item>>>;
}

/// Read the stored watermark, if the trigger is enabled
pub fn current_watermark(store: &dyn KeyValueStore) -> Result<Option<Watermark>> {
    store.get_as(WATERMARK_KEY)
}

/// Record the initial watermark at the current time
pub fn on_enable(store: &dyn KeyValueStore) -> Result<Watermark> {
    let watermark = Watermark::now();
    store.put_as(WATERMARK_KEY, &watermark)?;
    info!("Polling enabled at {}", watermark.last_epoch_millis);
    Ok(watermark)
}

pub fn on_disable(store: &dyn KeyValueStore) -> Result<()> {
    store.delete(WATERMARK_KEY)?;
    info!("Polling disabled");
    Ok(())
}

/// Split new items from seen ones and compute the next watermark
///
/// Returns the items strictly newer than `watermark`, ordered by timestamp
/// (stable for ties), and the watermark advanced over all items.
pub fn select_new<T>(items: Vec<PolledItem<T>>, watermark: Watermark) -> (Vec<PolledItem<T>>, Watermark) {
    let next = watermark.clone().advanced(items.iter().map(|i| i.epoch_millis));

    let mut fresh: Vec<PolledItem<T>> = items
        .into_iter()
        .filter(|i| watermark.is_newer(i.epoch_millis))
        .collect();
    fresh.sort_by_key(|i| i.epoch_millis);

    (fresh, next)
}

/// Run one poll cycle and return the new items, oldest first
pub fn poll<P: Polling>(
    polling: &P,
    ctx: &PieceContext,
    props: &Props,
    store: &dyn KeyValueStore,
) -> Result<Vec<P::Item>> {
    let watermark = current_watermark(store)?.unwrap_or_default();
    let items = polling.items(ctx, props)?;
    let fetched = items.len();

    let (fresh, next) = select_new(items, watermark);
    store.put_as(WATERMARK_KEY, &next)?;

    debug!(
        "Polled {} items, {} new, watermark now {}",
        fetched,
        fresh.len(),
        next.last_epoch_millis
    );
    Ok(fresh.into_iter().map(|i| i.data).collect())
}

/// Fetch up to [`TEST_SAMPLE_SIZE`] of the newest items, newest first
///
/// Leaves the watermark untouched.
pub fn test<P: Polling>(polling: &P, ctx: &PieceContext, props: &Props) -> Result<Vec<P::Item>> {
    let mut items = polling.items(ctx, props)?;
    items.sort_by_key(|i| std::cmp::Reverse(i.epoch_millis));
    items.truncate(TEST_SAMPLE_SIZE);
    Ok(items.into_iter().map(|i| i.data).collect())
}
