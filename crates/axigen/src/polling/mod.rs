//! Polling with time-based deduplication
//!
//! Provides the helper triggers use to emit only items newer than the
//! watermark kept in the trigger's key/value store.

mod helper;

pub use helper::{
    PolledItem, Polling, TEST_SAMPLE_SIZE, WATERMARK_KEY, current_watermark, on_disable,
    on_enable, poll, select_new, test,
};
