//! Unit test modules.

mod activity_metrics_test;
mod codec_test;
mod description_test;
