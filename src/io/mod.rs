/// CSV export for range tables and savings timelines.
pub mod export;
