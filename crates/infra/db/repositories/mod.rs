pub mod live_streams;
