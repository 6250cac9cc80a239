/// Integration test target: tracker workflows against real SQLite files
mod tracker_integration;
