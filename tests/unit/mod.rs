/// Unit test target: pure date and streak behavior through the public API
mod date_tests;
mod streak_tests;
