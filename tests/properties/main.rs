mod determinism_tests;
mod encoding_tests;
mod ranking_tests;
