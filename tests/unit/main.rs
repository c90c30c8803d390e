mod config_tests;
mod ingest_tests;
mod scoring_tests;
