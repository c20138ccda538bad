mod helpers;
mod scenarios;
mod fixture_tests;
