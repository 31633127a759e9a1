mod property_tests;
mod sequencer_tests;
