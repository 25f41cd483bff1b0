mod middleware_test;
mod schedule_test;
mod swaps_test;
