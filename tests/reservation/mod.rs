mod concurrency;
mod no_show;
