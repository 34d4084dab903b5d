pub mod html;
pub mod sec;

/// Shortcut for required API elements.
pub mod http {
    pub(crate) use dotenv::var;
    pub use reqwest::Client as HttpClient;
}

/// Orange `elapsed time: .. ms` fragment for debug lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!(
        "\x1b[38;5;208melapsed time: {} ms\x1b[0m",
        time.elapsed().as_millis()
    )
}
