use crate::html::extract_pre_sections;
use crate::http::*;
use flate2::read::GzDecoder;
use futures::{stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING, HOST};
use std::io::Read;
use std::time::Duration;
use tracing::{debug, error, trace, warn};

// RATE_LIMIT = 10 /s
//
// lookup = `https://www.sec.gov/cgi-bin/cik_lookup?company={COMPANY_NAME}`, per name
//
// NOTE: the response is legacy HTML; the data lives in the second <pre>
// block, one `<a href="...">{cik}</a>  {title}` line per match

const SEARCH_URL: &'static str = "https://www.sec.gov/cgi-bin/cik_lookup";

// The SEC requires a contactable identifier; set USER_AGENT in `.env` to
// override the placeholder.
const DEFAULT_USER_AGENT: &'static str = "Personal Use johnnyappleseed@gmail.com";

// Minimum gap between consecutive requests, per the 10 requests/second cap.
const REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Reference query set; an ordered list, so output order is stable run to run.
pub const DEFAULT_COMPANIES: [&'static str; 5] = ["Pulse", "Comcast", "Google", "ABC", "Apple"];

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Resolve each company name against the SEC CIK lookup endpoint, one request
/// at a time, and print the resulting `CIK: title` table per name.
///
/// Failures are reported per query; no query aborts the remaining ones.
pub async fn scrape(companies: &[String]) -> anyhow::Result<()> {
    let http_client = build_client();
    let time = std::time::Instant::now();

    let mut stream = stream::iter(companies);
    let mut first = true;
    while let Some(company) = stream.next().await {
        // stay under the endpoint's request-rate cap
        if !first {
            tokio::time::sleep(REQUEST_INTERVAL).await;
        }
        first = false;

        debug!("fetching SEC CIK lookup for '{company}'");
        match lookup(&http_client, SEARCH_URL, company).await {
            Ok(html) => report(company, &html),
            Err(LookupError::Status { code, reason }) => {
                println!("HTTP Error for '{company}': {code} {reason}")
            }
            Err(LookupError::Transport(err)) => println!("URL Error for '{company}': {err}"),
            Err(err) => println!("Unexpected error for '{company}': {err}"),
        }
    }

    debug!("SEC CIK lookup finished. {}", crate::time_elapsed(time));

    Ok(())
}

fn build_client() -> HttpClient {
    // headers required by SEC guidelines
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(HOST, HeaderValue::from_static("www.sec.gov"));
    reqwest::ClientBuilder::new()
        .user_agent(var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()))
        .default_headers(headers)
        .build()
        .expect("failed to build reqwest client")
}

/// GET one company-name query and decode the response body to text,
/// inflating it first when the endpoint answered with a gzipped body.
///
/// `base_url` is the endpoint without its query string; [`scrape`] passes the
/// fixed SEC address, tests point it at a local server.
pub async fn lookup(
    http_client: &HttpClient,
    base_url: &str,
    company: &str,
) -> Result<String, LookupError> {
    let response = http_client
        .get(base_url)
        .query(&[("company", company)])
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch data for '{company}', error({err})");
            err
        })?;

    let status = response.status();
    if !status.is_success() {
        error!("lookup endpoint returned {status} for '{company}'");
        return Err(LookupError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let gzipped = response
        .headers()
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value == "gzip");

    let body = response.bytes().await.map_err(|err| {
        error!("failed to read response body for '{company}', error({err})");
        err
    })?;

    if gzipped {
        trace!("inflating gzipped response body for '{company}'");
        let mut html = String::new();
        GzDecoder::new(body.as_ref())
            .read_to_string(&mut html)
            .map_err(|err| {
                error!("failed to inflate response body for '{company}', error({err})");
                LookupError::Inflate(err)
            })?;
        Ok(html)
    } else {
        String::from_utf8(body.to_vec()).map_err(|err| {
            error!("response body for '{company}' is not valid UTF-8, error({err})");
            LookupError::from(err)
        })
    }
}

// Pull the result table out of a lookup page and print it.
fn report(company: &str, html: &str) {
    let sections = extract_pre_sections(html);

    // sections[0] is the column header; the table itself is sections[1]
    match sections.get(1) {
        Some(table) => {
            let records = Records::parse(table);
            println!("\nResults for '{company}':");
            for record in records.iter() {
                println!("{record}");
            }
        }
        None => println!("Error: Missing expected table for '{company}'."),
    }
}

// error
// ----------------------------------------------------------------------------

/// Per-query failure; [`scrape`] reports these and moves on to the next name.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The endpoint answered with a non-2xx status.
    #[error("{code} {reason}")]
    Status { code: u16, reason: String },

    /// Connection, name resolution or protocol failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body declared `Content-Encoding: gzip` but would not inflate.
    #[error("{0}")]
    Inflate(std::io::Error),

    /// The decompressed body is not valid UTF-8.
    #[error("{0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

// de
// ----------------------------------------------------------------------------

/// One `CIK -> title` pair parsed from a table line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub cik: String,
    pub title: String,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<10}: {}", self.cik, self.title)
    }
}

/// Parsed result table, keyed by CIK.
///
/// Duplicate CIKs overwrite earlier titles while keeping their original
/// position, so display order is first-insertion order.
#[derive(Debug, Default)]
pub struct Records(Vec<Record>);

impl Records {
    /// Parse the main `<pre>` table of a lookup page, one record per anchor
    /// line.
    ///
    /// Lines without an anchor carry no data (banners, padding) and are
    /// skipped. Anchor lines missing their `</a>` close are malformed and
    /// skipped with a warning rather than sliced blindly.
    pub fn parse(table: &str) -> Self {
        let mut records = Records::default();
        for line in table.split('\n') {
            // each data line is in the form of:
            // `<a href="browse-edgar?action=getcompany&CIK=...">0000320193</a>   APPLE INC`
            if !line.contains("<a href=\"") {
                continue;
            }

            let Some(record) = parse_line(line) else {
                warn!("skipping malformed table line: {line:?}");
                continue;
            };
            trace!("parsed {record:?}");
            records.insert(record);
        }
        records
    }

    // last write wins, first position kept
    fn insert(&mut self, record: Record) {
        match self.0.iter_mut().find(|held| held.cik == record.cik) {
            Some(held) => held.title = record.title,
            None => self.0.push(record),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// CIK = text within the <a> tag; title = text after the </a> close
fn parse_line(line: &str) -> Option<Record> {
    let start = line.find("\">")? + 2;
    let end = line.find("</a>")?;
    let cik = line.get(start..end)?.trim();
    let title = line[end + "</a>".len()..].trim();
    Some(Record {
        cik: cik.to_string(),
        title: title.to_string(),
    })
}
