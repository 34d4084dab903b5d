mod cli;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `cik lookup <Option<Vec<String>>>`: resolve company names
        Lookup { companies } => match companies {
            // if no names provided, resolve the reference set
            Some(companies) => cik_spider::sec::cik::scrape(&companies).await?,
            None => {
                let companies: Vec<String> = cik_spider::sec::cik::DEFAULT_COMPANIES
                    .iter()
                    .map(|name| name.to_string())
                    .collect();
                cik_spider::sec::cik::scrape(&companies).await?
            }
        },
    }

    Ok(())
}
