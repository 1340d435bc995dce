//! KonthoKosh feed reader
//!
//! Lists one page of the feed, or of the caller's own posts.
//!
//! ```text
//! KONTHOKOSH_BACKEND_URL=https://backend.example.com \
//! KONTHOKOSH_TOKEN=<jwt> \
//! RUST_LOG=konthokosh=debug \
//! konthokosh-feed [--mine] [--page N] [keyword]
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use konthokosh::{
    ApiClient, AuthenticatedClient, BackendConfig, FeedPost, Page, Pagination, PostQuery,
    PostsApi, RetryPolicy, StaticToken,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TOKEN_ENV: &str = "KONTHOKOSH_TOKEN";

#[derive(Debug, Default)]
struct Args {
    mine: bool,
    page: Option<u32>,
    keyword: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mine" => parsed.mine = true,
            "--page" => {
                let value = args.next().ok_or("--page needs a value")?;
                let page = value
                    .parse()
                    .map_err(|_| format!("invalid page number: {value}"))?;
                parsed.page = Some(page);
            }
            _ if parsed.keyword.is_none() => parsed.keyword = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }

    Ok(parsed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };
    info!(base_url = %config.base_url, timeout = ?config.client.timeout, "loaded configuration");

    let tokens = std::env::var(TOKEN_ENV).map_or_else(|_| StaticToken::none(), StaticToken::new);
    let posts = PostsApi::new(AuthenticatedClient::new(
        ApiClient::from_config(&config),
        tokens,
    ));

    let mut query = PostQuery::new();
    if let Some(page) = args.page {
        query = query.page(page);
    }
    if let Some(keyword) = args.keyword {
        query = query.keyword(keyword);
    }
    if args.mine {
        query = query.mine();
    }

    match RetryPolicy::default().run(|| posts.list_posts(&query)).await {
        Ok(page) => {
            print_page(&page);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn print_page(page: &Page<FeedPost>) {
    let Pagination {
        page: number,
        total_pages,
        total_count,
        ..
    } = page.pagination;
    println!("page {number}/{total_pages} ({total_count} posts)");

    for post in &page.items {
        let author = post.author_name().unwrap_or_else(|| format!("user {}", post.user_id));
        let state = if post.is_approved { "approved" } else { "pending" };
        println!("#{} [{state}] {author}: {}", post.id, post.post);
    }
}
