use std::io::Error;

use crate::common::prelude::DEFAULT_SIMILARITY_THRESHOLD;
use crate::config::AppConfig;
use crate::newsapi::prelude::QueryMode;
use crate::pipeline::{PipelineOptions, SourceSelection, DEFAULT_PAGE_SIZE};

#[derive(Clone)]
pub struct CmdArgs {
    pub config: String,
    pub sources: String,
    pub query: String,
    pub headlines: bool,
    pub limit: Option<usize>,
    pub exclude: Option<String>,
    pub threshold: Option<u8>,
    pub daily: bool,
}

impl CmdArgs {
    pub fn parse(args: Vec<String>) -> Result<Self, Error> {
        let mut config = String::from("./config.json");
        let mut sources = String::from("newsapi,hackernews,feeds");
        let mut query = String::from("artificial intelligence");
        let mut headlines = false;
        let mut limit: Option<usize> = None;
        let mut exclude: Option<String> = None;
        let mut threshold: Option<u8> = None;
        let mut daily = false;
        {
            let mut ap = argparse::ArgumentParser::new();
            ap.set_description("AI news digest CLI");
            ap.refer(&mut config).add_option(
                &["-c", "--config"],
                argparse::Store,
                "Config file path; default is config.json",
            );
            ap.refer(&mut sources).add_option(
                &["-s", "--sources"],
                argparse::Store,
                "Comma-separated source set: newsapi,hackernews,feeds",
            );
            ap.refer(&mut query).add_option(
                &["-q", "--query"],
                argparse::Store,
                "Free-text query for the news API",
            );
            ap.refer(&mut headlines).add_option(
                &["-H", "--headlines"],
                argparse::StoreTrue,
                "Query breaking top headlines instead of everything",
            );
            ap.refer(&mut limit).add_option(
                &["-n", "--limit"],
                argparse::StoreOption,
                "Per-source result cap; overrides the config value",
            );
            ap.refer(&mut exclude).add_option(
                &["-x", "--exclude"],
                argparse::StoreOption,
                "Comma-separated exclusion terms; overrides the config value",
            );
            ap.refer(&mut threshold).add_option(
                &["-t", "--threshold"],
                argparse::StoreOption,
                "Duplicate similarity threshold 0-100; overrides the config value",
            );
            ap.refer(&mut daily).add_option(
                &["-d", "--daily"],
                argparse::StoreTrue,
                "Keep running and deliver a digest once a day",
            );

            match ap.parse(args, &mut std::io::stdout(), &mut std::io::stderr()) {
                Ok(()) => {}
                Err(_) => {
                    return Err(Error::from(std::io::ErrorKind::InvalidInput));
                }
            }
        }

        Ok(CmdArgs {
            config,
            sources,
            query,
            headlines,
            limit,
            exclude,
            threshold,
            daily,
        })
    }

    /// Merge CLI overrides over config defaults into one run description.
    #[must_use]
    pub fn pipeline_options(&self, config: &AppConfig) -> PipelineOptions {
        PipelineOptions {
            sources: SourceSelection::from_list(&self.sources),
            mode: if self.headlines {
                QueryMode::TopHeadlines
            } else {
                QueryMode::Everything
            },
            query: self.query.clone(),
            page_size: self.limit.or(config.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            exclude_keywords: self
                .exclude
                .clone()
                .unwrap_or_else(|| config.exclude_keywords.clone()),
            similarity_threshold: self
                .threshold
                .or(config.similarity_threshold)
                .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD),
        }
    }
}
