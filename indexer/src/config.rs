use shared::block::BlockHeight;
use shared::log_config::LogConfig;

#[derive(clap::Parser)]
pub struct AppConfig {
    #[clap(long, env)]
    pub tendermint_url: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub chain_id: String,

    #[clap(
        long,
        env,
        default_value_t = 1,
        help = "First height to ingest when the chain has no checkpoint yet"
    )]
    pub from_block_height: BlockHeight,

    #[clap(long, env, default_value_t = 4, help = "RPC client pool size")]
    pub rpc_pool_size: usize,

    #[clap(
        long,
        env,
        default_value_t = 5000,
        help = "Delay between retries of a height, in milliseconds"
    )]
    pub crawl_interval_ms: u64,

    #[clap(flatten)]
    pub log: LogConfig,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_apply() {
        let config = AppConfig::try_parse_from([
            "indexer",
            "--tendermint-url",
            "http://localhost:26657",
            "--database-url",
            "postgres://localhost/indexer",
            "--chain-id",
            "irishub-1",
        ])
        .unwrap();

        assert_eq!(config.from_block_height, 1);
        assert_eq!(config.rpc_pool_size, 4);
        assert_eq!(config.crawl_interval_ms, 5000);
    }
}
