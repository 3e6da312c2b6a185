use clap::Parser;

use crate::application::http::query_params::FilterConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "sieve", about = "Filter query adapter")]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SIEVE_SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SIEVE_SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`
    #[arg(long = "server-root-path", env = "SIEVE_SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// tracing-subscriber filter directives, e.g. `info,sieve_core=debug`
    #[arg(long = "log-filter", env = "SIEVE_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "SIEVE_LOG_JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FilterArgs {
    /// Separator for `between` and `in` values
    #[arg(
        long = "filter-list-delimiter",
        env = "SIEVE_FILTER_LIST_DELIMITER",
        default_value_t = ','
    )]
    pub list_delimiter: char,

    #[arg(
        long = "filter-max-conditions",
        env = "SIEVE_FILTER_MAX_CONDITIONS",
        default_value_t = 32
    )]
    pub max_conditions: usize,
}

impl From<FilterArgs> for FilterConfig {
    fn from(args: FilterArgs) -> Self {
        Self {
            list_delimiter: args.list_delimiter,
            max_conditions: args.max_conditions,
        }
    }
}

impl From<Args> for FilterConfig {
    fn from(args: Args) -> Self {
        FilterConfig::from(args.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sieve"]);
        assert_eq!(args.log.filter, "info");
        assert!(!args.log.json);
        assert_eq!(args.server.port, 3333);
        assert_eq!(args.server.root_path, "");

        let config = FilterConfig::from(args);
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "sieve",
            "--log-filter",
            "debug",
            "--log-json",
            "--filter-list-delimiter",
            "|",
            "--filter-max-conditions",
            "4",
        ]);
        assert_eq!(args.log.filter, "debug");
        assert!(args.log.json);

        let config = FilterConfig::from(args);
        assert_eq!(config.list_delimiter, '|');
        assert_eq!(config.max_conditions, 4);
    }
}
