use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Installs the global fmt subscriber; fails if one is already installed.
pub fn init_tracing(args: &LogArgs) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_new(&args.filter)
        .map_err(|e| anyhow!("invalid log filter `{}`: {}", args.filter, e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if args.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        let args = LogArgs {
            filter: "sieve_core=loud".to_string(),
            json: false,
        };
        let err = init_tracing(&args).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
