//! Logging setup
//!
//! Every component of the crate reports through `tracing`. Applications embedding a
//! balance monitor usually install their own subscriber; `setup_logging` is provided
//! for binaries and tools that do not.
//!
//! The filter is read from `RUST_LOG` and falls back to the given default directive.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Directive used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Install a global subscriber writing compact logs to stdout
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stdout, DEFAULT_LOG_DIRECTIVE)
}

/// Install a global subscriber writing compact logs to `writer`
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging_with_writer<W>(
	writer: W,
	default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				),
		)
		.try_init()?;
	Ok(())
}
